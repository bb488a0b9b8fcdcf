//! Organization Records

use serde::{Deserialize, Serialize};

use crate::{
    actions::Resource,
    auth::RequestContext,
    domain::validation::{ValidationError, validate_name},
    policy::{RULE_TYPE_ORGANIZATION, Scope},
};

/// Organization Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique organization name.
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Organization {
    /// Organization without a description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Resource for Organization {
    const RESOURCE_TYPE: &'static str = RULE_TYPE_ORGANIZATION;

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    /// An organization is scoped to itself within the requester's environment.
    fn scope_for(name: &str, ctx: &RequestContext) -> Scope {
        Scope::new(name, ctx.scope().environment.clone())
    }
}
