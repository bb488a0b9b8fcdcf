//! Rules, permissions and scopes.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Matches any resource type, organization or environment.
pub const WILDCARD: &str = "*";

/// Resource type name used by organization rules.
pub const RULE_TYPE_ORGANIZATION: &str = "organizations";

/// An action a rule may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Create a record.
    Create,
    /// List or fetch records.
    Read,
    /// Replace an existing record.
    Update,
    /// Remove a record.
    Delete,
}

impl Permission {
    /// Every permission, in declaration order.
    pub const ALL: [Self; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    /// Lowercase name as used in serialized rules.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organization/environment boundary of a rule or a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// Organization name, or [`WILDCARD`].
    pub organization: String,
    /// Environment name, or [`WILDCARD`].
    pub environment: String,
}

impl Scope {
    /// Scope of one organization and environment. Either may be [`WILDCARD`].
    #[must_use]
    pub fn new(organization: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            environment: environment.into(),
        }
    }

    /// Scope covering every organization and environment.
    #[must_use]
    pub fn any() -> Self {
        Self::new(WILDCARD, WILDCARD)
    }

    /// Whether this scope is equal to, or a wildcard superset of, `requested`.
    #[must_use]
    pub fn covers(&self, requested: &Scope) -> bool {
        covers(&self.organization, &requested.organization)
            && covers(&self.environment, &requested.environment)
    }
}

/// A grant of permissions over one resource type within a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Resource type name, or [`WILDCARD`].
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Scope the grant applies to.
    #[serde(flatten)]
    pub scope: Scope,

    /// Granted permissions.
    pub permissions: SmallVec<[Permission; 4]>,
}

impl Rule {
    /// Rule over `resource_type` valid in every organization and environment.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, permissions: &[Permission]) -> Self {
        Self {
            resource_type: resource_type.into(),
            scope: Scope::any(),
            permissions: permissions.iter().copied().collect(),
        }
    }

    /// Restrict this rule to `scope`.
    #[must_use]
    pub fn scoped(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Every permission on every resource type everywhere.
    #[must_use]
    pub fn admin() -> Self {
        Self::new(WILDCARD, &Permission::ALL)
    }

    /// Whether this rule grants `permission` on `resource_type` within `scope`.
    #[must_use]
    pub fn grants(&self, resource_type: &str, permission: Permission, scope: &Scope) -> bool {
        covers(&self.resource_type, resource_type)
            && self.permissions.contains(&permission)
            && self.scope.covers(scope)
    }
}

fn covers(granted: &str, requested: &str) -> bool {
    granted == WILDCARD || granted == requested
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_scope_covers_everything() {
        assert!(Scope::any().covers(&Scope::new("acme", "prod")));
        assert!(Scope::any().covers(&Scope::new("", "")));
    }

    #[test]
    fn concrete_scope_does_not_cover_other_organizations() {
        let scope = Scope::new("acme", WILDCARD);

        assert!(scope.covers(&Scope::new("acme", "prod")));
        assert!(!scope.covers(&Scope::new("globex", "prod")));
    }

    #[test]
    fn requested_wildcard_is_not_covered_by_concrete_scope() {
        let scope = Scope::new("acme", "prod");

        assert!(!scope.covers(&Scope::new(WILDCARD, "prod")));
    }

    #[test]
    fn rule_requires_matching_type_and_permission() {
        let rule = Rule::new(RULE_TYPE_ORGANIZATION, &[Permission::Read]);
        let scope = Scope::new("default", "default");

        assert!(rule.grants(RULE_TYPE_ORGANIZATION, Permission::Read, &scope));
        assert!(!rule.grants(RULE_TYPE_ORGANIZATION, Permission::Update, &scope));
        assert!(!rule.grants("checks", Permission::Read, &scope));
    }

    #[test]
    fn rule_serializes_with_flattened_scope() -> testresult::TestResult {
        let rule = Rule::new(RULE_TYPE_ORGANIZATION, &[Permission::Create]);
        let json = serde_json::to_value(&rule)?;

        assert_eq!(
            json,
            serde_json::json!({
                "type": "organizations",
                "organization": "*",
                "environment": "*",
                "permissions": ["create"],
            })
        );

        Ok(())
    }
}
