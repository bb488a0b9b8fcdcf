//! Policy evaluation.

use tracing::trace;

use crate::policy::{Permission, Rule, Scope};

/// Evaluates a requester's rule set against a requested action.
///
/// Deny is the default: access is granted only when at least one rule
/// explicitly grants the requested permission on the requested resource type
/// within a scope covering the requested one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyEngine;

impl PolicyEngine {
    /// Engine denying anything no rule grants.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns `true` on the first rule granting the request.
    #[must_use]
    pub fn evaluate(
        &self,
        rules: &[Rule],
        resource_type: &str,
        permission: Permission,
        scope: &Scope,
    ) -> bool {
        let allowed = rules
            .iter()
            .any(|rule| rule.grants(resource_type, permission, scope));

        trace!(
            resource_type,
            %permission,
            organization = %scope.organization,
            environment = %scope.environment,
            allowed,
            "policy evaluated"
        );

        allowed
    }
}
