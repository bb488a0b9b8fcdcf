//! Store contracts consumed by authentication.

use async_trait::async_trait;
use mockall::automock;

use crate::{policy::Rule, store::StoreError};

/// Durable storage of the token signing secret.
#[automock]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the persisted secret. Any error is treated as "absent".
    async fn get_jwt_secret(&self) -> Result<Vec<u8>, StoreError>;

    /// Persist a newly generated secret.
    async fn create_jwt_secret(&self, secret: &[u8]) -> Result<(), StoreError>;
}

/// Resolves the rule set bound to a subject through its role bindings.
#[automock]
#[async_trait]
pub trait RoleBindingStore: Send + Sync {
    /// Union of every rule bound to `subject`. Unknown subjects have none.
    async fn get_rules_for_subject(&self, subject: &str) -> Result<Vec<Rule>, StoreError>;
}
