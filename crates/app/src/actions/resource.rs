//! Contracts a resource type fulfils to be served by an [`ActionController`].
//!
//! [`ActionController`]: crate::actions::ActionController

use async_trait::async_trait;

use crate::{
    auth::RequestContext, domain::validation::ValidationError, policy::Scope, store::StoreError,
};

/// A named, validated record guarded by rules over [`Resource::RESOURCE_TYPE`].
pub trait Resource: Clone + Send + Sync + 'static {
    /// Resource type name rules refer to.
    const RESOURCE_TYPE: &'static str;

    /// Identity key, unique within the store.
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Returns the first field that fails validation.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Scope a record named `name` lives in for the requester in `ctx`.
    fn scope_for(_name: &str, ctx: &RequestContext) -> Scope {
        ctx.scope().clone()
    }

    /// Scope this record lives in.
    fn scope(&self, ctx: &RequestContext) -> Scope {
        Self::scope_for(self.name(), ctx)
    }
}

/// Store operations an [`ActionController`] performs.
///
/// Absence is `Ok(None)`, not an error. `update` upserts by name.
///
/// [`ActionController`]: crate::actions::ActionController
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    /// The record named `name`, if any.
    async fn get_by_name(&self, ctx: &RequestContext, name: &str) -> Result<Option<R>, StoreError>;

    /// Every record of this type.
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<R>, StoreError>;

    /// Insert or replace `record`.
    async fn update(&self, ctx: &RequestContext, record: &R) -> Result<(), StoreError>;

    /// Remove the record named `name`.
    async fn delete_by_name(&self, ctx: &RequestContext, name: &str) -> Result<(), StoreError>;
}
