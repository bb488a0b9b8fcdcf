//! Organization store contract.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    actions::ResourceStore, auth::RequestContext, domain::organizations::Organization,
    store::StoreError,
};

/// Organization persistence operations.
#[automock]
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// The organization named `name`, or `None` when there is none.
    async fn get_organization_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Option<Organization>, StoreError>;

    /// Every organization.
    async fn get_organizations(&self, ctx: &RequestContext)
    -> Result<Vec<Organization>, StoreError>;

    /// Insert or replace, keyed by name.
    async fn update_organization(
        &self,
        ctx: &RequestContext,
        org: &Organization,
    ) -> Result<(), StoreError>;

    /// Remove the organization named `name`.
    async fn delete_organization_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: OrganizationStore + ?Sized> ResourceStore<Organization> for T {
    async fn get_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Option<Organization>, StoreError> {
        self.get_organization_by_name(ctx, name).await
    }

    async fn list(&self, ctx: &RequestContext) -> Result<Vec<Organization>, StoreError> {
        self.get_organizations(ctx).await
    }

    async fn update(&self, ctx: &RequestContext, record: &Organization) -> Result<(), StoreError> {
        self.update_organization(ctx, record).await
    }

    async fn delete_by_name(&self, ctx: &RequestContext, name: &str) -> Result<(), StoreError> {
        self.delete_organization_by_name(ctx, name).await
    }
}
