//! In-memory store.
//!
//! Implements every store contract with maps guarded by `tokio::sync::RwLock`.
//! State is lost on restart and is not shared between processes.

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    auth::{RequestContext, RoleBindingStore, SecretStore},
    domain::organizations::{Organization, OrganizationStore},
    policy::Rule,
    store::StoreError,
};

#[derive(Debug, Default)]
struct Inner {
    secret: RwLock<Option<Vec<u8>>>,
    organizations: RwLock<FxHashMap<String, Organization>>,
    bindings: RwLock<FxHashMap<String, Vec<Rule>>>,
}

/// Process-local store. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Empty store with no secret, organizations or bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `rules` to the rule set bound to `subject`.
    pub async fn bind_rules(
        &self,
        subject: impl Into<String>,
        rules: impl IntoIterator<Item = Rule>,
    ) {
        let subject = subject.into();
        let mut bindings = self.inner.bindings.write().await;
        let bound = bindings.entry(subject.clone()).or_default();

        bound.extend(rules);

        debug!(subject, rules = bound.len(), "bound rules");
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn get_jwt_secret(&self) -> Result<Vec<u8>, StoreError> {
        self.inner
            .secret
            .read()
            .await
            .clone()
            .ok_or(StoreError::NotFound)
    }

    async fn create_jwt_secret(&self, secret: &[u8]) -> Result<(), StoreError> {
        let mut slot = self.inner.secret.write().await;

        if slot.is_some() {
            return Err(StoreError::backend("jwt secret already exists"));
        }

        *slot = Some(secret.to_vec());

        Ok(())
    }
}

#[async_trait]
impl RoleBindingStore for MemoryStore {
    async fn get_rules_for_subject(&self, subject: &str) -> Result<Vec<Rule>, StoreError> {
        Ok(self
            .inner
            .bindings
            .read()
            .await
            .get(subject)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl OrganizationStore for MemoryStore {
    async fn get_organization_by_name(
        &self,
        _ctx: &RequestContext,
        name: &str,
    ) -> Result<Option<Organization>, StoreError> {
        Ok(self.inner.organizations.read().await.get(name).cloned())
    }

    async fn get_organizations(
        &self,
        _ctx: &RequestContext,
    ) -> Result<Vec<Organization>, StoreError> {
        let mut organizations: Vec<_> = self
            .inner
            .organizations
            .read()
            .await
            .values()
            .cloned()
            .collect();

        organizations.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(organizations)
    }

    async fn update_organization(
        &self,
        _ctx: &RequestContext,
        org: &Organization,
    ) -> Result<(), StoreError> {
        self.inner
            .organizations
            .write()
            .await
            .insert(org.name.clone(), org.clone());

        Ok(())
    }

    async fn delete_organization_by_name(
        &self,
        _ctx: &RequestContext,
        name: &str,
    ) -> Result<(), StoreError> {
        self.inner
            .organizations
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
