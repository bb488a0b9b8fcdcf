//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{
        AuthService, RoleBindingStore, SecretError, SecretManager, SecretStore, TokenAuthService,
        TokenCodec,
    },
    domain::organizations::{OrganizationStore, OrganizationsController},
};

/// Failure to build the [`AppContext`].
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The signing secret could not be loaded or created.
    #[error("failed to initialise the token signing secret")]
    Secret(#[source] SecretError),
}

/// Services shared by every request.
#[derive(Clone)]
pub struct AppContext {
    /// Bearer authentication, issuance and refresh.
    pub auth: Arc<dyn AuthService>,

    /// Permission-checked organization actions.
    pub organizations: OrganizationsController,

    /// Owner of the signing secret the token codec was built from.
    pub secrets: Arc<SecretManager>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("organizations", &self.organizations)
            .field("secrets", &self.secrets)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context on top of a store implementing every
    /// contract.
    ///
    /// The signing secret is bootstrapped here, before any request is served.
    ///
    /// # Errors
    ///
    /// Returns an error when the signing secret can neither be loaded nor
    /// created.
    pub async fn from_store<S>(store: Arc<S>) -> Result<Self, AppInitError>
    where
        S: SecretStore + RoleBindingStore + OrganizationStore + 'static,
    {
        let secrets = Arc::new(SecretManager::new());

        let secret = secrets
            .init_secret(store.as_ref())
            .await
            .map_err(AppInitError::Secret)?
            .clone();

        let tokens = TokenCodec::new(secret);
        let bindings: Arc<dyn RoleBindingStore> = store.clone();
        let organizations: Arc<dyn OrganizationStore> = store;

        info!("application context ready");

        Ok(Self {
            auth: Arc::new(TokenAuthService::new(tokens, bindings)),
            organizations: OrganizationsController::new(organizations),
            secrets,
        })
    }

    /// Whether tokens can be issued and verified.
    #[must_use]
    pub fn signing_secret_ready(&self) -> bool {
        self.secrets.secret().is_some()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::RequestContext,
        domain::organizations::Organization,
        policy::Rule,
        store::{MemoryStore, StoreError},
    };

    use super::*;

    #[tokio::test]
    async fn issued_tokens_authenticate_with_bound_rules() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        store.bind_rules("admin", [Rule::admin()]).await;

        let app = AppContext::from_store(Arc::clone(&store)).await?;

        let pair = app.auth.issue_tokens("admin").await?;
        let identity = app.auth.authenticate_bearer(&pair.access_token).await?;

        assert_eq!(identity.subject(), "admin");
        assert_eq!(identity.rules, vec![Rule::admin()]);

        let ctx = RequestContext::new()
            .set_claims(&identity.token)
            .with_rules(identity.rules);

        app.organizations
            .create(&ctx, Organization::new("acme"))
            .await?;

        assert_eq!(app.organizations.query(&ctx).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn contexts_sharing_a_store_share_the_secret() -> TestResult {
        let store = Arc::new(MemoryStore::new());

        let first = AppContext::from_store(Arc::clone(&store)).await?;
        let second = AppContext::from_store(store).await?;

        let pair = first.auth.issue_tokens("alice").await?;
        let identity = second.auth.authenticate_bearer(&pair.access_token).await?;

        assert_eq!(identity.subject(), "alice");
        assert!(first.signing_secret_ready(), "secret is bootstrapped on build");

        Ok(())
    }

    #[test]
    fn secret_failures_are_reported() {
        let error = AppInitError::Secret(SecretError::Store(StoreError::backend("read only")));

        assert_eq!(
            error.to_string(),
            "failed to initialise the token signing secret"
        );
    }
}
