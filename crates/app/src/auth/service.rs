//! Auth service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::auth::{
    AuthServiceError, Identity, RoleBindingStore, TokenCodec, TokenPair,
};

/// Authenticates bearer tokens and runs the token refresh flow.
#[derive(Clone)]
pub struct TokenAuthService {
    tokens: TokenCodec,
    bindings: Arc<dyn RoleBindingStore>,
}

impl TokenAuthService {
    /// Service verifying with `tokens` and resolving rules through `bindings`.
    #[must_use]
    pub fn new(tokens: TokenCodec, bindings: Arc<dyn RoleBindingStore>) -> Self {
        Self { tokens, bindings }
    }
}

impl fmt::Debug for TokenAuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthService")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for TokenAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        let token = self.tokens.validate_token(bearer_token)?;

        // Refresh tokens never expire and must not stand in for access tokens.
        if token.claims().exp.is_none() {
            warn!("refresh token presented as bearer credential");

            return Err(AuthServiceError::Unauthenticated);
        }

        let rules = self
            .bindings
            .get_rules_for_subject(token.claims().subject())
            .await?;

        debug!(
            subject = token.claims().subject(),
            rules = rules.len(),
            "authenticated bearer token"
        );

        Ok(Identity { token, rules })
    }

    async fn issue_tokens(&self, username: &str) -> Result<TokenPair, AuthServiceError> {
        let access = self.tokens.access_token(username)?;
        let refresh_token = self.tokens.refresh_token(username)?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token,
            expires_at: access.claims.expires_at(),
        })
    }

    async fn refresh_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, AuthServiceError> {
        let access = self.tokens.validate_expired_token(access_token)?;
        let refresh = self.tokens.validate_token(refresh_token)?;

        if access.claims().exp.is_none() || refresh.claims().exp.is_some() {
            warn!("token kinds swapped in refresh request");

            return Err(AuthServiceError::Unauthenticated);
        }

        if access.claims().subject() != refresh.claims().subject() {
            warn!("refresh token subject does not match access token subject");

            return Err(AuthServiceError::Unauthenticated);
        }

        self.issue_tokens(access.claims().subject()).await
    }
}

/// Authentication operations exposed to the transport layer.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate an access token and resolve its subject's rule set.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;

    /// Issue a new access/refresh token pair for `username`.
    async fn issue_tokens(&self, username: &str) -> Result<TokenPair, AuthServiceError>;

    /// Exchange a possibly expired access token and its refresh token for a
    /// new pair.
    async fn refresh_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::{
        auth::{MockRoleBindingStore, SigningSecret},
        policy::{Permission, RULE_TYPE_ORGANIZATION, Rule},
        store::StoreError,
    };

    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(SigningSecret::from_bytes(vec![0x11; 32]))
    }

    fn service(bindings: MockRoleBindingStore) -> TokenAuthService {
        TokenAuthService::new(codec(), Arc::new(bindings))
    }

    fn strict_bindings() -> MockRoleBindingStore {
        let mut bindings = MockRoleBindingStore::new();

        bindings.expect_get_rules_for_subject().never();

        bindings
    }

    #[tokio::test]
    async fn valid_bearer_resolves_rules() -> TestResult {
        let mut bindings = MockRoleBindingStore::new();

        bindings
            .expect_get_rules_for_subject()
            .once()
            .withf(|subject| subject == "alice")
            .return_once(|_| Ok(vec![Rule::new(RULE_TYPE_ORGANIZATION, &[Permission::Read])]));

        let token = codec().access_token("alice")?.token;
        let identity = service(bindings).authenticate_bearer(&token).await?;

        assert_eq!(identity.subject(), "alice");
        assert_eq!(identity.rules.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn empty_bearer_is_unauthenticated() {
        let result = service(strict_bindings()).authenticate_bearer("").await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
    }

    #[tokio::test]
    async fn expired_bearer_reports_expiry() -> TestResult {
        let expired_at = Timestamp::now().checked_sub(SignedDuration::from_secs(5))?;
        let token = codec().issue("alice", Some(expired_at))?.token;

        let result = service(strict_bindings()).authenticate_bearer(&token).await;

        assert!(
            matches!(result, Err(AuthServiceError::Expired)),
            "expected Expired, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn rule_resolution_failure_is_a_store_error() -> TestResult {
        let mut bindings = MockRoleBindingStore::new();

        bindings
            .expect_get_rules_for_subject()
            .once()
            .return_once(|_| Err(StoreError::backend("unreachable")));

        let token = codec().access_token("alice")?.token;
        let result = service(bindings).authenticate_bearer(&token).await;

        assert!(
            matches!(result, Err(AuthServiceError::Store(_))),
            "expected Store, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issued_pair_validates() -> TestResult {
        let pair = service(strict_bindings()).issue_tokens("alice").await?;

        let codec = codec();
        let access = codec.validate_token(&pair.access_token)?;
        let refresh = codec.validate_token(&pair.refresh_token)?;

        assert_eq!(access.claims().subject(), "alice");
        assert_eq!(refresh.claims().subject(), "alice");
        assert_eq!(refresh.claims().exp, None);
        assert_eq!(pair.expires_at, access.claims().expires_at());

        Ok(())
    }

    #[tokio::test]
    async fn expired_access_token_can_be_refreshed() -> TestResult {
        let codec = codec();
        let expired_at = Timestamp::now().checked_sub(SignedDuration::from_mins(30))?;
        let access = codec.issue("alice", Some(expired_at))?.token;
        let refresh = codec.refresh_token("alice")?;

        let pair = service(strict_bindings())
            .refresh_tokens(&access, &refresh)
            .await?;

        let renewed = codec.validate_token(&pair.access_token)?;

        assert_eq!(renewed.claims().subject(), "alice");

        Ok(())
    }

    #[tokio::test]
    async fn refresh_for_another_subject_is_refused() -> TestResult {
        let codec = codec();
        let access = codec.access_token("alice")?.token;
        let refresh = codec.refresh_token("mallory")?;

        let result = service(strict_bindings())
            .refresh_tokens(&access, &refresh)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn forged_access_token_cannot_be_refreshed() -> TestResult {
        let foreign = TokenCodec::new(SigningSecret::from_bytes(vec![0x99; 32]));
        let access = foreign.access_token("alice")?.token;
        let refresh = codec().refresh_token("alice")?;

        let result = service(strict_bindings())
            .refresh_tokens(&access, &refresh)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn refresh_token_is_not_a_bearer_credential() -> TestResult {
        let refresh = codec().refresh_token("alice")?;

        let result = service(strict_bindings())
            .authenticate_bearer(&refresh)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn access_token_cannot_stand_in_for_refresh_token() -> TestResult {
        let access = codec().access_token("alice")?.token;

        let result = service(strict_bindings())
            .refresh_tokens(&access, &access)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn refresh_token_cannot_stand_in_for_access_token() -> TestResult {
        let refresh = codec().refresh_token("alice")?;

        let result = service(strict_bindings())
            .refresh_tokens(&refresh, &refresh)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );

        Ok(())
    }
}
