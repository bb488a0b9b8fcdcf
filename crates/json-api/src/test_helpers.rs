//! Test helpers.

use std::sync::Arc;

use bastion_app::{
    auth::{
        AuthService, Identity, MockAuthService, RequestContext, SecretManager, SigningSecret,
        TokenCodec, TokenError,
    },
    context::AppContext,
    domain::organizations::{MockOrganizationStore, OrganizationStore, OrganizationsController},
    policy::{Permission, RULE_TYPE_ORGANIZATION, Rule},
};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_SUBJECT: &str = "tester";

/// Binds a fixed request context, standing in for the auth middleware.
struct InjectContext(RequestContext);

#[salvo::handler]
impl InjectContext {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_request_context(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

fn test_codec() -> TokenCodec {
    TokenCodec::new(SigningSecret::from_bytes(vec![0x42; 32]))
}

/// Identity for `subject` carrying a genuinely verified token.
pub(crate) fn identity_for(subject: &str, rules: Vec<Rule>) -> Result<Identity, TokenError> {
    let codec = test_codec();
    let issued = codec.access_token(subject)?;

    Ok(Identity {
        token: codec.validate_token(&issued.token)?,
        rules,
    })
}

pub(crate) fn organization_rules(permissions: &[Permission]) -> Vec<Rule> {
    vec![Rule::new(RULE_TYPE_ORGANIZATION, permissions)]
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();
    auth.expect_issue_tokens().never();
    auth.expect_refresh_tokens().never();

    auth
}

fn strict_organizations_mock() -> MockOrganizationStore {
    let mut store = MockOrganizationStore::new();

    store.expect_get_organization_by_name().never();
    store.expect_get_organizations().never();
    store.expect_update_organization().never();
    store.expect_delete_organization_by_name().never();

    store
}

fn state_with(auth: MockAuthService, organizations: MockOrganizationStore) -> Arc<State> {
    let auth: Arc<dyn AuthService> = Arc::new(auth);
    let organizations: Arc<dyn OrganizationStore> = Arc::new(organizations);

    State::new(AppContext {
        auth,
        organizations: OrganizationsController::new(organizations),
        secrets: Arc::new(SecretManager::new()),
    })
    .into_shared()
}

/// State whose signing secret was never bootstrapped.
pub(crate) fn state_without_secret() -> Arc<State> {
    state_with(strict_auth_mock(), strict_organizations_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(auth, strict_organizations_mock())
}

pub(crate) fn organizations_service(
    organizations: MockOrganizationStore,
    rules: Vec<Rule>,
    route: Router,
) -> Result<Service, TokenError> {
    let identity = identity_for(TEST_SUBJECT, rules)?;

    let ctx = RequestContext::new()
        .set_claims(&identity.token)
        .with_rules(identity.rules);

    Ok(Service::new(
        Router::new()
            .hoop(inject(state_with(strict_auth_mock(), organizations)))
            .hoop(InjectContext(ctx))
            .push(route),
    ))
}
