//! Get Organization Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    actions::into_status_error,
    extensions::*,
    organizations::{RESOURCE, models::OrganizationResponse},
    state::State,
};

/// Get Organization Handler
///
/// Organizations the caller may not read are reported as missing.
#[endpoint(
    tags("organizations"),
    summary = "Get Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Organization found"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrganizationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let organization = state
        .app
        .organizations
        .find(ctx, &name.into_inner())
        .await
        .map_err(|error| into_status_error(error, RESOURCE))?;

    Ok(Json(organization.into()))
}

#[cfg(test)]
mod tests {
    use bastion_app::{
        auth::TokenError,
        domain::organizations::{MockOrganizationStore, Organization},
        policy::{Permission, Rule},
        store::StoreError,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{organization_rules, organizations_service};

    use super::*;

    fn make_service(store: MockOrganizationStore, rules: Vec<Rule>) -> Result<Service, TokenError> {
        organizations_service(
            store,
            rules,
            Router::with_path("organizations/{name}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let mut store = MockOrganizationStore::new();

        store
            .expect_get_organization_by_name()
            .once()
            .withf(|_, name| name == "acme")
            .return_once(|_, _| Ok(Some(Organization::new("acme").with_description("main"))));

        let mut res = TestClient::get("http://example.com/organizations/acme")
            .send(&make_service(store, organization_rules(&[Permission::Read]))?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrganizationResponse = res.take_json().await?;

        assert_eq!(body.name, "acme");
        assert_eq!(body.description.as_deref(), Some("main"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_organization_returns_404() -> TestResult {
        let mut store = MockOrganizationStore::new();

        store
            .expect_get_organization_by_name()
            .once()
            .return_once(|_, _| Ok(None));

        let res = TestClient::get("http://example.com/organizations/acme")
            .send(&make_service(store, organization_rules(&[Permission::Read]))?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_without_read_permission_returns_404() -> TestResult {
        let mut store = MockOrganizationStore::new();

        store.expect_get_organization_by_name().never();

        let res = TestClient::get("http://example.com/organizations/acme")
            .send(&make_service(store, organization_rules(&[Permission::Create]))?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_store_failure_returns_500() -> TestResult {
        let mut store = MockOrganizationStore::new();

        store
            .expect_get_organization_by_name()
            .once()
            .return_once(|_, _| Err(StoreError::backend("unavailable")));

        let res = TestClient::get("http://example.com/organizations/acme")
            .send(&make_service(store, organization_rules(&[Permission::Read]))?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
