//! Create Organization Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::JsonBody,
    prelude::*,
};

use bastion_app::domain::organizations::Organization;

use crate::{
    actions::into_status_error,
    extensions::*,
    organizations::{
        RESOURCE,
        models::{CreateOrganizationRequest, OrganizationResponse},
    },
    state::State,
};

/// Create Organization Handler
#[endpoint(
    tags("organizations"),
    summary = "Create Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Organization created"),
        (status_code = StatusCode::CONFLICT, description = "Organization already exists"),
        (status_code = StatusCode::FORBIDDEN, description = "Permission denied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrganizationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrganizationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let organization: Organization = json.into_inner().into();

    state
        .app
        .organizations
        .create(ctx, organization.clone())
        .await
        .map_err(|error| into_status_error(error, RESOURCE))?;

    res.add_header(LOCATION, format!("/organizations/{}", organization.name), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(organization.into()))
}

#[cfg(test)]
mod tests {
    use bastion_app::{
        auth::TokenError,
        domain::organizations::MockOrganizationStore,
        policy::{Permission, Rule},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{organization_rules, organizations_service};

    use super::*;

    fn make_service(store: MockOrganizationStore, rules: Vec<Rule>) -> Result<Service, TokenError> {
        organizations_service(store, rules, Router::with_path("organizations").post(handler))
    }

    #[tokio::test]
    async fn test_create_organization_success() -> TestResult {
        let mut store = MockOrganizationStore::new();

        store
            .expect_get_organization_by_name()
            .once()
            .withf(|_, name| name == "acme")
            .return_once(|_, _| Ok(None));

        store
            .expect_update_organization()
            .once()
            .withf(|_, org| *org == Organization::new("acme").with_description("main"))
            .return_once(|_, _| Ok(()));

        let mut res = TestClient::post("http://example.com/organizations")
            .json(&json!({ "name": "acme", "description": "main" }))
            .send(&make_service(store, organization_rules(&[Permission::Create]))?)
            .await;

        let body: OrganizationResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/organizations/acme"));
        assert_eq!(body.name, "acme");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_existing_organization_returns_409() -> TestResult {
        let mut store = MockOrganizationStore::new();

        store
            .expect_get_organization_by_name()
            .once()
            .return_once(|_, _| Ok(Some(Organization::new("acme"))));

        store.expect_update_organization().never();

        let res = TestClient::post("http://example.com/organizations")
            .json(&json!({ "name": "acme" }))
            .send(&make_service(store, organization_rules(&[Permission::Create]))?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_without_permission_returns_403() -> TestResult {
        let mut store = MockOrganizationStore::new();

        store.expect_get_organization_by_name().never();
        store.expect_update_organization().never();

        let res = TestClient::post("http://example.com/organizations")
            .json(&json!({ "name": "acme" }))
            .send(&make_service(store, organization_rules(&[Permission::Read]))?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_invalid_name_returns_400() -> TestResult {
        let mut store = MockOrganizationStore::new();

        store.expect_get_organization_by_name().never();
        store.expect_update_organization().never();

        let res = TestClient::post("http://example.com/organizations")
            .json(&json!({ "name": "Acme Corp" }))
            .send(&make_service(store, organization_rules(&[Permission::Create]))?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
