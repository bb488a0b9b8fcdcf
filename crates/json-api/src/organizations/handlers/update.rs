//! Update Organization Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    actions::into_status_error,
    extensions::*,
    organizations::{
        RESOURCE,
        models::{OrganizationResponse, UpdateOrganizationRequest},
    },
    state::State,
};

/// Update Organization Handler
#[endpoint(
    tags("organizations"),
    summary = "Update Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Organization updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Permission denied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    json: JsonBody<UpdateOrganizationRequest>,
    depot: &mut Depot,
) -> Result<Json<OrganizationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let organization = json.into_inner().into_organization(name.into_inner());

    state
        .app
        .organizations
        .update(ctx, organization.clone())
        .await
        .map_err(|error| into_status_error(error, RESOURCE))?;

    Ok(Json(organization.into()))
}
