//! List Organizations Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    actions::into_status_error,
    extensions::*,
    organizations::{RESOURCE, models::OrganizationResponse},
    state::State,
};

/// List Organizations Handler
///
/// Returns every organization the caller may read.
#[endpoint(
    tags("organizations"),
    summary = "List Organizations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<OrganizationResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let organizations = state
        .app
        .organizations
        .query(ctx)
        .await
        .map_err(|error| into_status_error(error, RESOURCE))?;

    Ok(Json(organizations.into_iter().map(Into::into).collect()))
}
