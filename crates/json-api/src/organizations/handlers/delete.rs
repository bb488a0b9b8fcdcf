//! Delete Organization Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{actions::into_status_error, extensions::*, organizations::RESOURCE, state::State};

/// Delete Organization Handler
#[endpoint(
    tags("organizations"),
    summary = "Delete Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Organization deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Permission denied"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    state
        .app
        .organizations
        .destroy(ctx, &name.into_inner())
        .await
        .map_err(|error| into_status_error(error, RESOURCE))?;

    Ok(StatusCode::OK)
}
