//! Action error mapping.

use bastion_app::actions::ActionError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: ActionError, resource: &str) -> StatusError {
    match error {
        ActionError::NotFound => StatusError::not_found().brief(format!("{resource} not found")),
        ActionError::AlreadyExists => {
            StatusError::conflict().brief(format!("{resource} already exists"))
        }
        ActionError::PermissionDenied => StatusError::forbidden().brief("Permission denied"),
        ActionError::InvalidArgument(source) => StatusError::bad_request().brief(source.to_string()),
        ActionError::Internal(source) => {
            error!(resource, "store failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
