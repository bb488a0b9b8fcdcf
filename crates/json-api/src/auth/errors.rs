//! Auth error mapping.

use bastion_app::auth::AuthServiceError;
use salvo::http::StatusError;
use tracing::error;

/// Rejections only say whether the token was expired or invalid.
pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::Expired => StatusError::unauthorized().brief("Token expired"),
        AuthServiceError::Unauthenticated => StatusError::unauthorized().brief("Invalid token"),
        AuthServiceError::Token(source) => {
            error!("failed to process token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Store(source) => {
            error!("failed to resolve rules for token subject: {source}");

            StatusError::internal_server_error()
        }
    }
}
