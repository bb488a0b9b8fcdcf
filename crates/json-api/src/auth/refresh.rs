//! Token Refresh Handler

use std::{string::ToString, sync::Arc};

use bastion_app::auth::TokenPair;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::into_status_error, extensions::*, state::State};

/// Refresh Token Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefreshTokenRequest {
    /// Access token to replace. May be expired.
    pub access_token: String,

    /// Refresh token issued alongside it.
    pub refresh_token: String,
}

/// Token Pair Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenPairResponse {
    pub access_token: String,

    pub refresh_token: String,

    /// When the access token expires
    pub expires_at: Option<String>,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        TokenPairResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_at: pair.expires_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Refresh Token Handler
///
/// Exchanges an access token and its refresh token for a new pair.
#[endpoint(
    tags("auth"),
    summary = "Refresh Tokens",
    responses(
        (status_code = StatusCode::OK, description = "New token pair"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Token rejected"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RefreshTokenRequest>,
    depot: &mut Depot,
) -> Result<Json<TokenPairResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let pair = state
        .app
        .auth
        .refresh_tokens(&request.access_token, &request.refresh_token)
        .await
        .map_err(into_status_error)?;

    Ok(Json(pair.into()))
}
