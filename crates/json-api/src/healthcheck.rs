//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` once tokens can be issued, `unavailable` before.
    pub status: String,

    /// Whether the token signing secret has been bootstrapped.
    pub signing_secret: bool,

    /// Server version
    pub version: String,
}

/// Healthcheck handler
///
/// Reports 503 until the signing secret is bootstrapped.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Ready to authenticate requests"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Signing secret missing"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let signing_secret = state.app.signing_secret_ready();

    if !signing_secret {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(HealthResponse {
        status: if signing_secret { "ok" } else { "unavailable" }.to_owned(),
        signing_secret,
        version: env!("CARGO_PKG_VERSION").to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::state_without_secret;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_without_secret_is_unavailable() -> TestResult {
        let router = Router::new()
            .hoop(inject(state_without_secret()))
            .push(Router::with_path("healthcheck").get(handler));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(response.status, "unavailable");
        assert!(!response.signing_secret, "secret was never bootstrapped");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));

        Ok(())
    }
}
