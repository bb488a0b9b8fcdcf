//! Auth middleware.

use std::sync::Arc;

use bastion_app::{
    auth::{DEFAULT_ENVIRONMENT, DEFAULT_ORGANIZATION, RequestContext},
    policy::Scope,
};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tokio_util::sync::CancellationToken;

use crate::{auth::into_status_error, extensions::*, state::State};

const BEARER_PREFIX: &str = "Bearer ";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let token = extract_bearer_token(req);

    if token.is_empty() {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    }

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let identity = match state.app.auth.authenticate_bearer(token).await {
        Ok(identity) => identity,
        Err(error) => {
            res.render(into_status_error(error));

            return;
        }
    };

    // Cancelled when this request's future is dropped, e.g. on disconnect.
    let cancellation = CancellationToken::new();
    let _cancel_on_drop = cancellation.clone().drop_guard();

    let ctx = RequestContext::new()
        .set_claims(&identity.token)
        .with_rules(identity.rules)
        .with_scope(requested_scope(req))
        .with_cancellation(cancellation)
        .with_timeout(state.store_timeout);

    depot.insert_request_context(ctx);

    ctrl.call_next(req, depot, res).await;
}

/// The `Authorization` header with a literal `Bearer ` prefix removed.
///
/// Returns an empty string when the header is absent or not valid text.
pub(crate) fn extract_bearer_token(req: &Request) -> &str {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map_or("", |value| value.strip_prefix(BEARER_PREFIX).unwrap_or(value))
}

fn requested_scope(req: &Request) -> Scope {
    Scope::new(
        req.query::<String>("org")
            .unwrap_or_else(|| DEFAULT_ORGANIZATION.to_owned()),
        req.query::<String>("env")
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned()),
    )
}
