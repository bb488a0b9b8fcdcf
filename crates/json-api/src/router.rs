//! App Router

use std::sync::Arc;

use salvo::{
    Router,
    affix_state::inject,
    catch_panic::CatchPanic,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    trailing_slash::remove_slash,
};

use crate::{auth, healthcheck, observability::request_logging, organizations, state::State};

/// Routes that require a bearer token.
pub(crate) fn authenticated_router() -> Router {
    Router::new().hoop(auth::middleware::handler).push(
        Router::with_path("organizations")
            .get(organizations::index::handler)
            .post(organizations::create::handler)
            .push(
                Router::with_path("{name}")
                    .get(organizations::get::handler)
                    .put(organizations::update::handler)
                    .delete(organizations::delete::handler),
            ),
    )
}

/// The full application with documentation routes.
pub(crate) fn app_router(state: Arc<State>) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("auth/token/refresh").post(auth::refresh::handler))
        .push(authenticated_router());

    let doc = OpenApi::new("Bastion API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}
