//! Depot helper extensions.

use std::any::Any;

use bastion_app::auth::RequestContext;
use salvo::prelude::{Depot, StatusError};

/// Request context bound by the auth middleware.
///
/// Stored under this private type so nothing outside this module can read or
/// overwrite it.
struct BoundContext(RequestContext);

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_request_context(&mut self, ctx: RequestContext);

    /// The bound request context, or 401 when the request never passed the
    /// auth middleware.
    fn request_context_or_401(&self) -> Result<&RequestContext, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_request_context(&mut self, ctx: RequestContext) {
        self.inject(BoundContext(ctx));
    }

    fn request_context_or_401(&self) -> Result<&RequestContext, StatusError> {
        self.obtain::<BoundContext>()
            .map(|bound| &bound.0)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_context_is_unauthorized() {
        let depot = Depot::new();

        let status = depot.request_context_or_401().err().map(|error| error.code);

        assert_eq!(status, Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn bound_context_is_returned() {
        let mut depot = Depot::new();

        depot.insert_request_context(RequestContext::new());

        let ctx = depot.request_context_or_401();

        assert!(
            ctx.is_ok_and(|ctx| ctx.claims().is_none()),
            "expected the bound context"
        );
    }
}
