//! Request-scoped carrier for verified claims and authorization inputs.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::{Instant, timeout_at};
use tokio_util::sync::CancellationToken;

use crate::{
    auth::{Claims, VerifiedToken},
    policy::{Rule, Scope},
    store::StoreError,
};

/// Organization assumed when a request names none.
pub const DEFAULT_ORGANIZATION: &str = "default";

/// Environment assumed when a request names none.
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Everything an action needs to know about the request it serves.
///
/// Claims can only be bound through [`RequestContext::set_claims`] and read
/// through [`RequestContext::claims`]; there is no public key to collide with.
#[derive(Debug, Clone)]
pub struct RequestContext {
    claims: Option<Arc<Claims>>,
    rules: Arc<[Rule]>,
    scope: Scope,
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestContext {
    /// Unauthenticated context in the default organization and environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            claims: None,
            rules: Arc::from(Vec::new()),
            scope: Scope::new(DEFAULT_ORGANIZATION, DEFAULT_ENVIRONMENT),
            cancellation: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Bind the claims of a verified token.
    #[must_use]
    pub fn set_claims(mut self, token: &VerifiedToken) -> Self {
        self.claims = Some(Arc::new(token.claims().clone()));
        self
    }

    /// Claims previously bound, if any. Absence means unauthenticated.
    #[must_use]
    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_deref()
    }

    /// Attach the requester's rule set.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = Arc::from(rules);
        self
    }

    /// The requester's rule set.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Set the organization and environment the request targets.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Requested organization/environment.
    #[must_use]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Tie store round-trips to `cancellation`.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Signal cancelling this request's store round-trips.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Bound every store round-trip made on behalf of this request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Run a store round-trip, abandoning it on cancellation or deadline.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cancelled`] or [`StoreError::DeadlineExceeded`]
    /// when the request gives up first, otherwise the round-trip's own result.
    pub async fn run<F, T>(&self, round_trip: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let bounded = async {
            match self.deadline {
                Some(deadline) => match timeout_at(deadline, round_trip).await {
                    Ok(result) => result,
                    Err(_elapsed) => Err(StoreError::DeadlineExceeded),
                },
                None => round_trip.await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancellation.cancelled() => Err(StoreError::Cancelled),
            result = bounded => result,
        }
    }
}
