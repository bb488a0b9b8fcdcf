//! State

use std::{sync::Arc, time::Duration};

use bastion_app::context::AppContext;

/// Store deadline applied when none is configured.
pub(crate) const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) store_timeout: Duration,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext) -> Self {
        Self {
            app,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    #[must_use]
    pub(crate) fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    #[must_use]
    pub(crate) fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
