//! Auth Config

use std::time::Duration;

use clap::Args;

/// Authentication and request context settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Username granted every permission at startup. A token pair for it is
    /// printed to stdout once and never written to the log.
    #[arg(long, env = "BOOTSTRAP_ADMIN")]
    pub bootstrap_admin: Option<String>,

    /// Deadline for store round-trips made on behalf of one request.
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub store_timeout_ms: u64,
}

impl AuthConfig {
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
