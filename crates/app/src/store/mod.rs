//! Storage contracts shared by every resource type.
//!
//! Durable backends live outside this crate. [`memory::MemoryStore`] implements
//! every contract in process for development and tests.

use std::error::Error as StdError;

use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Boxed backend failure.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Store round-trip failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested key does not exist.
    #[error("record not found")]
    NotFound,

    /// The request carrying this round-trip was cancelled.
    #[error("request cancelled")]
    Cancelled,

    /// The request deadline elapsed before the store answered.
    #[error("store deadline exceeded")]
    DeadlineExceeded,

    /// Any other backend failure.
    #[error("storage error")]
    Backend(#[source] BoxError),
}

impl StoreError {
    /// Wrap an arbitrary backend error.
    pub fn backend(error: impl Into<BoxError>) -> Self {
        Self::Backend(error.into())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn backend_error_keeps_its_source() {
        let error = StoreError::backend("connection reset");

        assert_eq!(error.to_string(), "storage error");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("connection reset"),
            "backend cause should be exposed as the source"
        );
    }
}
