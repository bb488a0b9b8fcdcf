//! Action errors.

use std::fmt;

use thiserror::Error;

use crate::{domain::validation::ValidationError, store::StoreError};

/// Closed set of outcomes an action can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No such record, or the caller may not read it.
    NotFound,
    /// A record with the same name exists.
    AlreadyExists,
    /// The store failed.
    Internal,
    /// No rule grants the requested permission.
    PermissionDenied,
    /// The record failed validation.
    InvalidArgument,
}

impl ErrorCode {
    /// Stable snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::Internal => "internal",
            Self::PermissionDenied => "permission_denied",
            Self::InvalidArgument => "invalid_argument",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a controller action, carrying its cause where there is one.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Record absent, or hidden from a caller without read access.
    #[error("not found")]
    NotFound,

    /// Create found a record with the same name.
    #[error("already exists")]
    AlreadyExists,

    /// A store round-trip failed, was cancelled or timed out.
    #[error("internal error")]
    Internal(#[source] StoreError),

    /// The caller lacks the permission the action needs.
    #[error("permission denied")]
    PermissionDenied,

    /// The incoming record is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[source] ValidationError),
}

impl ActionError {
    /// Code of this error in the closed taxonomy.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound => ErrorCode::NotFound,
            Self::AlreadyExists => ErrorCode::AlreadyExists,
            Self::Internal(_) => ErrorCode::Internal,
            Self::PermissionDenied => ErrorCode::PermissionDenied,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
        }
    }
}

impl From<ValidationError> for ActionError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidArgument(error)
    }
}

impl From<StoreError> for ActionError {
    fn from(error: StoreError) -> Self {
        Self::Internal(error)
    }
}
