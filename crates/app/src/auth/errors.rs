//! Auth errors.

use thiserror::Error;

use crate::{
    auth::{TokenError, TokenRejection},
    store::StoreError,
};

/// Signing secret bootstrap failures.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The operating system RNG failed.
    #[error("failed to generate signing secret")]
    Entropy(#[source] rand::Error),

    /// The store refused the new secret.
    #[error("failed to persist signing secret")]
    Store(#[source] StoreError),
}

/// Failures surfaced to the transport layer.
///
/// Rejections only tell "expired" apart from "invalid".
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Correctly signed but past its expiry.
    #[error("token expired")]
    Expired,

    /// Rejected for any reason other than expiry.
    #[error("invalid token")]
    Unauthenticated,

    /// Issuing a token failed.
    #[error("token processing error")]
    Token(#[source] TokenError),

    /// Resolving the subject's rules failed.
    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<TokenRejection> for AuthServiceError {
    fn from(rejection: TokenRejection) -> Self {
        if rejection.is_expired_only() {
            Self::Expired
        } else {
            Self::Unauthenticated
        }
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Rejected(rejection) => rejection.into(),
            other => Self::Token(other),
        }
    }
}

impl From<StoreError> for AuthServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}
