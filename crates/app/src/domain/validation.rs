//! Field validation shared by resource types.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static NAME_PATTERN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[a-z0-9/_.-]+$"));

/// A record field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name is empty.
    #[error("name cannot be empty")]
    EmptyName,

    #[error(
        "name must be lowercase and may only contain forward slashes, underscores, dots, dashes and numbers"
    )]
    /// The name has characters outside the allowed set.
    InvalidName,
}

/// Check a resource name against `^[a-z0-9/_.-]+$`.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] for an empty name and
/// [`ValidationError::InvalidName`] for anything outside the allowed set.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let matches = match NAME_PATTERN.as_ref() {
        Ok(pattern) => pattern.is_match(name),
        Err(_) => false,
    };

    if matches {
        Ok(())
    } else {
        Err(ValidationError::InvalidName)
    }
}
