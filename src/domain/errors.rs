//! Errors raised while building domain values.

use thiserror::Error;

/// A raw value that cannot become a domain value object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty or whitespace-only identifier
    #[error("Contact id cannot be blank")]
    EmptyId,

    #[error("Not a valid email address: {0}")]
    InvalidEmail(String),

    #[error("Not a valid phone number: {0}")]
    InvalidPhone(String),

    /// Not one of Friends, Work, Family or Other
    #[error("Unknown contact group: {0}")]
    InvalidGroup(String),
}
