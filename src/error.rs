//! Error types for the contact manager.
//!
//! Each layer has its own `thiserror` enum. Store faults are wrapped by the
//! repository into a generic operation failure, and the service layer maps
//! everything into the taxonomy the HTTP boundary understands.

use crate::schema::ValidationIssue;
use thiserror::Error;

/// Errors raised by a document store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the snapshot file failed
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be encoded or decoded
    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The identifier is not in the store's native format
    #[error("Malformed document identifier: {0}")]
    MalformedId(String),

    /// The store handle could not be obtained or has been closed
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Stored data does not have the expected shape
    #[error("Corrupt document: {0}")]
    Corrupt(String),
}

/// Errors surfaced by the contact persistence adapter.
///
/// `OperationFailed` carries a caller-safe message; the underlying store error
/// is kept as the source for logging only.
#[derive(Error, Debug)]
pub enum ContactError {
    /// No contact matches the identifier
    #[error("Contact not found: {0}")]
    NotFound(String),

    /// The store failed while performing the operation
    #[error("{operation}")]
    OperationFailed {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

/// Request-level failures, one per HTTP error class.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Client data failed schema validation
    #[error("Invalid contact data")]
    Validation(Vec<ValidationIssue>),

    /// The request body was not readable JSON
    #[error("Invalid request body")]
    InvalidBody(String),

    /// The referenced contact does not exist
    #[error("Contact not found")]
    NotFound,

    /// Infrastructure fault; the message is generic and safe to return
    #[error("{0}")]
    OperationFailed(String),
}

impl From<ContactError> for ServiceError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::NotFound(_) => ServiceError::NotFound,
            ContactError::OperationFailed { operation, .. } => {
                ServiceError::OperationFailed(operation.to_string())
            }
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ContactError
pub type ContactResult<T> = Result<T, ContactError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
