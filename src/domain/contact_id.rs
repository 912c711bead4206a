//! ContactId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The opaque identifier of a stored contact.
///
/// The API treats it as an uninterpreted string taken from the request path.
/// Only the persistence layer knows how to turn it into the store's native
/// identifier, and a `ContactId` that the store cannot parse simply matches
/// no contact.
///
/// # Example
///
/// ```
/// use contact_manager::domain::ContactId;
///
/// let id = ContactId::new("6f1c").unwrap();
/// assert_eq!(id.as_str(), "6f1c");
/// assert!(ContactId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactId(String);

impl ContactId {
    /// Create a new ContactId from a path segment, kept exactly as given.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if the segment is empty or only
    /// whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let id = id.as_ref();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id.to_string()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContactId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContactId::new(value)
    }
}

impl From<ContactId> for String {
    fn from(value: ContactId) -> Self {
        value.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
