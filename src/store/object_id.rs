//! The store's native document identifier.

use crate::error::{StoreError, StoreResult};
use std::fmt;
use uuid::Uuid;

/// Identifier assigned by the store to each inserted document.
///
/// Rendered as a lowercase hyphenated UUID. Random v4 values make reuse of an
/// identifier after deletion practically impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the canonical text form.
    ///
    /// Only the exact form produced by `Display` is accepted, so every
    /// identifier has a single spelling.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedId` for anything else.
    pub fn parse_str(s: &str) -> StoreResult<Self> {
        match Uuid::parse_str(s) {
            Ok(uuid) if uuid.hyphenated().to_string() == s => Ok(Self(uuid)),
            _ => Err(StoreError::MalformedId(s.to_string())),
        }
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_round_trips_text() {
        let id = ObjectId::new();
        let parsed = ObjectId::parse_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_object_id_rejects_other_forms() {
        let id = ObjectId::new().to_string();
        assert!(ObjectId::parse_str(&id.to_uppercase()).is_err());
        assert!(ObjectId::parse_str(&id.replace('-', "")).is_err());
        assert!(ObjectId::parse_str("not-an-id").is_err());
        assert!(ObjectId::parse_str("507f1f77bcf86cd799439011").is_err());
        assert!(matches!(
            ObjectId::parse_str(""),
            Err(StoreError::MalformedId(_))
        ));
    }

    #[test]
    fn test_object_ids_are_unique() {
        assert_ne!(ObjectId::new(), ObjectId::new());
    }
}
