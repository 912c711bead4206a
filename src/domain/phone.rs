//! PhoneNumber value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// International format once separators are stripped: optional '+', no
/// leading zero, at most 16 digits.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern is a valid regex"));

/// A type-safe wrapper for phone numbers.
///
/// The value keeps the formatting the caller supplied; validation runs on the
/// number with whitespace, hyphens and parentheses removed.
///
/// # Example
///
/// ```
/// use contact_manager::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+1 (415) 555-2671").unwrap();
/// assert_eq!(phone.stripped(), "+14155552671");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the stripped number does not
    /// match the international pattern.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if !Self::is_valid(&phone) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    /// Remove the separators a user may type between digit groups.
    pub fn strip_separators(phone: &str) -> String {
        phone
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
            .collect()
    }

    /// Check a raw number without constructing a value.
    pub fn is_valid(phone: &str) -> bool {
        PHONE_PATTERN.is_match(&Self::strip_separators(phone))
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number without separators, as it was validated.
    pub fn stripped(&self) -> String {
        Self::strip_separators(&self.0)
    }

    /// Get the phone number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Render North American numbers for display.
    ///
    /// Ten digits become `(XXX) XXX-XXXX` and eleven digits with a leading
    /// country code of 1 become `+1 (XXX) XXX-XXXX`. Anything else is
    /// returned as entered.
    pub fn formatted(&self) -> String {
        let digits = self.digits_only();
        match digits.len() {
            10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
            11 if digits.starts_with('1') => {
                format!("+1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
            }
            _ => self.0.clone(),
        }
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PhoneNumber::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
