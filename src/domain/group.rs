//! ContactGroup enumeration.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of groups a contact can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactGroup {
    Friends,
    Work,
    Family,
    Other,
}

impl ContactGroup {
    /// Every group, in display order.
    pub const ALL: [ContactGroup; 4] = [
        ContactGroup::Friends,
        ContactGroup::Work,
        ContactGroup::Family,
        ContactGroup::Other,
    ];

    /// The wire name of the group.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactGroup::Friends => "Friends",
            ContactGroup::Work => "Work",
            ContactGroup::Family => "Family",
            ContactGroup::Other => "Other",
        }
    }

    /// Quoted, pipe-separated list of the accepted names, for error messages.
    pub fn expected_values() -> String {
        Self::ALL
            .iter()
            .map(|g| format!("'{}'", g.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl FromStr for ContactGroup {
    type Err = ValidationError;

    /// Names are matched exactly; "work" is not "Work".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidGroup(s.to_string()))
    }
}

impl fmt::Display for ContactGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_from_str() {
        assert_eq!("Work".parse::<ContactGroup>().unwrap(), ContactGroup::Work);
        assert_eq!(
            "Family".parse::<ContactGroup>().unwrap(),
            ContactGroup::Family
        );
        assert!("work".parse::<ContactGroup>().is_err());
        assert!("Colleagues".parse::<ContactGroup>().is_err());
    }

    #[test]
    fn test_group_serde_uses_names() {
        let json = serde_json::to_string(&ContactGroup::Friends).unwrap();
        assert_eq!(json, "\"Friends\"");
        let group: ContactGroup = serde_json::from_str("\"Other\"").unwrap();
        assert_eq!(group, ContactGroup::Other);
    }

    #[test]
    fn test_expected_values() {
        assert_eq!(
            ContactGroup::expected_values(),
            "'Friends' | 'Work' | 'Family' | 'Other'"
        );
    }
}
