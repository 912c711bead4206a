//! Search, group filter and sort order for contact lists.

use crate::domain::ContactGroup;
use crate::models::Contact;
use crate::schema::{IssueCode, ValidationIssue};
use serde::Deserialize;

/// Direction of the name ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Raw query-string parameters of `GET /contacts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactQueryParams {
    pub search: Option<String>,
    pub group: Option<String>,
    pub sort: Option<String>,
}

/// A validated list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
    /// Lowercased name fragment; empty matches everything
    search: String,
    group: Option<ContactGroup>,
    sort: SortOrder,
}

impl ContactQuery {
    pub fn new(search: &str, group: Option<ContactGroup>, sort: SortOrder) -> Self {
        Self {
            search: search.trim().to_lowercase(),
            group,
            sort,
        }
    }

    /// Validate raw parameters, collecting a problem for each bad one.
    pub fn from_params(params: &ContactQueryParams) -> Result<Self, Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        let group = match params.group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<ContactGroup>() {
                Ok(group) => Some(group),
                Err(_) => {
                    issues.push(ValidationIssue::new(
                        IssueCode::InvalidEnumValue,
                        "group",
                        format!(
                            "Invalid enum value. Expected {}, received '{}'",
                            ContactGroup::expected_values(),
                            raw
                        ),
                    ));
                    None
                }
            },
        };

        let sort = match params.sort.as_deref().map(str::trim) {
            None | Some("") | Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(raw) => {
                issues.push(ValidationIssue::new(
                    IssueCode::InvalidEnumValue,
                    "sort",
                    format!("Invalid enum value. Expected 'asc' | 'desc', received '{raw}'"),
                ));
                SortOrder::Asc
            }
        };

        if !issues.is_empty() {
            return Err(issues);
        }
        Ok(Self::new(params.search.as_deref().unwrap_or(""), group, sort))
    }

    /// Whether the query leaves a name-ordered list untouched.
    pub fn is_identity(&self) -> bool {
        self.search.is_empty() && self.group.is_none() && self.sort == SortOrder::Asc
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        let name_matches =
            self.search.is_empty() || contact.name.to_lowercase().contains(&self.search);
        let group_matches = self.group.is_none() || contact.group == self.group;
        name_matches && group_matches
    }

    /// Keep the matching contacts and order them by name.
    pub fn apply(&self, contacts: Vec<Contact>) -> Vec<Contact> {
        let mut filtered: Vec<Contact> = contacts.into_iter().filter(|c| self.matches(c)).collect();
        filtered.sort_by(|a, b| match self.sort {
            SortOrder::Asc => a.name.cmp(&b.name),
            SortOrder::Desc => b.name.cmp(&a.name),
        });
        filtered
    }
}
