//! Contact model and the form data clients are allowed to submit.

use crate::domain::{ContactGroup, EmailAddress, PhoneNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fields of a contact owned by the client.
///
/// Values of this type only come out of the schema validator (or are built
/// from already validated parts), so every field is known to be well formed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactFormData {
    /// Display name, 1 to 100 characters
    pub name: String,

    pub email: EmailAddress,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<ContactGroup>,
}

impl ContactFormData {
    /// Create form data with the required fields only.
    pub fn new(name: impl Into<String>, email: EmailAddress) -> Self {
        Self {
            name: name.into(),
            email,
            phone: None,
            group: None,
        }
    }

    pub fn with_phone(mut self, phone: PhoneNumber) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn with_group(mut self, group: ContactGroup) -> Self {
        self.group = Some(group);
        self
    }
}

/// A stored contact.
///
/// `id`, `created_at` and `updated_at` are written by the persistence layer
/// only; a client can never set them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Store-assigned identifier
    pub id: String,

    pub name: String,

    pub email: EmailAddress,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<ContactGroup>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Promote validated form data into a full contact.
    pub fn from_form(
        id: impl Into<String>,
        form: ContactFormData,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            group: form.group,
            created_at,
            updated_at,
        }
    }

    /// The client-owned fields of this contact.
    pub fn form_data(&self) -> ContactFormData {
        ContactFormData {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            group: self.group,
        }
    }

    /// Up to two uppercase initials taken from the first words of the name.
    pub fn initials(&self) -> String {
        self.name
            .split(' ')
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
