use crate::domain::ContactId;
use crate::error::ContactResult;
use crate::models::{Contact, ContactFormData};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Abstracts contact persistence so the service layer can run against the
/// document store or an in-memory mock.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// All contacts, ordered by name ascending.
    async fn list(&self) -> ContactResult<Vec<Contact>>;

    /// Retrieve a single contact. `None` if no contact has this ID, including
    /// IDs the store could never have issued.
    async fn get(&self, id: &ContactId) -> ContactResult<Option<Contact>>;

    /// Persist a new contact, stamping its creation time.
    async fn create(&self, form: ContactFormData) -> ContactResult<Contact>;

    /// Replace the client-owned fields of a contact and refresh `updated_at`.
    ///
    /// Returns `ContactError::NotFound` if no contact has this ID.
    async fn update(&self, id: &ContactId, form: ContactFormData) -> ContactResult<Contact>;

    /// Delete a contact. Returns `false` if nothing was removed.
    async fn delete(&self, id: &ContactId) -> ContactResult<bool>;
}
