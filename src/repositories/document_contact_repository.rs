use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult, StoreError, StoreResult};
use crate::models::{Contact, ContactFormData};
use crate::repositories::traits::ContactRepository;
use crate::store::{
    Document, DocumentUpdate, ObjectId, SortKey, StoreHandle, StoreProvider, ID_FIELD,
};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

/// Logical database holding the contacts collection.
pub const DATABASE_NAME: &str = "contact_manager";

/// Collection holding one document per contact.
pub const COLLECTION_NAME: &str = "contacts";

/// Form fields that may be absent and must then be removed on update.
const OPTIONAL_FIELDS: [&str; 2] = ["phone", "group"];

/// Contact repository backed by a [`DocumentStore`](crate::store::DocumentStore).
///
/// Translates contact operations into document queries, converts between
/// the opaque [`ContactId`] and the store's [`ObjectId`], and stamps
/// `createdAt` / `updatedAt`. Store faults are logged here with full detail
/// and surfaced as `ContactError::OperationFailed`.
pub struct DocumentContactRepository {
    provider: StoreProvider,
}

impl DocumentContactRepository {
    /// Create a repository that obtains its store handle from `provider`.
    pub fn new(provider: StoreProvider) -> Self {
        Self { provider }
    }

    async fn store(&self) -> StoreResult<StoreHandle> {
        self.provider.handle().await
    }

    fn failed(operation: &'static str, source: StoreError) -> ContactError {
        tracing::error!(error = %source, "{}", operation);
        ContactError::OperationFailed { operation, source }
    }

    /// The store's identifier for `id`, or `None` if it is not one the store
    /// could have issued.
    fn object_id(id: &ContactId) -> Option<ObjectId> {
        match ObjectId::parse_str(id.as_str()) {
            Ok(object_id) => Some(object_id),
            Err(e) => {
                tracing::debug!(id = %id, error = %e, "Identifier is not a store id");
                None
            }
        }
    }

    fn form_document(form: &ContactFormData) -> StoreResult<Document> {
        match serde_json::to_value(form)? {
            Value::Object(document) => Ok(document),
            other => Err(StoreError::Corrupt(format!(
                "contact form serialized to {other}"
            ))),
        }
    }

    fn to_contact(mut document: Document) -> StoreResult<Contact> {
        let id = match document.remove(ID_FIELD) {
            Some(Value::String(id)) => id,
            _ => return Err(StoreError::Corrupt("contact without _id".to_string())),
        };
        document.insert("id".to_string(), Value::String(id));
        serde_json::from_value(Value::Object(document))
            .map_err(|e| StoreError::Corrupt(format!("contact document: {e}")))
    }

    async fn try_list(&self) -> StoreResult<Vec<Contact>> {
        let store = self.store().await?;
        store
            .find_all(
                DATABASE_NAME,
                COLLECTION_NAME,
                Some(&SortKey::ascending("name")),
            )
            .await?
            .into_iter()
            .map(Self::to_contact)
            .collect()
    }

    async fn try_get(&self, id: &ObjectId) -> StoreResult<Option<Contact>> {
        let store = self.store().await?;
        store
            .find_one(DATABASE_NAME, COLLECTION_NAME, id)
            .await?
            .map(Self::to_contact)
            .transpose()
    }

    async fn try_create(&self, form: ContactFormData) -> StoreResult<Contact> {
        let store = self.store().await?;
        let now = Utc::now();

        let mut document = Self::form_document(&form)?;
        document.insert("createdAt".to_string(), serde_json::to_value(now)?);
        document.insert("updatedAt".to_string(), serde_json::to_value(now)?);

        let id = store
            .insert_one(DATABASE_NAME, COLLECTION_NAME, document)
            .await?;
        Ok(Contact::from_form(id.to_string(), form, now, now))
    }

    async fn try_update(
        &self,
        id: &ObjectId,
        form: &ContactFormData,
    ) -> StoreResult<Option<Contact>> {
        let store = self.store().await?;

        let mut set = Self::form_document(form)?;
        let unset = OPTIONAL_FIELDS
            .iter()
            .filter(|field| !set.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        set.insert("updatedAt".to_string(), serde_json::to_value(Utc::now())?);

        store
            .find_one_and_update(
                DATABASE_NAME,
                COLLECTION_NAME,
                id,
                DocumentUpdate { set, unset },
            )
            .await?
            .map(Self::to_contact)
            .transpose()
    }

    async fn try_delete(&self, id: &ObjectId) -> StoreResult<u64> {
        let store = self.store().await?;
        store.delete_one(DATABASE_NAME, COLLECTION_NAME, id).await
    }
}

#[async_trait]
impl ContactRepository for DocumentContactRepository {
    async fn list(&self) -> ContactResult<Vec<Contact>> {
        self.try_list()
            .await
            .map_err(|e| Self::failed("Failed to fetch contacts", e))
    }

    async fn get(&self, id: &ContactId) -> ContactResult<Option<Contact>> {
        let Some(object_id) = Self::object_id(id) else {
            return Ok(None);
        };
        self.try_get(&object_id)
            .await
            .map_err(|e| Self::failed("Failed to fetch contact", e))
    }

    async fn create(&self, form: ContactFormData) -> ContactResult<Contact> {
        let contact = self
            .try_create(form)
            .await
            .map_err(|e| Self::failed("Failed to create contact", e))?;
        tracing::info!(id = %contact.id, "Contact created");
        Ok(contact)
    }

    async fn update(&self, id: &ContactId, form: ContactFormData) -> ContactResult<Contact> {
        let not_found = || ContactError::NotFound(id.to_string());

        let object_id = Self::object_id(id).ok_or_else(not_found)?;
        let contact = self
            .try_update(&object_id, &form)
            .await
            .map_err(|e| Self::failed("Failed to update contact", e))?
            .ok_or_else(not_found)?;
        tracing::info!(id = %contact.id, "Contact updated");
        Ok(contact)
    }

    async fn delete(&self, id: &ContactId) -> ContactResult<bool> {
        let Some(object_id) = Self::object_id(id) else {
            return Ok(false);
        };
        let deleted = self
            .try_delete(&object_id)
            .await
            .map_err(|e| Self::failed("Failed to delete contact", e))?;
        if deleted == 1 {
            tracing::info!(id = %id, "Contact deleted");
        }
        Ok(deleted == 1)
    }
}
