//! Contact service layer.
//!
//! Every mutating call validates first and only then touches the repository,
//! so invalid input never reaches the store.

use crate::domain::ContactId;
use crate::error::{ServiceError, ServiceResult};
use crate::filter::ContactQuery;
use crate::models::Contact;
use crate::repositories::ContactRepository;
use crate::schema::validate_contact_form;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Contacts matching `query`, in the order it asks for.
    async fn list_contacts(&self, query: &ContactQuery) -> ServiceResult<Vec<Contact>>;

    async fn get_contact(&self, id: &str) -> ServiceResult<Contact>;

    /// Validate `input` and store it as a new contact.
    async fn create_contact(&self, input: &Value) -> ServiceResult<Contact>;

    /// Validate `input` and replace the fields of an existing contact.
    async fn update_contact(&self, id: &str, input: &Value) -> ServiceResult<Contact>;

    async fn delete_contact(&self, id: &str) -> ServiceResult<()>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
}

impl ContactServiceImpl {
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }

    /// Path identifiers that are blank can never match a contact.
    fn parse_id(id: &str) -> ServiceResult<ContactId> {
        ContactId::new(id).map_err(|_| ServiceError::NotFound)
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(&self, query: &ContactQuery) -> ServiceResult<Vec<Contact>> {
        let contacts = self.repository.list().await?;
        if query.is_identity() {
            return Ok(contacts);
        }
        Ok(query.apply(contacts))
    }

    async fn get_contact(&self, id: &str) -> ServiceResult<Contact> {
        let id = Self::parse_id(id)?;
        self.repository.get(&id).await?.ok_or(ServiceError::NotFound)
    }

    async fn create_contact(&self, input: &Value) -> ServiceResult<Contact> {
        let form = validate_contact_form(input).map_err(ServiceError::Validation)?;
        Ok(self.repository.create(form).await?)
    }

    async fn update_contact(&self, id: &str, input: &Value) -> ServiceResult<Contact> {
        let form = validate_contact_form(input).map_err(ServiceError::Validation)?;
        let id = Self::parse_id(id)?;
        Ok(self.repository.update(&id, form).await?)
    }

    async fn delete_contact(&self, id: &str) -> ServiceResult<()> {
        let id = Self::parse_id(id)?;
        if self.repository.delete(&id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}
