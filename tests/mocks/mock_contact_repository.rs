use async_trait::async_trait;
use chrono::Utc;
use contact_manager::domain::ContactId;
use contact_manager::error::{ContactError, ContactResult, StoreError};
use contact_manager::models::{Contact, ContactFormData};
use contact_manager::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// In-memory implementation of ContactRepository that tracks method calls
/// and can be switched into a failing mode to simulate store outages.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<HashMap<String, Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    next_id: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicUsize::new(1)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a contact to the mock repository.
    pub fn add_contact(&self, contact: Contact) {
        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(contact.id.clone(), contact);
    }

    /// Make every following call fail as if the store were down.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total calls across all methods.
    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    fn track_call(&self, method: &str) -> ContactResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.failing.load(Ordering::SeqCst) {
            return Err(ContactError::OperationFailed {
                operation: "Failed to reach mock store",
                source: StoreError::Unavailable("mock store is down".to_string()),
            });
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn list(&self) -> ContactResult<Vec<Contact>> {
        self.track_call("list")?;

        let contacts = self.contacts.lock().unwrap();
        let mut result: Vec<Contact> = contacts.values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn get(&self, id: &ContactId) -> ContactResult<Option<Contact>> {
        self.track_call("get")?;

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.get(id.as_str()).cloned())
    }

    async fn create(&self, form: ContactFormData) -> ContactResult<Contact> {
        self.track_call("create")?;

        let id = format!("mock-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = Utc::now();
        let contact = Contact::from_form(id, form, now, now);
        self.add_contact(contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: &ContactId, form: ContactFormData) -> ContactResult<Contact> {
        self.track_call("update")?;

        let mut contacts = self.contacts.lock().unwrap();
        let existing = contacts
            .get(id.as_str())
            .ok_or_else(|| ContactError::NotFound(id.to_string()))?;
        let updated = Contact::from_form(id.as_str(), form, existing.created_at, Utc::now());
        contacts.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &ContactId) -> ContactResult<bool> {
        self.track_call("delete")?;

        let mut contacts = self.contacts.lock().unwrap();
        Ok(contacts.remove(id.as_str()).is_some())
    }
}
