mod failing_store;
mod mock_contact_repository;

#[allow(unused_imports)]
pub use failing_store::{FailingDocumentStore, SECRET_DETAIL};
#[allow(unused_imports)]
pub use mock_contact_repository::MockContactRepository;
