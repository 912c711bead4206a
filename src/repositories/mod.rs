mod document_contact_repository;
mod traits;

pub use document_contact_repository::{DocumentContactRepository, COLLECTION_NAME, DATABASE_NAME};
pub use traits::ContactRepository;
