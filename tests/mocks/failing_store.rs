use async_trait::async_trait;
use contact_manager::error::{StoreError, StoreResult};
use contact_manager::store::{Document, DocumentStore, DocumentUpdate, ObjectId, SortKey};

/// Detail that must never reach an HTTP client.
#[allow(dead_code)]
pub const SECRET_DETAIL: &str = "connection refused by db-primary.internal:27017";

/// Document store whose every operation fails.
#[allow(dead_code)]
pub struct FailingDocumentStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable(SECRET_DETAIL.to_string()))
}

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn find_all(&self, _: &str, _: &str, _: Option<&SortKey>) -> StoreResult<Vec<Document>> {
        down()
    }

    async fn find_one(&self, _: &str, _: &str, _: &ObjectId) -> StoreResult<Option<Document>> {
        down()
    }

    async fn insert_one(&self, _: &str, _: &str, _: Document) -> StoreResult<ObjectId> {
        down()
    }

    async fn find_one_and_update(
        &self,
        _: &str,
        _: &str,
        _: &ObjectId,
        _: DocumentUpdate,
    ) -> StoreResult<Option<Document>> {
        down()
    }

    async fn delete_one(&self, _: &str, _: &str, _: &ObjectId) -> StoreResult<u64> {
        down()
    }

    async fn ping(&self) -> StoreResult<()> {
        down()
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}
