//! Document store seam.
//!
//! The persistence adapter talks to storage only through [`DocumentStore`].
//! Documents are JSON objects whose identifier lives under `_id`. The crate
//! ships an in-process backend, [`MemoryDocumentStore`], and a
//! [`StoreProvider`] that owns the shared connection handle.

mod memory;
mod object_id;
mod provider;

pub use memory::MemoryDocumentStore;
pub use object_id::ObjectId;
pub use provider::{ConnectFuture, StoreProvider};

use crate::error::StoreResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A stored document: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Shared handle to a connected store.
pub type StoreHandle = Arc<dyn DocumentStore>;

/// Field under which every document stores its identifier.
pub const ID_FIELD: &str = "_id";

/// Sort order for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub ascending: bool,
}

impl SortKey {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }
}

/// Field changes applied by [`DocumentStore::find_one_and_update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentUpdate {
    /// Fields to overwrite or add
    pub set: Document,
    /// Fields to remove
    pub unset: Vec<String>,
}

/// Operations the persistence layer needs from a document database.
///
/// Every call addresses one logical database and collection. Single-document
/// writes are atomic; nothing spans documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection, optionally sorted.
    async fn find_all(
        &self,
        database: &str,
        collection: &str,
        sort: Option<&SortKey>,
    ) -> StoreResult<Vec<Document>>;

    /// The document with the given identifier, if any.
    async fn find_one(
        &self,
        database: &str,
        collection: &str,
        id: &ObjectId,
    ) -> StoreResult<Option<Document>>;

    /// Store a new document and return the identifier assigned to it.
    ///
    /// Any `_id` already present in `document` is replaced.
    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        document: Document,
    ) -> StoreResult<ObjectId>;

    /// Apply `update` to the matching document and return it as it is after
    /// the update, or `None` if nothing matched.
    async fn find_one_and_update(
        &self,
        database: &str,
        collection: &str,
        id: &ObjectId,
        update: DocumentUpdate,
    ) -> StoreResult<Option<Document>>;

    /// Remove the matching document; returns how many were deleted.
    async fn delete_one(&self, database: &str, collection: &str, id: &ObjectId)
        -> StoreResult<u64>;

    /// Check that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Release the connection. Later calls fail with `StoreError::Unavailable`.
    async fn close(&self) -> StoreResult<()>;
}
