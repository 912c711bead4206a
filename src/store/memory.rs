//! In-process document store.
//!
//! Holds every collection in memory behind a single `RwLock`. When created
//! with a snapshot path, the whole data set is loaded from that JSON file on
//! connect and written back after each mutation.

use super::{Document, DocumentStore, DocumentUpdate, ObjectId, SortKey, ID_FIELD};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

type Collection = BTreeMap<ObjectId, Document>;

/// database name -> collection name -> documents
type Databases = HashMap<String, HashMap<String, Collection>>;

/// On-disk layout: database -> collection -> list of documents.
type Snapshot = BTreeMap<String, BTreeMap<String, Vec<Document>>>;

/// Document store kept in process memory.
pub struct MemoryDocumentStore {
    databases: RwLock<Databases>,
    snapshot_path: Option<PathBuf>,
    closed: AtomicBool,
}

impl MemoryDocumentStore {
    /// Create an empty store with no persistence.
    pub fn new() -> Self {
        Self {
            databases: RwLock::new(HashMap::new()),
            snapshot_path: None,
            closed: AtomicBool::new(false),
        }
    }

    /// Open a store backed by a snapshot file.
    ///
    /// A missing file starts an empty store; the file is created on the
    /// first write.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not a valid
    /// snapshot.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let databases = match tokio::fs::read(&path).await {
            Ok(bytes) => Self::decode_snapshot(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No snapshot found, starting empty");
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        let count: usize = databases
            .values()
            .flat_map(|collections| collections.values())
            .map(BTreeMap::len)
            .sum();
        tracing::info!(path = %path.display(), documents = count, "Loaded document snapshot");

        Ok(Self {
            databases: RwLock::new(databases),
            snapshot_path: Some(path),
            closed: AtomicBool::new(false),
        })
    }

    fn decode_snapshot(bytes: &[u8]) -> StoreResult<Databases> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)?;
        let mut databases = Databases::new();

        for (db_name, collections) in snapshot {
            let db = databases.entry(db_name).or_default();
            for (coll_name, documents) in collections {
                let coll = db.entry(coll_name).or_default();
                for document in documents {
                    let id = document
                        .get(ID_FIELD)
                        .and_then(Value::as_str)
                        .ok_or_else(|| StoreError::Corrupt("document without _id".to_string()))
                        .and_then(ObjectId::parse_str)?;
                    coll.insert(id, document);
                }
            }
        }

        Ok(databases)
    }

    fn encode_snapshot(databases: &Databases) -> StoreResult<Vec<u8>> {
        let snapshot: Snapshot = databases
            .iter()
            .map(|(db_name, collections)| {
                let collections = collections
                    .iter()
                    .map(|(name, docs)| (name.clone(), docs.values().cloned().collect()))
                    .collect();
                (db_name.clone(), collections)
            })
            .collect();
        Ok(serde_json::to_vec_pretty(&snapshot)?)
    }

    /// Write the snapshot through a temporary file so a crash mid-write
    /// leaves the previous snapshot intact.
    async fn persist(&self, databases: &Databases) -> StoreResult<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        let bytes = Self::encode_snapshot(databases)?;
        let tmp = temp_path(path);
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        tracing::trace!(path = %path.display(), "Snapshot written");
        Ok(())
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(AtomicOrdering::Acquire) {
            return Err(StoreError::Unavailable("store has been closed".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn collection_mut<'a>(
    databases: &'a mut Databases,
    database: &str,
    collection: &str,
) -> Option<&'a mut Collection> {
    databases.get_mut(database)?.get_mut(collection)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Missing and null sort first, then booleans, numbers, strings, and
/// anything structured last.
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) | Some(Value::Object(_)) => 4,
    }
}

fn compare_field(a: &Document, b: &Document, field: &str) -> Ordering {
    let (left, right) = (a.get(field), b.get(field));
    match (left, right) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_all(
        &self,
        database: &str,
        collection: &str,
        sort: Option<&SortKey>,
    ) -> StoreResult<Vec<Document>> {
        self.ensure_open()?;
        let databases = self.databases.read().await;

        let mut documents: Vec<Document> = databases
            .get(database)
            .and_then(|db| db.get(collection))
            .map(|coll| coll.values().cloned().collect())
            .unwrap_or_default();

        if let Some(key) = sort {
            // Stable sort keeps identifier order among equal keys.
            documents.sort_by(|a, b| {
                let ordering = compare_field(a, b, &key.field);
                if key.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        Ok(documents)
    }

    async fn find_one(
        &self,
        database: &str,
        collection: &str,
        id: &ObjectId,
    ) -> StoreResult<Option<Document>> {
        self.ensure_open()?;
        let databases = self.databases.read().await;
        Ok(databases
            .get(database)
            .and_then(|db| db.get(collection))
            .and_then(|coll| coll.get(id))
            .cloned())
    }

    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        mut document: Document,
    ) -> StoreResult<ObjectId> {
        self.ensure_open()?;
        let mut databases = self.databases.write().await;

        let id = ObjectId::new();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        databases
            .entry(database.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
            .insert(id, document);

        if let Err(e) = self.persist(&databases).await {
            if let Some(coll) = collection_mut(&mut databases, database, collection) {
                coll.remove(&id);
            }
            tracing::warn!(id = %id, "Snapshot write failed, insert rolled back");
            return Err(e);
        }
        Ok(id)
    }

    async fn find_one_and_update(
        &self,
        database: &str,
        collection: &str,
        id: &ObjectId,
        update: DocumentUpdate,
    ) -> StoreResult<Option<Document>> {
        self.ensure_open()?;
        let mut databases = self.databases.write().await;

        let Some(document) =
            collection_mut(&mut databases, database, collection).and_then(|coll| coll.get_mut(id))
        else {
            return Ok(None);
        };
        let previous = document.clone();

        for (field, value) in update.set {
            if field != ID_FIELD {
                document.insert(field, value);
            }
        }
        for field in &update.unset {
            if field != ID_FIELD {
                document.remove(field);
            }
        }
        let updated = document.clone();

        if let Err(e) = self.persist(&databases).await {
            if let Some(document) =
                collection_mut(&mut databases, database, collection).and_then(|coll| coll.get_mut(id))
            {
                *document = previous;
            }
            tracing::warn!(id = %id, "Snapshot write failed, update rolled back");
            return Err(e);
        }
        Ok(Some(updated))
    }

    async fn delete_one(
        &self,
        database: &str,
        collection: &str,
        id: &ObjectId,
    ) -> StoreResult<u64> {
        self.ensure_open()?;
        let mut databases = self.databases.write().await;

        let Some(removed) =
            collection_mut(&mut databases, database, collection).and_then(|coll| coll.remove(id))
        else {
            return Ok(0);
        };

        if let Err(e) = self.persist(&databases).await {
            if let Some(coll) = collection_mut(&mut databases, database, collection) {
                coll.insert(*id, removed);
            }
            tracing::warn!(id = %id, "Snapshot write failed, delete rolled back");
            return Err(e);
        }
        Ok(1)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.ensure_open()
    }

    async fn close(&self) -> StoreResult<()> {
        if self.closed.swap(true, AtomicOrdering::AcqRel) {
            return Ok(());
        }
        let databases = self.databases.read().await;
        self.persist(&databases).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DB: &str = "test_db";
    const COLL: &str = "people";

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = MemoryDocumentStore::new();
        let id = store
            .insert_one(DB, COLL, doc(json!({"name": "Ada", "_id": "forged"})))
            .await
            .unwrap();

        let found = store.find_one(DB, COLL, &id).await.unwrap().unwrap();
        assert_eq!(found[ID_FIELD], json!(id.to_string()));
        assert_eq!(found["name"], "Ada");
    }

    #[tokio::test]
    async fn test_find_all_sorted() {
        let store = MemoryDocumentStore::new();
        for name in ["Charles", "Ada", "Grace"] {
            store.insert_one(DB, COLL, doc(json!({ "name": name }))).await.unwrap();
        }
        store.insert_one(DB, COLL, doc(json!({}))).await.unwrap();

        let docs = store
            .find_all(DB, COLL, Some(&SortKey::ascending("name")))
            .await
            .unwrap();
        let names: Vec<Option<&str>> = docs.iter().map(|d| d.get("name").and_then(Value::as_str)).collect();
        assert_eq!(names, vec![None, Some("Ada"), Some("Charles"), Some("Grace")]);
    }

    #[tokio::test]
    async fn test_find_all_empty_collection() {
        let store = MemoryDocumentStore::new();
        assert!(store.find_all(DB, COLL, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_sets_and_unsets() {
        let store = MemoryDocumentStore::new();
        let id = store
            .insert_one(DB, COLL, doc(json!({"name": "Ada", "phone": "123"})))
            .await
            .unwrap();

        let update = DocumentUpdate {
            set: doc(json!({"name": "Ada King", "_id": "forged"})),
            unset: vec!["phone".to_string()],
        };
        let updated = store
            .find_one_and_update(DB, COLL, &id, update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated["name"], "Ada King");
        assert!(updated.get("phone").is_none());
        assert_eq!(updated[ID_FIELD], json!(id.to_string()));
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryDocumentStore::new();
        let result = store
            .find_one_and_update(DB, COLL, &ObjectId::new(), DocumentUpdate::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_counts() {
        let store = MemoryDocumentStore::new();
        let id = store.insert_one(DB, COLL, doc(json!({"name": "Ada"}))).await.unwrap();
        assert_eq!(store.delete_one(DB, COLL, &id).await.unwrap(), 1);
        assert_eq!(store.delete_one(DB, COLL, &id).await.unwrap(), 0);
        assert!(store.find_one(DB, COLL, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        let id = store.insert_one(DB, COLL, doc(json!({"name": "Ada"}))).await.unwrap();
        assert!(store.find_one(DB, "other", &id).await.unwrap().is_none());
        assert!(store.find_one("other_db", COLL, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let store = MemoryDocumentStore::new();
        store.close().await.unwrap();
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(store.find_all(DB, COLL, None).await.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let id = {
            let store = MemoryDocumentStore::open(&path).await.unwrap();
            let id = store.insert_one(DB, COLL, doc(json!({"name": "Ada"}))).await.unwrap();
            store.close().await.unwrap();
            id
        };

        let reopened = MemoryDocumentStore::open(&path).await.unwrap();
        let found = reopened.find_one(DB, COLL, &id).await.unwrap().unwrap();
        assert_eq!(found["name"], "Ada");
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_leaves_data_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let store = MemoryDocumentStore::open(&path).await.unwrap();
        let id = store.insert_one(DB, COLL, doc(json!({"name": "Ada"}))).await.unwrap();

        std::fs::remove_dir_all(dir.path()).unwrap();

        assert!(store.insert_one(DB, COLL, doc(json!({"name": "Grace"}))).await.is_err());
        let update = DocumentUpdate {
            set: doc(json!({"name": "Ada King"})),
            unset: Vec::new(),
        };
        assert!(store.find_one_and_update(DB, COLL, &id, update).await.is_err());
        assert!(store.delete_one(DB, COLL, &id).await.is_err());

        let docs = store.find_all(DB, COLL, None).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        tokio::fs::write(&path, br#"{"db": {"coll": [{"name": "no id"}]}}"#)
            .await
            .unwrap();

        let result = MemoryDocumentStore::open(&path).await;
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }
}
