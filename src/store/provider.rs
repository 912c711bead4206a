//! Process-scoped store connection.
//!
//! A [`StoreProvider`] is created once at startup and handed to whatever
//! needs storage. The connection is opened on first demand; callers that
//! arrive while it is being opened wait for that same attempt.

use super::{MemoryDocumentStore, StoreHandle};
use crate::error::{StoreError, StoreResult};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Future returned by a connector.
pub type ConnectFuture = Pin<Box<dyn Future<Output = StoreResult<StoreHandle>> + Send>>;

type Connector = Arc<dyn Fn() -> ConnectFuture + Send + Sync>;

/// Lazily connected, shared store handle.
#[derive(Clone)]
pub struct StoreProvider {
    connector: Connector,
    handle: Arc<OnceCell<StoreHandle>>,
}

impl StoreProvider {
    /// Build a provider around an arbitrary connect function.
    pub fn new<F>(connector: F) -> Self
    where
        F: Fn() -> ConnectFuture + Send + Sync + 'static,
    {
        Self {
            connector: Arc::new(connector),
            handle: Arc::new(OnceCell::new()),
        }
    }

    /// Provider for the in-process store, persisted to `snapshot` if given.
    pub fn memory(snapshot: Option<PathBuf>) -> Self {
        Self::new(move || {
            let snapshot = snapshot.clone();
            Box::pin(async move {
                let store = match snapshot {
                    Some(path) => MemoryDocumentStore::open(path).await?,
                    None => MemoryDocumentStore::new(),
                };
                Ok(Arc::new(store) as StoreHandle)
            })
        })
    }

    /// Provider that is already connected to `handle`.
    pub fn connected(handle: StoreHandle) -> Self {
        let provider = Self::new(|| {
            Box::pin(async {
                Err::<StoreHandle, _>(StoreError::Unavailable(
                    "provider was built around an existing handle".to_string(),
                ))
            })
        });
        // The cell is brand new, so this cannot already be set.
        let _ = provider.handle.set(handle);
        provider
    }

    /// Get the shared handle, connecting if this is the first call.
    ///
    /// A failed attempt leaves the provider unconnected, so a later call
    /// tries again.
    pub async fn handle(&self) -> StoreResult<StoreHandle> {
        let handle = self
            .handle
            .get_or_try_init(|| async {
                tracing::info!("Connecting to document store");
                let result = (self.connector)().await;
                match &result {
                    Ok(_) => tracing::info!("Document store connected"),
                    Err(e) => tracing::error!(error = %e, "Document store connection failed"),
                }
                result
            })
            .await?;
        Ok(Arc::clone(handle))
    }

    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }

    /// Close the handle if one was ever opened.
    pub async fn shutdown(&self) -> StoreResult<()> {
        if let Some(handle) = self.handle.get() {
            tracing::info!("Closing document store");
            handle.close().await?;
        }
        Ok(())
    }
}
