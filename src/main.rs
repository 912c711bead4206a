//! Contact Manager - main entry point

use anyhow::Result;
use contact_manager::repositories::{ContactRepository, DocumentContactRepository};
use contact_manager::services::{ContactService, ContactServiceImpl};
use contact_manager::{AppState, Config, StoreProvider};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match &config.data_file {
        Some(path) => info!("Document store snapshot: {}", path.display()),
        None => info!("Document store is in-memory only"),
    }

    // The store connects on first use; the provider is shared by everything below
    let store = StoreProvider::memory(config.data_file.clone());

    let repository =
        Arc::new(DocumentContactRepository::new(store.clone())) as Arc<dyn ContactRepository>;
    let service = Arc::new(ContactServiceImpl::new(repository)) as Arc<dyn ContactService>;
    let state = AppState::new(service, store);

    contact_manager::server::run_server(config.bind_addr, state).await?;

    info!("Contact Manager shutdown complete");
    Ok(())
}
