//! HTTP server for the contact API.
//!
//! Routes:
//! - `GET    /contacts`       list (optional `search`, `group`, `sort`)
//! - `POST   /contacts`       create
//! - `GET    /contacts/{id}`  fetch one
//! - `PUT    /contacts/{id}`  replace fields
//! - `DELETE /contacts/{id}`  delete
//! - `GET    /healthz`        store ping and counters

pub mod handlers;
pub mod response;

pub use handlers::{AppState, HealthReport};
pub use response::{ApiReply, ApiResponse, DeletedMessage};

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;

/// Build the application router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/contacts/{id}",
            get(handlers::get_contact)
                .put(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Serve the API on `addr` until a shutdown signal arrives, then close the
/// store.
pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let store = state.store.clone();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
