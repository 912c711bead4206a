//! Contact Manager - a REST service for managing contacts in a document store.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (email, phone, group, contact id)
//! - **schema**: Validation of untyped client input into contact form data
//! - **models**: The stored contact and the client-editable form subset
//! - **store**: Document store seam, in-process backend and connection provider
//! - **repositories**: Contact persistence on top of the document store
//! - **services**: Validate-then-execute request logic
//! - **filter**: Search, group filter and sort order for contact lists
//! - **server**: axum router, handlers and the response envelope
//! - **metrics**: Request and outcome counters
//! - **config**: Configuration from environment variables
//! - **error**: Error types for each layer

pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, ContactError, ServiceError, StoreError};
pub use filter::{ContactQuery, SortOrder};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{Contact, ContactFormData};
pub use repositories::{ContactRepository, DocumentContactRepository};
pub use schema::{validate_contact_form, ValidationIssue};
pub use server::{router, AppState};
pub use services::{ContactService, ContactServiceImpl};
pub use store::{DocumentStore, MemoryDocumentStore, StoreProvider};
