//! Application service layer.
//!
//! Services sit between the HTTP handlers and the repository: they validate
//! client input, run the repository call and translate its outcome into a
//! [`ServiceError`](crate::error::ServiceError).

mod contact_service;

pub use contact_service::{ContactService, ContactServiceImpl};
