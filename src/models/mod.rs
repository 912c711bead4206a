//! Data models for stored contacts and the client-editable form subset.

pub mod contact;

pub use contact::{Contact, ContactFormData};
