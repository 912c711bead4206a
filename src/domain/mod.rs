//! Domain value objects and types.
//!
//! Type-safe wrappers for contact IDs, email addresses, phone numbers and
//! contact groups. Each one validates at construction time so an invalid
//! value cannot be represented once it has been built.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod group;
pub mod phone;

pub use contact_id::ContactId;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use group::ContactGroup;
pub use phone::PhoneNumber;
