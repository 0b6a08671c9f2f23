//! Port interfaces for the application layer
//!
//! Ports define the contract between the onboarding controllers and the
//! collaborators outside the core: the identity service, document storage and
//! the presentation shell. Implementations live in the infrastructure layer.

pub mod document_storage;
pub mod host_events;
pub mod identity;

pub use document_storage::{DocumentReceipt, DocumentStorageError, DocumentStoragePort};
pub use host_events::{HostEventPort, NoopHostEvents};
pub use identity::{IdentityServiceError, IdentityServicePort};
