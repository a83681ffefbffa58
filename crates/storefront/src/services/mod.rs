//! External collaborators of the storefront.
//!
//! - [`notifier`] - Hand-off of validated contact messages
//! - [`contact_client`] - Typed HTTP client for the contact endpoint

pub mod contact_client;
pub mod notifier;

pub use contact_client::{ContactClient, ContactClientError, SubmitOutcome};
pub use notifier::{ContactNotifier, LogNotifier, NotifyError};
