//! Contact message delivery.
//!
//! The contact endpoint validates a message and hands it to a
//! [`ContactNotifier`]. The storefront ships with [`LogNotifier`], which only
//! records the message in the logs; email delivery is not wired up.

use async_trait::async_trait;
use seko_core::{ContactMessage, Email};
use thiserror::Error;

/// Errors that can occur while handing off a contact message.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The delivery backend refused or failed to accept the message.
    #[error("delivery backend unavailable: {0}")]
    Unavailable(String),
}

/// Receives validated contact messages.
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the message could not be accepted.
    async fn notify(&self, message: &ContactMessage) -> Result<(), NotifyError>;
}

/// Notifier that writes each message to the tracing log.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    recipient: Email,
}

impl LogNotifier {
    /// Create a notifier addressing messages to `recipient`.
    #[must_use]
    pub const fn new(recipient: Email) -> Self {
        Self { recipient }
    }

    /// Inbox the messages are addressed to.
    #[must_use]
    pub const fn recipient(&self) -> &Email {
        &self.recipient
    }
}

#[async_trait]
impl ContactNotifier for LogNotifier {
    async fn notify(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        tracing::info!(
            to = %self.recipient,
            reply_to = %message.email,
            name = %message.name,
            message = %message.message,
            "Contact form submission"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use seko_core::ContactForm;

    use super::*;

    #[tokio::test]
    async fn test_log_notifier_accepts_message() {
        let notifier = LogNotifier::new(Email::parse("deshidratadosseko@gmail.com").unwrap());
        let message = ContactForm {
            name: "Ana Pérez".to_string(),
            email: "ana@example.com".to_string(),
            message: "Hola, quiero saber más sobre sus productos.".to_string(),
        }
        .validate()
        .unwrap();

        notifier.notify(&message).await.unwrap();
        assert_eq!(notifier.recipient().as_str(), "deshidratadosseko@gmail.com");
    }
}
