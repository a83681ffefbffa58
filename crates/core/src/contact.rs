//! Contact form validation.
//!
//! A [`ContactForm`] is raw user input. [`ContactForm::validate`] either
//! produces a normalized [`ContactMessage`] or reports every failing field at
//! once; nothing is dispatched unless all fields pass.
//!
//! Error messages are in Spanish, the storefront's language.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Email;

/// Minimum name length, in characters.
pub const NAME_MIN: usize = 2;
/// Maximum name length, in characters.
pub const NAME_MAX: usize = 100;
/// Minimum message length, in characters.
pub const MESSAGE_MIN: usize = 10;
/// Maximum message length, in characters.
pub const MESSAGE_MAX: usize = 1000;

/// Raw contact form input, as posted by the browser.
///
/// Field names follow the `{name, email, message}` convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A validated, trimmed contact message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub message: String,
}

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// The individual field errors.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether `field` is among the failures.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no failures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid contact form ({joined})")
    }
}

impl std::error::Error for ValidationErrors {}

impl ContactForm {
    /// Validate and normalize the form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every field that broke a rule.
    pub fn validate(&self) -> Result<ContactMessage, ValidationErrors> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        let name_len = name.chars().count();
        if name_len < NAME_MIN {
            errors.push(FieldError::new(
                "name",
                format!("El nombre debe tener al menos {NAME_MIN} caracteres"),
            ));
        } else if name_len > NAME_MAX {
            errors.push(FieldError::new(
                "name",
                format!("El nombre debe tener como máximo {NAME_MAX} caracteres"),
            ));
        }

        let email = Email::parse(self.email.trim());
        if email.is_err() {
            errors.push(FieldError::new("email", "Email inválido"));
        }

        let message = self.message.trim();
        let message_len = message.chars().count();
        if message_len < MESSAGE_MIN {
            errors.push(FieldError::new(
                "message",
                format!("El mensaje debe tener al menos {MESSAGE_MIN} caracteres"),
            ));
        } else if message_len > MESSAGE_MAX {
            errors.push(FieldError::new(
                "message",
                format!("El mensaje debe tener como máximo {MESSAGE_MAX} caracteres"),
            ));
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(ContactMessage {
                name: name.to_string(),
                email,
                message: message.to_string(),
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}
