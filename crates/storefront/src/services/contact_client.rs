//! Client for the contact submission endpoint.
//!
//! Mirrors what the contact page does in the browser: validate locally, and
//! only when every field passes send a single `POST /api/contacto`. There are
//! no retries; a failed submission is reported and the caller may resubmit.

use reqwest::StatusCode;
use seko_core::{ContactForm, ContactMessage, FieldError, ValidationErrors};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Path of the submission endpoint, relative to the storefront base URL.
const CONTACT_PATH: &str = "api/contacto";

/// Errors that can occur when talking to the contact endpoint.
#[derive(Debug, Error)]
pub enum ContactClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with an unexpected status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Base URL cannot be joined with the endpoint path.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result of a submission attempt that reached a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// Endpoint accepted the message.
    Sent { message: String },
    /// Endpoint rejected the fields.
    Rejected {
        error: String,
        details: Vec<FieldError>,
    },
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

impl<'a> From<&'a ContactMessage> for SubmitBody<'a> {
    fn from(message: &'a ContactMessage) -> Self {
        Self {
            name: &message.name,
            email: message.email.as_str(),
            message: &message.message,
        }
    }
}

#[derive(Deserialize)]
struct SuccessBody {
    message: String,
}

#[derive(Deserialize)]
struct RejectionBody {
    error: String,
    #[serde(default)]
    details: Vec<FieldError>,
}

/// HTTP client for the storefront contact endpoint.
#[derive(Debug, Clone)]
pub struct ContactClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ContactClient {
    /// Create a client for the storefront at `base_url`.
    ///
    /// The base path is treated as a directory, so `https://host/shop` and
    /// `https://host/shop/` both post to `https://host/shop/api/contacto`.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URL cannot be built or the HTTP client
    /// fails to build.
    pub fn new(base_url: &Url) -> Result<Self, ContactClientError> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(CONTACT_PATH)?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, endpoint })
    }

    /// The full URL submissions are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Validate `form` and, if valid, post it to the endpoint.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or an unexpected response status.
    #[tracing::instrument(skip(self, form), fields(endpoint = %self.endpoint))]
    pub async fn submit(&self, form: &ContactForm) -> Result<SubmitOutcome, ContactClientError> {
        let message = match form.validate() {
            Ok(message) => message,
            Err(errors) => return Ok(SubmitOutcome::Invalid(errors)),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SubmitBody::from(&message))
            .send()
            .await?;
        let status = response.status();

        match status {
            StatusCode::OK => {
                let body: SuccessBody = response.json().await?;
                Ok(SubmitOutcome::Sent {
                    message: body.message,
                })
            }
            StatusCode::BAD_REQUEST => {
                let body: RejectionBody = response.json().await?;
                Ok(SubmitOutcome::Rejected {
                    error: body.error,
                    details: body.details,
                })
            }
            _ => {
                let message = response.text().await.unwrap_or_default();
                tracing::warn!(status = status.as_u16(), "Contact submission failed");
                Err(ContactClientError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
