//! Contact form route handler.
//!
//! Validates the submitted fields and hands the message to the configured
//! [`ContactNotifier`](crate::services::ContactNotifier).

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use seko_core::ContactForm;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Confirmation shown to the visitor after a successful submission.
pub const CONTACT_SENT: &str = "Mensaje enviado correctamente";

/// Response for a successful submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

/// Submit the contact form.
///
/// POST /api/contacto
///
/// Returns 400 with per-field details when validation fails and 500 when the
/// message cannot be handed off.
#[instrument(skip(state, payload))]
pub async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let Json(form) = payload.inspect_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected contact body");
    })?;

    let message = form.validate().inspect_err(|errors| {
        tracing::debug!(fields = errors.len(), "Contact form failed validation");
    })?;

    state.notifier().notify(&message).await?;

    tracing::info!(email = %message.email, "Contact message accepted");
    add_breadcrumb("contact", "Contact form submitted", None);

    Ok(Json(ContactResponse {
        message: CONTACT_SENT.to_string(),
    }))
}
