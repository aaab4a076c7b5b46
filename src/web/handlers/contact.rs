//! Contact form handler.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::mail::{Mailer, OutgoingEmail};
use crate::web::dto::{ContactRequest, SendContactResponse, ValidatedJson};
use crate::web::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Mail relay used to deliver submissions.
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

/// POST /api/mail - Relay a contact form submission by email.
#[utoipa::path(
    post,
    path = "/api/mail",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission relayed", body = SendContactResponse),
        (status = 400, description = "Validation failure", body = crate::web::error::ValidationErrorBody),
        (status = 429, description = "Rate limit exceeded"),
        (status = 500, description = "Transport or delivery failure", body = crate::web::error::ErrorBody)
    )
)]
pub async fn send_contact(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<ContactRequest>,
) -> Result<Json<SendContactResponse>, ApiError> {
    let submission = payload.into_submission();

    // Verification failure terminates the request; no send is attempted
    state.mailer.verify().await.map_err(|e| {
        tracing::error!(error = %e, "Mail transport verification failed");
        ApiError::transport_config()
    })?;

    let email = OutgoingEmail::from_submission(&submission);
    let receipt = state.mailer.send(&email).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to send contact email");
        ApiError::delivery()
    })?;

    tracing::info!(message_id = %receipt.message_id, "Message sent");

    Ok(Json(SendContactResponse::sent()))
}
