//! API error handling for the buzon web layer.
//!
//! Every failure path of the contact endpoint has a fixed wire shape, kept
//! here so handlers and middleware produce identical responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Client-facing message for rejected origins.
const CORS_REJECTED: &str = "No permitido por CORS";

/// Client-facing message when transport verification fails.
const TRANSPORT_CONFIG_FAILED: &str = "Error en la configuración del transporte de correo";

/// Client-facing message when delivery fails.
const DELIVERY_FAILED: &str = "Error al enviar el email";

/// Reporting order for field validation errors.
const FIELD_ORDER: [&str; 4] = ["nombre", "email", "telefono", "mensaje"];

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the failing field.
    pub field: String,
    /// Human-readable message, in Spanish.
    pub message: String,
}

/// Body for validation failures: one entry per failing rule.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    /// Field-level errors.
    pub errors: Vec<FieldError>,
}

/// Body for generic errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message, in Spanish.
    pub error: String,
}

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// One or more submission fields failed validation (400).
    Validation(Vec<FieldError>),
    /// The request body could not be parsed (400).
    BadRequest(String),
    /// The caller's origin is not allow-listed (500).
    CrossOrigin,
    /// The caller exceeded its request quota (429); carries the advisory text.
    RateLimited(String),
    /// Transport verification failed (500).
    TransportConfig,
    /// The delivery attempt failed (500).
    Delivery,
}

impl ApiError {
    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a cross-origin rejection error.
    pub fn cross_origin() -> Self {
        Self::CrossOrigin
    }

    /// Create a rate-limited error with the configured advisory text.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited(message.into())
    }

    /// Create a transport configuration error.
    pub fn transport_config() -> Self {
        Self::TransportConfig
    }

    /// Create a delivery error.
    pub fn delivery() -> Self {
        Self::Delivery
    }

    /// Create a validation error from validator::ValidationErrors.
    ///
    /// Flattens the per-field error lists into `{field, message}` pairs,
    /// reported in field declaration order.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let mut fields: Vec<&str> = field_errors.keys().copied().collect();
        fields.sort_by_key(|f| {
            FIELD_ORDER
                .iter()
                .position(|k| k == f)
                .unwrap_or(FIELD_ORDER.len())
        });

        let mut entries = Vec::new();
        for field in fields {
            if let Some(errs) = field_errors.get(field) {
                for e in errs.iter() {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Valor inválido para {field}"));
                    entries.push(FieldError {
                        field: field.to_string(),
                        message,
                    });
                }
            }
        }

        Self::Validation(entries)
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::CrossOrigin | ApiError::TransportConfig | ApiError::Delivery => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => {
                (status, Json(ValidationErrorBody { errors })).into_response()
            }
            ApiError::BadRequest(message) => {
                (status, Json(ErrorBody { error: message })).into_response()
            }
            ApiError::CrossOrigin => (
                status,
                Json(ErrorBody {
                    error: CORS_REJECTED.to_string(),
                }),
            )
                .into_response(),
            // The advisory text is sent as-is, not wrapped in JSON
            ApiError::RateLimited(message) => (status, message).into_response(),
            ApiError::TransportConfig => (
                status,
                Json(ErrorBody {
                    error: TRANSPORT_CONFIG_FAILED.to_string(),
                }),
            )
                .into_response(),
            ApiError::Delivery => (
                status,
                Json(ErrorBody {
                    error: DELIVERY_FAILED.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(errors) => write!(f, "validation failed on {} field(s)", errors.len()),
            ApiError::BadRequest(message) => write!(f, "bad request: {message}"),
            ApiError::CrossOrigin => write!(f, "origin not allowed"),
            ApiError::RateLimited(_) => write!(f, "rate limit exceeded"),
            ApiError::TransportConfig => write!(f, "mail transport verification failed"),
            ApiError::Delivery => write!(f, "mail delivery failed"),
        }
    }
}

impl std::error::Error for ApiError {}
