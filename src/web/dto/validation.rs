//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::web::error::ApiError;

/// Fields of a JSON request body that must hold text when present.
///
/// Deserializing a mistyped field straight into `Option<String>` would fail
/// the whole body parse; declaring the text fields lets [`ValidatedJson`]
/// report each one as its own field-level error instead.
pub trait TextFields {
    /// Names of the fields that must deserialize from JSON strings.
    const TEXT_FIELDS: &'static [&'static str];
}

/// A JSON extractor that validates the request body.
///
/// This extractor deserializes the request body as JSON and then validates it
/// using the `validator` crate. Fields carrying a non-text JSON value are
/// reported alongside the other validation failures, so the caller always
/// receives the full list of field-level errors in one response.
///
/// # Example
///
/// ```ignore
/// use buzon::web::dto::ValidatedJson;
///
/// async fn send_contact(
///     ValidatedJson(payload): ValidatedJson<ContactRequest>,
/// ) -> Result<Json<SendContactResponse>, ApiError> {
///     // payload is already validated
///     // ...
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + TextFields,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // First, extract the body as raw JSON
        let Json(mut value) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Cuerpo JSON inválido: {e}")))?;

        // Collect fields that are present but not text; they are removed so
        // the typed deserialization below still succeeds
        let mut errors = ValidationErrors::new();
        let mut mistyped: Vec<&'static str> = Vec::new();
        if let Some(object) = value.as_object_mut() {
            for &field in T::TEXT_FIELDS {
                if matches!(object.get(field), Some(v) if !v.is_string() && !v.is_null()) {
                    errors.add(
                        field,
                        ValidationError::new("text").with_message(
                            format!("El campo {field} debe ser una cadena de texto").into(),
                        ),
                    );
                    mistyped.push(field);
                    object.remove(field);
                }
            }
        }

        let parsed: T = serde_json::from_value(value)
            .map_err(|e| ApiError::bad_request(format!("Cuerpo JSON inválido: {e}")))?;

        // Then, validate the deserialized value; mistyped fields already have
        // an error and must not also be reported as missing
        if let Err(failures) = parsed.validate() {
            for (field, field_failures) in failures.field_errors() {
                if mistyped.contains(&field) {
                    continue;
                }
                for failure in field_failures {
                    errors.add(field, failure.clone());
                }
            }
        }

        if !errors.is_empty() {
            return Err(ApiError::from_validation_errors(errors));
        }

        Ok(ValidatedJson(parsed))
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("not_empty_trimmed").with_message("No puede estar vacío".into()),
        );
    }
    Ok(())
}
