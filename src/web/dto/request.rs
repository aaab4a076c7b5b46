//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::contact::ContactSubmission;

use super::validation::{not_empty_trimmed, TextFields};

/// Contact form submission request.
///
/// Fields are optional at the wire level so that every missing field is
/// reported as its own validation error instead of a deserialization
/// failure.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactRequest {
    /// Sender's name.
    #[validate(
        required(message = "El campo nombre es obligatorio"),
        custom(function = not_empty_trimmed, message = "El campo nombre no puede estar vacío")
    )]
    pub nombre: Option<String>,
    /// Sender's email address.
    #[validate(
        required(message = "El campo email es obligatorio"),
        email(message = "Debe ser una dirección de correo electrónico válida")
    )]
    pub email: Option<String>,
    /// Sender's phone number.
    #[validate(
        required(message = "El campo telefono es obligatorio"),
        custom(function = not_empty_trimmed, message = "El campo telefono no puede estar vacío")
    )]
    pub telefono: Option<String>,
    /// Message text.
    #[validate(
        required(message = "El campo mensaje es obligatorio"),
        custom(function = not_empty_trimmed, message = "El campo mensaje no puede estar vacío")
    )]
    pub mensaje: Option<String>,
}

impl TextFields for ContactRequest {
    const TEXT_FIELDS: &'static [&'static str] = &["nombre", "email", "telefono", "mensaje"];
}

impl ContactRequest {
    /// Convert the request into a sanitized submission.
    ///
    /// Call only after validation has passed; the fields are then present
    /// and non-empty.
    pub fn into_submission(self) -> ContactSubmission {
        ContactSubmission::from_parts(
            self.nombre.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
            self.telefono.as_deref().unwrap_or_default(),
            self.mensaje.as_deref().unwrap_or_default(),
        )
    }
}
