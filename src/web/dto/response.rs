//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

/// Response for a successfully relayed submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SendContactResponse {
    /// Confirmation message, in Spanish.
    pub message: String,
}

impl SendContactResponse {
    /// Create the fixed success response.
    pub fn sent() -> Self {
        Self {
            message: "Email enviado exitosamente".to_string(),
        }
    }
}
