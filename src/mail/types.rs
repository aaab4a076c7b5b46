//! Outgoing mail types for buzon.

use thiserror::Error;

use crate::contact::ContactSubmission;

/// Mail transport error.
#[derive(Error, Debug)]
pub enum MailerError {
    /// A configured mailbox address could not be parsed.
    #[error("invalid mailbox address: {0}")]
    Address(String),

    /// Transport construction or connection verification failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The delivery attempt failed.
    #[error("send failed: {0}")]
    Send(String),
}

/// One outgoing contact-form email, rendered and ready to send.
///
/// Sender and recipient are fixed by configuration and live in the mailer;
/// the message itself carries only subject and bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
}

impl OutgoingEmail {
    /// Render an email from a sanitized submission.
    ///
    /// Both renderings enumerate all four fields; the HTML body relies on
    /// the submission's fields already being escaped.
    pub fn from_submission(submission: &ContactSubmission) -> Self {
        Self {
            subject: format!("Mensaje de {}", submission.nombre),
            text_body: format!(
                "Nombre: {}\nEmail: {}\nTeléfono: {}\nMensaje: {}",
                submission.nombre, submission.email, submission.telefono, submission.mensaje
            ),
            html_body: format!(
                "<b>Nombre:</b> {}<br><b>Email:</b> {}<br><b>Teléfono:</b> {}<br><b>Mensaje:</b> {}",
                submission.nombre, submission.email, submission.telefono, submission.mensaje
            ),
        }
    }
}

/// Result of a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Message identifier assigned by the transport.
    pub message_id: String,
}
