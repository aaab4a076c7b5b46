//! Mail relay module for buzon.
//!
//! Defines the outgoing message types and the [`Mailer`] seam between the
//! HTTP layer and the SMTP transport, so tests can substitute a mock
//! implementation for the real relay.

pub mod smtp;
pub mod types;

use async_trait::async_trait;

pub use smtp::SmtpMailer;
pub use types::{DeliveryReceipt, MailerError, OutgoingEmail};

/// Sends contact-form emails through an external transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Verify connectivity and authentication to the transport.
    async fn verify(&self) -> Result<(), MailerError>;

    /// Attempt exactly one delivery of the given message.
    ///
    /// Success yields the transport-assigned message identifier. There is no
    /// retry: a failed send surfaces as an error for this request only.
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailerError>;
}
