//! SMTP mailer backed by `lettre`.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};

use crate::config::{MailConfig, SmtpConfig};

use super::types::{DeliveryReceipt, MailerError, OutgoingEmail};
use super::Mailer;

/// Mailer that relays through an authenticated SMTP server over STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// Create a mailer from configuration.
    ///
    /// The sender mailbox pairs the configured display name with the
    /// authenticated SMTP user; the recipient is the configured destination
    /// address. Fails if either address does not parse or the relay host is
    /// invalid.
    pub fn new(smtp: &SmtpConfig, mail: &MailConfig) -> Result<Self, MailerError> {
        let sender: Address = smtp
            .user
            .parse()
            .map_err(|e| MailerError::Address(format!("sender: {e}")))?;
        let from = Mailbox::new(Some(mail.sender_name.clone()), sender);
        let to: Mailbox = mail
            .receiver
            .parse()
            .map_err(|e| MailerError::Address(format!("receiver: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
            .map_err(|e| MailerError::Transport(e.to_string()))?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.user.clone(), smtp.pass.clone()))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn verify(&self) -> Result<(), MailerError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailerError::Transport(
                "SMTP connection test failed".to_string(),
            )),
            Err(e) => Err(MailerError::Transport(e.to_string())),
        }
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailerError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| MailerError::Send(format!("message build failed: {e}")))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailerError::Send(e.to_string()))?;

        Ok(DeliveryReceipt {
            message_id: response.first_line().unwrap_or_default().to_string(),
        })
    }
}
