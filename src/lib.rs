//! Buzon - Contact Form Mail Backend
//!
//! A small web service that accepts contact form submissions over HTTP
//! and relays them to a configured inbox via SMTP.

pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod mail;
pub mod web;

pub use config::Config;
pub use contact::{escape_html, normalize_email, ContactSubmission};
pub use error::{BuzonError, Result};
pub use mail::{DeliveryReceipt, Mailer, MailerError, OutgoingEmail, SmtpMailer};
pub use web::{ApiError, WebServer};
