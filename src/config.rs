//! Configuration module for buzon.

use serde::Deserialize;
use std::path::Path;

use crate::{BuzonError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// SMTP transport configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP server port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Authenticated mailbox username (must be set).
    #[serde(default)]
    pub user: String,
    /// Authenticated mailbox password (must be set).
    #[serde(default)]
    pub pass: String,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            user: String::new(),
            pass: String::new(),
        }
    }
}

/// Outgoing mail configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Display name shown as the sender of relayed messages.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    /// Destination mailbox for all submissions (must be set).
    #[serde(default)]
    pub receiver: String,
}

fn default_sender_name() -> String {
    "Pagina Contacto".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender_name: default_sender_name(),
            receiver: String::new(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "https://iaoideoide.github.io".to_string(),
    ]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Rate limit configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests allowed per IP within one window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Advisory message returned to rate-limited callers.
    #[serde(default = "default_rate_limit_message")]
    pub message: String,
}

fn default_max_requests() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    900 // 15 minutes
}

fn default_rate_limit_message() -> String {
    "Demasiadas solicitudes desde esta IP, por favor intente de nuevo después de 15 minutos"
        .to_string()
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            message: default_rate_limit_message(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// SMTP transport configuration.
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Outgoing mail configuration.
    #[serde(default)]
    pub mail: MailConfig,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Rate limit configuration.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BuzonError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BuzonError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `PORT`: Override the server listen port (ignored if not a valid port)
    /// - `EMAIL_USER`: Override the SMTP username / sender mailbox
    /// - `EMAIL_PASS`: Override the SMTP password
    /// - `EMAIL_RECIEVER`: Override the destination mailbox
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        if let Ok(user) = std::env::var("EMAIL_USER") {
            if !user.is_empty() {
                self.smtp.user = user;
            }
        }

        if let Ok(pass) = std::env::var("EMAIL_PASS") {
            if !pass.is_empty() {
                self.smtp.pass = pass;
            }
        }

        if let Ok(receiver) = std::env::var("EMAIL_RECIEVER") {
            if !receiver.is_empty() {
                self.mail.receiver = receiver;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - SMTP credentials are not set
    /// - The destination mailbox is not set
    /// - The rate limit allows zero requests
    pub fn validate(&self) -> Result<()> {
        if self.smtp.user.is_empty() {
            return Err(BuzonError::Config(
                "SMTP user is not set. Set it in config.toml or via the EMAIL_USER \
                 environment variable."
                    .to_string(),
            ));
        }
        if self.smtp.pass.is_empty() {
            return Err(BuzonError::Config(
                "SMTP password is not set. Set it in config.toml or via the EMAIL_PASS \
                 environment variable."
                    .to_string(),
            ));
        }
        if self.mail.receiver.is_empty() {
            return Err(BuzonError::Config(
                "Mail receiver is not set. Set it in config.toml or via the EMAIL_RECIEVER \
                 environment variable."
                    .to_string(),
            ));
        }
        if self.rate_limit.max_requests == 0 {
            return Err(BuzonError::Config(
                "rate_limit.max_requests must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
