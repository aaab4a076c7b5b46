use std::sync::Arc;

use tracing::{error, info};

use buzon::mail::SmtpMailer;
use buzon::web::WebServer;
use buzon::Config;

#[tokio::main]
async fn main() {
    // Load .env before reading environment overrides
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    buzon::logging::init(&config.logging);

    info!("Buzon - Contact Form Mail Backend");
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Build the SMTP mailer shared by all requests
    let mailer = match SmtpMailer::new(&config.smtp, &config.mail) {
        Ok(mailer) => Arc::new(mailer),
        Err(e) => {
            error!("Failed to create SMTP mailer: {}", e);
            std::process::exit(1);
        }
    };

    let server = WebServer::new(&config, mailer);
    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
