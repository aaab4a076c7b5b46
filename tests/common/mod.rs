//! Test helpers for Web API tests.
//!
//! Provides a mock mailer that records deliveries in memory, plus server
//! builders that exercise the real router and middleware stack.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;

use buzon::mail::{DeliveryReceipt, Mailer, MailerError, OutgoingEmail};
use buzon::web::handlers::AppState;
use buzon::web::middleware::{OriginState, RateLimitState};
use buzon::web::router::{create_health_router, create_openapi_router, create_router};

/// Origin that test servers allow by default.
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Rate limit advisory used by test servers.
pub const RATE_LIMIT_MESSAGE: &str =
    "Demasiadas solicitudes desde esta IP, por favor intente de nuevo después de 15 minutos";

/// Mock mailer that records outgoing emails instead of talking to SMTP.
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_verify: AtomicBool,
    fail_send: AtomicBool,
}

impl MockMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make subsequent transport verifications fail.
    pub fn fail_verify(&self) {
        self.fail_verify.store(true, Ordering::SeqCst);
    }

    /// Make subsequent delivery attempts fail.
    pub fn fail_send(&self) {
        self.fail_send.store(true, Ordering::SeqCst);
    }

    /// All emails recorded so far.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of emails recorded so far.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn verify(&self) -> Result<(), MailerError> {
        if self.fail_verify.load(Ordering::SeqCst) {
            return Err(MailerError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailerError> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(MailerError::Send("550 mailbox unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(DeliveryReceipt {
            message_id: "250 2.0.0 OK".to_string(),
        })
    }
}

/// Create a test server with the given origin allow-list and rate limit.
pub fn create_test_server_with_config(
    origins: &[String],
    max_requests: u32,
    window: Duration,
) -> (TestServer, Arc<MockMailer>) {
    let mailer = MockMailer::new();

    let app_state = Arc::new(AppState::new(mailer.clone()));
    let origin_state = Arc::new(OriginState::new(origins));
    let rate_limit_state = Arc::new(RateLimitState::new(
        max_requests,
        window,
        RATE_LIMIT_MESSAGE,
    ));

    let router = create_router(app_state, origin_state, rate_limit_state)
        .merge(create_health_router())
        .merge(create_openapi_router());

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, mailer)
}

/// Create a test server with the given rate limit over the given window.
pub fn create_test_server_with_limits(
    max_requests: u32,
    window: Duration,
) -> (TestServer, Arc<MockMailer>) {
    create_test_server_with_config(&[ALLOWED_ORIGIN.to_string()], max_requests, window)
}

/// Create a test server with the given origin allow-list.
pub fn create_test_server_with_origins(origins: &[String]) -> (TestServer, Arc<MockMailer>) {
    create_test_server_with_config(origins, 1000, Duration::from_secs(900))
}

/// Create a test server with a rate limit generous enough to never trip.
pub fn create_test_server() -> (TestServer, Arc<MockMailer>) {
    create_test_server_with_limits(1000, Duration::from_secs(900))
}
