//! Web server for the contact API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::mail::Mailer;

use super::handlers::AppState;
use super::middleware::{OriginState, RateLimitState};
use super::router::{create_health_router, create_openapi_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Origin allow-list state.
    origin_state: Arc<OriginState>,
    /// Rate limiter state.
    rate_limit_state: Arc<RateLimitState>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, mailer: Arc<dyn Mailer>) -> Self {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .expect("Invalid web server address");

        let app_state = Arc::new(AppState::new(mailer));
        let origin_state = Arc::new(OriginState::new(&config.cors.allowed_origins));
        let rate_limit_state = Arc::new(RateLimitState::new(
            config.rate_limit.max_requests,
            Duration::from_secs(config.rate_limit.window_secs),
            config.rate_limit.message.clone(),
        ));

        Self {
            addr,
            app_state,
            origin_state,
            rate_limit_state,
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        // Keep a handle for the cleanup task before moving state into the router
        let rate_limit_state = self.rate_limit_state.clone();

        let router = create_router(self.app_state, self.origin_state, self.rate_limit_state)
            .merge(create_health_router())
            .merge(create_openapi_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start rate limiter cleanup background task after successful bind
        rate_limit_state.start_cleanup_task();
        tracing::info!("Rate limiter cleanup task started (runs every 5 minutes)");

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        // Keep a handle for the cleanup task before moving state into the router
        let rate_limit_state = self.rate_limit_state.clone();

        let router = create_router(self.app_state, self.origin_state, self.rate_limit_state)
            .merge(create_health_router())
            .merge(create_openapi_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start rate limiter cleanup background task after successful bind
        rate_limit_state.start_cleanup_task();
        tracing::info!("Rate limiter cleanup task started (runs every 5 minutes)");

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
