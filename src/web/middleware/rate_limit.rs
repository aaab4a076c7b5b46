//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, RwLock},
    time::{Duration, Instant},
};

use crate::web::error::ApiError;

/// Interval between cleanup passes over expired counters.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Request count for one caller IP within its current window.
#[derive(Debug, Clone, Copy)]
struct WindowCounter {
    count: u32,
    window_start: Instant,
}

/// State for fixed-window per-IP rate limiting.
///
/// Memory-resident and process-wide; counters reset on restart.
pub struct RateLimitState {
    /// Per-IP request counters.
    counters: RwLock<HashMap<String, WindowCounter>>,
    /// Maximum requests allowed per IP within one window.
    max_requests: u32,
    /// Window length.
    window: Duration,
    /// Advisory message returned to limited callers.
    message: String,
}

impl RateLimitState {
    /// Create a new rate limit state.
    pub fn new(max_requests: u32, window: Duration, message: impl Into<String>) -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
            max_requests,
            window,
            message: message.into(),
        }
    }

    /// Record a request for the given IP and check whether it is allowed.
    ///
    /// Every request is counted, including rejected ones; rejections never
    /// reset or extend the window. Once the window has expired, the next
    /// request starts a fresh one.
    pub fn check(&self, ip: &str) -> bool {
        let now = Instant::now();
        let mut counters = self.counters.write().unwrap();
        let counter = counters.entry(ip.to_string()).or_insert(WindowCounter {
            count: 0,
            window_start: now,
        });

        if now.duration_since(counter.window_start) >= self.window {
            counter.count = 0;
            counter.window_start = now;
        }

        counter.count += 1;
        counter.count <= self.max_requests
    }

    /// Get the advisory message for limited callers.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Drop counters whose window has expired.
    pub fn cleanup(&self) {
        let now = Instant::now();
        let mut counters = self.counters.write().unwrap();
        counters.retain(|_, c| now.duration_since(c.window_start) < self.window);
    }

    /// Start a background task to periodically clean up expired counters.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(CLEANUP_INTERVAL).await;
                self.cleanup();
            }
        });
    }
}

/// Extract client IP from request.
fn get_client_ip(req: &Request<Body>) -> String {
    // Try X-Forwarded-For header first (for reverse proxy)
    if let Some(forwarded) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
    {
        // Take the first IP in the chain
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().to_string();
        }
    }

    // Try X-Real-IP header
    if let Some(real_ip) = req
        .headers()
        .get("X-Real-IP")
        .and_then(|v| v.to_str().ok())
    {
        return real_ip.to_string();
    }

    // Fall back to connection info
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    // Default to unknown
    "unknown".to_string()
}

/// Rate limiting middleware for the contact API.
pub async fn rate_limit(state: Arc<RateLimitState>, req: Request<Body>, next: Next) -> Response {
    let ip = get_client_ip(&req);

    if !state.check(&ip) {
        tracing::warn!(ip = %ip, "Rate limit exceeded");
        return ApiError::rate_limited(state.message().to_string()).into_response();
    }

    next.run(req).await
}
