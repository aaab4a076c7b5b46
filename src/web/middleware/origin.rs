//! Origin allow-list middleware and CORS configuration.

use axum::{
    body::Body,
    http::header::{ACCEPT, CONTENT_TYPE, ORIGIN},
    http::{HeaderValue, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::web::error::ApiError;

/// State for the origin guard.
pub struct OriginState {
    /// Origins allowed to call the API.
    allowed_origins: Vec<String>,
}

impl OriginState {
    /// Create a new origin guard state from the configured allow-list.
    pub fn new(allowed_origins: &[String]) -> Self {
        Self {
            allowed_origins: allowed_origins.to_vec(),
        }
    }

    /// Check whether a declared origin is allow-listed.
    ///
    /// An empty allow-list disables the guard, mirroring the permissive
    /// CORS layer used in development.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == origin)
    }

    /// Get the configured allow-list.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}

/// Origin guard middleware.
///
/// Requests without an `Origin` header (same-origin or non-browser callers)
/// pass through. Requests declaring an origin outside the allow-list are
/// rejected before any other processing; the rejected origin is logged
/// server-side while the caller receives a generic error.
pub async fn origin_guard(state: Arc<OriginState>, req: Request<Body>, next: Next) -> Response {
    match req.headers().get(ORIGIN) {
        None => next.run(req).await,
        Some(value) => {
            let origin = value.to_str().unwrap_or("");
            if state.is_allowed(origin) {
                next.run(req).await
            } else {
                tracing::error!(origin = %origin, "Origin rejected by CORS policy");
                ApiError::cross_origin().into_response()
            }
        }
    }
}

/// Create a CORS layer from configuration.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if origins.is_empty() {
        // Development mode: allow any origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_origin(Any)
    } else {
        let parsed_origins: Vec<HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();

        if parsed_origins.is_empty() {
            // Fallback to dev mode if no valid origins
            CorsLayer::new()
                .allow_methods(methods)
                .allow_headers(Any)
                .allow_origin(Any)
        } else {
            CorsLayer::new()
                .allow_methods(methods)
                .allow_headers([CONTENT_TYPE, ACCEPT])
                .allow_origin(parsed_origins)
        }
    }
}
