//! Router configuration for the contact API.

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{send_contact, AppState};
use super::middleware::{create_cors_layer, origin_guard, rate_limit, OriginState, RateLimitState};

/// OpenAPI document for the contact API.
#[derive(OpenApi)]
#[openapi(
    paths(crate::web::handlers::contact::send_contact),
    components(schemas(
        crate::web::dto::ContactRequest,
        crate::web::dto::SendContactResponse,
        crate::web::error::FieldError,
        crate::web::error::ValidationErrorBody,
        crate::web::error::ErrorBody,
    )),
    tags((name = "contact", description = "Contact form submission endpoints"))
)]
struct ApiDoc;

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    origin_state: Arc<OriginState>,
    rate_limit_state: Arc<RateLimitState>,
) -> Router {
    // Contact routes (rate limited per client IP)
    let contact_routes = Router::new()
        .route("/mail", post(send_contact))
        .layer(middleware::from_fn(move |req, next| {
            let state = rate_limit_state.clone();
            rate_limit(state, req, next)
        }));

    // Clone origin_state for the middleware closure
    let origin_state_for_middleware = origin_state.clone();

    // Build the main router with middleware
    Router::new()
        .nest("/api", contact_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(origin_state.allowed_origins()))
                .layer(middleware::from_fn(move |req, next| {
                    let state = origin_state_for_middleware.clone();
                    origin_guard(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create a router serving the OpenAPI document.
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_document))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// OpenAPI document handler.
async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }

    #[test]
    fn test_create_openapi_router() {
        let _router = create_openapi_router();
        // Should not panic
    }

    #[test]
    fn test_openapi_document_lists_contact_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/mail"));
    }

    #[test]
    fn test_openapi_document_registers_response_schemas() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components missing");

        for schema in [
            "ContactRequest",
            "SendContactResponse",
            "FieldError",
            "ValidationErrorBody",
            "ErrorBody",
        ] {
            assert!(components.schemas.contains_key(schema), "schema: {schema}");
        }
    }
}
