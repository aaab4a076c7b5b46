//! Middleware for Web API.

pub mod origin;
pub mod rate_limit;

pub use origin::{create_cors_layer, origin_guard, OriginState};
pub use rate_limit::{rate_limit, RateLimitState};
