//! Web API module for the contact backend.
//!
//! This module provides the REST API that receives contact form submissions
//! and relays them by email after origin, rate limit and validation checks.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
