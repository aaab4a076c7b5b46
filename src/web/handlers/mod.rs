//! API handlers for the Web API.

pub mod contact;

pub use contact::*;
