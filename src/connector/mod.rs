//! # Connector Layer
//!
//! External integrations implementing the application interfaces:
//! - Completion API client (OpenAI-style, plus a scripted mock)
//! - URL content fetching over HTTP
//! - Hosted sliding-window rate-limit store client
//! - The HTTP API surface itself (axum router, controllers, gate)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
