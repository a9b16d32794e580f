//! # Domain Layer
//!
//! Core entities and errors with no framework or transport concerns.

pub mod error;
pub mod models;

pub use error::DomainError;
pub use models::*;
