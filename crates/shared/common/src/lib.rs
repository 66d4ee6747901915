//! Common utilities shared across the service crates.
//!
//! This crate provides:
//! - Unified error handling and its HTTP mapping
//! - The JSON response envelope
//! - The cancellable per-request operation context
//! - Configuration structures

pub mod config;
pub mod context;
pub mod error;
pub mod response;

pub use config::*;
pub use context::RequestContext;
pub use error::{AppError, AppResult, OptionExt};
pub use response::Envelope;
