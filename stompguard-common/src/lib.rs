//! Common configuration and error types for `stompguard`

pub mod config;
pub mod error;

pub use config::ConstraintsConfig;
pub use error::{GuardError, Result};
