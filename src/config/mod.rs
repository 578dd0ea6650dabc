//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, status markers, provider signatures)
//! - HTTP header constants
//! - Configuration types and CLI option parsing

mod cli;
mod constants;
mod headers;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, ServeArgs, TraceArgs};
pub use constants::*;
pub use headers::*;
pub use types::{Config, LogFormat, LogLevel};
