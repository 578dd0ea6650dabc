//! Error handling.
//!
//! This module provides:
//! - Error type definitions for validation, transport, tracing and initialization
//! - Categorization of `reqwest` errors into transport outcomes
//!
//! Errors fall into three groups:
//! - **Input errors** (`ValidationError`): rejected before tracing starts
//! - **Aborts** (`TransportError::Timeout`, `TlsValidation`, `Cancelled`): end a
//!   trace early with a diagnostic instead of failing it
//! - **Hard failures** (`TraceError`): abort the whole operation
//!
//! Nothing is retried automatically.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, is_tls_trust_failure};
pub use types::{BoxError, InitializationError, TraceError, TransportError, ValidationError};
