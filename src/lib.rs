//! wheregoes library: hop-by-hop HTTP redirect tracing
//!
//! Follows the redirect chain of a URL one request at a time and records every
//! hop with its status. Loops, redirects without `Location`, timeouts and
//! untrusted certificates end a trace deterministically with a diagnostic.
//!
//! # Example
//!
//! ```no_run
//! use wheregoes::initialization::init_redirect_client;
//! use wheregoes::{trace, validate_trace_url, Config, ReqwestTransport, TraceContext};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let start = validate_trace_url("http://example.com/old", None)?;
//! let transport = ReqwestTransport::new(init_redirect_client(&config)?);
//!
//! let result = trace(&start, &transport, &TraceContext::new()).await?;
//! for hop in &result.hops {
//!     println!("{} [{}] {}", hop.number, hop.status_code, hop.url);
//! }
//! println!("Final URL: {}", result.final_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod security;
pub mod server;

// Re-export public API
pub use app::TraceReport;
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{TraceError, TransportError, ValidationError};
pub use fetch::{
    trace, Hop, RedirectPolicy, ReqwestTransport, StatusClass, TraceContext, TraceDiagnostic,
    TraceResult, Transport,
};
pub use security::{sanitize_url_input, validate_trace_url};
