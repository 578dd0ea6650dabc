//! Input validation and sanitization.
//!
//! Everything here is a pure string transformation; no network access happens
//! before a URL has passed [`validate_trace_url`].

mod sanitize;
mod url_validation;

pub use sanitize::sanitize_url_input;
pub(crate) use url_validation::host_with_port;
pub use url_validation::validate_trace_url;
