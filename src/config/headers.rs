//! HTTP header constants.
//!
//! Response headers the trace server attaches to every answer.

/// X-Content-Type-Options header
pub const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "X-Content-Type-Options";
/// X-Frame-Options header
pub const HEADER_X_FRAME_OPTIONS: &str = "X-Frame-Options";

/// Security headers set on all server responses, as (name, value) pairs.
pub const SECURITY_RESPONSE_HEADERS: &[(&str, &str)] = &[
    (HEADER_X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (HEADER_X_FRAME_OPTIONS, "SAMEORIGIN"),
];
