//! Configuration constants.
//!
//! This module defines the constants used throughout the tracer and its callers,
//! including transport timeouts, input limits, status markers, and the provider
//! signatures that shape redirect handling.

/// Overall per-request timeout in seconds.
///
/// Covers connect, TLS, headers and body for a single hop. A hop that exceeds it
/// aborts the trace with a timeout diagnostic.
pub const REQUEST_TIMEOUT_SECS: u64 = 8;

/// Time to wait for response headers in seconds.
pub const RESPONSE_HEADER_TIMEOUT_SECS: u64 = 5;

/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// User-Agent sent on every hop.
///
/// A fixed, realistic desktop Chrome string. Some origins answer bots with a
/// different redirect chain than browsers, so the tracer always identifies as one.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Maximum accepted input URL length (2048 characters).
/// This matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Upper bound on sanitizer passes before giving up on reaching a fixed point.
pub const MAX_SANITIZE_PASSES: usize = 8;

// Status markers
/// Status recorded on the synthetic hop that closes a redirect loop (508 Loop Detected).
pub const LOOP_DETECTED_STATUS: u16 = 508;
/// Status callers show when a redirect promised a target but sent no `Location`.
pub const MISSING_LOCATION_STATUS: u16 = 500;
/// Status reported for a trace that stopped before any final response (timeout, TLS, cancellation).
pub const UNDETERMINED_STATUS: u16 = 500;
/// Status forced on the synthetic hop for a special terminal endpoint.
pub const SPECIAL_ENDPOINT_STATUS: u16 = 200;

// Redirect handling
/// `Location` prefixes treated as a terminal success without further tracing.
///
/// Upstream sign-in pages behind these prefixes bounce through per-session
/// endpoints that cannot be followed meaningfully from a server.
pub const SPECIAL_ENDPOINT_PREFIXES: &[&str] = &["https://outlook.office365.com"];

/// `Server` header fragments identifying CDN/edge providers (matched case-insensitively).
pub const CDN_SERVER_SIGNATURES: &[&str] = &["cloudflare"];

/// Query parameters whose values identity providers tend to double-encode.
/// When several are present, the last one listed wins.
pub const REDIRECT_QUERY_PARAMS: &[&str] = &["returnUri", "redir"];

// Server defaults
/// Default listening port for `wheregoes serve`
pub const DEFAULT_PORT: u16 = 8080;

// CLI exit codes
/// Tracing failed hard (network error, unresolvable redirect)
pub const EXIT_HARD_FAILURE: i32 = 1;
/// The input URL was rejected before tracing
pub const EXIT_INVALID_INPUT: i32 = 2;
/// The trace was aborted (timeout, TLS trust failure, cancellation)
pub const EXIT_ABORTED: i32 = 3;
