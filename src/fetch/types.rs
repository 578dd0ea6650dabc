//! Trace data model.

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter};

/// Coarse class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
pub enum StatusClass {
    /// 200-299
    #[serde(rename = "2xx")]
    Success,
    /// 300-399
    #[serde(rename = "3xx")]
    Redirection,
    /// 400-499
    #[serde(rename = "4xx")]
    ClientError,
    /// 500-599
    #[serde(rename = "5xx")]
    ServerError,
    /// Anything outside 200-599
    #[serde(rename = "")]
    Unknown,
}

impl StatusClass {
    /// Classifies a status code.
    pub fn from_code(status: u16) -> Self {
        match status {
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirection,
            400..=499 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Unknown,
        }
    }

    /// `"2xx"`, `"3xx"`, `"4xx"`, `"5xx"`, or `""` for out-of-range codes.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Success => "2xx",
            StatusClass::Redirection => "3xx",
            StatusClass::ClientError => "4xx",
            StatusClass::ServerError => "5xx",
            StatusClass::Unknown => "",
        }
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true for statuses the tracer follows (300-399 inclusive).
pub fn is_redirect_status(status: u16) -> bool {
    (300..=399).contains(&status)
}

/// One recorded request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    /// 1-based position in the chain
    pub number: usize,
    /// Absolute URL that was requested
    pub url: String,
    /// HTTP status code observed (or a synthetic marker)
    pub status_code: u16,
    /// Class of `status_code`
    pub status_class: StatusClass,
}

impl Hop {
    /// Creates a hop, deriving the status class from the code.
    pub fn new(number: usize, url: impl Into<String>, status_code: u16) -> Self {
        Self {
            number,
            url: url.into(),
            status_code,
            status_class: StatusClass::from_code(status_code),
        }
    }
}

/// Why a trace ended somewhere other than a plain terminal response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TraceDiagnostic {
    /// A hop did not answer within the transport timeouts
    Timeout,
    /// A hop presented a certificate chain not signed by a known authority
    TlsValidationError,
    /// The caller cancelled the trace mid-hop
    Cancelled,
    /// A redirect pointed at an already visited URL
    LoopDetected,
    /// A 3xx response carried no `Location` header
    MissingLocation,
}

impl TraceDiagnostic {
    /// Human-readable message for reports.
    pub fn message(&self) -> &'static str {
        match self {
            TraceDiagnostic::Timeout => "The request timed out",
            TraceDiagnostic::TlsValidationError => {
                "The certificate is not signed by a trusted authority"
            }
            TraceDiagnostic::Cancelled => "The trace was cancelled",
            TraceDiagnostic::LoopDetected => "Redirect loop detected",
            TraceDiagnostic::MissingLocation => "Redirect Location Not Provided By Headers",
        }
    }

    /// True for diagnostics that stop a trace before it reaches a final URL.
    pub fn is_abort(&self) -> bool {
        matches!(
            self,
            TraceDiagnostic::Timeout | TraceDiagnostic::TlsValidationError | TraceDiagnostic::Cancelled
        )
    }
}

/// Outcome of one trace.
///
/// `final_url` is empty when the trace did not reach a destination (aborted, or
/// a redirect without `Location`). `hops` is in request order and never
/// reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceResult {
    /// Last URL reached, empty if none
    pub final_url: String,
    /// Recorded hops
    pub hops: Vec<Hop>,
    /// Status of the last hop, if any hop was recorded
    pub final_status: Option<u16>,
    /// Set when the trace did not end on a plain terminal response
    pub diagnostic: Option<TraceDiagnostic>,
    /// The server of a location-less redirect identified as a CDN/edge provider
    pub cdn_detected: bool,
}

impl TraceResult {
    /// The chain reached `final_url` normally or via the special-endpoint shortcut.
    pub(crate) fn completed(final_url: impl Into<String>, hops: Vec<Hop>) -> Self {
        let final_status = hops.last().map(|hop| hop.status_code);
        Self {
            final_url: final_url.into(),
            hops,
            final_status,
            diagnostic: None,
            cdn_detected: false,
        }
    }

    /// A redirect led back to `url`; the last hop is the loop marker.
    pub(crate) fn loop_detected(url: impl Into<String>, hops: Vec<Hop>) -> Self {
        Self {
            diagnostic: Some(TraceDiagnostic::LoopDetected),
            ..Self::completed(url, hops)
        }
    }

    /// A 3xx arrived without `Location`; hops are reported empty.
    pub(crate) fn missing_location(cdn_detected: bool) -> Self {
        Self {
            final_url: String::new(),
            hops: Vec::new(),
            final_status: None,
            diagnostic: Some(TraceDiagnostic::MissingLocation),
            cdn_detected,
        }
    }

    /// The trace stopped early; keeps the hops recorded before the abort.
    pub(crate) fn aborted(diagnostic: TraceDiagnostic, hops: Vec<Hop>) -> Self {
        Self {
            final_url: String::new(),
            final_status: None,
            diagnostic: Some(diagnostic),
            cdn_detected: false,
            hops,
        }
    }

    /// True if the trace was aborted by a timeout, TLS failure, or cancellation.
    pub fn is_aborted(&self) -> bool {
        self.diagnostic.is_some_and(|d| d.is_abort())
    }

    /// Diagnostic message, if any.
    pub fn diagnostic_message(&self) -> Option<&'static str> {
        self.diagnostic.map(|d| d.message())
    }
}
