//! Caller-side shaping of a trace result.

use serde::Serialize;

use crate::config::{MISSING_LOCATION_STATUS, UNDETERMINED_STATUS};
use crate::fetch::{Hop, TraceDiagnostic, TraceResult};

/// A trace result prepared for display or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    /// URL as submitted by the user
    pub url: String,
    /// Destination reached, empty if none
    pub redirect_url: String,
    /// Hops to display; never empty unless the trace was aborted
    pub hops: Vec<Hop>,
    /// Index of the last hop the tracer recorded, `-1` if it recorded none
    pub last_index: i64,
    /// Status shown as the outcome of the trace
    pub status_code: u16,
    /// Explanation shown alongside the hops, if any
    pub final_message: Option<String>,
    /// The location-less redirect came from a CDN edge
    pub cdn_detected: bool,
    /// Diagnostic reported by the tracer
    pub diagnostic: Option<TraceDiagnostic>,
}

impl TraceReport {
    /// Builds a report from a finished trace.
    ///
    /// An empty hop list from a trace that was not aborted means a redirect
    /// arrived without `Location`. The final status is then undetermined, so a
    /// single 5xx hop for the submitted URL is synthesized for display.
    pub fn from_result(result: TraceResult, raw_url: &str) -> Self {
        let TraceResult {
            final_url,
            mut hops,
            final_status,
            diagnostic,
            cdn_detected,
        } = result;

        let last_index = hops.len() as i64 - 1;
        let aborted = diagnostic.is_some_and(|d| d.is_abort());

        let (status_code, final_message) = match final_status {
            Some(status) if !aborted => (status, None),
            _ if aborted => (
                UNDETERMINED_STATUS,
                diagnostic.map(|d| d.message().to_string()),
            ),
            _ => {
                hops.push(Hop::new(1, raw_url, MISSING_LOCATION_STATUS));
                (
                    MISSING_LOCATION_STATUS,
                    Some(TraceDiagnostic::MissingLocation.message().to_string()),
                )
            }
        };

        Self {
            url: raw_url.to_string(),
            redirect_url: final_url,
            hops,
            last_index,
            status_code,
            final_message,
            cdn_detected,
            diagnostic,
        }
    }

    /// True if the tracer stopped before reaching a destination.
    pub fn is_aborted(&self) -> bool {
        self.diagnostic.is_some_and(|d| d.is_abort())
    }
}
