//! Terminal rendering of trace reports.

use colored::*;

use super::report::TraceReport;
use crate::fetch::{Hop, StatusClass};

/// Colors a status code by class: green 2xx, yellow 3xx, red 4xx/5xx.
fn colored_status(hop: &Hop) -> ColoredString {
    let code = hop.status_code.to_string();
    match hop.status_class {
        StatusClass::Success => code.green(),
        StatusClass::Redirection => code.yellow(),
        StatusClass::ClientError | StatusClass::ServerError => code.red(),
        StatusClass::Unknown => code.normal(),
    }
}

/// Renders one hop as `  1. [301] http://...`.
pub fn format_hop(hop: &Hop) -> String {
    format!("{:>3}. [{}] {}", hop.number, colored_status(hop), hop.url)
}

/// Renders the full report as lines of text.
pub fn format_trace_report(report: &TraceReport) -> Vec<String> {
    let mut lines: Vec<String> = report.hops.iter().map(format_hop).collect();

    if !report.redirect_url.is_empty() {
        lines.push(format!("{} {}", "Final URL:".bold(), report.redirect_url));
    }
    if let Some(message) = &report.final_message {
        lines.push(format!("{} {}", "Note:".bold(), message));
    }
    if report.cdn_detected {
        lines.push(format!(
            "{} the redirecting server is a CDN edge; the origin may be blocking automated requests",
            "Note:".bold()
        ));
    }
    lines
}

/// Prints the report to stdout.
pub fn print_trace_report(report: &TraceReport) {
    for line in format_trace_report(report) {
        println!("{line}");
    }
}
