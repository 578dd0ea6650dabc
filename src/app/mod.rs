//! Command-line caller of the tracer.
//!
//! Shapes a [`TraceResult`](crate::fetch::TraceResult) into a [`TraceReport`]
//! and renders it for a terminal.

mod command;
mod output;
mod report;

pub use command::run_trace_command;
pub use output::{format_hop, format_trace_report, print_trace_report};
pub use report::TraceReport;
