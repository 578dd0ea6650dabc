//! Trace server HTTP handlers.

mod home;
mod trace;

pub use home::{health_handler, home_handler, redirect_home, stats_handler};
pub use trace::{trace_form_handler, trace_query_handler};
