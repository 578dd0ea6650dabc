//! Markup sanitization for caller-supplied URLs.
//!
//! Input URLs end up echoed back in rendered reports, so they are passed through
//! an HTML sanitizer before tracing. The sanitizer HTML-escapes text, which turns
//! every `&` of a query string into `&amp;`; those are restored afterwards.

use log::debug;

use crate::config::MAX_SANITIZE_PASSES;

/// Strips markup and scripts from `raw` and repairs ampersand over-encoding.
///
/// The result is a fixed point: sanitizing it again yields the same string.
/// A single sanitizer pass is not always stable (an escaped entity can decode
/// into something the next pass rewrites), so passes repeat until the output
/// stops changing, up to `MAX_SANITIZE_PASSES`.
///
/// # Examples
///
/// ```
/// use wheregoes::security::sanitize_url_input;
///
/// assert_eq!(
///     sanitize_url_input("https://example.com/?a=1&b=2"),
///     "https://example.com/?a=1&b=2"
/// );
/// assert_eq!(
///     sanitize_url_input("https://example.com/<script>alert(1)</script>"),
///     "https://example.com/"
/// );
/// ```
pub fn sanitize_url_input(raw: &str) -> String {
    let mut current = sanitize_pass(raw);
    for _ in 1..MAX_SANITIZE_PASSES {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
    debug!(
        "Sanitizer did not settle after {} passes for input of {} bytes",
        MAX_SANITIZE_PASSES,
        raw.len()
    );
    current
}

fn sanitize_pass(input: &str) -> String {
    restore_ampersands(&ammonia::clean(input))
}

/// Replaces `&amp;` with `&` until none remain.
fn restore_ampersands(input: &str) -> String {
    let mut output = input.replace("&amp;", "&");
    while output.contains("&amp;") {
        output = output.replace("&amp;", "&");
    }
    output
}
