//! Validation of caller-supplied URLs before tracing.
//!
//! Checks that the input is an absolute http(s) URL with a host, that it does
//! not point back at the server doing the tracing (which would let the tool be
//! chained into open redirects against itself), and sanitizes it.

use log::debug;
use url::Url;

use super::sanitize::sanitize_url_input;
use crate::config::MAX_URL_LENGTH;
use crate::error_handling::ValidationError;

/// Validates and sanitizes a raw URL string for tracing.
///
/// # Arguments
///
/// * `raw` - The URL exactly as the caller supplied it
/// * `serving_host` - Host (optionally with port) of the server doing the
///   tracing; any input whose host contains it is rejected. `None` or an empty
///   string disables the check.
///
/// # Errors
///
/// - `ValidationError::TooLong` if `raw` exceeds `MAX_URL_LENGTH`
/// - `ValidationError::InvalidFormat` unless `raw` (and its sanitized form) is an
///   absolute `http`/`https` URL with a non-empty host
/// - `ValidationError::SameHostNotAllowed` if the host contains `serving_host`,
///   before or after sanitizing
///
/// # Examples
///
/// ```
/// use wheregoes::security::validate_trace_url;
/// use wheregoes::ValidationError;
///
/// let url = validate_trace_url("https://example.com/a?b=1&c=2", Some("wheregoes.example")).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/a?b=1&c=2");
///
/// assert_eq!(
///     validate_trace_url("http://wheregoes.example/x", Some("wheregoes.example")),
///     Err(ValidationError::SameHostNotAllowed)
/// );
/// assert_eq!(
///     validate_trace_url("ftp://example.com", None),
///     Err(ValidationError::InvalidFormat)
/// );
/// ```
pub fn validate_trace_url(raw: &str, serving_host: Option<&str>) -> Result<Url, ValidationError> {
    if raw.len() > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong {
            length: raw.len(),
            max: MAX_URL_LENGTH,
        });
    }

    let serving_host = serving_host.map(str::trim).filter(|h| !h.is_empty());

    let parsed = parse_absolute_http(raw)?;
    reject_serving_host(&parsed, serving_host)?;

    // Sanitizing decodes entities, which can rewrite the host
    let sanitized = parse_absolute_http(&sanitize_url_input(raw))?;
    reject_serving_host(&sanitized, serving_host)?;
    Ok(sanitized)
}

fn reject_serving_host(url: &Url, serving_host: Option<&str>) -> Result<(), ValidationError> {
    let Some(serving_host) = serving_host else {
        return Ok(());
    };
    if host_with_port(url).contains(&serving_host.to_ascii_lowercase()) {
        debug!("Rejecting URL pointing at serving host {serving_host}: {url}");
        return Err(ValidationError::SameHostNotAllowed);
    }
    Ok(())
}

/// Parses `raw` and requires scheme `http`/`https`, an explicit authority, and a host.
fn parse_absolute_http(raw: &str) -> Result<Url, ValidationError> {
    if !has_explicit_authority(raw) {
        return Err(ValidationError::InvalidFormat);
    }

    let parsed = Url::parse(raw).map_err(|_| ValidationError::InvalidFormat)?;
    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(ValidationError::InvalidFormat),
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(ValidationError::InvalidFormat),
    }
}

/// True if `raw` is `scheme://` followed by a non-empty authority.
///
/// The `url` crate repairs inputs like `http:example.com` or `http:///path`
/// into URLs with a host; those are not absolute URLs as typed.
fn has_explicit_authority(raw: &str) -> bool {
    let Some((_, rest)) = raw.split_once("://") else {
        return false;
    };
    !rest.is_empty() && !rest.starts_with(['/', '?', '#'])
}

/// Host plus explicit non-default port, as it appears in an authority.
pub(crate) fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
