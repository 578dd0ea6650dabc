//! Redirect target resolution.
//!
//! Turns a `Location` header value into the absolute URL of the next hop:
//! scheme and host are inherited from the previous hop when missing, and two
//! query parameters that identity providers commonly double-encode are repaired.

use url::Url;

use crate::config::REDIRECT_QUERY_PARAMS;
use crate::error_handling::TraceError;
use crate::security::host_with_port;

/// A `Location` value split into RFC 3986 reference components.
#[derive(Debug, PartialEq, Eq)]
struct UriReference<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    /// Path, query and fragment, untouched
    rest: &'a str,
}

impl<'a> UriReference<'a> {
    fn parse(reference: &'a str) -> Self {
        let (scheme, after_scheme) = match split_scheme(reference) {
            Some((scheme, rest)) => (Some(scheme), rest),
            None => (None, reference),
        };

        match after_scheme.strip_prefix("//") {
            Some(after_slashes) => {
                let end = after_slashes
                    .find(['/', '?', '#'])
                    .unwrap_or(after_slashes.len());
                Self {
                    scheme,
                    authority: Some(&after_slashes[..end]),
                    rest: &after_slashes[end..],
                }
            }
            None => Self {
                scheme,
                authority: None,
                rest: after_scheme,
            },
        }
    }
}

/// Splits `scheme:` off a reference, if it starts with a syntactically valid scheme.
fn split_scheme(reference: &str) -> Option<(&str, &str)> {
    let colon = reference.find(':')?;
    let candidate = &reference[..colon];
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some((candidate, &reference[colon + 1..]))
}

/// Resolves a `Location` value into an absolute URL.
///
/// 1. A value with both scheme and host is used as-is.
/// 2. A missing scheme is taken from `previous`, else from `request`.
/// 3. A missing host is taken the same way.
/// 4. Path, query and fragment are kept unchanged. A path without a leading
///    slash is rooted at `/`, since there is no base directory to resolve
///    against once the authority is replaced.
///
/// # Errors
///
/// - `TraceError::MissingScheme` / `TraceError::MissingHost` when a component is
///   missing and neither `previous` nor `request` can supply it
/// - `TraceError::UrlParse` when the assembled URL does not parse
pub fn resolve_location(
    location: &str,
    previous: Option<&Url>,
    request: Option<&Url>,
) -> Result<Url, TraceError> {
    let reference = UriReference::parse(location);
    let fallback = previous.or(request);

    let scheme = match reference.scheme {
        Some(scheme) => scheme.to_string(),
        None => fallback
            .map(|url| url.scheme().to_string())
            .ok_or(TraceError::MissingScheme)?,
    };

    let authority = match reference.authority.filter(|a| !a.is_empty()) {
        Some(authority) => authority.to_string(),
        None => fallback
            .and_then(|url| url.host_str().map(|_| host_with_port(url)))
            .ok_or(TraceError::MissingHost)?,
    };

    let mut absolute = format!("{scheme}://{authority}");
    if !reference.rest.is_empty() && !reference.rest.starts_with(['/', '?', '#']) {
        absolute.push('/');
    }
    absolute.push_str(reference.rest);

    Url::parse(&absolute).map_err(|source| TraceError::UrlParse {
        url: absolute,
        source,
    })
}

/// Repairs double-encoded `returnUri` / `redir` query parameters.
///
/// For each parameter present with a non-empty value, the (already query-decoded)
/// value is percent-decoded once more, then `%3A`, `%2F` and `%3D` are replaced
/// by `:`, `/` and `=`. The URL is rebuilt as `scheme://host/path?name=value`,
/// which drops every other query parameter and the fragment. When both
/// parameters are present the last one in `REDIRECT_QUERY_PARAMS` wins.
///
/// URLs without these parameters are returned unchanged.
///
/// # Errors
///
/// - `TraceError::InvalidEncoding` if a value holds a malformed percent escape
///   (non-UTF-8 bytes are not an error)
/// - `TraceError::UrlParse` if the rebuilt URL does not parse
pub fn apply_query_fixups(url: Url) -> Result<Url, TraceError> {
    let mut rebuilt = None;

    for param in REDIRECT_QUERY_PARAMS {
        let Some(value) = url
            .query_pairs()
            .find(|(name, _)| name == param)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
        else {
            continue;
        };

        let decoded = decode_once(&value).ok_or_else(|| TraceError::InvalidEncoding {
            param: param.to_string(),
        })?;
        let fixed = undo_double_encoding(&decoded);
        rebuilt = Some(format!(
            "{}://{}{}?{}={}",
            url.scheme(),
            host_with_port(&url),
            url.path(),
            param,
            fixed
        ));
    }

    match rebuilt {
        Some(rebuilt) => Url::parse(&rebuilt).map_err(|source| TraceError::UrlParse {
            url: rebuilt,
            source,
        }),
        None => Ok(url),
    }
}

/// Percent-decodes `value` once. `+` is left alone.
///
/// Returns `None` on a `%` not followed by two hex digits. Decoded bytes that
/// are not UTF-8 are percent-encoded again so they survive the rebuild.
fn decode_once(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    for (i, byte) in bytes.iter().enumerate() {
        if *byte == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return None;
            }
        }
    }
    let decoded = urlencoding::decode_binary(bytes).into_owned();
    Some(match String::from_utf8(decoded) {
        Ok(text) => text,
        Err(e) => reencode_non_ascii(e.as_bytes()),
    })
}

fn reencode_non_ascii(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for byte in bytes {
        if byte.is_ascii() {
            out.push(char::from(*byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn undo_double_encoding(value: &str) -> String {
    value
        .replace("%3A", ":")
        .replace("%2F", "/")
        .replace("%3D", "=")
}
