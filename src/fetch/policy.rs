//! Redirect-following policy.
//!
//! Holds the two configurable tables the tracer consults on each hop: URL
//! prefixes that end a trace immediately, and `Server` header signatures that
//! identify CDN/edge providers.

use crate::config::{CDN_SERVER_SIGNATURES, SPECIAL_ENDPOINT_PREFIXES};

/// Tables consulted while following a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPolicy {
    /// `Location` prefixes treated as terminal without being requested
    pub terminal_prefixes: Vec<String>,
    /// Case-insensitive `Server` header substrings identifying a CDN
    pub cdn_signatures: Vec<String>,
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self {
            terminal_prefixes: SPECIAL_ENDPOINT_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            cdn_signatures: CDN_SERVER_SIGNATURES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RedirectPolicy {
    /// Disables the terminal shortcut so every `Location` is requested.
    pub fn without_shortcuts(mut self) -> Self {
        self.terminal_prefixes.clear();
        self
    }

    /// Adds a terminal `Location` prefix.
    pub fn with_terminal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.terminal_prefixes.push(prefix.into());
        self
    }

    /// True if the raw `Location` value starts with a terminal prefix.
    pub fn is_terminal_shortcut(&self, location: &str) -> bool {
        self.terminal_prefixes
            .iter()
            .any(|prefix| location.starts_with(prefix.as_str()))
    }

    /// True if the `Server` header names a known CDN/edge provider.
    pub fn is_cdn_server(&self, server: Option<&str>) -> bool {
        let Some(server) = server else {
            return false;
        };
        let server = server.to_ascii_lowercase();
        self.cdn_signatures
            .iter()
            .any(|signature| server.contains(&signature.to_ascii_lowercase()))
    }
}
