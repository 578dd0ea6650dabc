//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - TLS crypto provider
//! - The redirect-disabled HTTP client shared by all traces

mod client;
mod logger;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use client::init_redirect_client;
pub use logger::init_logger_with;

/// Initializes the crypto provider for TLS operations.
///
/// Installs `ring` as the process-wide `rustls` provider. Must run before the
/// first TLS connection when more than one provider is compiled in.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}
