//! Logging utilities with segment prefixes.
//!
//! Provides consistent logging setup across HSK practice binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with defaults.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (RUST_LOG)
/// - Compact format written to stderr, so it never mixes with cards on stdout
pub fn init() {
    init_with_filter("warn");
}

/// Initialize tracing with a custom default filter.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Segment prefixes for logging.
pub mod prefix {
    /// Review scheduling prefix
    pub const SRS: &str = "⟳";
    /// Session building and progression prefix
    pub const SESSION: &str = "▶";
    /// Progress storage prefix
    pub const STORE: &str = "⊔";
}
