//! HSK practice WASM bridge
//!
//! Exposes one [`PracticeController`](hsk_core::PracticeController) per page
//! through a JSON-string API. The [`bridge`] functions are plain Rust and
//! always compiled, so they are testable natively; the `browser` feature
//! wraps them with `wasm-bindgen` exports.
//!
//! # Protocol
//!
//! Arguments and results are JSON strings. Failures come back as
//! `{"error":"description"}`. Timestamps are Unix milliseconds supplied by
//! the page (`Date.now()`), so the core never reads a clock.

pub mod bridge;

#[cfg(feature = "browser")]
mod browser;
