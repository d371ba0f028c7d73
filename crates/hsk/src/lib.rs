//! # HSK Practice Shared Library
//!
//! Infrastructure shared by the HSK practice front ends:
//! - **error**: Common error type wrapping core and IO failures
//! - **tracing**: Logging setup with segment prefixes
//! - **config**: JSON application configuration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hsk::config::AppConfig;
//! use hsk::error::Result;
//!
//! hsk::tracing::init();
//! let config = AppConfig::load_or_default("hsk.json")?;
//! ```

pub mod config;
pub mod error;
pub mod tracing;

pub use config::AppConfig;
pub use error::{Error, Result};
