//! Application configuration
//!
//! One JSON document bundling scheduler parameters, session defaults and
//! file locations. Every field is optional; a missing file means defaults.
//!
//! ```json
//! {
//!   "scheduler": { "initialEase": 2.5, "easyBonus": 1.4 },
//!   "session": { "mode": "dueOnly", "level": 1, "endPolicy": "wrap" },
//!   "vocabularyPath": "hsk_vocabulary.json",
//!   "progressPath": "progress.json"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hsk_core::session::SessionConfig;
use hsk_core::srs::SchedulerConfig;

use crate::error::{Error, Result};

/// Default progress file name
pub const DEFAULT_PROGRESS_PATH: &str = "hsk_progress.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub scheduler: SchedulerConfig,
    pub session: SessionConfig,
    /// Vocabulary list; the bundled starter words are used when unset
    pub vocabulary_path: Option<PathBuf>,
    pub progress_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            session: SessionConfig::default(),
            vocabulary_path: None,
            progress_path: PathBuf::from(DEFAULT_PROGRESS_PATH),
        }
    }
}

impl AppConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.scheduler.validate()?;
        if let hsk_core::session::LevelFilter::Level(level) = self.session.level {
            if !hsk_core::vocabulary::is_valid_level(level) {
                return Err(Error::Config(format!("HSK level {} is not in 1-6", level)));
            }
        }
        if self.session.limit == Some(0) {
            return Err(Error::Config("session limit must be at least 1".into()));
        }
        Ok(())
    }
}
