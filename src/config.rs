use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::app_dirs::AppDirs;
use crate::error::EngineResult;
use crate::session::{Replenish, TestConfig, TestMode, DEFAULT_BATCH_SIZE, DEFAULT_LOW_WATER_MARK};
use crate::typing_policy::CommitPolicy;

/// User settings as stored in the settings file. Unknown or missing keys
/// fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub number_of_words: usize,
    /// a value here selects a timed test
    pub number_of_secs: Option<u64>,
    pub symbols: bool,
    pub policy: CommitPolicy,
    pub low_water_mark: usize,
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_of_words: 25,
            number_of_secs: None,
            symbols: false,
            policy: CommitPolicy::AlwaysAdvance,
            low_water_mark: DEFAULT_LOW_WATER_MARK,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Config {
    pub fn to_test_config(&self) -> EngineResult<TestConfig> {
        let mode = match self.number_of_secs {
            Some(seconds) => TestMode::FixedDuration { seconds },
            None => TestMode::FixedWordCount {
                words: self.number_of_words,
            },
        };
        TestConfig::new(
            mode,
            self.symbols,
            self.policy,
            Replenish {
                low_water_mark: self.low_water_mark,
                batch_size: self.batch_size,
            },
        )
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no settings file, using defaults");
                return Config::default();
            }
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "malformed settings file, using defaults");
                Config::default()
            }
        }
    }
}
