//! Job configuration for the seeding service
//!
//! The only job-scoped input is the global random seed. It is read from the
//! job configuration (`random_seed`, or the steering-file name `RandomSeed`)
//! and must lie in the positive range of a 32-bit signed integer.
//!
//! # Example
//! ```
//! use event_seeder_core::config::{SeederConfig, DEFAULT_GLOBAL_SEED};
//!
//! let config = SeederConfig::from_json(r#"{"RandomSeed": 987654321}"#).unwrap();
//! assert_eq!(config.global_seed().unwrap().value(), 987654321);
//!
//! let unset = SeederConfig::default();
//! assert_eq!(unset.global_seed().unwrap().value(), DEFAULT_GLOBAL_SEED);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed used when the job configuration does not provide one.
pub const DEFAULT_GLOBAL_SEED: i32 = 1234567890;

/// Smallest accepted global seed.
pub const MIN_GLOBAL_SEED: i64 = 1;

/// Largest accepted global seed (`i32::MAX`).
pub const MAX_GLOBAL_SEED: i64 = i32::MAX as i64;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Global seed {0} outside allowed range [1, 2147483647]")]
    OutOfRange(i64),

    #[error("Global seed already configured as {0}")]
    AlreadySet(i32),

    #[error("Config parse error: {0}")]
    Parse(String),
}

/// Job-wide seed feeding the last stage of the event hash chain.
///
/// Starts out at [`DEFAULT_GLOBAL_SEED`] and can be explicitly configured
/// once. The stage that consumes it always runs, whether or not it was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSeed {
    value: i32,
    explicitly_set: bool,
}

impl Default for GlobalSeed {
    fn default() -> Self {
        Self {
            value: DEFAULT_GLOBAL_SEED,
            explicitly_set: false,
        }
    }
}

impl GlobalSeed {
    /// Create an explicitly configured seed.
    ///
    /// # Errors
    /// [`ConfigError::OutOfRange`] unless `value` is in `[1, 2147483647]`.
    pub fn new(value: i64) -> Result<Self, ConfigError> {
        let mut seed = Self::default();
        seed.configure(value)?;
        Ok(seed)
    }

    /// Set the seed from configuration. Allowed at most once.
    pub fn configure(&mut self, value: i64) -> Result<(), ConfigError> {
        if self.explicitly_set {
            return Err(ConfigError::AlreadySet(self.value));
        }
        if !(MIN_GLOBAL_SEED..=MAX_GLOBAL_SEED).contains(&value) {
            return Err(ConfigError::OutOfRange(value));
        }
        self.value = value as i32;
        self.explicitly_set = true;
        Ok(())
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// `false` while the default is still in effect.
    pub fn is_explicitly_set(&self) -> bool {
        self.explicitly_set
    }
}

/// Seeder section of a job configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeederConfig {
    /// Global random seed for the whole job
    #[serde(default, alias = "RandomSeed")]
    pub random_seed: Option<i64>,
}

impl SeederConfig {
    /// Parse a seeder configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the configured global seed, falling back to the default.
    pub fn global_seed(&self) -> Result<GlobalSeed, ConfigError> {
        match self.random_seed {
            Some(value) => GlobalSeed::new(value),
            None => Ok(GlobalSeed::default()),
        }
    }
}
