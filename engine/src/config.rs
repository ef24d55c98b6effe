//! Generator configuration
//!
//! Serde-friendly description of a generator, for callers that load their
//! seed and recurrence depth from JSON (or any other serde format) rather
//! than hard-coding them.
//!
//! The fields are wider than the engine's own arguments: any
//! integer seed is accepted and masked to 32 bits, and the depth is signed so
//! that a negative value from the outside world is reported as an
//! [`InvalidArgument`] instead of failing to deserialize.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::twister::{check_recurrence_depth, InvalidArgument, MAX_RECURRENCE_DEPTH};
use crate::rng::MersenneTwister;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse generator config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid generator config: {0}")]
    Invalid(#[from] InvalidArgument),
}

fn default_recurrence_depth() -> i64 {
    i64::from(MAX_RECURRENCE_DEPTH)
}

/// Seed and recurrence depth for a [`MersenneTwister`]
///
/// # Example
/// ```
/// use mt19937_partial::GeneratorConfig;
///
/// let config = GeneratorConfig::from_json(r#"{ "seed": 0 }"#).unwrap();
/// assert_eq!(config.recurrence_depth, 623);
///
/// let mut rng = config.build().unwrap();
/// assert_eq!(rng.random(), 4194449);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed value; only the low 32 bits are used
    pub seed: u64,

    /// Highest table slot recomputed per refill (0..=623, default 623)
    #[serde(default = "default_recurrence_depth")]
    pub recurrence_depth: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            recurrence_depth: default_recurrence_depth(),
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    /// - [`ConfigError::Parse`] on malformed JSON or missing `seed`
    /// - [`ConfigError::Invalid`] if the depth is outside 0..=623
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Seed as the engine sees it (`seed & 0xFFFFFFFF`)
    pub fn masked_seed(&self) -> u32 {
        (self.seed & 0xFFFF_FFFF) as u32
    }

    /// Check the recurrence depth without building a generator
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        check_recurrence_depth(self.recurrence_depth).map(|_| ())
    }

    /// Build a freshly seeded generator
    ///
    /// # Example
    /// ```
    /// use mt19937_partial::{GeneratorConfig, InvalidArgument};
    ///
    /// let config = GeneratorConfig { seed: 0, recurrence_depth: -1 };
    /// assert!(matches!(
    ///     config.build(),
    ///     Err(InvalidArgument::RecurrenceDepthOutOfRange { requested: -1, .. })
    /// ));
    /// ```
    pub fn build(&self) -> Result<MersenneTwister, InvalidArgument> {
        let depth = check_recurrence_depth(self.recurrence_depth)?;
        Ok(MersenneTwister::seeded(self.masked_seed(), depth))
    }
}
