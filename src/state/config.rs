//! Session configuration.
//!
//! All knobs have defaults, so an empty TOML document is a valid config.
//!
//! ```toml
//! pool_target = 20
//! max_full_card_winners = 3
//! max_generation_attempts = 1000
//! rng_seed = 42
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Minimum number of cards kept in the pool by preview.
pub const DEFAULT_POOL_TARGET: usize = 20;

/// Generic full-card claims accepted per round.
pub const DEFAULT_MAX_FULL_CARD_WINNERS: usize = 3;

/// Consecutive fingerprint collisions tolerated while filling the pool.
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 1000;

/// Tuning for a single session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub pool_target: usize,
    pub max_full_card_winners: usize,
    pub max_generation_attempts: usize,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pool_target: DEFAULT_POOL_TARGET,
            max_full_card_winners: DEFAULT_MAX_FULL_CARD_WINNERS,
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            rng_seed: None,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Same config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_target == 0 {
            return Err(ConfigError::Invalid("pool_target must be at least 1"));
        }
        if self.max_full_card_winners == 0 {
            return Err(ConfigError::Invalid(
                "max_full_card_winners must be at least 1",
            ));
        }
        if self.max_generation_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_generation_attempts must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Errors loading a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SessionConfig::from_toml_str("pool_target = 5\nrng_seed = 7").unwrap();
        assert_eq!(config.pool_target, 5);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.max_full_card_winners, DEFAULT_MAX_FULL_CARD_WINNERS);
    }

    #[test]
    fn test_rejects_zero_values() {
        let result = SessionConfig::from_toml_str("max_full_card_winners = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let result = SessionConfig::from_toml_str("pool_size = 5");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
