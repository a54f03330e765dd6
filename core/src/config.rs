//! Numeric bounds the engine reads but does not own.
//!
//! Values come from the host: either the defaults below or environment
//! variables with the same names as the constants in [`keys`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub mod keys {
    pub const MAZE_MIN_HEIGHT: &str = "MAZE_MIN_HEIGHT";
    pub const MAZE_MAX_HEIGHT: &str = "MAZE_MAX_HEIGHT";
    pub const MAZE_MIN_WIDTH: &str = "MAZE_MIN_WIDTH";
    pub const MAZE_MAX_WIDTH: &str = "MAZE_MAX_WIDTH";
    pub const TRAPS_MIN_CHALLENGE: &str = "TRAPS_MIN_CHALLENGE";
    pub const TRAPS_ON_PATH_MIN_CHALLENGE: &str = "TRAPS_ON_PATH_MIN_CHALLENGE";
}

/// Generation bounds and trap thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub min_height: usize,
    pub max_height: usize,
    pub min_width: usize,
    pub max_width: usize,
    /// Traps are only placed at or above this challenge level.
    pub traps_min_challenge: u8,
    /// Cells on the solution path may hold traps at or above this level.
    pub traps_on_path_min_challenge: u8,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            min_height: 3,
            max_height: 50,
            min_width: 3,
            max_width: 50,
            traps_min_challenge: 3,
            traps_on_path_min_challenge: 7,
        }
    }
}

impl MazeConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    ///
    /// Missing keys keep their default. Present keys must parse as
    /// non-negative integers, and each min must not exceed its max.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            min_height: read(&lookup, keys::MAZE_MIN_HEIGHT, defaults.min_height)?,
            max_height: read(&lookup, keys::MAZE_MAX_HEIGHT, defaults.max_height)?,
            min_width: read(&lookup, keys::MAZE_MIN_WIDTH, defaults.min_width)?,
            max_width: read(&lookup, keys::MAZE_MAX_WIDTH, defaults.max_width)?,
            traps_min_challenge: read(
                &lookup,
                keys::TRAPS_MIN_CHALLENGE,
                defaults.traps_min_challenge,
            )?,
            traps_on_path_min_challenge: read(
                &lookup,
                keys::TRAPS_ON_PATH_MIN_CHALLENGE,
                defaults.traps_on_path_min_challenge,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_height == 0 {
            return Err(ConfigError::Zero {
                key: keys::MAZE_MIN_HEIGHT,
                value: self.min_height,
            });
        }
        if self.min_width == 0 {
            return Err(ConfigError::Zero {
                key: keys::MAZE_MIN_WIDTH,
                value: self.min_width,
            });
        }
        if self.min_height > self.max_height {
            return Err(ConfigError::InvertedRange {
                min_key: keys::MAZE_MIN_HEIGHT,
                min: self.min_height,
                max_key: keys::MAZE_MAX_HEIGHT,
                max: self.max_height,
            });
        }
        if self.min_width > self.max_width {
            return Err(ConfigError::InvertedRange {
                min_key: keys::MAZE_MIN_WIDTH,
                min: self.min_width,
                max_key: keys::MAZE_MAX_WIDTH,
                max: self.max_width,
            });
        }
        Ok(())
    }
}

fn read<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::NotANumber {
            key: key.to_string(),
            value: raw,
        }),
    }
}
