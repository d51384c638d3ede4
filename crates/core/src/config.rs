//! Generation settings with defaults, validation, and TOML loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de;

use crate::mapgen::MIN_LEAF_SIZE;

pub const MAX_GRID_SIZE: usize = 512;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    pub width: usize,
    pub height: usize,
    pub min_exit_distance: u32,
    pub hazard_fraction: f64,
    pub max_attempts: u32,
    /// Bonus coin appears with probability `1 / coin_one_in`; zero disables it.
    pub coin_one_in: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            min_exit_distance: 5,
            hazard_fraction: 0.05,
            max_attempts: 10,
            coin_one_in: 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] de::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl GenerationConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !(MIN_LEAF_SIZE..=MAX_GRID_SIZE).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is outside {MIN_LEAF_SIZE}..={MAX_GRID_SIZE}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.hazard_fraction) {
            return Err(ConfigError::Invalid {
                field: "hazard_fraction",
                reason: format!("{} is outside 0.0..=1.0", self.hazard_fraction),
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "max_attempts",
                reason: "at least one attempt is required".to_string(),
            });
        }
        Ok(())
    }
}
