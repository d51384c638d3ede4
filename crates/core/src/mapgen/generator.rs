//! Generation orchestration: retries whole attempts with successive seeds.

mod hazards;
mod pipeline;
mod placement;

use tracing::{debug, info, info_span, warn};

use crate::config::{ConfigError, GenerationConfig};

use super::model::{GeneratedLevel, GenerationError};
use super::seed::{attempt_seed, level_seed};

#[derive(Clone, Debug, PartialEq)]
pub struct MapGenerator {
    config: GenerationConfig,
}

impl MapGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Tries `base_seed`, `base_seed + 1`, ... until one attempt yields a solvable level.
    pub fn generate(&self, base_seed: u64) -> Result<GeneratedLevel, GenerationError> {
        let mut last_failure = None;
        for attempt in 0..self.config.max_attempts {
            let seed = attempt_seed(base_seed, attempt);
            let _span = info_span!("generation_attempt", seed, attempt).entered();
            debug!("starting attempt");

            match pipeline::run_attempt(&self.config, seed, attempt) {
                Ok(level) => {
                    info!(
                        attempts = level.attempts,
                        exit_distance = level.exit_distance,
                        rooms = level.rooms.len(),
                        hazards = level.hazards.len(),
                        coin = level.item.is_some(),
                        "level generated"
                    );
                    return Ok(level);
                }
                Err(failure) => {
                    debug!(%failure, "attempt unsolvable; retrying with next seed");
                    last_failure = Some(failure);
                }
            }
        }

        warn!(base_seed, attempts = self.config.max_attempts, "generation exhausted");
        Err(GenerationError::Exhausted {
            attempts: self.config.max_attempts,
            base_seed,
            last_failure,
        })
    }

    pub fn generate_level(&self, level: u32) -> Result<GeneratedLevel, GenerationError> {
        self.generate(level_seed(level))
    }
}
