//! Procedural level generation split into coherent submodules.

pub mod grid;
pub mod layout;
pub mod model;
pub mod partition;
pub mod reachability;
pub mod seed;

mod generator;

pub use generator::MapGenerator;
pub use grid::Grid;
pub use layout::{Rect, Room};
pub use model::{GeneratedLevel, GenerationError, GenerationStage, Unsolvable};
pub use partition::{MAX_LEAF_SIZE, MIN_LEAF_SIZE, MIN_ROOM_SIZE};
pub use reachability::{ReachabilityMap, reachable_from, slide_target};
pub use seed::{GenRng, level_seed};

use thiserror::Error;

use crate::config::{ConfigError, GenerationConfig};

/// Builds a generator for `config` and runs it once from `seed`.
pub fn generate_level(config: GenerationConfig, seed: u64) -> Result<GeneratedLevel, LevelError> {
    Ok(MapGenerator::new(config)?.generate(seed)?)
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
