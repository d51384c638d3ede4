pub mod config;
pub mod mapgen;
pub mod session;
pub mod types;

pub use config::{ConfigError, GenerationConfig};
pub use mapgen::{
    GeneratedLevel, GenerationError, Grid, LevelError, MapGenerator, Unsolvable, generate_level,
    level_seed, reachable_from,
};
pub use session::{STARTING_LEVEL, STARTING_LIVES, Session, SlideOutcome};
pub use types::*;
