//! Public results of map generation: the finished level and its failure values.

use serde::Serialize;
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Pos, TileKind};

use super::grid::Grid;
use super::layout::Room;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GenerationStage {
    Partitioning,
    Connecting,
    PlacementSelection,
    HazardPlacement,
    BonusItem,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedLevel {
    /// Seed of the attempt that produced this level.
    pub seed: u64,
    /// Attempts used, counting the successful one.
    pub attempts: u32,
    pub grid: Grid,
    pub start: Pos,
    pub exit: Pos,
    pub item: Option<Pos>,
    pub exit_distance: u32,
    pub hazards: Vec<Pos>,
    pub rooms: Vec<Room>,
}

impl GeneratedLevel {
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.grid.tile_at(pos)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.grid.canonical_bytes();
        for pos in [self.start, self.exit] {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }
        match self.item {
            Some(item) => {
                bytes.push(1);
                bytes.extend(item.y.to_le_bytes());
                bytes.extend(item.x.to_le_bytes());
            }
            None => bytes.push(0),
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

/// Why a single attempt produced no playable level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Unsolvable {
    #[error("layout has no floor tiles")]
    NoFloor,
    #[error("farthest reachable tile is {max_distance} slides away, need {required}")]
    ExitTooClose { max_distance: u32, required: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no solvable layout after {attempts} attempts from base seed {base_seed}")]
    Exhausted { attempts: u32, base_seed: u64, last_failure: Option<Unsolvable> },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> GeneratedLevel {
        let mut grid = Grid::new(8, 3);
        for x in 1..7 {
            grid.set_tile(Pos { y: 1, x }, TileKind::Floor);
        }
        grid.set_tile(Pos { y: 1, x: 6 }, TileKind::Exit);
        GeneratedLevel {
            seed: 5,
            attempts: 1,
            grid,
            start: Pos { y: 1, x: 1 },
            exit: Pos { y: 1, x: 6 },
            item: None,
            exit_distance: 1,
            hazards: Vec::new(),
            rooms: Vec::new(),
        }
    }

    #[test]
    fn fingerprint_tracks_item_placement() {
        let plain = sample_level();
        let mut with_item = sample_level();
        with_item.item = Some(Pos { y: 1, x: 3 });

        assert_eq!(plain.fingerprint(), sample_level().fingerprint());
        assert_ne!(plain.fingerprint(), with_item.fingerprint());
    }

    #[test]
    fn failure_messages_name_the_numbers_involved() {
        let unsolvable = Unsolvable::ExitTooClose { max_distance: 3, required: 5 };
        assert_eq!(unsolvable.to_string(), "farthest reachable tile is 3 slides away, need 5");

        let exhausted =
            GenerationError::Exhausted { attempts: 10, base_seed: 6, last_failure: None };
        assert!(exhausted.to_string().contains("10 attempts"));
    }
}
