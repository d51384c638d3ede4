//! One generation attempt: every stage run in order against a fresh grid.

use tracing::debug;

use crate::config::GenerationConfig;

use super::super::grid::Grid;
use super::super::layout::connect_rooms;
use super::super::model::{GeneratedLevel, GenerationStage, Unsolvable};
use super::super::partition::partition;
use super::super::reachability::reachable_from;
use super::super::seed::GenRng;
use super::hazards::place_hazards;
use super::placement::{place_bonus_coin, select_start_and_exit};

pub(super) fn run_attempt(
    config: &GenerationConfig,
    seed: u64,
    attempt: u32,
) -> Result<GeneratedLevel, Unsolvable> {
    let mut rng = GenRng::from_seed(seed);
    let mut grid = Grid::new(config.width, config.height);

    debug!(stage = ?GenerationStage::Partitioning);
    let mut layout = partition(&mut grid, &mut rng);

    debug!(stage = ?GenerationStage::Connecting, rooms = layout.rooms.len());
    let corridors = connect_rooms(&layout.tree, &mut layout.rooms, &mut grid, &mut rng);

    debug!(stage = ?GenerationStage::PlacementSelection, corridors);
    let placement = select_start_and_exit(&mut grid, &mut rng, config.min_exit_distance)
        .inspect_err(|failure| debug!(%failure, "placement failed"))?;

    debug!(stage = ?GenerationStage::HazardPlacement, exit_distance = placement.exit_distance);
    let hazards = place_hazards(
        &mut grid,
        &mut rng,
        config.hazard_fraction,
        placement.start,
        placement.exit,
    );
    debug!(
        candidates = hazards.candidates,
        placed = hazards.placed.len(),
        rolled_back = hazards.rolled_back
    );

    debug!(stage = ?GenerationStage::BonusItem);
    let item = place_bonus_coin(&mut grid, &mut rng, &placement, config.coin_one_in);

    // Hazards only remove moves, so the final distance is never below the selected one.
    let exit_distance = reachable_from(&grid, placement.start)
        .distance(placement.exit)
        .unwrap_or(placement.exit_distance);

    Ok(GeneratedLevel {
        seed,
        attempts: attempt + 1,
        grid,
        start: placement.start,
        exit: placement.exit,
        item,
        exit_distance,
        hazards: hazards.placed,
        rooms: layout.rooms,
    })
}
