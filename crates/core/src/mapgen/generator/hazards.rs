//! Pink-wall hazard placement that never severs the start-to-exit route.

use tracing::trace;

use crate::types::{Pos, TileKind};

use super::super::grid::Grid;
use super::super::reachability::reachable_from;
use super::super::seed::GenRng;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct HazardReport {
    pub(crate) candidates: usize,
    pub(crate) placed: Vec<Pos>,
    pub(crate) rolled_back: usize,
}

/// Interior walls with an open tile on at least one side, row-major.
pub(crate) fn hazard_candidates(grid: &Grid) -> Vec<Pos> {
    grid.positions()
        .filter(|&pos| !grid.is_border(pos))
        .filter(|&pos| grid.tile_at(pos) == TileKind::Wall && grid.touches_open_tile(pos))
        .collect()
}

pub(crate) fn hazard_target_count(candidates: usize, fraction: f64) -> usize {
    (candidates as f64 * fraction).floor() as usize
}

/// Converts a shuffled share of candidates one at a time, undoing any that cut `exit` off.
pub(crate) fn place_hazards(
    grid: &mut Grid,
    rng: &mut GenRng,
    fraction: f64,
    start: Pos,
    exit: Pos,
) -> HazardReport {
    let mut candidates = hazard_candidates(grid);
    let target = hazard_target_count(candidates.len(), fraction);
    rng.shuffle(&mut candidates);

    let mut report = HazardReport { candidates: candidates.len(), ..HazardReport::default() };
    for &pos in candidates.iter().take(target) {
        grid.set_tile(pos, TileKind::Hazard);
        if reachable_from(grid, start).contains(exit) {
            report.placed.push(pos);
        } else {
            grid.set_tile(pos, TileKind::Wall);
            report.rolled_back += 1;
            trace!(y = pos.y, x = pos.x, "hazard would cut off the exit; reverted");
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor_room() -> Grid {
        // A 1-wide corridor along row 1 and a room below it, joined down column 1.
        let mut grid = Grid::new(10, 7);
        for x in 1..9 {
            grid.set_tile(Pos { y: 1, x }, TileKind::Floor);
        }
        for y in 3..6 {
            for x in 1..7 {
                grid.set_tile(Pos { y, x }, TileKind::Floor);
            }
        }
        grid.set_tile(Pos { y: 2, x: 1 }, TileKind::Floor);
        grid
    }

    #[test]
    fn candidates_are_interior_walls_next_to_open_tiles() {
        let grid = corridor_room();
        let candidates = hazard_candidates(&grid);

        assert!(!candidates.is_empty());
        for pos in &candidates {
            assert!(!grid.is_border(*pos), "{pos:?} is on the border ring");
            assert_eq!(grid.tile_at(*pos), TileKind::Wall);
            assert!(grid.touches_open_tile(*pos));
        }
        assert!(candidates.contains(&Pos { y: 2, x: 5 }));
        assert!(!candidates.contains(&Pos { y: 0, x: 5 }), "border wall next to floor");
    }

    #[test]
    fn target_count_rounds_down() {
        assert_eq!(hazard_target_count(39, 0.05), 1);
        assert_eq!(hazard_target_count(19, 0.05), 0);
        assert_eq!(hazard_target_count(200, 0.05), 10);
        assert_eq!(hazard_target_count(7, 1.0), 7);
    }

    #[test]
    fn exit_stays_reachable_after_every_placement() {
        for seed in 0..30 {
            let mut grid = corridor_room();
            let start = Pos { y: 1, x: 1 };
            let exit = Pos { y: 5, x: 6 };
            assert!(reachable_from(&grid, start).contains(exit), "fixture must be solvable");

            let mut rng = GenRng::from_seed(seed);
            let report = place_hazards(&mut grid, &mut rng, 1.0, start, exit);

            assert!(reachable_from(&grid, start).contains(exit), "seed={seed}");
            assert_eq!(report.placed.len() + report.rolled_back, report.candidates);
            assert_eq!(grid.count(TileKind::Hazard), report.placed.len());
        }
    }

    #[test]
    fn blocking_hazard_is_rolled_back() {
        // Start slides right and stops on (1,3); a hazard at (1,4) drops that move.
        let mut grid = Grid::new(6, 3);
        for x in 1..4 {
            grid.set_tile(Pos { y: 1, x }, TileKind::Floor);
        }
        let start = Pos { y: 1, x: 1 };
        let exit = Pos { y: 1, x: 3 };

        let mut rng = GenRng::from_seed(0);
        let report = place_hazards(&mut grid, &mut rng, 1.0, start, exit);

        assert_eq!(grid.tile_at(Pos { y: 1, x: 4 }), TileKind::Wall);
        assert!(!report.placed.contains(&Pos { y: 1, x: 4 }));
        assert!(report.rolled_back >= 1);
        assert!(reachable_from(&grid, start).contains(exit));
    }

    #[test]
    fn zero_fraction_places_nothing() {
        let mut grid = corridor_room();
        let before = grid.clone();
        let mut rng = GenRng::from_seed(9);
        let (start, exit) = (Pos { y: 1, x: 1 }, Pos { y: 1, x: 8 });
        let report = place_hazards(&mut grid, &mut rng, 0.0, start, exit);
        assert!(report.placed.is_empty());
        assert_eq!(grid, before);
    }
}
