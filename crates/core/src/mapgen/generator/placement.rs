//! Start, exit and bonus-coin selection driven by slide distances.

use crate::types::{Pos, TileKind};

use super::super::grid::Grid;
use super::super::model::Unsolvable;
use super::super::reachability::reachable_from;
use super::super::seed::GenRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) start: Pos,
    pub(crate) exit: Pos,
    pub(crate) exit_distance: u32,
}

/// Picks a random floor tile as start and marks one of the farthest reachable tiles as the exit.
pub(crate) fn select_start_and_exit(
    grid: &mut Grid,
    rng: &mut GenRng,
    min_exit_distance: u32,
) -> Result<Placement, Unsolvable> {
    let mut floor_tiles = grid.positions_of(TileKind::Floor);
    rng.shuffle(&mut floor_tiles);
    let Some(&start) = floor_tiles.first() else {
        return Err(Unsolvable::NoFloor);
    };

    let reach = reachable_from(grid, start);
    let mut max_distance = 0;
    let mut farthest = Vec::new();
    for (pos, distance) in reach.distances() {
        if pos == start || distance < min_exit_distance {
            continue;
        }
        if distance > max_distance {
            max_distance = distance;
            farthest.clear();
        }
        if distance == max_distance {
            farthest.push(pos);
        }
    }

    let Some(&exit) = rng.pick(&farthest) else {
        return Err(Unsolvable::ExitTooClose {
            max_distance: reach.max_distance(),
            required: min_exit_distance,
        });
    };
    grid.set_tile(exit, TileKind::Exit);
    Ok(Placement { start, exit, exit_distance: max_distance })
}

/// With chance `1 / one_in`, marks a reachable floor tile other than start and exit as a coin.
pub(crate) fn place_bonus_coin(
    grid: &mut Grid,
    rng: &mut GenRng,
    placement: &Placement,
    one_in: u32,
) -> Option<Pos> {
    if !rng.chance(1, one_in) {
        return None;
    }

    let mut candidates: Vec<Pos> = grid
        .positions_of(TileKind::Floor)
        .into_iter()
        .filter(|&pos| pos != placement.start && pos != placement.exit)
        .collect();
    rng.shuffle(&mut candidates);

    let reach = reachable_from(grid, placement.start);
    let coin = candidates.into_iter().find(|&pos| reach.contains(pos))?;
    grid.set_tile(coin, TileKind::Coin);
    Some(coin)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serpentine corridor: every turn costs one slide, ending six slides from (1,1).
    fn serpentine() -> Grid {
        let rows = [
            "#########",
            "#.......#",
            "#######.#",
            "#.......#",
            "#.#######",
            "#.......#",
            "#######.#",
            "#######.#",
            "#########",
        ];
        let mut grid = Grid::new(rows[0].len(), rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                if glyph == '.' {
                    grid.set_tile(Pos { y: y as i32, x: x as i32 }, TileKind::Floor);
                }
            }
        }
        grid
    }

    #[test]
    fn exit_is_marked_at_maximum_distance_from_start() {
        for seed in 0..20 {
            let mut grid = serpentine();
            let mut rng = GenRng::from_seed(seed);
            let Ok(placement) = select_start_and_exit(&mut grid, &mut rng, 1) else {
                continue;
            };

            assert_eq!(grid.tile_at(placement.exit), TileKind::Exit);
            assert_ne!(placement.start, placement.exit);
            let mut unmarked = grid.clone();
            unmarked.set_tile(placement.exit, TileKind::Floor);
            let reach = reachable_from(&unmarked, placement.start);
            assert_eq!(reach.distance(placement.exit), Some(placement.exit_distance));
            assert_eq!(reach.max_distance(), placement.exit_distance, "seed={seed}");
        }
    }

    #[test]
    fn room_too_small_for_the_threshold_is_unsolvable() {
        let mut grid = Grid::new(6, 6);
        for y in 1..5 {
            for x in 1..5 {
                grid.set_tile(Pos { y, x }, TileKind::Floor);
            }
        }
        let before = grid.clone();
        let mut rng = GenRng::from_seed(4);

        let result = select_start_and_exit(&mut grid, &mut rng, 5);
        let Err(Unsolvable::ExitTooClose { max_distance, required }) = result else {
            panic!("expected ExitTooClose, got {result:?}");
        };
        assert_eq!(required, 5);
        assert!(max_distance < 5, "an open 4x4 room is crossed in a few slides");
        assert_eq!(grid, before, "a failed selection leaves the grid untouched");
    }

    #[test]
    fn grid_without_floor_reports_no_floor() {
        let mut grid = Grid::new(8, 8);
        let mut rng = GenRng::from_seed(0);
        assert_eq!(select_start_and_exit(&mut grid, &mut rng, 5), Err(Unsolvable::NoFloor));
    }

    #[test]
    fn coin_lands_on_a_reachable_floor_tile() {
        let mut grid = serpentine();
        let mut rng = GenRng::from_seed(11);
        let placement = Placement {
            start: Pos { y: 1, x: 1 },
            exit: Pos { y: 7, x: 7 },
            exit_distance: 6,
        };
        grid.set_tile(placement.exit, TileKind::Exit);

        let coin =
            place_bonus_coin(&mut grid, &mut rng, &placement, 1).expect("one_in=1 always rolls");
        assert_eq!(grid.tile_at(coin), TileKind::Coin);
        assert_ne!(coin, placement.start);
        assert!(reachable_from(&grid, placement.start).contains(coin));
    }

    #[test]
    fn coin_is_skipped_silently_when_nothing_qualifies() {
        let mut grid = Grid::new(5, 3);
        grid.set_tile(Pos { y: 1, x: 1 }, TileKind::Floor);
        grid.set_tile(Pos { y: 1, x: 3 }, TileKind::Floor);
        let placement =
            Placement { start: Pos { y: 1, x: 1 }, exit: Pos { y: 1, x: 2 }, exit_distance: 0 };
        let mut rng = GenRng::from_seed(2);

        // (1,3) is floor but walled off from the start.
        assert_eq!(place_bonus_coin(&mut grid, &mut rng, &placement, 1), None);
        assert_eq!(grid.count(TileKind::Coin), 0);
    }

    #[test]
    fn disabled_coin_never_rolls() {
        let mut grid = serpentine();
        let mut rng = GenRng::from_seed(3);
        let placement =
            Placement { start: Pos { y: 1, x: 1 }, exit: Pos { y: 7, x: 7 }, exit_distance: 6 };
        for _ in 0..50 {
            assert_eq!(place_bonus_coin(&mut grid, &mut rng, &placement, 0), None);
        }
    }
}
