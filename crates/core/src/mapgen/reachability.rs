//! Slide-move reachability: breadth-first search where one move slides until blocked.

use std::collections::{BTreeMap, VecDeque};

use crate::types::{Direction, Pos, TileKind};

use super::grid::Grid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachabilityMap {
    origin: Pos,
    distances: BTreeMap<Pos, u32>,
}

impl ReachabilityMap {
    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.distances.contains_key(&pos)
    }

    pub fn distance(&self, pos: Pos) -> Option<u32> {
        self.distances.get(&pos).copied()
    }

    /// Visited positions in row-major order, origin included.
    pub fn visited(&self) -> impl Iterator<Item = Pos> + '_ {
        self.distances.keys().copied()
    }

    pub fn distances(&self) -> impl Iterator<Item = (Pos, u32)> + '_ {
        self.distances.iter().map(|(&pos, &distance)| (pos, distance))
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn max_distance(&self) -> u32 {
        self.distances.values().copied().max().unwrap_or(0)
    }
}

/// Where a slide from `from` towards `direction` comes to rest.
///
/// `None` when no tile is crossed, or when the tile that would stop the slide
/// is a hazard: that move is dropped outright.
pub fn slide_target(grid: &Grid, from: Pos, direction: Direction) -> Option<Pos> {
    let mut current = from;
    loop {
        let next = current.step(direction);
        if !grid.in_bounds(next) {
            break;
        }
        let tile = grid.tile_at(next);
        if tile == TileKind::Hazard {
            return None;
        }
        if tile.blocks_slide() {
            break;
        }
        current = next;
    }
    (current != from).then_some(current)
}

pub fn reachable_from(grid: &Grid, origin: Pos) -> ReachabilityMap {
    let mut distances = BTreeMap::from([(origin, 0_u32)]);
    let mut queue = VecDeque::from([origin]);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances.get(&current).copied().unwrap_or(0) + 1;
        for direction in Direction::ALL {
            let Some(target) = slide_target(grid, current, direction) else {
                continue;
            };
            if distances.contains_key(&target) {
                continue;
            }
            distances.insert(target, next_distance);
            queue.push_back(target);
        }
    }

    ReachabilityMap { origin, distances }
}
