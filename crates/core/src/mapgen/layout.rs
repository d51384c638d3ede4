//! Rooms, door slots, corridor carving and the bottom-up room connector.

use serde::Serialize;

use crate::types::{Pos, TileKind};

use super::grid::Grid;
use super::partition::{RegionId, RegionTree};
use super::seed::GenRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + self.height / 2) as i32, x: (self.x + self.width / 2) as i32 }
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    fn corners(self) -> [Pos; 4] {
        let (left, top) = (self.x as i32, self.y as i32);
        let (right, bottom) = (self.right() as i32, self.bottom() as i32);
        [
            Pos { y: top, x: left },
            Pos { y: top, x: right },
            Pos { y: bottom, x: left },
            Pos { y: bottom, x: right },
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    pub rect: Rect,
    pub center: Pos,
    pub doors: Vec<Pos>,
}

impl Room {
    pub fn new(rect: Rect) -> Self {
        Self { rect, center: rect.center(), doors: Vec::new() }
    }

    /// Two slots per wall, each one tile in from a corner.
    pub fn door_candidates(&self) -> [Pos; 8] {
        let Rect { x, y, .. } = self.rect;
        let (left, top) = (x as i32, y as i32);
        let (right, bottom) = (self.rect.right() as i32, self.rect.bottom() as i32);
        [
            Pos { y: top, x: left + 1 },
            Pos { y: top, x: right - 1 },
            Pos { y: bottom, x: left + 1 },
            Pos { y: bottom, x: right - 1 },
            Pos { y: top + 1, x: left },
            Pos { y: bottom - 1, x: left },
            Pos { y: top + 1, x: right },
            Pos { y: bottom - 1, x: right },
        ]
    }

    /// Interior tile that hides `door` from the rest of the room, if any.
    ///
    /// Corner doors and positions off the perimeter get no post.
    pub fn stone_post_for(&self, door: Pos) -> Option<Pos> {
        if self.rect.corners().contains(&door) || !self.rect.contains(door) {
            return None;
        }
        let rect = self.rect;
        let post = if door.y == rect.y as i32 {
            Pos { y: door.y + 1, x: door.x }
        } else if door.y == rect.bottom() as i32 {
            Pos { y: door.y - 1, x: door.x }
        } else if door.x == rect.x as i32 {
            Pos { y: door.y, x: door.x + 1 }
        } else if door.x == rect.right() as i32 {
            Pos { y: door.y, x: door.x - 1 }
        } else {
            return None;
        };
        rect.contains(post).then_some(post)
    }
}

pub(super) fn carve_room(grid: &mut Grid, room: &Room) {
    for y in room.rect.y..=room.rect.bottom() {
        for x in room.rect.x..=room.rect.right() {
            grid.set_tile(Pos { y: y as i32, x: x as i32 }, TileKind::Floor);
        }
    }
}

/// Joins sibling subtrees bottom-up, one corridor per internal region.
pub(super) fn connect_rooms(
    tree: &RegionTree,
    rooms: &mut [Room],
    grid: &mut Grid,
    rng: &mut GenRng,
) -> usize {
    let mut corridors = 0;
    connect_subtree(tree, tree.root(), rooms, grid, rng, &mut corridors);
    corridors
}

fn connect_subtree(
    tree: &RegionTree,
    id: RegionId,
    rooms: &mut [Room],
    grid: &mut Grid,
    rng: &mut GenRng,
    corridors: &mut usize,
) -> Option<usize> {
    let region = tree.get(id)?;
    let Some((left, right)) = region.children else {
        return region.room;
    };

    let left_room = connect_subtree(tree, left, rooms, grid, rng, corridors);
    let right_room = connect_subtree(tree, right, rooms, grid, rng, corridors);
    match (left_room, right_room) {
        (Some(a), Some(b)) => {
            join_rooms(rooms, a, b, grid, rng);
            *corridors += 1;
            Some(if rng.coin_flip() { a } else { b })
        }
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

fn join_rooms(rooms: &mut [Room], a: usize, b: usize, grid: &mut Grid, rng: &mut GenRng) {
    let door_a = pick_door(&mut rooms[a], rng);
    let door_b = pick_door(&mut rooms[b], rng);
    let horizontal_first = rng.coin_flip();
    carve_l_shaped_corridor(grid, door_a, door_b, horizontal_first);

    for (room_index, door) in [(a, door_a), (b, door_b)] {
        if let Some(post) = rooms[room_index].stone_post_for(door) {
            grid.set_tile(post, TileKind::Stone);
        }
    }
}

fn pick_door(room: &mut Room, rng: &mut GenRng) -> Pos {
    let candidates = room.door_candidates();
    let door = candidates[rng.below(candidates.len())];
    room.doors.push(door);
    door
}

pub(super) fn carve_l_shaped_corridor(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    horizontal_first: bool,
) {
    if horizontal_first {
        carve_horizontal_line(grid, start.y, start.x, end.x);
        carve_vertical_line(grid, end.x, start.y, end.y);
    } else {
        carve_vertical_line(grid, start.x, start.y, end.y);
        carve_horizontal_line(grid, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(grid: &mut Grid, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        carve_tile(grid, Pos { y, x });
    }
}

fn carve_vertical_line(grid: &mut Grid, x: i32, top_y: i32, bottom_y: i32) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        carve_tile(grid, Pos { y, x });
    }
}

// Floor and stone posts already on the path stay as they are.
fn carve_tile(grid: &mut Grid, pos: Pos) {
    if grid.is_border(pos) || grid.tile_at(pos) != TileKind::Wall {
        return;
    }
    grid.set_tile(pos, TileKind::Floor);
}
