//! Tile grid shared by every generation stage.

use serde::Serialize;

use crate::types::{Direction, Pos, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![TileKind::Wall; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.width - 1
                || pos.y as usize == self.height - 1)
    }

    /// Out-of-bounds reads are walls.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    /// Row-major positions holding `kind`.
    pub fn positions_of(&self, kind: TileKind) -> Vec<Pos> {
        self.positions().filter(|&pos| self.tile_at(pos) == kind).collect()
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }

    pub fn touches_open_tile(&self, pos: Pos) -> bool {
        Direction::ALL.into_iter().any(|direction| self.tile_at(pos.step(direction)).is_open())
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::Stone => 2,
                TileKind::Hazard => 3,
                TileKind::Coin => 4,
                TileKind::Exit => 5,
            });
        }
        bytes
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
