use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Self {
        let (dy, dx) = direction.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    Stone,
    Hazard,
    Coin,
    Exit,
}

impl TileKind {
    /// Tiles a sliding token stops in front of.
    pub fn blocks_slide(self) -> bool {
        matches!(self, Self::Wall | Self::Stone | Self::Hazard)
    }

    pub fn is_open(self) -> bool {
        !self.blocks_slide()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// `(dy, dx)` of a single step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_tiles_let_a_slide_through() {
        let open: Vec<_> = [
            TileKind::Wall,
            TileKind::Floor,
            TileKind::Stone,
            TileKind::Hazard,
            TileKind::Coin,
            TileKind::Exit,
        ]
        .into_iter()
        .filter(|tile| tile.is_open())
        .collect();
        assert_eq!(open, vec![TileKind::Floor, TileKind::Coin, TileKind::Exit]);
    }

    #[test]
    fn stepping_every_direction_returns_to_origin() {
        let origin = Pos { y: 4, x: 7 };
        let mut pos = origin;
        for direction in Direction::ALL {
            pos = pos.step(direction);
        }
        assert_eq!(pos, origin);
        assert_eq!(origin.step(Direction::Up), Pos { y: 3, x: 7 });
        assert_eq!(origin.step(Direction::Left), Pos { y: 4, x: 6 });
    }
}
