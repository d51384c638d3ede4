//! Play session over generated levels: sliding moves, lives and level progression.

use tracing::{debug, info};

use crate::mapgen::{GeneratedLevel, GenerationError, MapGenerator};
use crate::types::{Direction, Pos, TileKind};

pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideOutcome {
    /// The first tile in that direction already blocks; nothing changed.
    Blocked,
    Moved { to: Pos },
    LevelCompleted { completed: u32, next: u32 },
    /// Ran into a hazard; the same level restarts from its start tile.
    Died { lives_left: u32 },
    /// Last life lost; the session is back at level one with full lives.
    GameOver,
}

#[derive(Clone, Debug)]
pub struct Session {
    generator: MapGenerator,
    level: u32,
    lives: u32,
    current: GeneratedLevel,
    player: Pos,
    holding_coin: bool,
    coins_banked: u32,
}

impl Session {
    pub fn start(generator: MapGenerator) -> Result<Self, GenerationError> {
        let current = generator.generate_level(STARTING_LEVEL)?;
        Ok(Self::resume(generator, STARTING_LEVEL, STARTING_LIVES, current))
    }

    /// Re-enters a session on an already generated level, e.g. after a death.
    ///
    /// `lives` below one is raised to one.
    pub fn resume(
        generator: MapGenerator,
        level: u32,
        lives: u32,
        current: GeneratedLevel,
    ) -> Self {
        let player = current.start;
        Self {
            generator,
            level,
            lives: lives.max(1),
            current,
            player,
            holding_coin: false,
            coins_banked: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn current(&self) -> &GeneratedLevel {
        &self.current
    }

    pub fn holding_coin(&self) -> bool {
        self.holding_coin
    }

    pub fn coins_banked(&self) -> u32 {
        self.coins_banked
    }

    /// Tile as the player currently sees it: a picked-up coin reads as floor.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        match self.current.tile_at(pos) {
            TileKind::Coin if self.holding_coin => TileKind::Floor,
            tile => tile,
        }
    }

    /// Slides the player tile by tile until the next tile blocks.
    ///
    /// On `Err` the session is unchanged: the level change that needed a new map was abandoned.
    pub fn slide(&mut self, direction: Direction) -> Result<SlideOutcome, GenerationError> {
        let mut position = self.player;
        let mut picked_coin = false;
        loop {
            let next = position.step(direction);
            let tile = self.current.tile_at(next);
            if tile == TileKind::Hazard {
                debug!(y = next.y, x = next.x, "slid into a hazard");
                return self.lose_life();
            }
            if tile.blocks_slide() {
                break;
            }
            position = next;
            if tile == TileKind::Coin && !self.holding_coin {
                picked_coin = true;
            }
            if position == self.current.exit {
                return self.complete_level(picked_coin);
            }
        }

        if position == self.player {
            return Ok(SlideOutcome::Blocked);
        }
        self.player = position;
        self.holding_coin |= picked_coin;
        Ok(SlideOutcome::Moved { to: position })
    }

    /// Gives up the current attempt at the level, costing a life.
    pub fn restart_level(&mut self) -> Result<SlideOutcome, GenerationError> {
        self.lose_life()
    }

    fn complete_level(&mut self, picked_coin: bool) -> Result<SlideOutcome, GenerationError> {
        let completed = self.level;
        let next = completed.saturating_add(1);
        let upcoming = self.generator.generate_level(next)?;

        if self.holding_coin || picked_coin {
            self.coins_banked += 1;
        }
        info!(completed, next, coins = self.coins_banked, "level completed");
        self.enter(next, self.lives, upcoming);
        Ok(SlideOutcome::LevelCompleted { completed, next })
    }

    fn lose_life(&mut self) -> Result<SlideOutcome, GenerationError> {
        let lives_left = self.lives.saturating_sub(1);
        if lives_left > 0 {
            info!(level = self.level, lives_left, "player died; replaying level");
            self.lives = lives_left;
            self.player = self.current.start;
            self.holding_coin = false;
            return Ok(SlideOutcome::Died { lives_left });
        }

        let fresh = self.generator.generate_level(STARTING_LEVEL)?;
        info!(reached = self.level, coins = self.coins_banked, "game over");
        self.coins_banked = 0;
        self.enter(STARTING_LEVEL, STARTING_LIVES, fresh);
        Ok(SlideOutcome::GameOver)
    }

    fn enter(&mut self, level: u32, lives: u32, current: GeneratedLevel) {
        self.level = level;
        self.lives = lives;
        self.player = current.start;
        self.current = current;
        self.holding_coin = false;
    }
}
