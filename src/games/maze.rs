//! Maze - navigate a random wall field from start to goal
//!
//! Walls are rolled independently per cell at a configurable probability;
//! the start and goal corners are always forced open. Moves resolve the
//! moment they arrive. Walking into a wall or off the board is rejected
//! and leaves the player where it was. Reaching the goal wins.

use serde::Serialize;

use crate::core::{GameEngine, Grid, SessionRng};
use crate::types::{Direction, GridPos, Intent, IntentRejection};

/// Constant table for a maze session.
#[derive(Debug, Clone, Copy)]
pub struct MazeConfig {
    pub rows: u8,
    pub cols: u8,
    /// Probability that a cell is rolled as a wall.
    pub wall_chance: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            wall_chance: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MazeSnapshot {
    /// Wall cells, row-major, true where blocked.
    pub walls: Vec<Vec<bool>>,
    pub player: GridPos,
    pub goal: GridPos,
    /// Accepted moves so far.
    pub steps: u32,
    pub won: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct MazeGame {
    config: MazeConfig,
    rng: SessionRng,
    walls: Grid<bool>,
    player: GridPos,
    goal: GridPos,
    steps: u32,
    won: bool,
}

impl MazeGame {
    pub fn new(config: MazeConfig, seed: u64) -> Self {
        let mut game = Self {
            walls: Grid::new(config.cols, config.rows, false),
            config,
            rng: SessionRng::new(seed),
            player: GridPos::new(0, 0),
            goal: GridPos::new(config.cols as i8 - 1, config.rows as i8 - 1),
            steps: 0,
            won: false,
        };
        game.restart();
        game
    }

    pub fn player(&self) -> GridPos {
        self.player
    }

    pub fn is_wall(&self, pos: GridPos) -> bool {
        self.walls.get(pos.x, pos.y).unwrap_or(true)
    }
}

impl GameEngine for MazeGame {
    type Snapshot = MazeSnapshot;

    fn restart(&mut self) {
        for y in 0..self.config.rows as i8 {
            for x in 0..self.config.cols as i8 {
                let wall = self.rng.chance(self.config.wall_chance);
                self.walls.set(x, y, wall);
            }
        }
        // Start and goal are always walkable regardless of the roll.
        self.walls.set(0, 0, false);
        self.walls.set(self.goal.x, self.goal.y, false);
        self.player = GridPos::new(0, 0);
        self.steps = 0;
        self.won = false;
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.won {
            return Err(IntentRejection::NotPlayable);
        }
        let Intent::Move { dx, dy } = intent else {
            return Err(IntentRejection::InvalidIntent);
        };
        let dir = Direction::from_delta(dx, dy).ok_or(IntentRejection::InvalidIntent)?;
        let next = self.player.step(dir);
        if !self.walls.in_bounds(next.x, next.y) {
            return Err(IntentRejection::OutOfBounds);
        }
        if self.is_wall(next) {
            return Err(IntentRejection::IllegalMove);
        }
        self.player = next;
        self.steps += 1;
        if self.player == self.goal {
            self.won = true;
        }
        Ok(())
    }

    fn tick(&mut self, _dt_ms: u32) {}

    fn snapshot(&self) -> MazeSnapshot {
        MazeSnapshot {
            walls: self.walls.to_rows(),
            player: self.player,
            goal: self.goal,
            steps: self.steps,
            won: self.won,
            game_over: self.won,
        }
    }

    fn game_over(&self) -> bool {
        self.won
    }
}
