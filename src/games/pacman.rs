//! Pac-Man - pellet clearing with pursuing ghosts
//!
//! A fixed 20x21 maze. The player buffers a turn; each step the buffered
//! turn applies if the cell it leads to is open, then the player advances
//! along the current heading unless blocked. Ghosts move greedily: among
//! the non-wall, non-reverse directions they take the one that minimizes
//! straight-line distance to their target, the player when chasing or a
//! flee point while a power pellet is active. Ties resolve in the fixed
//! Right, Down, Left, Up order. Clearing every pellet wins; losing the
//! last life ends the session.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::core::{GameEngine, Grid};
use crate::types::{Direction, GridPos, Intent, IntentRejection};

pub const CELL_EMPTY: u8 = 0;
pub const CELL_WALL: u8 = 1;
pub const CELL_PELLET: u8 = 2;
pub const CELL_POWER: u8 = 3;

const MAZE_COLS: u8 = 20;
const MAZE_ROWS: u8 = 21;

/// Wall layout, row-major, 1 = wall.
const MAZE: [[u8; MAZE_COLS as usize]; MAZE_ROWS as usize] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 1],
    [0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0],
    [1, 1, 1, 1, 0, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 1, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1],
    [0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0],
    [1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const POWER_PELLETS: [GridPos; 4] = [
    GridPos { x: 1, y: 1 },
    GridPos { x: 18, y: 1 },
    GridPos { x: 1, y: 18 },
    GridPos { x: 18, y: 18 },
];

const GHOST_HOMES: [GridPos; 4] = [
    GridPos { x: 9, y: 8 },
    GridPos { x: 10, y: 8 },
    GridPos { x: 9, y: 10 },
    GridPos { x: 10, y: 10 },
];

const PLAYER_START: GridPos = GridPos { x: 1, y: 1 };

/// Constant table for a Pac-Man session.
#[derive(Debug, Clone, Copy)]
pub struct PacmanConfig {
    /// Simulation time between maze steps.
    pub step_ms: u32,
    pub lives: u8,
    pub pellet_points: u32,
    pub power_points: u32,
    pub ghost_points: u32,
    /// Steps a power pellet keeps ghosts fleeing.
    pub power_steps: u32,
    /// Player steps per ghost step.
    pub ghost_step_interval: u32,
}

impl Default for PacmanConfig {
    fn default() -> Self {
        Self {
            step_ms: 150,
            lives: 3,
            pellet_points: 10,
            power_points: 50,
            ghost_points: 200,
            power_steps: 30,
            ghost_step_interval: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ghost {
    pub position: GridPos,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PacmanSnapshot {
    /// Maze cells, row-major: wall, empty, pellet or power pellet.
    pub cells: Vec<Vec<u8>>,
    pub player: GridPos,
    pub direction: Direction,
    pub ghosts: Vec<Ghost>,
    pub score: u32,
    pub lives: u8,
    pub power_steps_left: u32,
    pub won: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct PacmanGame {
    config: PacmanConfig,
    cells: Grid<u8>,
    player: GridPos,
    direction: Direction,
    next_direction: Direction,
    ghosts: ArrayVec<Ghost, 4>,
    score: u32,
    lives: u8,
    power_steps_left: u32,
    won: bool,
    lost: bool,
    step_timer_ms: u32,
    step_counter: u32,
}

impl PacmanGame {
    pub fn new(config: PacmanConfig) -> Self {
        let mut game = Self {
            config,
            cells: Grid::new(MAZE_COLS, MAZE_ROWS, CELL_EMPTY),
            player: PLAYER_START,
            direction: Direction::Right,
            next_direction: Direction::Right,
            ghosts: ArrayVec::new(),
            score: 0,
            lives: config.lives,
            power_steps_left: 0,
            won: false,
            lost: false,
            step_timer_ms: 0,
            step_counter: 0,
        };
        game.restart();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn is_wall(&self, pos: GridPos) -> bool {
        // Cells off the board count as walls, so the corridor rows that
        // open onto the edge still stop movement there.
        self.cells.get(pos.x, pos.y).unwrap_or(CELL_WALL) == CELL_WALL
    }

    fn pellets_remaining(&self) -> usize {
        self.cells
            .iter_cells()
            .filter(|&(_, _, v)| v == CELL_PELLET || v == CELL_POWER)
            .count()
    }

    /// Advance the whole maze by one step.
    fn step(&mut self) {
        self.step_counter += 1;

        // A buffered turn applies the moment it stops pointing into a wall.
        if !self.is_wall(self.player.step(self.next_direction)) {
            self.direction = self.next_direction;
        }

        let ahead = self.player.step(self.direction);
        if !self.is_wall(ahead) {
            self.player = ahead;
            match self.cells.get(self.player.x, self.player.y) {
                Some(CELL_PELLET) => {
                    self.score += self.config.pellet_points;
                    self.cells.set(self.player.x, self.player.y, CELL_EMPTY);
                }
                Some(CELL_POWER) => {
                    self.score += self.config.power_points;
                    self.cells.set(self.player.x, self.player.y, CELL_EMPTY);
                    self.power_steps_left = self.config.power_steps;
                }
                _ => {}
            }
        }

        if self.power_steps_left > 0 {
            self.power_steps_left -= 1;
        }

        if self.step_counter % self.config.ghost_step_interval == 0 {
            for i in 0..self.ghosts.len() {
                self.move_ghost(i);
            }
        }

        self.check_ghost_contact();

        if self.pellets_remaining() == 0 {
            self.won = true;
        }
    }

    fn move_ghost(&mut self, index: usize) {
        let ghost = self.ghosts[index];
        let reverse = ghost.direction.opposite();
        let mut candidates: ArrayVec<Direction, 4> = ArrayVec::new();
        for dir in Direction::ALL {
            if dir != reverse && !self.is_wall(ghost.position.step(dir)) {
                candidates.push(dir);
            }
        }
        // Dead end with only the reverse open: the ghost waits a step.
        let Some(&first) = candidates.first() else {
            return;
        };

        let target = if self.power_steps_left > 0 {
            // Flee point one cell away from the player on each axis.
            GridPos::new(
                ghost.position.x + (ghost.position.x - self.player.x).signum(),
                ghost.position.y + (ghost.position.y - self.player.y).signum(),
            )
        } else {
            self.player
        };

        let mut best = first;
        let mut best_dist = ghost.position.step(first).distance_sq(target);
        for &dir in candidates.iter().skip(1) {
            let dist = ghost.position.step(dir).distance_sq(target);
            if dist < best_dist {
                best = dir;
                best_dist = dist;
            }
        }

        self.ghosts[index].direction = best;
        self.ghosts[index].position = ghost.position.step(best);
    }

    fn check_ghost_contact(&mut self) {
        for i in 0..self.ghosts.len() {
            if self.ghosts[i].position != self.player {
                continue;
            }
            if self.power_steps_left > 0 {
                self.score += self.config.ghost_points;
                self.ghosts[i].position = GridPos::new(9 + (i % 2) as i8, 9);
            } else {
                self.lives -= 1;
                if self.lives == 0 {
                    self.lost = true;
                    return;
                }
                self.player = PLAYER_START;
                self.direction = Direction::Right;
                self.next_direction = Direction::Right;
            }
        }
    }
}

impl GameEngine for PacmanGame {
    type Snapshot = PacmanSnapshot;

    fn restart(&mut self) {
        for (y, row) in MAZE.iter().enumerate() {
            for (x, &wall) in row.iter().enumerate() {
                let cell = if wall == 1 { CELL_WALL } else { CELL_PELLET };
                self.cells.set(x as i8, y as i8, cell);
            }
        }
        for pos in POWER_PELLETS {
            self.cells.set(pos.x, pos.y, CELL_POWER);
        }
        self.ghosts.clear();
        for home in GHOST_HOMES {
            self.ghosts.push(Ghost {
                position: home,
                direction: Direction::Right,
            });
        }
        self.player = PLAYER_START;
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.score = 0;
        self.lives = self.config.lives;
        self.power_steps_left = 0;
        self.won = false;
        self.lost = false;
        self.step_timer_ms = 0;
        self.step_counter = 0;
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.game_over() {
            return Err(IntentRejection::NotPlayable);
        }
        match intent {
            Intent::Move { dx, dy } => {
                let dir =
                    Direction::from_delta(dx, dy).ok_or(IntentRejection::InvalidIntent)?;
                self.next_direction = dir;
                Ok(())
            }
            _ => Err(IntentRejection::InvalidIntent),
        }
    }

    fn tick(&mut self, dt_ms: u32) {
        if self.game_over() {
            return;
        }
        self.step_timer_ms += dt_ms;
        while self.step_timer_ms >= self.config.step_ms && !self.game_over() {
            self.step_timer_ms -= self.config.step_ms;
            self.step();
        }
    }

    fn snapshot(&self) -> PacmanSnapshot {
        PacmanSnapshot {
            cells: self.cells.to_rows(),
            player: self.player,
            direction: self.direction,
            ghosts: self.ghosts.iter().copied().collect(),
            score: self.score,
            lives: self.lives,
            power_steps_left: self.power_steps_left,
            won: self.won,
            game_over: self.game_over(),
        }
    }

    fn game_over(&self) -> bool {
        self.won || self.lost
    }
}
