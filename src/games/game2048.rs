//! 2048 - directional compress-and-merge on a 4x4 board
//!
//! All four moves reduce to move-left via board rotation. A merge doubles
//! the left cell and scores its new value; each cell merges at most once
//! per move (no chaining). Only a move that changes the board spawns a new
//! tile. The session ends when no direction can change the board.

use serde::Serialize;

use crate::core::{GameEngine, SessionRng};
use crate::types::{Direction, Intent, IntentRejection};

pub const BOARD_SIZE: usize = 4;

type Board = [[u32; BOARD_SIZE]; BOARD_SIZE];

/// Constant table for a 2048 session.
#[derive(Debug, Clone, Copy)]
pub struct Game2048Config {
    /// Probability that a spawned tile is a 4 instead of a 2.
    pub four_tile_chance: f32,
}

impl Default for Game2048Config {
    fn default() -> Self {
        Self {
            four_tile_chance: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game2048Snapshot {
    pub board: Board,
    pub score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Game2048 {
    config: Game2048Config,
    rng: SessionRng,
    board: Board,
    score: u32,
    game_over: bool,
}

impl Game2048 {
    pub fn new(config: Game2048Config, seed: u64) -> Self {
        let mut game = Self {
            config,
            rng: SessionRng::new(seed),
            board: [[0; BOARD_SIZE]; BOARD_SIZE],
            score: 0,
            game_over: false,
        };
        game.restart();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Apply a move in `dir`. Returns true when the board changed (and a
    /// tile was spawned).
    pub fn shift(&mut self, dir: Direction) -> bool {
        if self.game_over {
            return false;
        }
        // Rotate so the move becomes a left-compress, then rotate back.
        let moved = match dir {
            Direction::Left => self.compress_left(),
            Direction::Right => {
                self.rotate_cw();
                self.rotate_cw();
                let moved = self.compress_left();
                self.rotate_cw();
                self.rotate_cw();
                moved
            }
            Direction::Up => {
                self.rotate_cw();
                self.rotate_cw();
                self.rotate_cw();
                let moved = self.compress_left();
                self.rotate_cw();
                moved
            }
            Direction::Down => {
                self.rotate_cw();
                let moved = self.compress_left();
                self.rotate_cw();
                self.rotate_cw();
                self.rotate_cw();
                moved
            }
        };
        if moved {
            self.spawn_tile();
        }
        self.game_over = !self.any_move_possible();
        moved
    }

    /// Compress every row leftward, merging adjacent equal pairs once.
    fn compress_left(&mut self) -> bool {
        let mut moved = false;
        for row in &mut self.board {
            let mut packed: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
            let mut i = 0;
            while i + 1 < packed.len() {
                if packed[i] == packed[i + 1] {
                    packed[i] *= 2;
                    self.score += packed[i];
                    packed.remove(i + 1);
                }
                i += 1;
            }
            packed.resize(BOARD_SIZE, 0);
            let new_row: [u32; BOARD_SIZE] = packed.try_into().expect("row is board-sized");
            if new_row != *row {
                *row = new_row;
                moved = true;
            }
        }
        moved
    }

    fn rotate_cw(&mut self) {
        let mut rotated: Board = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in self.board.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                rotated[c][BOARD_SIZE - 1 - r] = v;
            }
        }
        self.board = rotated;
    }

    fn spawn_tile(&mut self) {
        let empties: Vec<(usize, usize)> = (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| self.board[r][c] == 0)
            .collect();
        if empties.is_empty() {
            return;
        }
        let (r, c) = empties[self.rng.index(empties.len())];
        self.board[r][c] = if self.rng.chance(self.config.four_tile_chance) {
            4
        } else {
            2
        };
    }

    /// Whether any direction could still change the board: an empty cell
    /// or an equal adjacent pair anywhere.
    fn any_move_possible(&self) -> bool {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if self.board[r][c] == 0 {
                    return true;
                }
                if c + 1 < BOARD_SIZE && self.board[r][c] == self.board[r][c + 1] {
                    return true;
                }
                if r + 1 < BOARD_SIZE && self.board[r][c] == self.board[r + 1][c] {
                    return true;
                }
            }
        }
        false
    }

    fn direction_for(intent: Intent) -> Option<Direction> {
        match intent {
            Intent::Move { dx, dy } => Direction::from_delta(dx, dy),
            // Swipes map by their dominant axis.
            Intent::DragDelta { dx, dy } => {
                if dx == 0.0 && dy == 0.0 {
                    None
                } else if dx.abs() > dy.abs() {
                    Some(if dx > 0.0 {
                        Direction::Right
                    } else {
                        Direction::Left
                    })
                } else {
                    Some(if dy > 0.0 {
                        Direction::Down
                    } else {
                        Direction::Up
                    })
                }
            }
            _ => None,
        }
    }
}

impl GameEngine for Game2048 {
    type Snapshot = Game2048Snapshot;

    fn restart(&mut self) {
        self.board = [[0; BOARD_SIZE]; BOARD_SIZE];
        self.score = 0;
        self.game_over = false;
        self.spawn_tile();
        self.spawn_tile();
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.game_over {
            return Err(IntentRejection::NotPlayable);
        }
        let dir = Self::direction_for(intent).ok_or(IntentRejection::InvalidIntent)?;
        if self.shift(dir) {
            Ok(())
        } else {
            Err(IntentRejection::IllegalMove)
        }
    }

    fn tick(&mut self, _dt_ms: u32) {
        // Turn-based: all progress happens in apply_input.
    }

    fn snapshot(&self) -> Game2048Snapshot {
        Game2048Snapshot {
            board: self.board,
            score: self.score,
            game_over: self.game_over,
        }
    }

    fn game_over(&self) -> bool {
        self.game_over
    }
}
