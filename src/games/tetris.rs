//! Tetris - falling binary-matrix pieces with line clears
//!
//! Pieces are small binary matrices; clockwise rotation is
//! transpose-and-reverse, so four rotations always restore the original
//! matrix. A placement is valid when every filled cell is in bounds and
//! unoccupied. Gravity descends the piece on a fixed interval; a blocked
//! descent freezes the piece into the board, clears full rows, compacts
//! downward, and spawns the next piece.

use serde::Serialize;

use crate::core::{Grid, GameEngine, SessionRng};
use crate::types::{Intent, IntentRejection};

/// The seven tetromino matrices at spawn orientation.
const SHAPES: [&[&[u8]]; 7] = [
    &[&[1, 1, 1, 1]],                 // I
    &[&[1, 1], &[1, 1]],              // O
    &[&[0, 1, 0], &[1, 1, 1]],        // T
    &[&[1, 0, 0], &[1, 1, 1]],        // L
    &[&[0, 0, 1], &[1, 1, 1]],        // J
    &[&[0, 1, 1], &[1, 1, 0]],        // S
    &[&[1, 1, 0], &[0, 1, 1]],        // Z
];

/// A piece's current cell matrix (rows of 0/1).
pub type PieceMatrix = Vec<Vec<u8>>;

/// Rotate a piece matrix 90 degrees clockwise (transpose and reverse).
pub fn rotate_cw(piece: &PieceMatrix) -> PieceMatrix {
    let rows = piece.len();
    let cols = piece[0].len();
    let mut rotated = vec![vec![0u8; rows]; cols];
    for (r, row) in piece.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            rotated[c][rows - 1 - r] = v;
        }
    }
    rotated
}

/// Constant table for a Tetris session.
#[derive(Debug, Clone, Copy)]
pub struct TetrisConfig {
    pub rows: u8,
    pub cols: u8,
    /// Gravity interval in simulation milliseconds.
    pub drop_ms: u32,
    pub points_per_line: u32,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 10,
            drop_ms: 500,
            points_per_line: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TetrisSnapshot {
    /// Settled cells, row-major, 0 empty / 1 filled.
    pub board: Vec<Vec<u8>>,
    pub piece: PieceMatrix,
    pub piece_row: i8,
    pub piece_col: i8,
    pub score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct TetrisGame {
    config: TetrisConfig,
    rng: SessionRng,
    board: Grid<u8>,
    piece: PieceMatrix,
    piece_row: i8,
    piece_col: i8,
    score: u32,
    game_over: bool,
    drop_timer_ms: u32,
}

impl TetrisGame {
    pub fn new(config: TetrisConfig, seed: u64) -> Self {
        let mut game = Self {
            board: Grid::new(config.cols, config.rows, 0),
            config,
            rng: SessionRng::new(seed),
            piece: Vec::new(),
            piece_row: 0,
            piece_col: 0,
            score: 0,
            game_over: false,
            drop_timer_ms: 0,
        };
        game.restart();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn piece(&self) -> &PieceMatrix {
        &self.piece
    }

    fn random_piece(&mut self) -> PieceMatrix {
        let shape = SHAPES[self.rng.index(SHAPES.len())];
        shape.iter().map(|row| row.to_vec()).collect()
    }

    fn spawn_col(&self) -> i8 {
        self.config.cols as i8 / 2 - 2
    }

    /// Whether `piece` fits at (row, col): in bounds and over empty cells.
    fn can_place(&self, piece: &PieceMatrix, row: i8, col: i8) -> bool {
        for (r, prow) in piece.iter().enumerate() {
            for (c, &v) in prow.iter().enumerate() {
                if v == 0 {
                    continue;
                }
                let y = row + r as i8;
                let x = col + c as i8;
                match self.board.get(x, y) {
                    Some(0) => {}
                    _ => return false,
                }
            }
        }
        true
    }

    fn try_shift(&mut self, d_col: i8) -> bool {
        if self.can_place(&self.piece, self.piece_row, self.piece_col + d_col) {
            self.piece_col += d_col;
            true
        } else {
            false
        }
    }

    fn try_rotate(&mut self) -> bool {
        let rotated = rotate_cw(&self.piece);
        if self.can_place(&rotated, self.piece_row, self.piece_col) {
            self.piece = rotated;
            true
        } else {
            false
        }
    }

    /// Descend one row, or freeze + clear + respawn when blocked.
    /// Returns true if the piece moved down.
    pub fn step_down(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        if self.can_place(&self.piece, self.piece_row + 1, self.piece_col) {
            self.piece_row += 1;
            true
        } else {
            self.freeze_piece();
            self.clear_lines();
            self.spawn_piece();
            false
        }
    }

    fn freeze_piece(&mut self) {
        for (r, prow) in self.piece.iter().enumerate() {
            for (c, &v) in prow.iter().enumerate() {
                if v == 1 {
                    self.board
                        .set(self.piece_col + c as i8, self.piece_row + r as i8, 1);
                }
            }
        }
    }

    /// Drop full rows and compact the remainder downward.
    fn clear_lines(&mut self) {
        let rows = self.config.rows as usize;
        let cols = self.config.cols as usize;
        let kept: Vec<Vec<u8>> = (0..rows)
            .map(|y| self.board.row(y).to_vec())
            .filter(|row| row.iter().any(|&v| v == 0))
            .collect();
        let cleared = rows - kept.len();
        if cleared == 0 {
            return;
        }
        let mut new_rows = vec![vec![0u8; cols]; cleared];
        new_rows.extend(kept);
        for (y, row) in new_rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                self.board.set(x as i8, y as i8, v);
            }
        }
        self.score += cleared as u32 * self.config.points_per_line;
    }

    fn spawn_piece(&mut self) {
        self.piece = self.random_piece();
        self.piece_row = 0;
        self.piece_col = self.spawn_col();
        if !self.can_place(&self.piece, self.piece_row, self.piece_col) {
            self.game_over = true;
        }
    }
}

impl GameEngine for TetrisGame {
    type Snapshot = TetrisSnapshot;

    fn restart(&mut self) {
        self.board.fill(0);
        self.score = 0;
        self.game_over = false;
        self.drop_timer_ms = 0;
        self.spawn_piece();
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.game_over {
            return Err(IntentRejection::NotPlayable);
        }
        match intent {
            Intent::Move { dx: -1, dy: 0 } => {
                if self.try_shift(-1) {
                    Ok(())
                } else {
                    Err(IntentRejection::IllegalMove)
                }
            }
            Intent::Move { dx: 1, dy: 0 } => {
                if self.try_shift(1) {
                    Ok(())
                } else {
                    Err(IntentRejection::IllegalMove)
                }
            }
            // Soft drop: an immediate descent step.
            Intent::Move { dx: 0, dy: 1 } => {
                self.step_down();
                Ok(())
            }
            Intent::Rotate => {
                if self.try_rotate() {
                    Ok(())
                } else {
                    Err(IntentRejection::IllegalMove)
                }
            }
            _ => Err(IntentRejection::InvalidIntent),
        }
    }

    fn tick(&mut self, dt_ms: u32) {
        if self.game_over {
            return;
        }
        self.drop_timer_ms += dt_ms;
        while self.drop_timer_ms >= self.config.drop_ms && !self.game_over {
            self.drop_timer_ms -= self.config.drop_ms;
            self.step_down();
        }
    }

    fn snapshot(&self) -> TetrisSnapshot {
        TetrisSnapshot {
            board: self.board.to_rows(),
            piece: self.piece.clone(),
            piece_row: self.piece_row,
            piece_col: self.piece_col,
            score: self.score,
            game_over: self.game_over,
        }
    }

    fn game_over(&self) -> bool {
        self.game_over
    }
}
