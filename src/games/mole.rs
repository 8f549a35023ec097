//! Whack-a-mole - timed taps on a hopping mole
//!
//! One mole occupies a cell of a 3x3 board. On a fixed interval it hops to
//! a fresh random cell and the remaining time drops by one second; the hop
//! and the countdown share the same timer. A tap on the mole scores and
//! hides it until the next hop; a tap on any other valid cell is simply a
//! miss. The session ends when the countdown reaches zero.

use serde::Serialize;

use crate::core::{GameEngine, SessionRng};
use crate::types::{Intent, IntentRejection};

/// Constant table for a whack-a-mole session.
#[derive(Debug, Clone, Copy)]
pub struct MoleConfig {
    pub rows: u8,
    pub cols: u8,
    /// Countdown in whole seconds.
    pub total_time: u32,
    /// Time between mole hops; also the countdown granularity.
    pub mole_interval_ms: u32,
}

impl Default for MoleConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            total_time: 30,
            mole_interval_ms: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleSnapshot {
    /// Cell index of the visible mole, or `None` between a hit and the
    /// next hop.
    pub mole_cell: Option<u8>,
    pub score: u32,
    pub time_left: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct MoleGame {
    config: MoleConfig,
    rng: SessionRng,
    mole_cell: Option<u8>,
    score: u32,
    time_left: u32,
    interval_timer_ms: u32,
}

impl MoleGame {
    pub fn new(config: MoleConfig, seed: u64) -> Self {
        let mut game = Self {
            config,
            rng: SessionRng::new(seed),
            mole_cell: None,
            score: 0,
            time_left: 0,
            interval_timer_ms: 0,
        };
        game.restart();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    fn cell_count(&self) -> u8 {
        self.config.rows * self.config.cols
    }

    fn hop(&mut self) {
        self.mole_cell = Some(self.rng.next_range(self.cell_count() as u32) as u8);
    }
}

impl GameEngine for MoleGame {
    type Snapshot = MoleSnapshot;

    fn restart(&mut self) {
        self.score = 0;
        self.time_left = self.config.total_time;
        self.interval_timer_ms = 0;
        self.hop();
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.game_over() {
            return Err(IntentRejection::NotPlayable);
        }
        let Intent::TapCell { row, col } = intent else {
            return Err(IntentRejection::InvalidIntent);
        };
        if row >= self.config.rows || col >= self.config.cols {
            return Err(IntentRejection::OutOfBounds);
        }
        let cell = row * self.config.cols + col;
        // A miss is a valid play, it just scores nothing.
        if self.mole_cell == Some(cell) {
            self.score += 1;
            self.mole_cell = None;
        }
        Ok(())
    }

    fn tick(&mut self, dt_ms: u32) {
        if self.game_over() {
            return;
        }
        self.interval_timer_ms += dt_ms;
        while self.interval_timer_ms >= self.config.mole_interval_ms && !self.game_over() {
            self.interval_timer_ms -= self.config.mole_interval_ms;
            self.time_left -= 1;
            if self.time_left > 0 {
                self.hop();
            } else {
                self.mole_cell = None;
            }
        }
    }

    fn snapshot(&self) -> MoleSnapshot {
        MoleSnapshot {
            mole_cell: self.mole_cell,
            score: self.score,
            time_left: self.time_left,
            game_over: self.game_over(),
        }
    }

    fn game_over(&self) -> bool {
        self.time_left == 0
    }
}
