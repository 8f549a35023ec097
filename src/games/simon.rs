//! Simon says - replay a growing sequence of lit buttons
//!
//! Four buttons on a 2x2 pad. Playback is tick-driven: each sequence entry
//! lights for `lit_ms`, then goes dark for `gap_ms` before the next one.
//! Taps during playback are rejected. Once the whole sequence has shown,
//! the player replays it tap by tap; a wrong button ends the session, a
//! complete replay scores, appends a new random step and plays the longer
//! sequence back again.

use serde::Serialize;

use crate::core::{GameEngine, SessionRng};
use crate::types::{Intent, IntentRejection};

/// Constant table for a Simon session.
#[derive(Debug, Clone, Copy)]
pub struct SimonConfig {
    pub buttons: u8,
    /// How long each playback entry stays lit.
    pub lit_ms: u32,
    /// Dark gap between playback entries.
    pub gap_ms: u32,
}

impl Default for SimonConfig {
    fn default() -> Self {
        Self {
            buttons: 4,
            lit_ms: 500,
            gap_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    /// Playing the sequence back. `lit` is the on/off half of the entry.
    Showing {
        index: usize,
        lit: bool,
        timer_ms: u32,
    },
    /// Waiting for the player to replay the sequence.
    Awaiting,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimonSnapshot {
    pub sequence: Vec<u8>,
    /// The button currently lit by playback, if any.
    pub lit_button: Option<u8>,
    /// True once playback has finished and taps are accepted.
    pub awaiting_input: bool,
    /// How far into the replay the player is.
    pub player_index: usize,
    /// Completed rounds.
    pub score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct SimonGame {
    config: SimonConfig,
    rng: SessionRng,
    sequence: Vec<u8>,
    phase: Phase,
    player_index: usize,
    score: u32,
    game_over: bool,
}

impl SimonGame {
    pub fn new(config: SimonConfig, seed: u64) -> Self {
        let mut game = Self {
            config,
            rng: SessionRng::new(seed),
            sequence: Vec::new(),
            phase: Phase::Awaiting,
            player_index: 0,
            score: 0,
            game_over: false,
        };
        game.restart();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn random_button(&mut self) -> u8 {
        self.rng.next_range(self.config.buttons as u32) as u8
    }

    fn start_playback(&mut self) {
        self.phase = Phase::Showing {
            index: 0,
            lit: true,
            timer_ms: self.config.lit_ms,
        };
        self.player_index = 0;
    }
}

impl GameEngine for SimonGame {
    type Snapshot = SimonSnapshot;

    fn restart(&mut self) {
        self.sequence.clear();
        let first = self.random_button();
        self.sequence.push(first);
        self.score = 0;
        self.game_over = false;
        self.start_playback();
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.game_over {
            return Err(IntentRejection::NotPlayable);
        }
        let Intent::TapCell { row, col } = intent else {
            return Err(IntentRejection::InvalidIntent);
        };
        if row >= 2 || col >= 2 {
            return Err(IntentRejection::OutOfBounds);
        }
        if self.phase != Phase::Awaiting {
            return Err(IntentRejection::IllegalMove);
        }
        let button = row * 2 + col;
        if self.sequence[self.player_index] != button {
            // Wrong button: the tap was a valid play, it just lost.
            self.game_over = true;
            return Ok(());
        }
        self.player_index += 1;
        if self.player_index == self.sequence.len() {
            self.score += 1;
            let next = self.random_button();
            self.sequence.push(next);
            self.start_playback();
        }
        Ok(())
    }

    fn tick(&mut self, dt_ms: u32) {
        if self.game_over {
            return;
        }
        let mut remaining = dt_ms;
        while remaining > 0 {
            let Phase::Showing { index, lit, timer_ms } = &mut self.phase else {
                return;
            };
            if *timer_ms > remaining {
                *timer_ms -= remaining;
                return;
            }
            remaining -= *timer_ms;
            if *lit {
                *lit = false;
                *timer_ms = self.config.gap_ms;
            } else if *index + 1 < self.sequence.len() {
                *index += 1;
                *lit = true;
                *timer_ms = self.config.lit_ms;
            } else {
                self.phase = Phase::Awaiting;
            }
        }
    }

    fn snapshot(&self) -> SimonSnapshot {
        let lit_button = match self.phase {
            Phase::Showing { index, lit: true, .. } => Some(self.sequence[index]),
            _ => None,
        };
        SimonSnapshot {
            sequence: self.sequence.clone(),
            lit_button,
            awaiting_input: self.phase == Phase::Awaiting && !self.game_over,
            player_index: self.player_index,
            score: self.score,
            game_over: self.game_over,
        }
    }

    fn game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> SimonGame {
        SimonGame::new(SimonConfig::default(), 21)
    }

    fn tap(button: u8) -> Intent {
        Intent::TapCell {
            row: button / 2,
            col: button % 2,
        }
    }

    /// Tick until playback finishes and taps are accepted.
    fn finish_playback(g: &mut SimonGame) {
        for _ in 0..200 {
            if g.snapshot().awaiting_input {
                return;
            }
            g.tick(100);
        }
        panic!("playback never finished");
    }

    #[test]
    fn test_starts_with_one_entry_lit() {
        let g = game();
        let snap = g.snapshot();
        assert_eq!(snap.sequence.len(), 1);
        assert_eq!(snap.lit_button, Some(snap.sequence[0]));
        assert!(!snap.awaiting_input);
        assert_eq!(snap.score, 0);
    }

    #[test]
    fn test_playback_timing() {
        let mut g = game();
        g.tick(499);
        assert!(g.snapshot().lit_button.is_some());
        g.tick(1); // lit phase over, dark gap begins
        assert_eq!(g.snapshot().lit_button, None);
        assert!(!g.snapshot().awaiting_input);
        g.tick(200); // gap over, single-entry sequence done
        assert!(g.snapshot().awaiting_input);
    }

    #[test]
    fn test_tap_during_playback_rejected() {
        let mut g = game();
        assert_eq!(
            g.apply_input(tap(0)).unwrap_err(),
            IntentRejection::IllegalMove
        );
    }

    #[test]
    fn test_correct_replay_scores_and_extends() {
        let mut g = game();
        finish_playback(&mut g);
        let button = g.snapshot().sequence[0];
        g.apply_input(tap(button)).unwrap();
        let snap = g.snapshot();
        assert_eq!(snap.score, 1);
        assert_eq!(snap.sequence.len(), 2);
        // Playback of the extended sequence restarts immediately.
        assert!(!snap.awaiting_input);
        assert_eq!(snap.lit_button, Some(snap.sequence[0]));
    }

    #[test]
    fn test_wrong_button_ends_game() {
        let mut g = game();
        finish_playback(&mut g);
        let wrong = (g.snapshot().sequence[0] + 1) % 4;
        g.apply_input(tap(wrong)).unwrap();
        assert!(g.game_over());
        assert_eq!(
            g.apply_input(tap(0)).unwrap_err(),
            IntentRejection::NotPlayable
        );
    }

    #[test]
    fn test_partial_replay_then_wrong_ends_game() {
        let mut g = game();
        // Play two full rounds to grow the sequence to length 3.
        for _ in 0..2 {
            finish_playback(&mut g);
            let seq = g.snapshot().sequence.clone();
            for i in g.snapshot().player_index..seq.len() {
                g.apply_input(tap(seq[i])).unwrap();
            }
        }
        finish_playback(&mut g);
        let seq = g.snapshot().sequence.clone();
        assert_eq!(seq.len(), 3);
        g.apply_input(tap(seq[0])).unwrap();
        let wrong = (seq[1] + 1) % 4;
        g.apply_input(tap(wrong)).unwrap();
        assert!(g.game_over());
        assert_eq!(g.score(), 2);
    }

    #[test]
    fn test_known_sequence_full_replay() {
        let mut g = game();
        g.sequence = vec![2, 0, 3];
        g.phase = Phase::Awaiting;
        g.player_index = 0;
        for &button in &[2u8, 0, 3] {
            g.apply_input(tap(button)).unwrap();
        }
        let snap = g.snapshot();
        assert_eq!(snap.score, 1);
        assert_eq!(snap.sequence.len(), 4);
        assert!(!snap.game_over);
    }

    #[test]
    fn test_known_sequence_mismatch_on_second_press() {
        let mut g = game();
        g.sequence = vec![2, 0, 3];
        g.phase = Phase::Awaiting;
        g.player_index = 0;
        g.apply_input(tap(2)).unwrap();
        g.apply_input(tap(1)).unwrap();
        assert!(g.game_over());
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn test_tap_out_of_bounds_rejected() {
        let mut g = game();
        finish_playback(&mut g);
        assert_eq!(
            g.apply_input(Intent::TapCell { row: 2, col: 0 }).unwrap_err(),
            IntentRejection::OutOfBounds
        );
    }

    #[test]
    fn test_large_tick_spans_whole_playback() {
        let mut g = game();
        // One entry: 500ms lit + 200ms gap, delivered in a single tick.
        g.tick(700);
        assert!(g.snapshot().awaiting_input);
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let mut g = game();
        finish_playback(&mut g);
        let wrong = (g.snapshot().sequence[0] + 1) % 4;
        g.apply_input(tap(wrong)).unwrap();
        let before = g.snapshot();
        g.tick(1000);
        assert_eq!(g.snapshot(), before);
    }

    #[test]
    fn test_restart_begins_fresh_round() {
        let mut g = game();
        finish_playback(&mut g);
        let wrong = (g.snapshot().sequence[0] + 1) % 4;
        g.apply_input(tap(wrong)).unwrap();
        g.restart();
        let snap = g.snapshot();
        assert_eq!(snap.sequence.len(), 1);
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SimonGame::new(SimonConfig::default(), 4);
        let b = SimonGame::new(SimonConfig::default(), 4);
        assert_eq!(a.snapshot().sequence, b.snapshot().sequence);
    }
}
