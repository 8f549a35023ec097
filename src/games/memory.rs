//! Memory match - flip pairs of face-down cards
//!
//! A 4x4 board of shuffled icon pairs. The first tap reveals a card, the
//! second starts a reveal timer; when it expires the pair either locks
//! face-up (a match) or both flip back. Taps are rejected while the reveal
//! timer runs, on matched cards and on already face-up cards. The session
//! ends when every pair is matched.

use serde::Serialize;

use crate::core::{GameEngine, SessionRng};
use crate::types::{Intent, IntentRejection};

/// Constant table for a memory session.
#[derive(Debug, Clone, Copy)]
pub struct MemoryConfig {
    /// Number of icon pairs; the board holds `pairs * 2` cards.
    pub pairs: u8,
    /// How long a mismatched pair stays revealed.
    pub reveal_ms: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            pairs: 8,
            reveal_ms: 700,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Card {
    pub icon: u8,
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemorySnapshot {
    pub cards: Vec<Card>,
    /// Completed pair flips, matched or not.
    pub moves: u32,
    pub matched_pairs: u8,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryGame {
    config: MemoryConfig,
    rng: SessionRng,
    cards: Vec<Card>,
    first_pick: Option<usize>,
    second_pick: Option<usize>,
    reveal_timer_ms: u32,
    moves: u32,
    matched_pairs: u8,
}

impl MemoryGame {
    pub fn new(config: MemoryConfig, seed: u64) -> Self {
        let mut game = Self {
            config,
            rng: SessionRng::new(seed),
            cards: Vec::new(),
            first_pick: None,
            second_pick: None,
            reveal_timer_ms: 0,
            moves: 0,
            matched_pairs: 0,
        };
        game.restart();
        game
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Cards per board row, the smallest square edge that fits the deck.
    /// The default 8-pair board is 4x4.
    pub fn cols(&self) -> u8 {
        let total = self.config.pairs as u16 * 2;
        (1u8..).find(|&c| c as u16 * c as u16 >= total).unwrap_or(1)
    }

    fn card_index(&self, row: u8, col: u8) -> Option<usize> {
        let cols = self.cols();
        if col >= cols {
            return None;
        }
        let index = row as usize * cols as usize + col as usize;
        (index < self.cards.len()).then_some(index)
    }

    /// Resolve the pending pair after the reveal timer expires.
    fn resolve_pair(&mut self) {
        let (Some(a), Some(b)) = (self.first_pick.take(), self.second_pick.take()) else {
            return;
        };
        if self.cards[a].icon == self.cards[b].icon {
            self.cards[a].matched = true;
            self.cards[b].matched = true;
            self.matched_pairs += 1;
        } else {
            self.cards[a].face_up = false;
            self.cards[b].face_up = false;
        }
    }
}

impl GameEngine for MemoryGame {
    type Snapshot = MemorySnapshot;

    fn restart(&mut self) {
        let mut icons: Vec<u8> = (0..self.config.pairs).flat_map(|i| [i, i]).collect();
        self.rng.shuffle(&mut icons);
        self.cards = icons
            .into_iter()
            .map(|icon| Card {
                icon,
                face_up: false,
                matched: false,
            })
            .collect();
        self.first_pick = None;
        self.second_pick = None;
        self.reveal_timer_ms = 0;
        self.moves = 0;
        self.matched_pairs = 0;
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.game_over() {
            return Err(IntentRejection::NotPlayable);
        }
        let Intent::TapCell { row, col } = intent else {
            return Err(IntentRejection::InvalidIntent);
        };
        let index = self
            .card_index(row, col)
            .ok_or(IntentRejection::OutOfBounds)?;

        // No flips while a mismatched pair is showing.
        if self.second_pick.is_some() {
            return Err(IntentRejection::IllegalMove);
        }
        let card = self.cards[index];
        if card.matched || card.face_up {
            return Err(IntentRejection::IllegalMove);
        }

        self.cards[index].face_up = true;
        match self.first_pick {
            None => self.first_pick = Some(index),
            Some(_) => {
                self.second_pick = Some(index);
                self.reveal_timer_ms = self.config.reveal_ms;
                self.moves += 1;
            }
        }
        Ok(())
    }

    fn tick(&mut self, dt_ms: u32) {
        if self.second_pick.is_none() {
            return;
        }
        self.reveal_timer_ms = self.reveal_timer_ms.saturating_sub(dt_ms);
        if self.reveal_timer_ms == 0 {
            self.resolve_pair();
        }
    }

    fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            cards: self.cards.clone(),
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            game_over: self.game_over(),
        }
    }

    fn game_over(&self) -> bool {
        self.matched_pairs == self.config.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> MemoryGame {
        MemoryGame::new(MemoryConfig::default(), 42)
    }

    fn pos(g: &MemoryGame, index: usize) -> (u8, u8) {
        let cols = g.cols() as usize;
        ((index / cols) as u8, (index % cols) as u8)
    }

    /// Indices of the first matching pair and one card of a different icon.
    fn find_pair(g: &MemoryGame) -> (usize, usize, usize) {
        let cards = &g.snapshot().cards;
        for a in 0..cards.len() {
            for b in a + 1..cards.len() {
                if cards[a].icon == cards[b].icon {
                    let other = (0..cards.len())
                        .find(|&i| cards[i].icon != cards[a].icon)
                        .unwrap();
                    return (a, b, other);
                }
            }
        }
        unreachable!("a shuffled pair board always holds pairs");
    }

    #[test]
    fn test_board_holds_shuffled_pairs() {
        let g = game();
        let snap = g.snapshot();
        assert_eq!(snap.cards.len(), 16);
        let mut icons: Vec<u8> = snap.cards.iter().map(|c| c.icon).collect();
        icons.sort_unstable();
        let expected: Vec<u8> = (0..8).flat_map(|i| [i, i]).collect();
        assert_eq!(icons, expected);
        assert!(snap.cards.iter().all(|c| !c.face_up && !c.matched));
    }

    #[test]
    fn test_first_tap_reveals() {
        let mut g = game();
        g.apply_input(Intent::TapCell { row: 0, col: 0 }).unwrap();
        let snap = g.snapshot();
        assert!(snap.cards[0].face_up);
        assert_eq!(snap.moves, 0);
    }

    #[test]
    fn test_matching_pair_locks() {
        let mut g = game();
        let (a, b, _) = find_pair(&g);
        let (ar, ac) = pos(&g, a);
        let (br, bc) = pos(&g, b);
        g.apply_input(Intent::TapCell { row: ar, col: ac }).unwrap();
        g.apply_input(Intent::TapCell { row: br, col: bc }).unwrap();
        g.tick(700);
        let snap = g.snapshot();
        assert!(snap.cards[a].matched && snap.cards[b].matched);
        assert_eq!(snap.matched_pairs, 1);
        assert_eq!(snap.moves, 1);
    }

    #[test]
    fn test_mismatch_flips_back_after_timer() {
        let mut g = game();
        let (a, _, other) = find_pair(&g);
        let (ar, ac) = pos(&g, a);
        let (or, oc) = pos(&g, other);
        g.apply_input(Intent::TapCell { row: ar, col: ac }).unwrap();
        g.apply_input(Intent::TapCell { row: or, col: oc }).unwrap();
        g.tick(699);
        assert!(g.snapshot().cards[a].face_up);
        g.tick(1);
        let snap = g.snapshot();
        assert!(!snap.cards[a].face_up && !snap.cards[other].face_up);
        assert_eq!(snap.matched_pairs, 0);
        assert_eq!(snap.moves, 1);
    }

    #[test]
    fn test_taps_rejected_during_reveal() {
        let mut g = game();
        let (a, _, other) = find_pair(&g);
        let (ar, ac) = pos(&g, a);
        let (or, oc) = pos(&g, other);
        g.apply_input(Intent::TapCell { row: ar, col: ac }).unwrap();
        g.apply_input(Intent::TapCell { row: or, col: oc }).unwrap();
        // Any third tap is illegal while the pair is showing.
        let third = (0..16).find(|i| *i != a && *i != other).unwrap();
        let (tr, tc) = pos(&g, third);
        assert_eq!(
            g.apply_input(Intent::TapCell { row: tr, col: tc }).unwrap_err(),
            IntentRejection::IllegalMove
        );
    }

    #[test]
    fn test_tap_on_face_up_card_rejected() {
        let mut g = game();
        g.apply_input(Intent::TapCell { row: 0, col: 0 }).unwrap();
        assert_eq!(
            g.apply_input(Intent::TapCell { row: 0, col: 0 }).unwrap_err(),
            IntentRejection::IllegalMove
        );
    }

    #[test]
    fn test_tap_out_of_bounds_rejected() {
        let mut g = game();
        assert_eq!(
            g.apply_input(Intent::TapCell { row: 4, col: 0 }).unwrap_err(),
            IntentRejection::OutOfBounds
        );
        assert_eq!(
            g.apply_input(Intent::TapCell { row: 0, col: 4 }).unwrap_err(),
            IntentRejection::OutOfBounds
        );
    }

    #[test]
    fn test_all_pairs_matched_ends_game() {
        let mut g = game();
        // Match every pair by icon lookup.
        for icon in 0..8u8 {
            let indices: Vec<usize> = g
                .snapshot()
                .cards
                .iter()
                .enumerate()
                .filter(|(_, c)| c.icon == icon)
                .map(|(i, _)| i)
                .collect();
            for &i in &indices {
                let (r, c) = pos(&g, i);
                g.apply_input(Intent::TapCell { row: r, col: c }).unwrap();
            }
            g.tick(700);
        }
        assert!(g.game_over());
        assert_eq!(g.moves(), 8);
        assert_eq!(
            g.apply_input(Intent::TapCell { row: 0, col: 0 }).unwrap_err(),
            IntentRejection::NotPlayable
        );
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = MemoryGame::new(MemoryConfig::default(), 9);
        let b = MemoryGame::new(MemoryConfig::default(), 9);
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
