//! Snake - grid movement with growth and self-collision
//!
//! The snake steps once per `step_ms` of simulation time. Direction changes
//! arrive as `Move` intents and take effect on the next step; the exact
//! reverse of the current heading is always rejected so the snake can never
//! fold into its own neck.

use std::collections::VecDeque;

use serde::Serialize;

use crate::core::{GameEngine, SessionRng};
use crate::types::{Direction, GridPos, Intent, IntentRejection};

/// Constant table for a Snake session.
#[derive(Debug, Clone, Copy)]
pub struct SnakeConfig {
    /// Square board edge length in cells.
    pub board_size: u8,
    /// Simulation time between snake steps.
    pub step_ms: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            step_ms: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnakeSnapshot {
    /// Head-first body cells.
    pub body: Vec<GridPos>,
    pub direction: Direction,
    pub food: GridPos,
    pub score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct SnakeGame {
    config: SnakeConfig,
    rng: SessionRng,
    /// Head at the front.
    body: VecDeque<GridPos>,
    direction: Direction,
    pending: Option<Direction>,
    food: GridPos,
    score: u32,
    game_over: bool,
    step_timer_ms: u32,
}

impl SnakeGame {
    pub fn new(config: SnakeConfig, seed: u64) -> Self {
        let mut game = Self {
            config,
            rng: SessionRng::new(seed),
            body: VecDeque::new(),
            direction: Direction::Right,
            pending: None,
            food: GridPos::new(10, 10),
            score: 0,
            game_over: false,
            step_timer_ms: 0,
        };
        game.restart();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn in_bounds(&self, pos: GridPos) -> bool {
        let size = self.config.board_size as i8;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    fn spawn_food(&mut self) {
        let size = self.config.board_size as u32;
        self.food = GridPos::new(
            self.rng.next_range(size) as i8,
            self.rng.next_range(size) as i8,
        );
    }

    /// Advance the snake by one cell.
    fn step(&mut self) {
        if let Some(dir) = self.pending.take() {
            // Re-checked here: buffered turns could otherwise reverse after
            // the heading changed between apply_input and this step.
            if dir != self.direction.opposite() {
                self.direction = dir;
            }
        }

        let Some(&head) = self.body.front() else {
            return;
        };
        let new_head = head.step(self.direction);

        if !self.in_bounds(new_head) || self.body.contains(&new_head) {
            self.game_over = true;
            return;
        }

        self.body.push_front(new_head);
        if new_head == self.food {
            self.score += 1;
            self.spawn_food();
        } else {
            self.body.pop_back();
        }
    }
}

impl GameEngine for SnakeGame {
    type Snapshot = SnakeSnapshot;

    fn restart(&mut self) {
        self.body.clear();
        self.body.push_front(GridPos::new(5, 5));
        self.direction = Direction::Right;
        self.pending = None;
        self.food = GridPos::new(10, 10);
        self.score = 0;
        self.game_over = false;
        self.step_timer_ms = 0;
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.game_over {
            return Err(IntentRejection::NotPlayable);
        }
        match intent {
            Intent::Move { dx, dy } => {
                let dir =
                    Direction::from_delta(dx, dy).ok_or(IntentRejection::InvalidIntent)?;
                if dir == self.direction.opposite() {
                    return Err(IntentRejection::IllegalMove);
                }
                self.pending = Some(dir);
                Ok(())
            }
            _ => Err(IntentRejection::InvalidIntent),
        }
    }

    fn tick(&mut self, dt_ms: u32) {
        if self.game_over {
            return;
        }
        self.step_timer_ms += dt_ms;
        while self.step_timer_ms >= self.config.step_ms && !self.game_over {
            self.step_timer_ms -= self.config.step_ms;
            self.step();
        }
    }

    fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            body: self.body.iter().copied().collect(),
            direction: self.direction,
            food: self.food,
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

    fn game() -> SnakeGame {
        SnakeGame::new(SnakeConfig::default(), 1)
    }

    #[test]
    fn test_initial_layout() {
        let g = game();
        let snap = g.snapshot();
        assert_eq!(snap.body, vec![GridPos::new(5, 5)]);
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(snap.food, GridPos::new(10, 10));
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
    }

    #[test]
    fn test_steps_on_fixed_interval() {
        let mut g = game();
        g.tick(149);
        assert_eq!(g.snapshot().body[0], GridPos::new(5, 5));
        g.tick(1);
        assert_eq!(g.snapshot().body[0], GridPos::new(6, 5));
    }

    #[test]
    fn test_reverse_direction_rejected() {
        let mut g = game();
        // Heading right; left is the exact reverse.
        let err = g.apply_input(Intent::Move { dx: -1, dy: 0 }).unwrap_err();
        assert_eq!(err, IntentRejection::IllegalMove);
        assert_eq!(g.direction(), Direction::Right);
    }

    #[test]
    fn test_buffered_reverse_rejected_at_step() {
        let mut g = game();
        // Turn up, then queue down before the up step has happened. The
        // second intent is legal against the current heading (right) but
        // must not be applied once the heading has become up... turning down
        // after up resolves is a reverse.
        g.apply_input(Intent::Move { dx: 0, dy: -1 }).unwrap();
        g.tick(150);
        assert_eq!(g.direction(), Direction::Up);
        g.apply_input(Intent::Move { dx: 0, dy: 1 }).unwrap_err();
        assert_eq!(g.direction(), Direction::Up);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut g = game();
        // 14 steps to reach x=19, one more hits the wall.
        for _ in 0..20 {
            g.tick(150);
        }
        assert!(g.game_over());
    }

    #[test]
    fn test_food_grows_and_scores() {
        let mut g = game();
        // Food at (10,10): head right to x=10, then down to y=10.
        for _ in 0..5 {
            g.tick(150);
        }
        g.apply_input(Intent::Move { dx: 0, dy: 1 }).unwrap();
        for _ in 0..5 {
            g.tick(150);
        }
        let snap = g.snapshot();
        assert_eq!(snap.score, 1);
        assert_eq!(snap.body.len(), 2);
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let mut g = game();
        for _ in 0..20 {
            g.tick(150);
        }
        assert!(g.game_over());
        let before = g.snapshot();
        g.tick(150);
        assert_eq!(g.snapshot(), before);
    }

    #[test]
    fn test_invalid_intent_rejected() {
        let mut g = game();
        assert_eq!(
            g.apply_input(Intent::Flap).unwrap_err(),
            IntentRejection::InvalidIntent
        );
        assert_eq!(
            g.apply_input(Intent::Move { dx: 2, dy: 0 }).unwrap_err(),
            IntentRejection::InvalidIntent
        );
    }

    #[test]
    fn test_restart_resets_session() {
        let mut g = game();
        for _ in 0..20 {
            g.tick(150);
        }
        assert!(g.game_over());
        g.restart();
        let snap = g.snapshot();
        assert!(!snap.game_over);
        assert_eq!(snap.body.len(), 1);
        assert_eq!(snap.score, 0);
    }
}
