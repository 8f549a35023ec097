//! Pong - continuous ball physics against an AI paddle
//!
//! Euler integration: the ball advances by its velocity every tick. Side
//! walls reflect by setting the x-velocity sign outright (a ball resting on
//! a wall can never flip twice in one tick). The AI paddle eases toward the
//! ball by a configurable follow factor. First to the winning score ends
//! the session.

use serde::Serialize;

use crate::core::GameEngine;
use crate::types::{Intent, IntentRejection};

/// Constant table for a Pong session. Pixel units, per-tick velocities.
#[derive(Debug, Clone, Copy)]
pub struct PongConfig {
    pub width: f32,
    pub height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_size: f32,
    /// Initial ball velocity on both axes.
    pub ball_speed: f32,
    /// Fraction of the ball/paddle gap the AI closes per tick.
    pub ai_follow: f32,
    /// Horizontal deflection added per unit of off-center paddle contact.
    pub spin: f32,
    /// Player paddle distance from the bottom edge.
    pub player_inset: f32,
    /// AI paddle distance from the top edge.
    pub ai_y: f32,
    pub winning_score: u32,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 1200.0,
            paddle_width: 220.0,
            paddle_height: 28.0,
            ball_size: 26.0,
            ball_speed: 7.0,
            ai_follow: 0.06,
            spin: 3.0,
            player_inset: 120.0,
            ai_y: 80.0,
            winning_score: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PongSnapshot {
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
    pub player_x: f32,
    pub ai_x: f32,
    pub player_score: u32,
    pub ai_score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct PongGame {
    config: PongConfig,
    ball_x: f32,
    ball_y: f32,
    ball_vx: f32,
    ball_vy: f32,
    /// Paddle centers.
    player_x: f32,
    ai_x: f32,
    player_score: u32,
    ai_score: u32,
    game_over: bool,
}

impl PongGame {
    pub fn new(config: PongConfig) -> Self {
        let mut game = Self {
            config,
            ball_x: 0.0,
            ball_y: 0.0,
            ball_vx: 0.0,
            ball_vy: 0.0,
            player_x: config.width / 2.0,
            ai_x: config.width / 2.0,
            player_score: 0,
            ai_score: 0,
            game_over: false,
        };
        game.restart();
        game
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.player_score, self.ai_score)
    }

    fn reset_ball(&mut self, upward: bool) {
        self.ball_x = self.config.width / 2.0;
        self.ball_y = self.config.height / 2.0;
        self.ball_vy = if upward {
            -self.config.ball_speed
        } else {
            self.config.ball_speed
        };
    }

    fn player_paddle_y(&self) -> f32 {
        self.config.height - self.config.player_inset
    }

    /// AABB overlap between the ball and a paddle centered at `paddle_x`.
    fn hits_paddle(&self, paddle_x: f32, paddle_y: f32) -> bool {
        let c = &self.config;
        self.ball_y + c.ball_size >= paddle_y
            && self.ball_y <= paddle_y + c.paddle_height
            && self.ball_x + c.ball_size >= paddle_x - c.paddle_width / 2.0
            && self.ball_x <= paddle_x + c.paddle_width / 2.0
    }
}

impl GameEngine for PongGame {
    type Snapshot = PongSnapshot;

    fn restart(&mut self) {
        self.ball_vx = self.config.ball_speed;
        self.reset_ball(false);
        self.player_x = self.config.width / 2.0;
        self.ai_x = self.config.width / 2.0;
        self.player_score = 0;
        self.ai_score = 0;
        self.game_over = false;
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.game_over {
            return Err(IntentRejection::NotPlayable);
        }
        match intent {
            Intent::DragDelta { dx, .. } => {
                let half = self.config.paddle_width / 2.0;
                self.player_x = (self.player_x + dx).clamp(half, self.config.width - half);
                Ok(())
            }
            _ => Err(IntentRejection::InvalidIntent),
        }
    }

    fn tick(&mut self, _dt_ms: u32) {
        if self.game_over {
            return;
        }
        let c = self.config;

        self.ball_x += self.ball_vx;
        self.ball_y += self.ball_vy;

        // Side walls: set the sign outright so one contact flips exactly once.
        if self.ball_x <= 0.0 {
            self.ball_vx = self.ball_vx.abs();
        } else if self.ball_x >= c.width - c.ball_size {
            self.ball_vx = -self.ball_vx.abs();
        }

        // AI eases toward the ball.
        self.ai_x += (self.ball_x - self.ai_x) * c.ai_follow;

        // Player paddle: bounce up, deflect by contact offset.
        if self.hits_paddle(self.player_x, self.player_paddle_y()) {
            self.ball_vy = -self.ball_vy.abs();
            let hit_pos = (self.ball_x - self.player_x) / c.paddle_width;
            self.ball_vx += hit_pos * c.spin;
        }

        // AI paddle: bounce down.
        if self.hits_paddle(self.ai_x, c.ai_y) {
            self.ball_vy = self.ball_vy.abs();
        }

        // Past the bottom: AI point. Past the top: player point.
        if self.ball_y > c.height {
            self.ai_score += 1;
            self.reset_ball(true);
        } else if self.ball_y < 0.0 {
            self.player_score += 1;
            self.reset_ball(false);
        }

        if self.player_score >= c.winning_score || self.ai_score >= c.winning_score {
            self.game_over = true;
        }
    }

    fn snapshot(&self) -> PongSnapshot {
        PongSnapshot {
            ball_x: self.ball_x,
            ball_y: self.ball_y,
            ball_vx: self.ball_vx,
            ball_vy: self.ball_vy,
            player_x: self.player_x,
            ai_x: self.ai_x,
            player_score: self.player_score,
            ai_score: self.ai_score,
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

    fn game() -> PongGame {
        PongGame::new(PongConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let g = game();
        let snap = g.snapshot();
        assert_eq!(snap.ball_x, 300.0);
        assert_eq!(snap.ball_y, 600.0);
        assert_eq!(snap.player_score, 0);
        assert_eq!(snap.ai_score, 0);
        assert!(!snap.game_over);
    }

    #[test]
    fn test_ball_advances_by_velocity() {
        let mut g = game();
        let before = g.snapshot();
        g.tick(16);
        let after = g.snapshot();
        assert_eq!(after.ball_x, before.ball_x + before.ball_vx);
        assert_eq!(after.ball_y, before.ball_y + before.ball_vy);
    }

    #[test]
    fn test_wall_flips_x_velocity_once() {
        let mut g = game();
        g.ball_x = 2.0;
        g.ball_vx = -7.0;
        g.tick(16);
        assert_eq!(g.snapshot().ball_vx, 7.0);
        // Still near the wall; the sign-set form must not flip it back.
        g.ball_x = -1.0;
        g.tick(16);
        assert_eq!(g.snapshot().ball_vx, 7.0);
    }

    #[test]
    fn test_right_wall_reflects_leftward() {
        let mut g = game();
        g.ball_x = g.config.width - g.config.ball_size - 1.0;
        g.ball_vx = 7.0;
        g.tick(16);
        assert_eq!(g.snapshot().ball_vx, -7.0);
    }

    #[test]
    fn test_drag_moves_player_paddle_with_clamp() {
        let mut g = game();
        g.apply_input(Intent::DragDelta { dx: 50.0, dy: 0.0 }).unwrap();
        assert_eq!(g.snapshot().player_x, 350.0);
        g.apply_input(Intent::DragDelta { dx: 1e6, dy: 0.0 }).unwrap();
        assert_eq!(g.snapshot().player_x, 600.0 - 110.0);
    }

    #[test]
    fn test_player_paddle_bounces_ball_up_with_spin() {
        let mut g = game();
        let paddle_y = g.player_paddle_y();
        g.player_x = 300.0;
        g.ball_x = 350.0 - g.ball_vx; // off-center hit after one step
        g.ball_y = paddle_y - g.config.ball_size + 1.0 - g.ball_vy;
        g.ball_vy = 7.0;
        let vx_before = g.ball_vx;
        g.tick(16);
        let snap = g.snapshot();
        assert!(snap.ball_vy < 0.0);
        assert!(snap.ball_vx > vx_before); // right-of-center adds rightward spin
    }

    #[test]
    fn test_missed_ball_scores_ai_and_resets() {
        let mut g = game();
        g.ball_y = g.config.height + 1.0 - g.ball_vy;
        g.ball_x = 5.0; // far from any paddle
        g.player_x = 500.0;
        g.tick(16);
        let snap = g.snapshot();
        assert_eq!(snap.ai_score, 1);
        assert_eq!(snap.ball_y, 600.0);
        assert!(snap.ball_vy < 0.0);
    }

    #[test]
    fn test_match_point_ends_game() {
        let mut g = game();
        g.player_score = 4;
        g.ball_y = -1.0 - g.ball_vy;
        g.ball_x = 300.0;
        g.ai_x = -500.0; // keep the AI paddle out of the way
        g.ball_vy = -7.0;
        g.tick(16);
        assert!(g.game_over());
        assert_eq!(g.scores().0, 5);
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let mut g = game();
        g.game_over = true;
        let before = g.snapshot();
        g.tick(16);
        assert_eq!(g.snapshot(), before);
        assert_eq!(
            g.apply_input(Intent::DragDelta { dx: 1.0, dy: 0.0 }).unwrap_err(),
            IntentRejection::NotPlayable
        );
    }
}
