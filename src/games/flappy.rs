//! Flappy Bird - gravity, scrolling pipes, AABB collision
//!
//! Each tick the bird accumulates gravity and the pipe field scrolls left.
//! A `Flap` intent sets the vertical velocity to the jump impulse; a second
//! flap within the boost window adds an extra kick. The boost window is
//! timed on simulation time so replays with the same seed and inputs are
//! identical. Each pipe carries its own `scored` flag; the bird scores when
//! its x passes the pipe's midpoint.

use serde::Serialize;

use crate::core::{GameEngine, SessionRng};
use crate::types::{Intent, IntentRejection};

/// Constant table for a Flappy session. Pixel units, per-tick velocities.
#[derive(Debug, Clone, Copy)]
pub struct FlappyConfig {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub jump_power: f32,
    /// Extra impulse when two flaps land within the boost window.
    pub flap_boost: f32,
    /// Double-tap threshold in simulation milliseconds.
    pub boost_window_ms: u32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_spacing: f32,
    /// Leftward pipe scroll per tick.
    pub scroll_speed: f32,
    pub bird_size: f32,
}

impl Default for FlappyConfig {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1920.0,
            gravity: 0.5,
            jump_power: -10.0,
            flap_boost: -5.0,
            boost_window_ms: 200,
            pipe_width: 120.0,
            pipe_gap: 350.0,
            pipe_spacing: 600.0,
            scroll_speed: 6.0,
            bird_size: 50.0,
        }
    }
}

/// One pipe pair: `gap_y` is the top of the vertical gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pipe {
    pub x: f32,
    pub gap_y: f32,
    pub scored: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlappySnapshot {
    pub bird_y: f32,
    pub bird_velocity: f32,
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct FlappyGame {
    config: FlappyConfig,
    rng: SessionRng,
    bird_y: f32,
    bird_velocity: f32,
    pipes: Vec<Pipe>,
    score: u32,
    game_over: bool,
    sim_time_ms: u64,
    last_flap_ms: Option<u64>,
}

impl FlappyGame {
    pub fn new(config: FlappyConfig, seed: u64) -> Self {
        let mut game = Self {
            config,
            rng: SessionRng::new(seed),
            bird_y: 0.0,
            bird_velocity: 0.0,
            pipes: Vec::new(),
            score: 0,
            game_over: false,
            sim_time_ms: 0,
            last_flap_ms: None,
        };
        game.restart();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The bird's fixed horizontal position.
    pub fn bird_x(&self) -> f32 {
        self.config.width / 4.0
    }

    fn random_gap(&mut self) -> f32 {
        let c = self.config;
        self.rng.next_f32() * (c.height - c.pipe_gap - 200.0) + 100.0
    }
}

impl GameEngine for FlappyGame {
    type Snapshot = FlappySnapshot;

    fn restart(&mut self) {
        let c = self.config;
        self.bird_y = c.height / 2.0;
        self.bird_velocity = 0.0;
        self.pipes.clear();
        for i in 0..3 {
            let x = c.width + 200.0 + c.pipe_spacing * i as f32;
            let gap_y = self.random_gap();
            self.pipes.push(Pipe {
                x,
                gap_y,
                scored: false,
            });
        }
        self.score = 0;
        self.game_over = false;
        self.sim_time_ms = 0;
        self.last_flap_ms = None;
    }

    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection> {
        if self.game_over {
            return Err(IntentRejection::NotPlayable);
        }
        match intent {
            Intent::Flap => {
                let boosted = self
                    .last_flap_ms
                    .is_some_and(|t| self.sim_time_ms - t < self.config.boost_window_ms as u64);
                let boost = if boosted { self.config.flap_boost } else { 0.0 };
                self.bird_velocity = self.config.jump_power + boost;
                self.last_flap_ms = Some(self.sim_time_ms);
                Ok(())
            }
            _ => Err(IntentRejection::InvalidIntent),
        }
    }

    fn tick(&mut self, dt_ms: u32) {
        if self.game_over {
            return;
        }
        let c = self.config;
        self.sim_time_ms += dt_ms as u64;

        self.bird_velocity += c.gravity;
        self.bird_y += self.bird_velocity;

        for pipe in &mut self.pipes {
            pipe.x -= c.scroll_speed;
        }

        // Retire the leading pipe once fully offscreen.
        if self
            .pipes
            .first()
            .is_some_and(|p| p.x + c.pipe_width < 0.0)
        {
            self.pipes.remove(0);
        }

        // Keep the field topped up at fixed spacing.
        if self
            .pipes
            .last()
            .map_or(true, |p| p.x < c.width - c.pipe_spacing)
        {
            let gap_y = self.random_gap();
            self.pipes.push(Pipe {
                x: c.width,
                gap_y,
                scored: false,
            });
        }

        // Collision and scoring against each pipe.
        let bird_x = self.bird_x();
        let bird_size = c.bird_size;
        for pipe in &mut self.pipes {
            let overlaps_x = bird_x + bird_size > pipe.x && bird_x < pipe.x + c.pipe_width;
            let outside_gap =
                self.bird_y < pipe.gap_y || self.bird_y + bird_size > pipe.gap_y + c.pipe_gap;
            if overlaps_x && outside_gap {
                self.game_over = true;
            } else if !pipe.scored && bird_x > pipe.x + c.pipe_width / 2.0 {
                self.score += 1;
                pipe.scored = true;
            }
        }

        // Ground and ceiling.
        if self.bird_y < 0.0 || self.bird_y + bird_size > c.height {
            self.game_over = true;
        }
    }

    fn snapshot(&self) -> FlappySnapshot {
        FlappySnapshot {
            bird_y: self.bird_y,
            bird_velocity: self.bird_velocity,
            pipes: self.pipes.clone(),
            score: self.score,
            game_over: self.game_over,
        }
    }

    fn game_over(&self) -> bool {
        self.game_over
    }
}
