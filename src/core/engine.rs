//! Engine module - the generic per-session contract and driver
//!
//! Every game variant implements [`GameEngine`]: it owns one session's full
//! mutable state and is the sole writer. External collaborators communicate
//! through one-directional handoffs: intents go in through the session's
//! input queue, an immutable snapshot comes out after each tick. The engine
//! never blocks, never panics on bad input, and freezes permanently once the
//! session reaches its terminal state (until `restart`).

use crate::core::clock::SimClock;
use crate::core::input::InputQueue;
use crate::types::{Intent, IntentRejection};

/// The per-variant game engine contract.
///
/// State machine for every variant: `Active -> GameOver -> (restart) ->
/// Active`. `tick` while game over is a no-op; illegal intents are rejected
/// without state change.
pub trait GameEngine {
    /// Immutable read-only copy of engine state for rendering.
    type Snapshot: Clone;

    /// Reinitialize all entities to the variant's starting layout. Random
    /// content (tiles, walls, piece sequence) comes from the engine's own
    /// seeded random stream.
    fn restart(&mut self);

    /// Record or apply a player intent. Turn-based variants resolve the
    /// intent immediately; tick-driven ones buffer it for the next tick.
    /// Never blocks, never panics; illegal or inapplicable intents return a
    /// rejection and leave state untouched.
    fn apply_input(&mut self, intent: Intent) -> Result<(), IntentRejection>;

    /// Advance the simulation by one discrete step of `dt_ms` milliseconds.
    /// No-op once the session is over.
    fn tick(&mut self, dt_ms: u32);

    /// Publish an owned snapshot of the current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Terminal-state flag (win or lose).
    fn game_over(&self) -> bool;
}

/// Owns one engine plus its clock and input queue and drives them from wall
/// time supplied by the render loop.
///
/// Single-threaded by construction: the session is the only writer of its
/// engine, and independent sessions share nothing.
#[derive(Debug)]
pub struct Session<E: GameEngine> {
    engine: E,
    inputs: InputQueue,
    clock: SimClock,
}

impl<E: GameEngine> Session<E> {
    pub fn new(engine: E, step_ms: u32) -> Self {
        Self {
            engine,
            inputs: InputQueue::new(),
            clock: SimClock::new(step_ms),
        }
    }

    /// Buffer an intent from an input collaborator. Never blocks.
    pub fn queue_input(&mut self, intent: Intent) {
        self.inputs.push(intent);
    }

    /// Drain buffered intents into the engine, then run however many fixed
    /// ticks the elapsed wall time pays for. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let was_over = self.engine.game_over();

        for intent in self.inputs.drain() {
            if let Err(rejection) = self.engine.apply_input(intent) {
                log::trace!("intent {:?} rejected: {}", intent, rejection.code());
            }
        }

        let steps = self.clock.advance(elapsed_ms);
        let step_ms = self.clock.step_ms();
        for _ in 0..steps {
            self.engine.tick(step_ms);
        }

        if !was_over && self.engine.game_over() {
            log::debug!("session entered terminal state at tick {}", self.clock.tick_count());
        }

        steps
    }

    /// Restart the engine; stale inputs and banked partial ticks from the
    /// previous session are discarded.
    pub fn restart(&mut self) {
        log::debug!("session restart at tick {}", self.clock.tick_count());
        self.inputs.clear();
        self.clock.reset_accumulator();
        self.engine.restart();
    }

    pub fn snapshot(&self) -> E::Snapshot {
        self.engine.snapshot()
    }

    pub fn game_over(&self) -> bool {
        self.engine.game_over()
    }

    pub fn tick_count(&self) -> u64 {
        self.clock.tick_count()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
