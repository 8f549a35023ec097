//! arcade-core: a deterministic fixed-tick kernel for arcade mini-games.
//!
//! The kernel separates wall time from simulation time. A render loop (or a
//! test) reports elapsed milliseconds to a [`Session`]; the session drains
//! queued player [`Intent`]s into its rules module, converts the elapsed
//! time into zero or more fixed ticks, and hands back an immutable snapshot
//! to draw. Given the same seed, the same intents and the same tick
//! schedule, every variant replays identically.
//!
//! Ten rules modules live under [`games`], from grid steppers (snake,
//! maze) through continuous physics (pong, flappy) to turn-based boards
//! (2048, memory). Each one implements [`GameEngine`] and nothing else;
//! the kernel never knows which game it is running.
//!
//! ```
//! use arcade_core::core::Session;
//! use arcade_core::games::{SnakeConfig, SnakeGame};
//! use arcade_core::types::Intent;
//!
//! let engine = SnakeGame::new(SnakeConfig::default(), 42);
//! let mut session = Session::new(engine, 150);
//! session.queue_input(Intent::Move { dx: 0, dy: 1 });
//! session.advance(150);
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.body.len(), 1);
//! ```

pub mod core;
pub mod games;
pub mod types;

pub use crate::core::{GameEngine, Session};
pub use crate::types::{Direction, GridPos, Intent, IntentRejection};
