//! Simulation kernel - clock, input queue, engine contract, grid, RNG
//!
//! Pure and deterministic: no I/O, no threads, no globals. The render loop
//! collaborator owns wall time and feeds it in; the kernel turns it into
//! fixed ticks and immutable snapshots.

pub mod clock;
pub mod engine;
pub mod grid;
pub mod input;
pub mod rng;

pub use clock::{SimClock, DEFAULT_STEP_MS};
pub use engine::{GameEngine, Session};
pub use grid::Grid;
pub use input::InputQueue;
pub use rng::SessionRng;
