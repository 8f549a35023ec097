//! Rules modules - one per game variant
//!
//! Each module owns its board state, constants and scoring, and plugs into
//! the kernel through [`crate::core::GameEngine`]. Randomized variants take
//! an explicit seed; everything else is a pure function of inputs and ticks.

pub mod flappy;
pub mod game2048;
pub mod maze;
pub mod memory;
pub mod mole;
pub mod pacman;
pub mod pong;
pub mod simon;
pub mod snake;
pub mod tetris;

pub use flappy::{FlappyConfig, FlappyGame, FlappySnapshot};
pub use game2048::{Game2048, Game2048Config, Game2048Snapshot};
pub use maze::{MazeConfig, MazeGame, MazeSnapshot};
pub use memory::{MemoryConfig, MemoryGame, MemorySnapshot};
pub use mole::{MoleConfig, MoleGame, MoleSnapshot};
pub use pacman::{PacmanConfig, PacmanGame, PacmanSnapshot};
pub use pong::{PongConfig, PongGame, PongSnapshot};
pub use simon::{SimonConfig, SimonGame, SimonSnapshot};
pub use snake::{SnakeConfig, SnakeGame, SnakeSnapshot};
pub use tetris::{TetrisConfig, TetrisGame, TetrisSnapshot};
