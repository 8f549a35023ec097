//! Core types shared across the crate
//! This module contains pure data types with no game-specific logic

use serde::{Deserialize, Serialize};

/// A discrete player-originated command, queued for the next tick.
///
/// Each game variant understands a subset of these; intents that make no
/// sense for a variant are rejected with [`IntentRejection::InvalidIntent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Directional step or direction change (grid games).
    Move { dx: i8, dy: i8 },
    /// Rotate the active piece clockwise.
    Rotate,
    /// Upward impulse (Flappy Bird).
    Flap,
    /// Tap a grid cell (Memory Match, Whack-a-Mole, Simon Says).
    TapCell { row: u8, col: u8 },
    /// Continuous drag delta in pixels (Pong paddle, 2048 swipes).
    DragDelta { dx: f32, dy: f32 },
}

/// Why an intent was not applied.
///
/// Rejections are expected gameplay outcomes, not errors: the session logs
/// them at trace level and carries on. Nothing propagates out of
/// `tick`/`apply_input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentRejection {
    /// The move is legal in form but blocked by the rules
    /// (snake reversing, piece against a wall, card already face up).
    IllegalMove,
    /// Target cell or coordinate is outside the board.
    OutOfBounds,
    /// This variant does not understand the intent at all.
    InvalidIntent,
    /// The session is in a terminal state; restart first.
    NotPlayable,
}

impl IntentRejection {
    pub fn code(self) -> &'static str {
        match self {
            IntentRejection::IllegalMove => "illegal_move",
            IntentRejection::OutOfBounds => "out_of_bounds",
            IntentRejection::InvalidIntent => "invalid_intent",
            IntentRejection::NotPlayable => "not_playable",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            IntentRejection::IllegalMove => "move blocked by game rules",
            IntentRejection::OutOfBounds => "target is outside the board",
            IntentRejection::InvalidIntent => "intent not supported by this variant",
            IntentRejection::NotPlayable => "session is over; restart to continue",
        }
    }
}

/// Four-way movement direction on a grid.
///
/// Enumeration order is Right, Down, Left, Up; the Pac-Man ghost heuristic
/// breaks distance ties by this order, so it is part of observable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All directions in tie-break order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Unit step for this direction; y grows downward.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    /// Interpret a `Move { dx, dy }` intent as a direction.
    /// Only exact unit steps map; anything else is malformed.
    pub fn from_delta(dx: i8, dy: i8) -> Option<Self> {
        match (dx, dy) {
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (0, -1) => Some(Direction::Up),
            _ => None,
        }
    }
}

/// A discrete grid cell coordinate; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i8,
    pub y: i8,
}

impl GridPos {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Neighboring cell one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Squared Euclidean distance to another cell.
    /// Preserves the argmin of the true distance, so the ghost pursuit
    /// heuristic can compare without taking square roots.
    pub fn distance_sq(self, other: GridPos) -> i32 {
        let dx = (self.x - other.x) as i32;
        let dy = (self.y - other.y) as i32;
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(Direction::from_delta(1, 0), Some(Direction::Right));
        assert_eq!(Direction::from_delta(0, -1), Some(Direction::Up));
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn test_grid_pos_step() {
        let p = GridPos::new(3, 3);
        assert_eq!(p.step(Direction::Up), GridPos::new(3, 2));
        assert_eq!(p.step(Direction::Right), GridPos::new(4, 3));
    }

    #[test]
    fn test_distance_sq() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 4);
        assert_eq!(a.distance_sq(b), 25);
        assert_eq!(b.distance_sq(a), 25);
    }

    #[test]
    fn test_rejection_codes() {
        assert_eq!(IntentRejection::IllegalMove.code(), "illegal_move");
        assert_eq!(IntentRejection::OutOfBounds.code(), "out_of_bounds");
        assert_eq!(IntentRejection::InvalidIntent.code(), "invalid_intent");
        assert_eq!(IntentRejection::NotPlayable.code(), "not_playable");
    }
}
