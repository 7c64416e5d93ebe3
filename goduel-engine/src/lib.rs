pub mod engine;
pub mod error;
pub mod goban;
pub mod position;
pub mod scoring;
pub mod stone;
pub mod turn;

/// `(col, row)`, zero-based from the top-left corner.
pub type Point = (u8, u8);

pub use engine::{DEFAULT_BOARD_SIZE, DEFAULT_KOMI, Engine, Stage};
pub use error::{EntryError, GoError};
pub use goban::{Captures, Goban, Group};
pub use position::PositionSet;
pub use scoring::{GameScore, PlayerPoints, ScoringRules};
pub use stone::Stone;
pub use turn::{Move, Turn};
