//! Game sessions
//!
//! The guess state machine and the board view consumed by renderers.

mod board;
mod session;

pub use board::{Row, Tile};
pub use session::{
    GameError, GameSession, GuessOutcome, GuessResult, HINT_PLACEHOLDER, IllegalGuess,
};
