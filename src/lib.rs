//! Mathler
//!
//! A Wordle-style puzzle where the hidden word is an arithmetic expression. Guesses
//! must be legal expressions of the same length with the same value, and each
//! guess is scored per character as exact, present or absent.
//!
//! # Quick Start
//!
//! ```rust
//! use mathler::game::{GameSession, GuessResult};
//! use mathler::generator::Generator;
//!
//! // Generate a reproducible 8-character target
//! let mut generator = Generator::from_seed(42);
//! let mut game = GameSession::random(8, &mut generator).unwrap();
//! println!("Find an expression equal to {}", game.target_value());
//!
//! // Guessing the target itself always wins
//! let target = game.target_word().to_string();
//! assert_eq!(game.guess(&target).result, GuessResult::Win);
//! ```

// Core domain types
pub mod core;

// Target generation
pub mod generator;

// Game sessions
pub mod game;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
