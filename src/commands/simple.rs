//! Simple interactive CLI mode
//!
//! Text-based game loop without TUI

use super::generate::seeded_rng;
use crate::game::{GameError, GameSession, GuessResult};
use crate::generator::{Generator, GeneratorConfig};
use crate::output::formatters::feedback_counts;
use crate::output::{print_board, print_hint, print_plain_board};
use anyhow::Result;
use colored::Colorize;
use rand::Rng;
use std::io::{self, Write};

/// Default expression length for new games
pub const DEFAULT_LENGTH: usize = 8;

/// Configuration for a play session
pub struct PlayConfig {
    pub length: usize,
    /// Fixed target for the first game instead of a generated one
    pub target: Option<String>,
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
    /// Print the board as plain text with emoji feedback instead of coloured tiles
    pub plain: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            target: None,
            seed: None,
            generator: GeneratorConfig::default(),
            plain: false,
        }
    }
}

impl PlayConfig {
    /// Session for the first game: the fixed target if any, else a generated one
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the fixed target is illegal or generation fails.
    pub fn first_session<R: Rng>(&self, generator: &mut Generator<R>) -> Result<GameSession, GameError> {
        match &self.target {
            Some(target) => GameSession::new(target),
            None => GameSession::random(self.length, generator),
        }
    }

    fn show_board(&self, session: &GameSession) {
        if self.plain {
            print_plain_board(session);
        } else {
            print_board(session);
        }
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if the target is illegal, generation fails, or reading
/// user input fails.
pub fn run_simple(config: &PlayConfig) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Mathler - Interactive Mode                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Find the hidden expression. Every guess must be a legal expression");
    println!("of the same length that evaluates to the same value.\n");
    println!("  - 🟩 correct character in the correct position");
    println!("  - 🟨 character appears elsewhere");
    println!("  - ⬜ character not in the expression\n");
    println!("Commands: 'quit' to exit, 'new' for a new game, 'hint' for a hint\n");

    let mut generator = Generator::new(seeded_rng(config.seed), config.generator);
    let mut session = config.first_session(&mut generator)?;

    loop {
        println!("────────────────────────────────────────────────────────────");
        println!(
            "Find {} characters equal to {} ({} guesses left)",
            session.length(),
            session.target_value().to_string().bright_yellow().bold(),
            session.remaining_guesses()
        );
        println!("────────────────────────────────────────────────────────────");

        let input = get_user_input("Guess")?;

        match input.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            "new" | "n" => {
                session = GameSession::random(config.length, &mut generator)?;
                println!("\n🔄 New game started!\n");
                continue;
            }
            "hint" | "h" => {
                print_hint(&session.hint());
                continue;
            }
            _ => {}
        }

        let outcome = session.guess(&input);
        match outcome.result {
            GuessResult::Duplicate | GuessResult::Illegal => {
                println!("❌ {}\n", outcome.message.red());
                continue;
            }
            GuessResult::Legal => {
                config.show_board(&session);
                if let Some(latest) = session.feedback_rows().last() {
                    println!("✓ {} ({})\n", outcome.message, feedback_counts(latest));
                }
                continue;
            }
            GuessResult::Win => {
                config.show_board(&session);
                println!("\n{}", "═".repeat(70).bright_cyan());
                println!(
                    "{}",
                    "    🎉 🎊 ✨  M A T H L E R   S O L V E D !  ✨ 🎊 🎉    "
                        .bright_green()
                        .bold()
                );
                println!("{}", "═".repeat(70).bright_cyan());

                let turns = session.guessed_words().len();
                println!(
                    "\n  Solved in {} {}",
                    turns.to_string().bright_cyan().bold(),
                    if turns == 1 { "guess" } else { "guesses" }
                );
            }
            GuessResult::Loss => {
                config.show_board(&session);
                println!("\n{}", format!("❌ {}", outcome.message).red().bold());
                println!("{}", session.summary());
            }
        }

        match get_user_input("Play again? (yes/no)")?
            .to_lowercase()
            .as_str()
        {
            "yes" | "y" => {
                session = GameSession::random(config.length, &mut generator)?;
                println!("\n🔄 New game started!\n");
            }
            _ => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
        }
    }
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> io::Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }

    Ok(input.trim().to_string())
}
