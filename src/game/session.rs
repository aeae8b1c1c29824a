//! A single Mathler puzzle
//!
//! Holds the target expression and the guess history, and runs the turn-by-turn
//! state machine. Sessions are plain in-memory values: one owner, no locking.

use crate::core::{ExprError, Expression, Feedback, evaluate};
use crate::generator::{GenerationError, Generator};
use rand::Rng;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::debug;

/// Placeholder shown in hints for characters not yet uncovered
pub const HINT_PLACEHOLDER: char = '@';

/// Result of one call to [`GameSession::guess`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuessResult {
    /// The guess is the target expression
    Win,
    /// Legal guess that used up the last row
    Loss,
    /// Already guessed; nothing recorded
    Duplicate,
    /// Rejected; nothing recorded
    Illegal,
    /// Recorded, game continues
    Legal,
}

/// Result plus a message suitable for showing to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub result: GuessResult,
    pub message: String,
}

impl GuessOutcome {
    fn new(result: GuessResult, message: impl Into<String>) -> Self {
        Self {
            result,
            message: message.into(),
        }
    }
}

/// Why a guess is not a legal word for this session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalGuess {
    #[error("wrong length, expected {expected} characters but got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error(transparent)]
    Expression(#[from] ExprError),

    #[error("wrong result, expected {expected} but got {actual}")]
    WrongValue { expected: i64, actual: i64 },
}

/// Errors constructing a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal target expression `{word}`: {source}")]
    IllegalTarget {
        word: String,
        #[source]
        source: ExprError,
    },

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// One puzzle instance
#[derive(Debug, Clone)]
pub struct GameSession {
    target: Expression,
    max_rows: usize,
    guessed_words: Vec<String>,
}

impl GameSession {
    /// Start a session for a fixed target expression
    ///
    /// # Errors
    /// Returns `GameError::IllegalTarget` if `word` is not a legal expression.
    ///
    /// # Examples
    /// ```
    /// use mathler::game::{GameSession, GuessResult};
    ///
    /// let mut game = GameSession::new("1+2+3+4").unwrap();
    /// assert_eq!(game.target_value(), 10);
    /// assert_eq!(game.guess("4+3+2+1").result, GuessResult::Legal);
    /// assert_eq!(game.guess("1+2+3+4").result, GuessResult::Win);
    /// ```
    pub fn new(word: &str) -> Result<Self, GameError> {
        let target = Expression::parse(word).map_err(|source| GameError::IllegalTarget {
            word: word.to_string(),
            source,
        })?;
        Ok(Self::from_expression(target))
    }

    /// Start a session for an already validated expression
    #[must_use]
    pub fn from_expression(target: Expression) -> Self {
        let max_rows = target.length() + 1;
        debug!(expression = %target, value = target.value(), max_rows, "new session");
        Self {
            target,
            max_rows,
            guessed_words: Vec::new(),
        }
    }

    /// Start a session with a freshly generated target
    ///
    /// # Errors
    /// Returns `GameError::Generation` if no target can be generated.
    pub fn random<R: Rng>(length: usize, generator: &mut Generator<R>) -> Result<Self, GameError> {
        Ok(Self::from_expression(generator.generate(length)?))
    }

    #[inline]
    #[must_use]
    pub fn target_word(&self) -> &str {
        self.target.text()
    }

    #[inline]
    #[must_use]
    pub const fn target_value(&self) -> i64 {
        self.target.value()
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.target.length()
    }

    /// Maximum number of recorded guesses (`length + 1`)
    #[inline]
    #[must_use]
    pub const fn max_rows(&self) -> usize {
        self.max_rows
    }

    #[inline]
    #[must_use]
    pub fn guessed_words(&self) -> &[String] {
        &self.guessed_words
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> usize {
        self.max_rows.saturating_sub(self.guessed_words.len())
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.guessed_words
            .last()
            .is_some_and(|last| last == self.target_word())
    }

    /// Won, or out of rows
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_won() || self.guessed_words.len() >= self.max_rows
    }

    /// Check that `word` could be a correct answer by value
    ///
    /// Returns the value of the guess on success.
    ///
    /// # Errors
    /// Returns `IllegalGuess` for a wrong length, an invalid expression or a
    /// value different from the target's.
    pub fn legal_word(&self, word: &str) -> Result<i64, IllegalGuess> {
        let actual = word.chars().count();
        if actual != self.length() {
            return Err(IllegalGuess::WrongLength {
                expected: self.length(),
                actual,
            });
        }

        let value = evaluate(word)?;
        if value != self.target_value() {
            return Err(IllegalGuess::WrongValue {
                expected: self.target_value(),
                actual: value,
            });
        }
        Ok(value)
    }

    /// Submit a guess
    ///
    /// The checks run in priority order: win, duplicate, legality, then the row
    /// limit. Only winning and legal guesses are recorded, and never more than
    /// `max_rows` of them: once the rows are used up every further guess,
    /// including the target itself, is answered with `Loss`.
    pub fn guess(&mut self, word: &str) -> GuessOutcome {
        let word = word.to_lowercase();
        let out_of_rows = self.guessed_words.len() >= self.max_rows;

        if word == self.target_word() && !out_of_rows {
            self.guessed_words.push(word);
            debug!(guesses = self.guessed_words.len(), "win");
            return GuessOutcome::new(GuessResult::Win, "Congratulations, you solved it!");
        }

        if self.guessed_words.contains(&word) {
            debug!(%word, "duplicate guess");
            return GuessOutcome::new(GuessResult::Duplicate, "Duplicate guess");
        }

        if let Err(reason) = self.legal_word(&word) {
            debug!(%word, %reason, "illegal guess");
            return GuessOutcome::new(GuessResult::Illegal, reason.to_string());
        }

        if out_of_rows {
            debug!(%word, "guess after the last row");
            return GuessOutcome::new(GuessResult::Loss, "Out of guesses");
        }

        self.guessed_words.push(word);
        if self.guessed_words.len() == self.max_rows {
            debug!(expression = %self.target, "out of guesses");
            return GuessOutcome::new(GuessResult::Loss, "Out of guesses");
        }

        GuessOutcome::new(GuessResult::Legal, "Good guess")
    }

    /// Feedback for each recorded guess, in order
    #[must_use]
    pub fn feedback_rows(&self) -> Vec<Feedback> {
        self.guessed_words
            .iter()
            .map(|guess| Feedback::calculate(self.target_word(), guess))
            .collect()
    }

    /// Target with every character not yet seen in any guess masked
    ///
    /// # Examples
    /// ```
    /// use mathler::game::GameSession;
    ///
    /// let mut game = GameSession::new("12+34").unwrap();
    /// assert_eq!(game.hint(), "@@@@@");
    /// game.guess("23+23");
    /// assert_eq!(game.hint(), "@2+3@");
    /// ```
    #[must_use]
    pub fn hint(&self) -> String {
        let seen: FxHashSet<char> = self
            .guessed_words
            .iter()
            .flat_map(|word| word.chars())
            .collect();

        self.target_word()
            .chars()
            .map(|ch| if seen.contains(&ch) { ch } else { HINT_PLACEHOLDER })
            .collect()
    }

    /// Human-readable description of the target
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Expression: {}\nValue: {}", self.target, self.target_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> GameSession {
        GameSession::new("1+2+3+4").unwrap()
    }

    #[test]
    fn construction_validates_target() {
        let game = ten();
        assert_eq!(game.target_word(), "1+2+3+4");
        assert_eq!(game.target_value(), 10);
        assert_eq!(game.length(), 7);
        assert_eq!(game.max_rows(), 8);
        assert!(game.guessed_words().is_empty());
    }

    #[test]
    fn construction_rejects_illegal_target() {
        for word in ["1+", "7/2", "2**3", "a+b", ""] {
            assert!(
                matches!(GameSession::new(word), Err(GameError::IllegalTarget { .. })),
                "{word} should be rejected"
            );
        }
    }

    #[test]
    fn scenario_illegal_legal_win() {
        let mut game = ten();

        let outcome = game.guess("6//3+21");
        assert_eq!(outcome.result, GuessResult::Illegal);
        assert!(outcome.message.contains("FloorDiv"));
        assert!(game.guessed_words().is_empty());

        assert_eq!(game.guess("1+3+3+3").result, GuessResult::Legal);
        let rows = game.feedback_rows();
        assert_eq!(rows[0], "GG-GGG-".parse::<Feedback>().unwrap());

        assert_eq!(game.guess("1+2+3+4").result, GuessResult::Win);
        assert!(game.is_won());
        assert!(game.is_finished());
        assert_eq!(game.guessed_words().len(), 2);
    }

    #[test]
    fn duplicate_guess_not_recorded() {
        let mut game = ten();
        assert_eq!(game.guess("4+3+2+1").result, GuessResult::Legal);
        assert_eq!(game.guess("4+3+2+1").result, GuessResult::Duplicate);
        assert_eq!(game.guessed_words().len(), 1);
    }

    #[test]
    fn illegal_reasons() {
        let game = ten();
        assert_eq!(
            game.legal_word("10"),
            Err(IllegalGuess::WrongLength {
                expected: 7,
                actual: 2
            })
        );
        assert_eq!(
            game.legal_word("1+2+3+5"),
            Err(IllegalGuess::WrongValue {
                expected: 10,
                actual: 11
            })
        );
        assert_eq!(
            game.legal_word("1+2+3+x"),
            Err(IllegalGuess::Expression(ExprError::IllegalCharacter('x')))
        );
        assert_eq!(game.legal_word("5*4/2+0"), Ok(10));
    }

    #[test]
    fn loss_after_max_rows() {
        let mut game = ten();
        let guesses = [
            "4+3+2+1", "2+3+4+1", "1+3+3+3", "3+3+3+1", "2+2+2+4", "9+1+0+0", "5+5+0+0",
        ];
        for guess in guesses {
            assert_eq!(game.guess(guess).result, GuessResult::Legal, "{guess}");
        }
        assert_eq!(game.remaining_guesses(), 1);

        let outcome = game.guess("8+1+1+0");
        assert_eq!(outcome.result, GuessResult::Loss);
        assert_eq!(game.guessed_words().len(), 8);
        assert!(game.is_finished());
        assert!(!game.is_won());
    }

    #[test]
    fn no_rows_recorded_after_loss() {
        let mut game = GameSession::new("1+2").unwrap();
        for guess in ["2+1", "0+3", "3+0"] {
            assert_eq!(game.guess(guess).result, GuessResult::Legal, "{guess}");
        }
        assert_eq!(game.guess("1*3").result, GuessResult::Loss);

        let outcome = game.guess("3/1");
        assert_eq!(outcome.result, GuessResult::Loss);
        assert_eq!(outcome.message, "Out of guesses");
        assert_eq!(game.guess("1+2").result, GuessResult::Loss);
        assert_eq!(game.guess("2+1").result, GuessResult::Duplicate);

        assert_eq!(game.guessed_words().len(), game.max_rows());
        assert_eq!(game.board().len(), game.max_rows());
        assert!(!game.is_won());
    }

    #[test]
    fn win_on_last_row_is_still_a_win() {
        let mut game = GameSession::new("1+2").unwrap();
        assert_eq!(game.guess("2+1").result, GuessResult::Legal);
        assert_eq!(game.guess("0+3").result, GuessResult::Legal);
        assert_eq!(game.guess("3+0").result, GuessResult::Legal);
        assert_eq!(game.guess("1+2").result, GuessResult::Win);
    }

    #[test]
    fn hint_reveals_seen_characters() {
        let mut game = ten();
        assert_eq!(game.hint(), "@@@@@@@");

        game.guess("5+5+0+0");
        assert_eq!(game.hint(), "@+@+@+@");

        game.guess("4+3+2+1");
        assert_eq!(game.hint(), "1+2+3+4");
    }

    #[test]
    fn illegal_guesses_reveal_nothing() {
        let mut game = ten();
        game.guess("1+2+3+5");
        assert_eq!(game.hint(), "@@@@@@@");
    }

    #[test]
    fn random_session_uses_generated_target() {
        let mut generator = Generator::from_seed(8);
        let game = GameSession::random(8, &mut generator).unwrap();
        assert_eq!(game.length(), 8);
        assert_eq!(game.max_rows(), 9);
        assert_eq!(evaluate(game.target_word()), Ok(game.target_value()));

        assert!(matches!(
            GameSession::random(2, &mut generator),
            Err(GameError::Generation(GenerationError::LengthTooShort(2)))
        ));
    }

    #[test]
    fn summary_mentions_expression_and_value() {
        let summary = ten().summary();
        assert!(summary.contains("1+2+3+4"));
        assert!(summary.contains("10"));
    }
}
