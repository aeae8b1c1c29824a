//! Read-only board view for renderers
//!
//! Renderers get exactly the data they need: per-row tiles for played rows,
//! blanks for unplayed ones, and the hint string.

use super::GameSession;
use crate::core::{Feedback, FeedbackClass};

/// One character of a played row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub ch: char,
    pub class: FeedbackClass,
}

/// A row of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Played(Vec<Tile>),
    Empty,
}

impl Row {
    fn played(guess: &str, feedback: &Feedback) -> Self {
        Self::Played(
            guess
                .chars()
                .zip(feedback.classes())
                .map(|(ch, &class)| Tile { ch, class })
                .collect(),
        )
    }
}

impl GameSession {
    /// Played rows followed by blanks up to `max_rows`
    #[must_use]
    pub fn board(&self) -> Vec<Row> {
        let mut rows: Vec<Row> = self
            .guessed_words()
            .iter()
            .zip(self.feedback_rows())
            .map(|(guess, feedback)| Row::played(guess, &feedback))
            .collect();
        let blanks = self.max_rows().saturating_sub(rows.len());
        rows.extend(std::iter::repeat_n(Row::Empty, blanks));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_has_max_rows() {
        let mut game = GameSession::new("1+2").unwrap();
        assert_eq!(game.board(), vec![Row::Empty; 4]);

        game.guess("2+1");
        let board = game.board();
        assert_eq!(board.len(), 4);
        assert_eq!(
            board[0],
            Row::Played(vec![
                Tile {
                    ch: '2',
                    class: FeedbackClass::Present
                },
                Tile {
                    ch: '+',
                    class: FeedbackClass::Exact
                },
                Tile {
                    ch: '1',
                    class: FeedbackClass::Present
                },
            ])
        );
        assert!(board[1..].iter().all(|row| *row == Row::Empty));
    }
}
