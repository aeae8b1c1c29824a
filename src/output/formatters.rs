//! Formatting utilities for terminal output

use crate::core::{Feedback, FeedbackClass};
use crate::game::{HINT_PLACEHOLDER, Row, Tile};
use colored::{ColoredString, Colorize};

/// Render one tile as a coloured, padded cell
#[must_use]
pub fn tile_cell(tile: Tile) -> ColoredString {
    let text = format!(" {} ", tile.ch);
    match tile.class {
        FeedbackClass::Exact => text.black().on_green().bold(),
        FeedbackClass::Present => text.black().on_yellow().bold(),
        FeedbackClass::Absent => text.white().on_bright_black(),
    }
}

/// Render a board row as plain text: the guess followed by its emoji feedback
#[must_use]
pub fn row_to_plain(row: &Row, length: usize) -> String {
    match row {
        Row::Played(tiles) => {
            let guess: String = tiles.iter().map(|t| t.ch).collect();
            let emoji: String = tiles.iter().map(|t| t.class.to_emoji()).collect();
            format!("{guess} {emoji}")
        }
        Row::Empty => format!("{} {}", "·".repeat(length), "▫".repeat(length)),
    }
}

/// Short count of exact and present positions, e.g. "2 exact, 3 present"
#[must_use]
pub fn feedback_counts(feedback: &Feedback) -> String {
    format!(
        "{} exact, {} present",
        feedback.count_exact(),
        feedback.count_present()
    )
}

/// Replace hint placeholders with underscores for display
#[must_use]
pub fn hint_display(hint: &str) -> String {
    hint.chars()
        .map(|c| if c == HINT_PLACEHOLDER { '_' } else { c })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSession;

    #[test]
    fn played_row_plain_text() {
        let mut game = GameSession::new("1+2").unwrap();
        game.guess("2+1");
        let board = game.board();

        assert_eq!(row_to_plain(&board[0], 3), "2+1 🟨🟩🟨");
        assert_eq!(row_to_plain(&board[1], 3), "··· ▫▫▫");
    }

    #[test]
    fn counts_of_exact_and_present() {
        let feedback = Feedback::calculate("12+1*5", "1111+2");
        assert_eq!(feedback_counts(&feedback), "2 exact, 2 present");

        let mut game = GameSession::new("1+2").unwrap();
        game.guess("2+1");
        let rows = game.feedback_rows();
        assert_eq!(feedback_counts(&rows[0]), "1 exact, 2 present");
    }

    #[test]
    fn hint_placeholders_replaced() {
        assert_eq!(hint_display("@+@"), "_+_");
        assert_eq!(hint_display("1+2"), "1+2");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }
}
