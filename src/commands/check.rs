//! Expression check command
//!
//! Validates a single expression and reports its value or the rejection reason.

use crate::core::{BinaryOp, ExprError, evaluate};

/// Result of checking an expression
pub struct CheckResult {
    pub text: String,
    pub length: usize,
    pub operators: usize,
    pub value: Result<i64, ExprError>,
}

impl CheckResult {
    #[must_use]
    pub const fn is_legal(&self) -> bool {
        self.value.is_ok()
    }
}

/// Validate `text` as a Mathler expression
#[must_use]
pub fn check_expression(text: &str) -> CheckResult {
    let text = text.trim().to_lowercase();
    let operators = text
        .chars()
        .filter(|&c| BinaryOp::from_symbol(c).is_some())
        .count();

    CheckResult {
        length: text.chars().count(),
        operators,
        value: evaluate(&text),
        text,
    }
}
