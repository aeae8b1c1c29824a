//! Core domain types for Mathler
//!
//! Expression validation and feedback classification. Everything here is pure:
//! no randomness, no I/O, no hidden state between calls.

mod expression;
mod feedback;

pub use expression::{ALPHABET, BinaryOp, Expr, ExprError, Expression, Ratio, evaluate};
pub use feedback::{Feedback, FeedbackClass};
