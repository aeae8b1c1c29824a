//! Mathler expression parsing and evaluation
//!
//! An expression is a string over `0-9 + - * /` denoting a chain of non-negative
//! integer literals joined by binary operators. Text is never handed to a general
//! evaluator: it is tokenized, built into a constrained tree (literals and the four
//! binary operators only) and that tree is evaluated with exact rational arithmetic.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Characters an expression may contain
pub const ALPHABET: &str = "0123456789+-*/";

/// Reasons an expression is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("illegal character '{0}', only digits and + - * / are allowed")]
    IllegalCharacter(char),

    /// A Python-style operator that is tokenized only to be refused
    #[error("illegal operator `{0}`")]
    IllegalOperator(&'static str),

    #[error("illegal unary operator `{0}`")]
    UnaryOperator(char),

    #[error("illegal literal `{0}`")]
    IllegalLiteral(String),

    #[error("malformed expression: {0}")]
    Malformed(&'static str),

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("result {0} is not an integer")]
    NonInteger(Ratio),
}

/// The four allowed binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    /// `*` and `/` bind tighter than `+` and `-`
    #[must_use]
    pub const fn is_multiplicative(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }

    fn apply(self, lhs: Ratio, rhs: Ratio) -> Result<Ratio, ExprError> {
        match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Sub => lhs.checked_sub(rhs),
            Self::Mul => lhs.checked_mul(rhs),
            Self::Div => lhs.checked_div(rhs),
        }
    }
}

/// Exact rational number with a positive, reduced denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    num: i128,
    den: i128,
}

impl Ratio {
    #[must_use]
    pub const fn from_integer(value: i128) -> Self {
        Self { num: value, den: 1 }
    }

    fn new(num: i128, den: i128) -> Result<Self, ExprError> {
        if den == 0 {
            return Err(ExprError::DivisionByZero);
        }
        let divisor = gcd(num.unsigned_abs(), den.unsigned_abs());
        let divisor = i128::try_from(divisor).map_err(|_| ExprError::Overflow)?;
        let (mut num, mut den) = (num / divisor, den / divisor);
        if den < 0 {
            num = num.checked_neg().ok_or(ExprError::Overflow)?;
            den = den.checked_neg().ok_or(ExprError::Overflow)?;
        }
        Ok(Self { num, den })
    }

    /// The integer value, if the denominator is one
    #[must_use]
    pub const fn to_integer(self) -> Option<i128> {
        if self.den == 1 { Some(self.num) } else { None }
    }

    fn checked_add(self, rhs: Self) -> Result<Self, ExprError> {
        let num = cross(self.num, rhs.den)?
            .checked_add(cross(rhs.num, self.den)?)
            .ok_or(ExprError::Overflow)?;
        Self::new(num, cross(self.den, rhs.den)?)
    }

    fn checked_sub(self, rhs: Self) -> Result<Self, ExprError> {
        let num = cross(self.num, rhs.den)?
            .checked_sub(cross(rhs.num, self.den)?)
            .ok_or(ExprError::Overflow)?;
        Self::new(num, cross(self.den, rhs.den)?)
    }

    fn checked_mul(self, rhs: Self) -> Result<Self, ExprError> {
        Self::new(cross(self.num, rhs.num)?, cross(self.den, rhs.den)?)
    }

    fn checked_div(self, rhs: Self) -> Result<Self, ExprError> {
        if rhs.num == 0 {
            return Err(ExprError::DivisionByZero);
        }
        Self::new(cross(self.num, rhs.den)?, cross(self.den, rhs.num)?)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

fn cross(a: i128, b: i128) -> Result<i128, ExprError> {
    a.checked_mul(b).ok_or(ExprError::Overflow)
}

const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    if a == 0 { 1 } else { a }
}

/// Constrained expression tree: only literals and binary operations exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(i128),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Parse text into a tree, rejecting anything outside the grammar
    ///
    /// # Errors
    /// Returns `ExprError` for illegal characters, disallowed operators,
    /// unary signs, malformed literals or malformed syntax.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        if let Some(c) = text.chars().find(|&c| !ALPHABET.contains(c)) {
            return Err(ExprError::IllegalCharacter(c));
        }
        Parser::new(tokenize(text)?).parse()
    }

    /// Evaluate with true (rational) division
    ///
    /// # Errors
    /// Returns `ExprError::DivisionByZero` or `ExprError::Overflow`.
    pub fn evaluate(&self) -> Result<Ratio, ExprError> {
        match self {
            Self::Literal(value) => Ok(Ratio::from_integer(*value)),
            Self::Binary { op, lhs, rhs } => op.apply(lhs.evaluate()?, rhs.evaluate()?),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Number(&'a str),
    Op(BinaryOp),
    FloorDiv,
    Pow,
}

/// Split ASCII-only text into tokens; `//` and `**` are kept whole
fn tokenize(text: &str) -> Result<Vec<Token<'_>>, ExprError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            tokens.push(Token::Number(&text[start..i]));
            continue;
        }

        let next = bytes.get(i + 1).copied();
        match (b, next) {
            (b'/', Some(b'/')) => {
                tokens.push(Token::FloorDiv);
                i += 2;
            }
            (b'*', Some(b'*')) => {
                tokens.push(Token::Pow);
                i += 2;
            }
            _ => {
                let op = BinaryOp::from_symbol(char::from(b))
                    .ok_or(ExprError::IllegalCharacter(char::from(b)))?;
                tokens.push(Token::Op(op));
                i += 1;
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<Expr, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::Malformed("empty expression"));
        }
        let expr = self.parse_sum()?;
        if self.pos < self.tokens.len() {
            return Err(ExprError::Malformed("unexpected trailing input"));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    /// Next operator of the requested precedence level, consuming it
    fn next_operator(&mut self, multiplicative: bool) -> Result<Option<BinaryOp>, ExprError> {
        match self.peek() {
            Some(Token::Op(op)) if op.is_multiplicative() == multiplicative => {
                self.pos += 1;
                Ok(Some(op))
            }
            Some(Token::FloorDiv) => Err(ExprError::IllegalOperator("FloorDiv")),
            Some(Token::Pow) => Err(ExprError::IllegalOperator("Pow")),
            _ => Ok(None),
        }
    }

    fn parse_sum(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.parse_product()?;
        while let Some(op) = self.next_operator(false)? {
            let rhs = self.parse_product()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_product(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.parse_operand()?;
        while let Some(op) = self.next_operator(true)? {
            let rhs = self.parse_operand()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_operand(&mut self) -> Result<Expr, ExprError> {
        let token = self
            .peek()
            .ok_or(ExprError::Malformed("expression ends with an operator"))?;
        self.pos += 1;

        match token {
            Token::Number(digits) => parse_literal(digits),
            Token::Op(op @ (BinaryOp::Add | BinaryOp::Sub)) => {
                Err(ExprError::UnaryOperator(op.symbol()))
            }
            Token::Op(_) | Token::FloorDiv | Token::Pow => {
                Err(ExprError::Malformed("operator without a left operand"))
            }
        }
    }
}

/// Leading zeros are refused unless the literal is all zeros
fn parse_literal(digits: &str) -> Result<Expr, ExprError> {
    if digits.len() > 1 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
        return Err(ExprError::IllegalLiteral(digits.to_string()));
    }
    digits
        .parse::<i128>()
        .map(Expr::Literal)
        .map_err(|_| ExprError::Overflow)
}

/// Validate `text` and return its integer value
///
/// # Errors
/// Returns the first `ExprError` found while parsing or evaluating, or
/// `ExprError::NonInteger` when the value is a proper fraction.
///
/// # Examples
/// ```
/// use mathler::core::evaluate;
///
/// assert_eq!(evaluate("1+2*3").unwrap(), 7);
/// assert_eq!(evaluate("7/2*2").unwrap(), 7);
/// assert!(evaluate("7/2").is_err());
/// assert!(evaluate("6//3+21").is_err());
/// ```
pub fn evaluate(text: &str) -> Result<i64, ExprError> {
    let value = Expr::parse(text)?.evaluate()?;
    let integer = value.to_integer().ok_or(ExprError::NonInteger(value))?;
    i64::try_from(integer).map_err(|_| ExprError::Overflow)
}

/// A validated Mathler expression and its value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    text: String,
    value: i64,
}

impl Expression {
    /// Validate and wrap an expression
    ///
    /// # Errors
    /// Returns `ExprError` if the text is not a legal integer-valued expression.
    pub fn parse(text: impl Into<String>) -> Result<Self, ExprError> {
        let text = text.into().to_lowercase();
        let value = evaluate(&text)?;
        Ok(Self { text, value })
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Number of characters (every character is ASCII)
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.text.len()
    }
}

impl FromStr for Expression {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_with_precedence() {
        assert_eq!(evaluate("1+2*3"), Ok(7));
        assert_eq!(evaluate("2*3+1"), Ok(7));
        assert_eq!(evaluate("1+2+3+4"), Ok(10));
        assert_eq!(evaluate("10-4-3"), Ok(3)); // left-associative
        assert_eq!(evaluate("100/10/5"), Ok(2));
        assert_eq!(evaluate("42"), Ok(42));
    }

    #[test]
    fn negative_results_are_legal() {
        assert_eq!(evaluate("1-9"), Ok(-8));
        assert_eq!(evaluate("2-3*4"), Ok(-10));
    }

    #[test]
    fn true_division_keeps_intermediate_fractions() {
        assert_eq!(evaluate("7/2*2"), Ok(7));
        assert_eq!(evaluate("1/3*3"), Ok(1));
        assert_eq!(evaluate("1/3+2/3"), Ok(1));
    }

    #[test]
    fn non_integer_result_rejected() {
        let err = evaluate("7/2").unwrap_err();
        assert!(matches!(err, ExprError::NonInteger(_)));
        assert_eq!(err.to_string(), "result 7/2 is not an integer");
    }

    #[test]
    fn division_by_zero_rejected() {
        assert_eq!(evaluate("5/0"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("5/(0)"), Err(ExprError::IllegalCharacter('(')));
        assert_eq!(evaluate("1+5/0*3"), Err(ExprError::DivisionByZero));
    }

    #[test]
    fn illegal_characters_rejected() {
        for text in ["1+a", "1 + 2", "(1+2)", "1.5+1", "2^3", "1+２"] {
            assert!(
                matches!(evaluate(text), Err(ExprError::IllegalCharacter(_))),
                "{text} should contain an illegal character"
            );
        }
    }

    #[test]
    fn python_style_operators_named() {
        assert_eq!(evaluate("6//3+21"), Err(ExprError::IllegalOperator("FloorDiv")));
        assert_eq!(evaluate("2**3"), Err(ExprError::IllegalOperator("Pow")));
    }

    #[test]
    fn unary_operators_rejected() {
        assert_eq!(evaluate("-1+2"), Err(ExprError::UnaryOperator('-')));
        assert_eq!(evaluate("+1+2"), Err(ExprError::UnaryOperator('+')));
        assert_eq!(evaluate("3*-2"), Err(ExprError::UnaryOperator('-')));
        assert_eq!(evaluate("1--1"), Err(ExprError::UnaryOperator('-')));
    }

    #[test]
    fn malformed_syntax_rejected() {
        assert!(matches!(evaluate(""), Err(ExprError::Malformed(_))));
        assert!(matches!(evaluate("1+"), Err(ExprError::Malformed(_))));
        assert!(matches!(evaluate("*2"), Err(ExprError::Malformed(_))));
        assert!(matches!(evaluate("1*/2"), Err(ExprError::Malformed(_))));
    }

    #[test]
    fn leading_zero_literals() {
        assert_eq!(
            evaluate("01+9"),
            Err(ExprError::IllegalLiteral("01".to_string()))
        );
        assert_eq!(evaluate("0+9"), Ok(9));
        assert_eq!(evaluate("00+9"), Ok(9));
    }

    #[test]
    fn overflow_reported() {
        assert_eq!(
            evaluate("99999999999999999999*99999999999999999999"),
            Err(ExprError::Overflow)
        );
        assert_eq!(
            evaluate("9999999999999999999999999999999999999999"),
            Err(ExprError::Overflow)
        );
    }

    #[test]
    fn tree_shape_is_left_associative() {
        let tree = Expr::parse("8-2-1").unwrap();
        let Expr::Binary { op, lhs, rhs } = tree else {
            panic!("expected binary root");
        };
        assert_eq!(op, BinaryOp::Sub);
        assert_eq!(*rhs, Expr::Literal(1));
        assert!(matches!(*lhs, Expr::Binary { op: BinaryOp::Sub, .. }));
    }

    #[test]
    fn expression_accessors() {
        let expr = Expression::parse("1+2+3+4").unwrap();
        assert_eq!(expr.text(), "1+2+3+4");
        assert_eq!(expr.value(), 10);
        assert_eq!(expr.length(), 7);
        assert_eq!(expr.to_string(), "1+2+3+4");

        let parsed: Expression = "12*3".parse().unwrap();
        assert_eq!(parsed.value(), 36);
    }

    #[test]
    fn expression_rejects_illegal_text() {
        assert!(Expression::parse("1+2+").is_err());
        assert!("7/2".parse::<Expression>().is_err());
    }

    #[test]
    fn operator_symbols_round_trip() {
        for op in BinaryOp::ALL {
            assert_eq!(BinaryOp::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(BinaryOp::from_symbol('%'), None);
    }
}
