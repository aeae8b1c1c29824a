//! Generation plans: operator choice and operand digit lengths
//!
//! A plan fixes the shape of an expression (which operators, how many digits per
//! operand) so that many candidate expressions of exactly the requested length can
//! be sampled from it.

use super::GenerationError;
use crate::core::BinaryOp;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use std::sync::LazyLock;

/// Relative weights for `+ - * /`, in `BinaryOp::ALL` order
pub const OPERATOR_WEIGHTS: [f64; 4] = [0.3, 0.3, 0.3, 0.1];

static OPERATOR_DISTRIBUTION: LazyLock<WeightedIndex<f64>> = LazyLock::new(|| {
    WeightedIndex::new(OPERATOR_WEIGHTS).expect("operator weights are positive")
});

/// Shape of a generated expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    operators: Vec<BinaryOp>,
    digit_lengths: Vec<usize>,
}

/// Largest operator count allowed for `length`
///
/// `floor(length / 2) - 1`, raised to 1 so that length 3 still has a plan.
#[must_use]
pub const fn max_operators(length: usize) -> usize {
    let bound = (length / 2).saturating_sub(1);
    if bound == 0 { 1 } else { bound }
}

impl GenerationPlan {
    /// Draw a random plan for an expression of `length` characters
    ///
    /// # Errors
    /// Returns `GenerationError::LengthTooShort` if `length < 3`, and
    /// `GenerationError::InvalidPlan` if the operator bound ever leaves a negative
    /// number of extra digits (a defect, also caught by a debug assertion).
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Result<Self, GenerationError> {
        if length < 3 {
            return Err(GenerationError::LengthTooShort(length));
        }

        let count = rng.random_range(1..=max_operators(length));
        let operators: Vec<BinaryOp> = (0..count)
            .map(|_| BinaryOp::ALL[OPERATOR_DISTRIBUTION.sample(rng)])
            .collect();

        // One digit per operand and one character per operator are already spent
        let operands = count + 1;
        let extra = length.checked_sub(operands + count);
        debug_assert!(
            extra.is_some(),
            "operator bound violated: length {length}, {count} operators"
        );
        let extra = extra.ok_or(GenerationError::InvalidPlan {
            length,
            operators: count,
        })?;

        let mut digit_lengths = vec![1; operands];
        for _ in 0..extra {
            digit_lengths[rng.random_range(0..operands)] += 1;
        }

        Ok(Self {
            operators,
            digit_lengths,
        })
    }

    #[inline]
    #[must_use]
    pub fn operators(&self) -> &[BinaryOp] {
        &self.operators
    }

    #[inline]
    #[must_use]
    pub fn digit_lengths(&self) -> &[usize] {
        &self.digit_lengths
    }

    /// Total characters of any expression sampled from this plan
    #[must_use]
    pub fn length(&self) -> usize {
        self.digit_lengths.iter().sum::<usize>() + self.operators.len()
    }

    /// Fill the plan with random operands and interleave the operators
    #[must_use]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut text = String::with_capacity(self.length());
        for (i, &digits) in self.digit_lengths.iter().enumerate() {
            push_number(&mut text, digits, rng);
            if let Some(op) = self.operators.get(i) {
                text.push(op.symbol());
            }
        }
        text
    }
}

/// Append a uniformly random number with exactly `digits` digits
///
/// Single digits range over 0-9; longer numbers never start with 0, which is the
/// same as drawing uniformly from `10^(digits-1)..10^digits`.
fn push_number<R: Rng + ?Sized>(text: &mut String, digits: usize, rng: &mut R) {
    let first_min = if digits == 1 { 0 } else { 1 };
    text.push(digit(rng.random_range(first_min..=9)));
    for _ in 1..digits {
        text.push(digit(rng.random_range(0..=9)));
    }
}

fn digit(value: u32) -> char {
    char::from_digit(value, 10).unwrap_or('0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn max_operators_bound() {
        assert_eq!(max_operators(3), 1);
        assert_eq!(max_operators(4), 1);
        assert_eq!(max_operators(5), 1);
        assert_eq!(max_operators(6), 2);
        assert_eq!(max_operators(7), 2);
        assert_eq!(max_operators(10), 4);
    }

    #[test]
    fn too_short_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        for length in 0..3 {
            assert!(matches!(
                GenerationPlan::random(length, &mut rng),
                Err(GenerationError::LengthTooShort(l)) if l == length
            ));
        }
    }

    #[test]
    fn plans_fill_the_length_exactly() {
        let mut rng = StdRng::seed_from_u64(42);
        for length in 3..=20 {
            for _ in 0..50 {
                let plan = GenerationPlan::random(length, &mut rng).unwrap();
                let ops = plan.operators().len();

                assert!((1..=max_operators(length)).contains(&ops));
                assert_eq!(plan.digit_lengths().len(), ops + 1);
                assert!(plan.digit_lengths().iter().all(|&d| d >= 1));
                assert_eq!(plan.length(), length);
            }
        }
    }

    #[test]
    fn samples_follow_the_plan() {
        let mut rng = StdRng::seed_from_u64(3);
        let plan = GenerationPlan::random(9, &mut rng).unwrap();

        for _ in 0..100 {
            let text = plan.sample(&mut rng);
            assert_eq!(text.len(), 9);

            let numbers: Vec<&str> = text.split(['+', '-', '*', '/']).collect();
            assert_eq!(numbers.len(), plan.digit_lengths().len());
            for (number, &digits) in numbers.iter().zip(plan.digit_lengths()) {
                assert_eq!(number.len(), digits);
                if digits > 1 {
                    assert!(!number.starts_with('0'), "leading zero in {text}");
                }
            }
        }
    }

    #[test]
    fn division_is_the_rare_operator() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0usize; 4];

        for _ in 0..2000 {
            let plan = GenerationPlan::random(20, &mut rng).unwrap();
            for op in plan.operators() {
                let index = BinaryOp::ALL.iter().position(|o| o == op).unwrap();
                counts[index] += 1;
            }
        }

        let total: usize = counts.iter().sum();
        let div_share = counts[3] as f64 / total as f64;
        assert!((0.07..0.13).contains(&div_share), "division share {div_share}");
        for &count in &counts[..3] {
            let share = count as f64 / total as f64;
            assert!((0.25..0.35).contains(&share), "share {share}");
        }
    }
}
