//! Random target generation
//!
//! Produces a legal expression of a requested length whose value is an integer
//! bounded by `|value| <= limit`. A random plan is drawn, up to
//! `attempts_per_plan` candidates are sampled from it, and a fresh plan is drawn
//! when all of them miss. The number of plans is capped by `max_restarts`.

mod plan;

pub use plan::{GenerationPlan, OPERATOR_WEIGHTS, max_operators};

use crate::core::Expression;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, trace};

/// Default bound on `|value|`
pub const DEFAULT_LIMIT: u64 = 10_000;

/// Errors raised while generating a target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("length {0} is too short, expressions need at least 3 characters")]
    LengthTooShort(usize),

    #[error("invalid plan: {operators} operators do not fit in {length} characters")]
    InvalidPlan { length: usize, operators: usize },

    #[error(
        "generation failed: no expression of length {length} with |value| <= {limit} after {restarts} plans"
    )]
    Exhausted {
        length: usize,
        limit: u64,
        restarts: usize,
    },
}

/// Tuning knobs for the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub limit: u64,
    pub attempts_per_plan: usize,
    pub max_restarts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            attempts_per_plan: 30,
            max_restarts: 1000,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

/// How much work one expression took
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Candidates evaluated in total
    pub attempts: usize,
    /// Plans discarded before the successful one
    pub restarts: usize,
}

/// A generated expression together with its cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub expression: Expression,
    pub stats: GenerationStats,
}

/// Expression generator over an injectable random source
pub struct Generator<R: Rng> {
    rng: R,
    config: GeneratorConfig,
}

impl Generator<StdRng> {
    /// Deterministic generator for reproducible puzzles and tests
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), GeneratorConfig::default())
    }
}

impl Generator<ThreadRng> {
    /// Generator backed by the thread-local RNG
    #[must_use]
    pub fn thread_local() -> Self {
        Self::new(rand::rng(), GeneratorConfig::default())
    }
}

impl<R: Rng> Generator<R> {
    pub const fn new(rng: R, config: GeneratorConfig) -> Self {
        Self { rng, config }
    }

    #[must_use]
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate an expression of exactly `length` characters
    ///
    /// # Errors
    /// See [`Generator::generate_with_stats`].
    pub fn generate(&mut self, length: usize) -> Result<Expression, GenerationError> {
        self.generate_with_stats(length).map(|g| g.expression)
    }

    /// Generate an expression and report how many attempts it took
    ///
    /// # Errors
    /// Returns `GenerationError::LengthTooShort` for `length < 3` and
    /// `GenerationError::Exhausted` when `max_restarts` plans all fail.
    pub fn generate_with_stats(&mut self, length: usize) -> Result<Generated, GenerationError> {
        if length < 3 {
            return Err(GenerationError::LengthTooShort(length));
        }

        let limit = self.config.limit;
        let mut attempts = 0;

        for restarts in 0..self.config.max_restarts {
            let plan = GenerationPlan::random(length, &mut self.rng)?;

            for _ in 0..self.config.attempts_per_plan {
                attempts += 1;
                let text = plan.sample(&mut self.rng);

                match Expression::parse(text.as_str()) {
                    Ok(expression) if expression.value().unsigned_abs() <= limit => {
                        debug!(%expression, value = expression.value(), attempts, restarts, "generated");
                        return Ok(Generated {
                            expression,
                            stats: GenerationStats { attempts, restarts },
                        });
                    }
                    Ok(expression) => trace!(%expression, limit, "value out of bounds"),
                    Err(reason) => trace!(%text, %reason, "candidate rejected"),
                }
            }

            debug!(length, restarts, "plan exhausted, drawing a new one");
        }

        Err(GenerationError::Exhausted {
            length,
            limit,
            restarts: self.config.max_restarts,
        })
    }
}

/// Generate one expression with the thread-local RNG
///
/// # Errors
/// Returns `GenerationError` if `length < 3` or no bounded expression is found.
///
/// # Examples
/// ```
/// use mathler::generator::generate;
///
/// let expression = generate(8, 10_000).unwrap();
/// assert_eq!(expression.length(), 8);
/// assert!(expression.value().unsigned_abs() <= 10_000);
/// ```
pub fn generate(length: usize, limit: u64) -> Result<Expression, GenerationError> {
    Generator::thread_local()
        .with_config(GeneratorConfig::with_limit(limit))
        .generate(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluate;

    #[test]
    fn generated_expressions_are_legal_and_bounded() {
        let mut generator = Generator::from_seed(2024);

        for length in 3..=14 {
            for _ in 0..20 {
                let expression = generator.generate(length).unwrap();
                assert_eq!(expression.length(), length);
                assert_eq!(evaluate(expression.text()), Ok(expression.value()));
                assert!(expression.value().unsigned_abs() <= DEFAULT_LIMIT);
            }
        }
    }

    #[test]
    fn tight_limit_is_respected() {
        let mut generator =
            Generator::from_seed(5).with_config(GeneratorConfig::with_limit(10));

        for _ in 0..50 {
            let expression = generator.generate(7).unwrap();
            assert!(expression.value().abs() <= 10, "{expression}");
        }
    }

    #[test]
    fn too_short_length_fails() {
        let mut generator = Generator::from_seed(0);
        assert_eq!(
            generator.generate(2),
            Err(GenerationError::LengthTooShort(2))
        );
        assert!(generate(0, DEFAULT_LIMIT).is_err());
    }

    #[test]
    fn same_seed_same_expressions() {
        let mut a = Generator::from_seed(77);
        let mut b = Generator::from_seed(77);
        for _ in 0..10 {
            assert_eq!(a.generate(10), b.generate(10));
        }
    }

    #[test]
    fn exhaustion_is_reported() {
        let config = GeneratorConfig {
            max_restarts: 0,
            ..GeneratorConfig::default()
        };
        let mut generator = Generator::from_seed(1).with_config(config);

        assert_eq!(
            generator.generate(7),
            Err(GenerationError::Exhausted {
                length: 7,
                limit: DEFAULT_LIMIT,
                restarts: 0,
            })
        );
        assert_eq!(generator.generate(2), Err(GenerationError::LengthTooShort(2)));
    }

    #[test]
    fn stats_count_attempts() {
        let mut generator = Generator::from_seed(11);
        let generated = generator.generate_with_stats(9).unwrap();

        assert!(generated.stats.attempts >= 1);
        assert!(generated.stats.attempts > generated.stats.restarts * 30);
    }

    #[test]
    fn thread_local_generation_works() {
        let expression = generate(6, 100).unwrap();
        assert_eq!(expression.length(), 6);
        assert!(expression.value().unsigned_abs() <= 100);
    }
}
