//! Benchmark command
//!
//! Measures generator cost across many expressions. Each expression is generated
//! in parallel from its own seeded RNG so a seeded run is reproducible.

use crate::generator::{GenerationError, Generator, GeneratorConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Configuration for a benchmark run
pub struct BenchmarkConfig {
    pub length: usize,
    pub count: usize,
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
}

impl BenchmarkConfig {
    #[must_use]
    pub fn new(length: usize, count: usize) -> Self {
        Self {
            length,
            count,
            seed: None,
            generator: GeneratorConfig::default(),
        }
    }
}

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub length: usize,
    pub total: usize,
    pub failures: Vec<GenerationError>,
    pub average_attempts: f64,
    pub max_attempts: usize,
    pub average_restarts: f64,
    pub max_restarts: usize,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    /// Number of expressions per operator count
    pub operator_distribution: HashMap<usize, usize>,
    pub duration: Duration,
    pub expressions_per_second: f64,
}

impl BenchmarkResult {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.total - self.failures.len()
    }
}

/// Generate `config.count` expressions and collect statistics
///
/// A progress bar is drawn when `show_progress` is set.
#[must_use]
pub fn run_benchmark(config: &BenchmarkConfig, show_progress: bool) -> BenchmarkResult {
    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());

    let pb = if show_progress {
        let pb = ProgressBar::new(config.count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        pb.set_message(format!("length {}", config.length));
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let outcomes: Vec<_> = (0..config.count as u64)
        .into_par_iter()
        .map(|i| {
            let rng = StdRng::seed_from_u64(base_seed.wrapping_add(i));
            let outcome = Generator::new(rng, config.generator).generate_with_stats(config.length);
            pb.inc(1);
            outcome
        })
        .collect();
    let duration = start.elapsed();
    pb.finish_and_clear();

    let mut failures = Vec::new();
    let mut total_attempts = 0;
    let mut max_attempts = 0;
    let mut total_restarts = 0;
    let mut max_restarts = 0;
    let mut min_value: Option<i64> = None;
    let mut max_value: Option<i64> = None;
    let mut operator_distribution: HashMap<usize, usize> = HashMap::new();

    for outcome in outcomes {
        match outcome {
            Ok(generated) => {
                let stats = generated.stats;
                let value = generated.expression.value();
                total_attempts += stats.attempts;
                max_attempts = max_attempts.max(stats.attempts);
                total_restarts += stats.restarts;
                max_restarts = max_restarts.max(stats.restarts);
                min_value = Some(min_value.map_or(value, |m| m.min(value)));
                max_value = Some(max_value.map_or(value, |m| m.max(value)));

                let operators = generated
                    .expression
                    .text()
                    .chars()
                    .filter(|c| "+-*/".contains(*c))
                    .count();
                *operator_distribution.entry(operators).or_insert(0) += 1;
            }
            Err(e) => failures.push(e),
        }
    }

    let succeeded = (config.count - failures.len()).max(1) as f64;

    BenchmarkResult {
        length: config.length,
        total: config.count,
        failures,
        average_attempts: total_attempts as f64 / succeeded,
        max_attempts,
        average_restarts: total_restarts as f64 / succeeded,
        max_restarts,
        min_value,
        max_value,
        operator_distribution,
        duration,
        expressions_per_second: config.count as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(length: usize, count: usize) -> BenchmarkConfig {
        BenchmarkConfig {
            seed: Some(42),
            ..BenchmarkConfig::new(length, count)
        }
    }

    #[test]
    fn benchmark_runs() {
        let result = run_benchmark(&seeded(8, 40), false);

        assert_eq!(result.total, 40);
        assert!(result.failures.is_empty());
        assert_eq!(result.succeeded(), 40);
        assert!(result.average_attempts >= 1.0);
        assert!(result.max_attempts >= 1);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let result = run_benchmark(&seeded(10, 30), false);

        let distribution_sum: usize = result.operator_distribution.values().sum();
        assert_eq!(distribution_sum, result.succeeded());
        for &operators in result.operator_distribution.keys() {
            assert!((1..=4).contains(&operators));
        }
    }

    #[test]
    fn benchmark_values_within_limit() {
        let result = run_benchmark(&seeded(9, 30), false);

        let min = result.min_value.unwrap();
        let max = result.max_value.unwrap();
        assert!(min <= max);
        assert!(min.abs() <= 10_000 && max.abs() <= 10_000);
    }

    #[test]
    fn benchmark_records_failures() {
        let result = run_benchmark(&seeded(2, 5), false);

        assert_eq!(result.failures.len(), 5);
        assert_eq!(result.succeeded(), 0);
        assert!(result.min_value.is_none());
    }

    #[test]
    fn benchmark_empty() {
        let result = run_benchmark(&seeded(7, 0), false);
        assert_eq!(result.total, 0);
        assert!(result.operator_distribution.is_empty());
    }

    #[test]
    fn seeded_benchmark_is_reproducible() {
        let a = run_benchmark(&seeded(8, 20), false);
        let b = run_benchmark(&seeded(8, 20), false);
        assert_eq!(a.max_attempts, b.max_attempts);
        assert_eq!(a.min_value, b.min_value);
        assert_eq!(a.operator_distribution, b.operator_distribution);
    }
}
