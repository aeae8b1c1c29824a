//! Command implementations

pub mod benchmark;
pub mod check;
pub mod generate;
pub mod simple;

pub use benchmark::{BenchmarkConfig, BenchmarkResult, run_benchmark};
pub use check::{CheckResult, check_expression};
pub use generate::{GenerateConfig, generate_batch, seeded_rng};
pub use simple::{DEFAULT_LENGTH, PlayConfig, run_simple};
