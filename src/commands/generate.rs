//! Batch generation command
//!
//! Generates a number of expressions of a fixed length, optionally from a seed.

use crate::generator::{GenerationError, Generated, Generator, GeneratorConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for a generation batch
pub struct GenerateConfig {
    pub length: usize,
    pub count: usize,
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
}

impl GenerateConfig {
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length,
            count: 1,
            seed: None,
            generator: GeneratorConfig::default(),
        }
    }
}

/// Seeded RNG when a seed is given, OS-seeded otherwise
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Generate `config.count` expressions
///
/// # Errors
///
/// Returns the first `GenerationError` encountered (length too short or
/// generation exhausted).
pub fn generate_batch(config: &GenerateConfig) -> Result<Vec<Generated>, GenerationError> {
    let mut generator = Generator::new(seeded_rng(config.seed), config.generator);
    (0..config.count)
        .map(|_| generator.generate_with_stats(config.length))
        .collect()
}
