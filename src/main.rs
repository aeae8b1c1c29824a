//! Mathler - CLI
//!
//! Play Mathler in a TUI or plain terminal, and generate or check expressions.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mathler::{
    commands::{
        BenchmarkConfig, DEFAULT_LENGTH, GenerateConfig, PlayConfig, check_expression,
        generate_batch, run_benchmark, run_simple, seeded_rng,
    },
    generator::{DEFAULT_LIMIT, Generator, GeneratorConfig},
    interactive::{App, run_tui},
    output::{print_benchmark_result, print_check_result, print_generated},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mathler",
    about = "Mathler: guess the hidden arithmetic expression",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Generation options shared by several commands
#[derive(Args, Clone, Copy)]
struct GenerationArgs {
    /// Expression length in characters (at least 3)
    #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
    length: usize,

    /// Largest allowed absolute value of a generated target
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: u64,

    /// Seed for reproducible targets
    #[arg(short, long)]
    seed: Option<u64>,
}

impl GenerationArgs {
    fn generator_config(self) -> GeneratorConfig {
        GeneratorConfig::with_limit(self.limit)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Tui {
        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Simple CLI mode (plain terminal game loop)
    Play {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Play against a fixed target expression instead of a generated one
        #[arg(short, long)]
        target: Option<String>,

        /// Plain-text board with emoji feedback (no colours)
        #[arg(long)]
        plain: bool,
    },

    /// Generate random expressions
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Number of expressions to generate
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Show attempts and restarts per expression
        #[arg(long)]
        stats: bool,
    },

    /// Check whether an expression is legal and print its value
    Check {
        /// The expression to check
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Benchmark expression generation
    Benchmark {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Number of expressions to generate
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,
    },
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Default to TUI mode if no command given
    let command = cli.command.unwrap_or(Commands::Tui {
        generation: GenerationArgs {
            length: DEFAULT_LENGTH,
            limit: DEFAULT_LIMIT,
            seed: None,
        },
    });

    match command {
        Commands::Tui { generation } => run_tui_command(generation),
        Commands::Play {
            generation,
            target,
            plain,
        } => run_play_command(generation, target, plain),
        Commands::Generate {
            generation,
            count,
            stats,
        } => run_generate_command(generation, count, stats),
        Commands::Check { expression } => {
            run_check_command(&expression);
            Ok(())
        }
        Commands::Benchmark { generation, count } => {
            run_benchmark_command(generation, count);
            Ok(())
        }
    }
}

fn run_tui_command(generation: GenerationArgs) -> Result<()> {
    let mut generator = Generator::new(seeded_rng(generation.seed), generation.generator_config());
    let session = PlayConfig {
        length: generation.length,
        ..PlayConfig::default()
    }
    .first_session(&mut generator)?;

    info!(length = generation.length, "starting tui");
    run_tui(App::new(generator, session))
}

fn run_play_command(generation: GenerationArgs, target: Option<String>, plain: bool) -> Result<()> {
    let config = PlayConfig {
        length: generation.length,
        target,
        seed: generation.seed,
        generator: generation.generator_config(),
        plain,
    };
    run_simple(&config)
}

fn run_generate_command(generation: GenerationArgs, count: usize, stats: bool) -> Result<()> {
    let config = GenerateConfig {
        length: generation.length,
        count,
        seed: generation.seed,
        generator: generation.generator_config(),
    };
    let batch = generate_batch(&config)?;
    print_generated(&batch, stats);
    Ok(())
}

fn run_check_command(expression: &str) {
    let result = check_expression(expression);
    print_check_result(&result);
}

fn run_benchmark_command(generation: GenerationArgs, count: usize) {
    println!(
        "Running benchmark: {count} expressions of length {}...",
        generation.length
    );

    let config = BenchmarkConfig {
        length: generation.length,
        count,
        seed: generation.seed,
        generator: generation.generator_config(),
    };
    let result = run_benchmark(&config, true);
    print_benchmark_result(&result);
}
