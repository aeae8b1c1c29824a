//! Display functions for games and command results

use super::formatters::{create_progress_bar, hint_display, row_to_plain, tile_cell};
use crate::commands::{BenchmarkResult, CheckResult};
use crate::game::{GameSession, Row};
use crate::generator::Generated;
use colored::Colorize;

/// Print the board of a session, blank rows included
pub fn print_board(session: &GameSession) {
    println!();
    for row in session.board() {
        let line: String = match row {
            Row::Played(tiles) => tiles.into_iter().map(|t| tile_cell(t).to_string()).collect(),
            Row::Empty => " · ".repeat(session.length()).bright_black().to_string(),
        };
        println!("  {line}");
    }
    println!();
}

/// Print the board without colours, one guess and its emoji feedback per line
pub fn print_plain_board(session: &GameSession) {
    println!();
    for row in session.board() {
        println!("  {}", row_to_plain(&row, session.length()));
    }
    println!();
}

/// Print a hint string
pub fn print_hint(hint: &str) {
    println!("💡 Hint: {}\n", hint_display(hint).bright_yellow().bold());
}

/// Print the result of checking an expression
pub fn print_check_result(result: &CheckResult) {
    match &result.value {
        Ok(value) => println!(
            "{} {} = {} ({} characters, {} operators)",
            "✅".green(),
            result.text.bright_white().bold(),
            value.to_string().bright_yellow().bold(),
            result.length,
            result.operators
        ),
        Err(reason) => println!(
            "{} {}: {}",
            "❌".red(),
            result.text.bright_white().bold(),
            reason.to_string().red()
        ),
    }
}

/// Print a batch of generated expressions
pub fn print_generated(batch: &[Generated], verbose: bool) {
    for generated in batch {
        let expression = &generated.expression;
        if verbose {
            println!(
                "{} = {}  ({} attempts, {} restarts)",
                expression.text().bright_white().bold(),
                expression.value(),
                generated.stats.attempts,
                generated.stats.restarts
            );
        } else {
            println!("{} = {}", expression.text(), expression.value());
        }
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Length:           {}", result.length);
    println!("   Expressions:      {}", result.total);
    println!(
        "   Average attempts: {}",
        format!("{:.2}", result.average_attempts)
            .bright_yellow()
            .bold()
    );
    println!("   Worst attempts:   {}", result.max_attempts);
    println!("   Average restarts: {:.2}", result.average_restarts);
    println!("   Worst restarts:   {}", result.max_restarts);
    if let (Some(min), Some(max)) = (result.min_value, result.max_value) {
        println!("   Value range:      {min} ..= {max}");
    }
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Expressions/sec:  {:.1}", result.expressions_per_second);

    if !result.failures.is_empty() {
        println!(
            "\n{}",
            format!("❌ {} generations failed", result.failures.len())
                .red()
                .bold()
        );
        if let Some(first) = result.failures.first() {
            println!("   {first}");
        }
    }

    let succeeded = result.succeeded();
    if succeeded == 0 {
        return;
    }

    println!("\n📈 {}", "Operators per expression:".bright_cyan().bold());
    let mut counts: Vec<_> = result.operator_distribution.iter().collect();
    counts.sort_unstable();
    for (operators, &count) in counts {
        let pct = (count as f64 / succeeded as f64) * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {operators}: {} {count:4} ({pct:5.1}%)", bar.green());
    }
}
