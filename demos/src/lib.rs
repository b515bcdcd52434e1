//! revarith Demo Suite
//!
//! Lays out registers, synthesizes an arithmetic request through the
//! standard rule table, and checks the circuit on concrete values with the
//! classical simulator.
//!
//! ```ignore
//! use revarith_demos::scenario::AdderScenario;
//! use revarith_synth::RuleSet;
//!
//! let scenario = AdderScenario::new(3).with_values(5, 2);
//! let prepared = scenario.prepare(&RuleSet::standard())?;
//! let outcome = scenario.run(&prepared)?;
//! assert_eq!(outcome.target, 7);
//! ```

pub mod scenario;

use console::style;

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a failure message.
pub fn print_failure(message: &str) {
    println!("{} {}", style("✗").red().bold(), message);
}
