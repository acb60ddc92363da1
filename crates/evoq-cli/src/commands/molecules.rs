//! Molecules command implementation.

use anyhow::Result;
use console::style;

use super::common::{load_catalog, print_json};

/// Execute the molecules command.
pub fn execute(format: &str) -> Result<()> {
    let catalog = load_catalog()?;
    let summaries = catalog.summaries();

    if format == "json" {
        return print_json(&summaries);
    }

    println!(
        "{} {} molecules:\n",
        style("Evoqution").cyan().bold(),
        summaries.len()
    );
    for summary in &summaries {
        println!(
            "  {:<6} {:<6} {}",
            style(&summary.key).bold(),
            summary.formula,
            summary.name
        );
    }
    Ok(())
}
