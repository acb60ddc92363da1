//! Show command implementation.

use anyhow::Result;
use console::style;

use super::common::{load_catalog, print_json};

/// Execute the show command.
pub fn execute(key: &str, format: &str) -> Result<()> {
    let catalog = load_catalog()?;
    let molecule = catalog.get(key)?;

    if format == "json" {
        return print_json(molecule);
    }

    println!(
        "{} {} ({})",
        style("→").cyan().bold(),
        style(&molecule.name).bold(),
        molecule.formula
    );
    println!();
    println!("  Structure:     {}", molecule.structure);
    println!(
        "  Ground state:  {}",
        style(&molecule.expected_energy).green()
    );

    println!();
    println!("  Properties:");
    for property in &molecule.properties {
        println!("    {:<16} {}", property.name.replace('_', " "), property.value);
    }

    println!();
    println!("  Drug relevance:");
    for note in &molecule.drug_relevance {
        println!("    • {note}");
    }
    Ok(())
}
