//! Search command implementation.

use anyhow::Result;
use console::style;

use super::common::load_catalog;

/// Execute the search command.
pub fn execute(query: &str) -> Result<()> {
    let catalog = load_catalog()?;
    let hits = catalog.search(query.trim());

    if hits.is_empty() {
        println!("No molecules match '{}'", style(query).yellow());
        return Ok(());
    }

    for hit in &hits {
        println!("  {:<6} {}", style(&hit.key).bold(), hit.name);
    }
    Ok(())
}
