//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use serde::Serialize;

use evoq_catalog::MoleculeCatalog;
use evoq_sim::Solver;

/// Load the builtin molecule catalogue.
pub fn load_catalog() -> Result<MoleculeCatalog> {
    MoleculeCatalog::builtin().context("Failed to load molecule catalogue")
}

/// Map a solver name to its settings.
pub fn parse_solver(name: &str, substeps: usize) -> Result<Solver> {
    match name.to_lowercase().as_str() {
        "dopri5" | "dopri" | "dormand-prince" => Ok(Solver::dormand_prince()),
        "rk4" => Ok(Solver::rk4(substeps)),
        other => anyhow::bail!("Unknown solver: '{other}' (expected dopri5 or rk4)"),
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solver_names() {
        assert_eq!(parse_solver("dopri5", 10).unwrap(), Solver::dormand_prince());
        assert_eq!(parse_solver("DOPRI", 10).unwrap(), Solver::dormand_prince());
        assert_eq!(parse_solver("rk4", 7).unwrap(), Solver::rk4(7));
    }

    #[test]
    fn test_parse_solver_unknown() {
        let err = parse_solver("euler", 10).unwrap_err();
        assert!(err.to_string().contains("euler"));
    }
}
