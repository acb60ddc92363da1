//! Simulate command implementation.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use evoq_dashboard::{SimulationParams, SimulationResponse};
use evoq_sim::{FixedPairModel, simulate_molecule};

use super::common::{load_catalog, parse_solver, print_json};

/// Execute the simulate command.
pub fn execute(
    molecule: Option<&str>,
    duration: f64,
    points: usize,
    solver: &str,
    substeps: usize,
    trace: bool,
    format: &str,
) -> Result<()> {
    if let Some(key) = molecule {
        load_catalog()?.get(key)?;
    }

    let params = SimulationParams {
        duration,
        num_points: points,
        solver: parse_solver(solver, substeps)?,
    };

    let spinner = if format == "json" {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!(
        "Evolving over T = {duration} with {}...",
        params.solver.name()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = simulate_molecule(
        &FixedPairModel,
        molecule.unwrap_or_default(),
        params.duration,
        params.num_points,
        params.solver,
    );
    spinner.finish_and_clear();

    let result = result?;
    let energy = result.energy()?.to_string();
    let response = SimulationResponse::new(
        molecule.map(str::to_string),
        energy,
        &params,
        &result,
        trace,
    );

    match format {
        "json" => print_json(&response),
        _ => {
            print_report(&response);
            Ok(())
        }
    }
}

fn print_report(response: &SimulationResponse) {
    let title = match &response.molecule {
        Some(key) => format!("Adiabatic evolution ({key})"),
        None => "Adiabatic evolution".to_string(),
    };
    println!("{} {}", style("→").cyan().bold(), style(title).bold());
    println!();
    println!("  Energy:          {}", style(&response.energy).green().bold());
    println!(
        "  Solver:          {} ({} accepted, {} rejected steps)",
        response.solver, response.accepted_steps, response.rejected_steps
    );
    println!(
        "  Grid:            {} points over T = {}",
        response.num_points, response.duration
    );
    println!("  Max norm drift:  {:.2e}", response.max_norm_drift);
    println!("  Max |Im⟨H⟩|:     {:.2e}", response.max_imaginary);

    if let Some(trace) = &response.trace {
        println!();
        println!(
            "  {:>10}  {:>14}  {:>12}",
            style("t").dim(),
            style("⟨H_problem⟩").dim(),
            style("norm").dim()
        );
        for point in trace {
            println!(
                "  {:>10.4}  {:>14.8}  {:>12.10}",
                point.t, point.expectation, point.norm
            );
        }
    }
}
