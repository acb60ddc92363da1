//! Molecule-facing entry points.
//!
//! A [`HamiltonianModel`] turns a molecule identifier into an
//! [`AdiabaticProblem`]. Only [`FixedPairModel`] exists today: it returns the
//! same two-qubit problem for every identifier.

use tracing::debug;

use crate::error::SimResult;
use crate::evolution::{AdiabaticEvolution, AdiabaticProblem, EvolutionResult};
use crate::integrate::Solver;

/// Evolution time used by [`run_adiabatic_simulation`].
pub const DEFAULT_DURATION: f64 = 10.0;
/// Grid size used by [`run_adiabatic_simulation`].
pub const DEFAULT_NUM_POINTS: usize = 100;

/// Maps molecule identifiers to adiabatic problems.
pub trait HamiltonianModel: Send + Sync {
    /// Short model name for logs and reports.
    fn name(&self) -> &'static str;

    /// Build the problem to evolve for `molecule`.
    fn problem_for(&self, molecule: &str) -> SimResult<AdiabaticProblem>;
}

/// σx⊗σx → σz⊗σz from `|00⟩`, independent of the molecule.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPairModel;

impl HamiltonianModel for FixedPairModel {
    fn name(&self) -> &'static str {
        "fixed-pair"
    }

    fn problem_for(&self, molecule: &str) -> SimResult<AdiabaticProblem> {
        debug!(molecule, model = self.name(), "identifier does not alter the model");
        Ok(AdiabaticProblem::two_qubit_default())
    }
}

/// Evolve the model's problem for `molecule` and return the full trace.
pub fn simulate_molecule(
    model: &dyn HamiltonianModel,
    molecule: &str,
    duration: f64,
    num_points: usize,
    solver: Solver,
) -> SimResult<EvolutionResult> {
    let problem = model.problem_for(molecule)?;
    AdiabaticEvolution::new(problem, duration, num_points)
        .with_solver(solver)
        .run()
}

/// Evolve the default two-qubit problem and format the final
/// `⟨H_problem⟩`, e.g. `"1.0000 eV"`.
pub fn evolve_and_measure(duration: f64, num_points: usize) -> SimResult<String> {
    let result = AdiabaticEvolution::new(AdiabaticProblem::two_qubit_default(), duration, num_points)
        .run()?;
    Ok(result.energy()?.to_string())
}

/// Energy string for `molecule` with the default horizon and grid.
///
/// The identifier is accepted but does not change the computation.
pub fn run_adiabatic_simulation(molecule: &str) -> SimResult<String> {
    let result = simulate_molecule(
        &FixedPairModel,
        molecule,
        DEFAULT_DURATION,
        DEFAULT_NUM_POINTS,
        Solver::default(),
    )?;
    Ok(result.energy()?.to_string())
}
