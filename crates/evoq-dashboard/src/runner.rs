//! Runs engine calls off the async executor.
//!
//! Each simulation holds a semaphore permit for as long as its blocking task
//! runs, so at most `limits.max_concurrent_simulations` integrations execute
//! at once. A request that cannot finish (including time spent waiting for a
//! permit) within `limits.simulation_timeout_seconds` gets
//! [`ApiError::Unavailable`]. The blocking task itself is not cancelled and
//! keeps its permit until it returns, so callers must check request sizes
//! against [`ResourceLimits::check`](crate::config::ResourceLimits::check)
//! first.

use std::sync::Arc;
use std::time::{Duration, Instant};

use evoq_sim::{EvolutionResult, Solver, simulate_molecule};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Fully resolved simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub duration: f64,
    pub num_points: usize,
    pub solver: Solver,
}

impl SimulationParams {
    /// Fill unset fields from the configured defaults.
    pub fn resolve(
        defaults: &SimulationConfig,
        duration: Option<f64>,
        num_points: Option<usize>,
        solver: Option<Solver>,
    ) -> Self {
        Self {
            duration: duration.unwrap_or(defaults.duration),
            num_points: num_points.unwrap_or(defaults.num_points),
            solver: solver.unwrap_or(defaults.solver),
        }
    }
}

impl From<&SimulationConfig> for SimulationParams {
    fn from(config: &SimulationConfig) -> Self {
        Self::resolve(config, None, None, None)
    }
}

/// Evolve the model's problem for `molecule` on a blocking worker.
pub async fn run_simulation(
    state: &AppState,
    molecule: &str,
    params: SimulationParams,
) -> Result<EvolutionResult, ApiError> {
    let limit = Duration::from_secs(state.config.limits.simulation_timeout_seconds);
    let workers = Arc::clone(&state.workers);
    let model = Arc::clone(&state.model);
    let molecule = molecule.to_string();
    let started = Instant::now();

    let task = async move {
        let permit = workers
            .acquire_owned()
            .await
            .map_err(|_| ApiError::Unavailable("simulation workers are shut down".to_string()))?;
        debug!(molecule = %molecule, solver = params.solver.name(), "simulation started");

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            simulate_molecule(
                model.as_ref(),
                &molecule,
                params.duration,
                params.num_points,
                params.solver,
            )
        })
        .await
        .map_err(|e| ApiError::Internal(format!("simulation task failed: {e}")))?
        .map_err(ApiError::from)
    };

    match tokio::time::timeout(limit, task).await {
        Ok(Ok(result)) => {
            info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                accepted_steps = result.accepted_steps(),
                rejected_steps = result.rejected_steps(),
                "simulation finished"
            );
            Ok(result)
        }
        Ok(Err(e)) => {
            warn!(error = %e, "simulation failed");
            Err(e)
        }
        Err(_) => {
            warn!(timeout_s = limit.as_secs(), "simulation timed out");
            Err(ApiError::Unavailable(format!(
                "simulation did not finish within {}s",
                limit.as_secs()
            )))
        }
    }
}
