//! Data Transfer Objects for the dashboard API.
//!
//! These types bridge catalogue entries and evolution results to
//! JSON-serializable API requests and responses.

use evoq_catalog::Molecule;
use evoq_sim::{EvolutionResult, Solver};
use serde::{Deserialize, Serialize};

use crate::runner::SimulationParams;

// ============================================================================
// Catalogue DTOs
// ============================================================================

/// Query string of `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Prefix to match against keys and names; absent means everything.
    #[serde(default)]
    pub q: String,
}

/// Query string of `GET /api/results`.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    /// Catalogue key.
    pub molecule: String,
    /// Also run the engine and report its energy.
    #[serde(default)]
    pub simulate: bool,
}

/// Reference data for a molecule, plus an optional computed energy.
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    /// Full catalogue entry.
    pub molecule: Molecule,
    /// Precomputed ground-state energy from the table.
    pub ground_state: String,
    /// Engine output, present when `simulate=true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_energy: Option<String>,
}

// ============================================================================
// Simulation DTOs
// ============================================================================

/// Body of `POST /api/simulate`. Omitted fields take configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SimulateRequest {
    /// Catalogue key; checked against the table when present.
    pub molecule: Option<String>,
    /// Total evolution time.
    pub duration: Option<f64>,
    /// Number of sampled time points.
    pub num_points: Option<usize>,
    /// Integration method, e.g. `{"method": "rk4", "substeps": 20}`.
    pub solver: Option<Solver>,
    /// Include the per-point expectation trace.
    #[serde(default)]
    pub trace: bool,
}

/// One sampled point of the expectation trace.
#[derive(Debug, Clone, Serialize)]
pub struct TracePoint {
    pub t: f64,
    pub expectation: f64,
    pub imaginary: f64,
    pub norm: f64,
}

/// Result of a simulation request.
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    /// Molecule the request named, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecule: Option<String>,
    /// Formatted final energy, e.g. `"1.0000 eV"`.
    pub energy: String,
    /// Final `⟨H_problem⟩` as a number.
    pub value: f64,
    pub duration: f64,
    pub num_points: usize,
    /// Solver short name (`"dopri5"` or `"rk4"`).
    pub solver: &'static str,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    /// Largest `|‖ψ‖ - 1|` over the grid.
    pub max_norm_drift: f64,
    /// Largest `|Im⟨H_problem⟩|` over the grid.
    pub max_imaginary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TracePoint>>,
}

impl SimulationResponse {
    /// Build the response from a finished evolution.
    ///
    /// `energy` is the already-validated formatted value; the caller has
    /// rejected non-finite results.
    pub fn new(
        molecule: Option<String>,
        energy: String,
        params: &SimulationParams,
        result: &EvolutionResult,
        include_trace: bool,
    ) -> Self {
        let trace = include_trace.then(|| {
            result
                .times()
                .iter()
                .zip(result.expectations())
                .zip(result.norms())
                .map(|((&t, e), &norm)| TracePoint {
                    t,
                    expectation: e.re,
                    imaginary: e.im,
                    norm,
                })
                .collect()
        });

        Self {
            molecule,
            energy,
            value: result.final_energy(),
            duration: params.duration,
            num_points: params.num_points,
            solver: params.solver.name(),
            accepted_steps: result.accepted_steps(),
            rejected_steps: result.rejected_steps(),
            max_norm_drift: result.max_norm_drift(),
            max_imaginary: result.max_imaginary(),
            trace,
        }
    }
}

// ============================================================================
// Health DTOs
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Entries in the molecule catalogue.
    pub molecules: usize,
    /// Simulation workers not currently running an integration.
    pub idle_workers: usize,
}

impl HealthResponse {
    pub fn new(molecules: usize, idle_workers: usize) -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            molecules,
            idle_workers,
        }
    }
}
