//! Simulation endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::dto::{SimulateRequest, SimulationResponse};
use crate::error::ApiError;
use crate::runner::{SimulationParams, run_simulation};
use crate::state::AppState;

/// POST /api/simulate - Run an adiabatic evolution and report the final energy.
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulateRequest>, JsonRejection>,
) -> Result<Json<SimulationResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if let Some(key) = req.molecule.as_deref() {
        state.catalog.get(key)?;
    }

    let params = SimulationParams::resolve(
        &state.config.simulation,
        req.duration,
        req.num_points,
        req.solver,
    );
    state
        .config
        .limits
        .check(params.num_points, &params.solver)
        .map_err(ApiError::BadRequest)?;
    let molecule = req.molecule.as_deref().unwrap_or_default();
    let result = run_simulation(&state, molecule, params).await?;
    let energy = result.energy()?.to_string();

    Ok(Json(SimulationResponse::new(
        req.molecule,
        energy,
        &params,
        &result,
        req.trace,
    )))
}
