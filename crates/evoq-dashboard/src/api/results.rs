//! Result page data: reference values with an optional live computation.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::dto::{ResultsQuery, ResultsResponse};
use crate::error::ApiError;
use crate::runner::{SimulationParams, run_simulation};
use crate::state::AppState;

/// GET /api/results?molecule=&simulate= - Reference entry and ground-state
/// energy, plus the engine's energy when `simulate=true`.
pub async fn results(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ResultsQuery>, QueryRejection>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let molecule = state.catalog.get(&query.molecule)?.clone();

    let computed_energy = if query.simulate {
        let params = SimulationParams::from(&state.config.simulation);
        let result = run_simulation(&state, &molecule.key, params).await?;
        Some(result.energy()?.to_string())
    } else {
        None
    };

    Ok(Json(ResultsResponse {
        ground_state: molecule.expected_energy.clone(),
        molecule,
        computed_energy,
    }))
}
