//! Molecule catalogue endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use evoq_catalog::{Molecule, MoleculeSummary};

use crate::dto::SearchQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/molecules - List all molecules in table order.
pub async fn list_molecules(State(state): State<Arc<AppState>>) -> Json<Vec<MoleculeSummary>> {
    Json(state.catalog.summaries())
}

/// GET /api/molecules/{key} - Full reference entry for one molecule.
pub async fn get_molecule(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Molecule>, ApiError> {
    let molecule = state.catalog.get(&key)?;
    Ok(Json(molecule.clone()))
}

/// GET /api/search?q= - Case-insensitive prefix search on key or name.
pub async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<MoleculeSummary>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(state.catalog.search(query.q.trim())))
}
