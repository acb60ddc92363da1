//! Liveness and capacity report.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::dto::HealthResponse;
use crate::state::AppState;

/// GET /api/health - Catalogue size and idle simulation workers.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::new(
        state.catalog.len(),
        state.workers.available_permits(),
    ))
}
