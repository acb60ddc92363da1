//! Axum server setup and routing.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::error::ApiError;
use crate::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/molecules", get(api::molecules::list_molecules))
        .route("/molecules/{key}", get(api::molecules::get_molecule))
        .route("/search", get(api::molecules::search))
        .route("/results", get(api::results::results))
        .route("/simulate", post(api::simulate::simulate));

    Router::new()
        .nest("/api", api_routes)
        .fallback(unknown_route)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {uri}"))
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let bind_addr = config.bind_address()?;
    let state = AppState::with_config(config).context("failed to load molecule catalogue")?;
    info!(
        molecules = state.catalog.len(),
        model = state.model.name(),
        workers = state.config.limits.max_concurrent_simulations,
        "application state ready"
    );

    let app = create_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!("Starting Evoqution dashboard at http://{}", bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
