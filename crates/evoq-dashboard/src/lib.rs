//! Evoqution Dashboard - JSON web API over the molecule catalogue and the
//! adiabatic evolution engine.
//!
//! - Browse and search the molecule reference table
//! - Show reference results, optionally recomputed by the engine
//! - Run simulations with custom duration, grid size and solver
//!
//! Simulations run on blocking workers bounded by a semaphore; see
//! [`runner`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use evoq_dashboard::{AppState, Config, create_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let addr = config.bind_address()?;
//!     let state = Arc::new(AppState::with_config(config)?);
//!
//!     let app = create_router(state);
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod runner;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::{Config, ConfigError};
pub use dto::{HealthResponse, ResultsResponse, SimulateRequest, SimulationResponse, TracePoint};
pub use error::ApiError;
pub use runner::{SimulationParams, run_simulation};
pub use server::{create_router, serve};
pub use state::AppState;
pub use telemetry::init_tracing;
