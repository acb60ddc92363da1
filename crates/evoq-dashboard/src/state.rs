//! Application state for the dashboard server.

use std::sync::Arc;

use evoq_catalog::{CatalogResult, MoleculeCatalog};
use evoq_sim::{FixedPairModel, HamiltonianModel};
use tokio::sync::Semaphore;

use crate::config::Config;

/// Shared application state.
///
/// Everything here is read-only after startup; the semaphore is the only
/// coordination point between concurrent simulation requests.
pub struct AppState {
    /// Molecule reference table.
    pub catalog: Arc<MoleculeCatalog>,
    /// Maps molecule identifiers to the problem that gets evolved.
    pub model: Arc<dyn HamiltonianModel>,
    /// Server configuration.
    pub config: Config,
    /// Permits for running simulations.
    pub workers: Arc<Semaphore>,
}

impl AppState {
    /// Create state from an explicit catalogue and configuration.
    pub fn new(catalog: MoleculeCatalog, config: Config) -> Self {
        let permits = config.limits.max_concurrent_simulations;
        Self {
            catalog: Arc::new(catalog),
            model: Arc::new(FixedPairModel),
            config,
            workers: Arc::new(Semaphore::new(permits)),
        }
    }

    /// Create state over the builtin catalogue.
    pub fn with_config(config: Config) -> CatalogResult<Self> {
        Ok(Self::new(MoleculeCatalog::builtin()?, config))
    }

    /// Replace the Hamiltonian model.
    pub fn with_model(mut self, model: Arc<dyn HamiltonianModel>) -> Self {
        self.model = model;
        self
    }
}
