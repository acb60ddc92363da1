//! Evoqution dashboard binary entry point.
//!
//! Usage: `evoq-dashboard [CONFIG.yaml]`

use std::path::PathBuf;

use evoq_dashboard::{Config, init_tracing, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_file = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(config_file.as_deref())?;

    init_tracing(&config.logging)?;
    tracing::debug!(?config, "configuration loaded");

    serve(config).await
}
