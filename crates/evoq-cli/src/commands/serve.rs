//! Serve command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use evoq_dashboard::Config;

/// Resolve the server configuration: file, then `EVOQ_*` variables, then
/// the `--bind` flag.
pub fn resolve_config(config_file: Option<&Path>, bind: Option<String>) -> Result<Config> {
    let mut config = Config::load(config_file).context("Failed to load configuration")?;
    if let Some(bind) = bind {
        config.server.address = bind;
        config.validate()?;
    }
    Ok(config)
}

/// Execute the serve command.
pub async fn execute(config_file: Option<&Path>, bind: Option<String>) -> Result<()> {
    let config = resolve_config(config_file, bind)?;

    println!(
        "{} Serving on http://{}",
        style("Evoqution").cyan().bold(),
        config.server.address
    );
    evoq_dashboard::serve(config).await
}
