//! Evoqution Command-Line Interface
//!
//! Runs adiabatic evolutions, browses the molecule catalogue and starts the
//! dashboard server.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{molecules, search, serve, show, simulate, version};

/// Evoqution - adiabatic quantum evolution for small molecules
#[derive(Parser)]
#[command(name = "evoq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an adiabatic evolution and print the final energy
    Simulate {
        /// Molecule key from the catalogue (e.g. H2O)
        #[arg(short, long)]
        molecule: Option<String>,

        /// Total evolution time
        #[arg(short, long, default_value = "10")]
        duration: f64,

        /// Number of sampled time points
        #[arg(short, long, default_value = "100")]
        points: usize,

        /// Integration method (dopri5, rk4)
        #[arg(short, long, default_value = "dopri5")]
        solver: String,

        /// RK4 sub-steps per grid interval
        #[arg(long, default_value = "10")]
        substeps: usize,

        /// Print the expectation value at every grid point
        #[arg(long)]
        trace: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the molecules in the catalogue
    Molecules {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show reference data for one molecule
    Show {
        /// Molecule key (case-sensitive, e.g. CO2)
        molecule: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Search molecules by key or name prefix
    Search {
        /// Prefix to match, ignoring case
        query: String,
    },

    /// Start the dashboard API server
    Serve {
        /// YAML configuration file
        #[arg(short, long, env = "EVOQ_CONFIG")]
        config: Option<PathBuf>,

        /// Bind address, overrides the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Simulate {
            molecule,
            duration,
            points,
            solver,
            substeps,
            trace,
            format,
        } => simulate::execute(
            molecule.as_deref(),
            duration,
            points,
            &solver,
            substeps,
            trace,
            &format,
        ),

        Commands::Molecules { format } => molecules::execute(&format),

        Commands::Show { molecule, format } => show::execute(&molecule, &format),

        Commands::Search { query } => search::execute(&query),

        Commands::Serve { config, bind } => serve::execute(config.as_deref(), bind).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
