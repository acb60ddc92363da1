//! Configuration for the Evoqution dashboard server.
//!
//! Sources, highest precedence first:
//! 1. Environment variables (`EVOQ_` prefix)
//! 2. Configuration file (YAML)
//! 3. Default values

use std::net::SocketAddr;
use std::path::Path;

use evoq_sim::{DEFAULT_DURATION, DEFAULT_NUM_POINTS, Solver};
use serde::{Deserialize, Serialize};

/// Complete server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults applied to simulation requests that omit parameters
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Worker limits
    #[serde(default)]
    pub limits: ResourceLimits,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000")
    #[serde(default = "default_address")]
    pub address: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Simulation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Total evolution time T
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Number of sampled time points
    #[serde(default = "default_num_points")]
    pub num_points: usize,

    /// Integration method and its settings
    #[serde(default)]
    pub solver: Solver,
}

/// Worker limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Simulations allowed to run at the same time
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_simulations: usize,

    /// Wall-clock budget per simulation request, in seconds
    #[serde(default = "default_simulation_timeout")]
    pub simulation_timeout_seconds: u64,

    /// Largest time grid a request may ask for
    #[serde(default = "default_max_num_points")]
    pub max_num_points: usize,

    /// Largest RK4 `substeps` a request may ask for
    #[serde(default = "default_max_substeps")]
    pub max_substeps: usize,

    /// Largest Dormand-Prince `max_steps` a request may ask for
    #[serde(default = "default_max_solver_steps")]
    pub max_solver_steps: usize,
}

fn default_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_num_points() -> usize {
    DEFAULT_NUM_POINTS
}

fn default_max_concurrent() -> usize {
    4
}

fn default_simulation_timeout() -> u64 {
    30
}

fn default_max_num_points() -> usize {
    100_000
}

fn default_max_substeps() -> usize {
    1_000
}

fn default_max_solver_steps() -> usize {
    100_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            num_points: default_num_points(),
            solver: Solver::default(),
        }
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_concurrent_simulations: default_max_concurrent(),
            simulation_timeout_seconds: default_simulation_timeout(),
            max_num_points: default_max_num_points(),
            max_substeps: default_max_substeps(),
            max_solver_steps: default_max_solver_steps(),
        }
    }
}

impl ResourceLimits {
    /// Check a grid size and solver against the per-request limits.
    pub fn check(&self, num_points: usize, solver: &Solver) -> Result<(), String> {
        if num_points > self.max_num_points {
            return Err(format!(
                "num_points {num_points} exceeds the limit of {}",
                self.max_num_points
            ));
        }
        match *solver {
            Solver::Rk4 { substeps } if substeps > self.max_substeps => Err(format!(
                "rk4 substeps {substeps} exceeds the limit of {}",
                self.max_substeps
            )),
            Solver::DormandPrince { max_steps, .. } if max_steps > self.max_solver_steps => {
                Err(format!(
                    "dopri5 max_steps {max_steps} exceeds the limit of {}",
                    self.max_solver_steps
                ))
            }
            _ => Ok(()),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: Config = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the file (if any), apply environment overrides, then validate.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `EVOQ_*` environment variables.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from a variable lookup.
    ///
    /// Unset variables leave fields unchanged; numeric values that fail to
    /// parse are ignored.
    pub fn merge_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("EVOQ_BIND") {
            self.server.address = v;
        }
        if let Some(v) = lookup("EVOQ_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("EVOQ_LOG_FORMAT") {
            self.logging.format = v;
        }
        if let Some(val) = lookup("EVOQ_MAX_CONCURRENT").and_then(|v| v.parse().ok()) {
            self.limits.max_concurrent_simulations = val;
        }
        if let Some(val) = lookup("EVOQ_SIM_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.limits.simulation_timeout_seconds = val;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_address()?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {other}"
                )));
            }
        }

        if !(self.simulation.duration.is_finite() && self.simulation.duration > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "simulation.duration must be positive and finite, got {}",
                self.simulation.duration
            )));
        }
        if self.simulation.num_points < 2 {
            return Err(ConfigError::ValidationError(format!(
                "simulation.num_points must be at least 2, got {}",
                self.simulation.num_points
            )));
        }
        self.simulation
            .solver
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("simulation.solver: {e}")))?;

        if self.limits.max_concurrent_simulations == 0 {
            return Err(ConfigError::ValidationError(
                "max_concurrent_simulations must be greater than 0".to_string(),
            ));
        }
        if self.limits.simulation_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "simulation_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        self.limits
            .check(self.simulation.num_points, &self.simulation.solver)
            .map_err(|e| ConfigError::ValidationError(format!("simulation defaults: {e}")))?;

        Ok(())
    }

    /// Get the parsed bind address.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        self.server.address.parse().map_err(|_| {
            ConfigError::ValidationError(format!("Invalid server address: {}", self.server.address))
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.address, "127.0.0.1:3000");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "console");
        assert_eq!(config.simulation.duration, 10.0);
        assert_eq!(config.simulation.num_points, 100);
        assert_eq!(config.simulation.solver, Solver::dormand_prince());
        assert_eq!(config.limits.max_concurrent_simulations, 4);
        assert_eq!(config.limits.simulation_timeout_seconds, 30);
        assert_eq!(config.limits.max_num_points, 100_000);
        assert_eq!(config.limits.max_substeps, 1_000);
        assert_eq!(config.limits.max_solver_steps, 100_000);
    }

    #[test]
    fn test_limits_check() {
        let limits = ResourceLimits::default();
        assert!(limits.check(100_000, &Solver::rk4(1_000)).is_ok());
        assert!(limits.check(100_001, &Solver::default()).is_err());
        assert!(limits.check(100, &Solver::rk4(1_001)).is_err());

        let greedy = Solver::DormandPrince {
            atol: 1e-10,
            rtol: 1e-8,
            max_steps: 1 << 40,
        };
        assert!(limits.check(100, &greedy).unwrap_err().contains("max_steps"));
    }

    #[test]
    fn test_validate_defaults_beyond_limits() {
        let mut config = Config::default();
        config.simulation.num_points = 500;
        config.limits.max_num_points = 200;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_address() {
        let mut config = Config::default();
        config.server.address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_limits() {
        let mut config = Config::default();
        config.limits.max_concurrent_simulations = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.limits.simulation_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_simulation_parameters() {
        let mut config = Config::default();
        config.simulation.duration = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simulation.num_points = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simulation.solver = Solver::rk4(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address_parsing() {
        let addr = Config::default().bind_address().unwrap();
        assert_eq!(addr.port(), 3000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_merge_vars_overrides_set_fields_only() {
        let config = Config::default().merge_vars(|key| match key {
            "EVOQ_BIND" => Some("0.0.0.0:8080".to_string()),
            "EVOQ_LOG_FORMAT" => Some("json".to_string()),
            "EVOQ_MAX_CONCURRENT" => Some("8".to_string()),
            _ => None,
        });
        assert_eq!(config.server.address, "0.0.0.0:8080");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.limits.max_concurrent_simulations, 8);
        assert_eq!(config.limits.simulation_timeout_seconds, 30);
    }

    #[test]
    fn test_merge_vars_ignores_unparsable_numbers() {
        let config = Config::default().merge_vars(|key| match key {
            "EVOQ_SIM_TIMEOUT" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.limits.simulation_timeout_seconds, 30);
    }

    #[test]
    fn test_from_file_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  address: \"127.0.0.1:4000\"\nsimulation:\n  num_points: 50\n  solver:\n    method: rk4\n    substeps: 20\n"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.address, "127.0.0.1:4000");
        assert_eq!(config.simulation.num_points, 50);
        assert_eq!(config.simulation.duration, 10.0);
        assert_eq!(config.simulation.solver, Solver::rk4(20));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "limits:\n  max_concurrent_simulations: 0\n").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            Config::from_file("/nonexistent/evoq.yaml"),
            Err(ConfigError::IoError(_))
        ));
    }
}
