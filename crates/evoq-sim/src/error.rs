//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while building or integrating an adiabatic evolution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A caller-supplied parameter is out of range (duration, grid size,
    /// solver settings, malformed operator data).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An operator or state does not live in the expected Hilbert space.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension required by the rest of the problem.
        expected: usize,
        /// Dimension actually supplied.
        found: usize,
    },

    /// An operator used as a Hamiltonian or observable is not Hermitian.
    #[error("operator `{0}` is not Hermitian")]
    NotHermitian(&'static str),

    /// The integrator diverged, failed to converge, or produced a
    /// non-finite amplitude.
    #[error("numerical failure at t = {time}: {reason}")]
    NumericalFailure {
        /// Simulation time at which the failure was detected.
        time: f64,
        /// Human-readable description.
        reason: String,
    },

    /// An energy value is NaN or infinite and cannot be reported.
    #[error("energy value {0} is not finite")]
    NonFiniteEnergy(f64),
}

impl SimError {
    pub(crate) fn numerical(time: f64, reason: impl Into<String>) -> Self {
        Self::NumericalFailure {
            time,
            reason: reason.into(),
        }
    }

    /// True for failures of the computation itself, as opposed to bad input.
    pub fn is_numerical_failure(&self) -> bool {
        matches!(self, Self::NumericalFailure { .. } | Self::NonFiniteEnergy(_))
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
