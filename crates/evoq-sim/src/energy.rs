//! Energy values and their display format.

use std::fmt;

use serde::Serialize;

use crate::error::{SimError, SimResult};

/// Unit label appended to formatted energies.
pub const ENERGY_UNIT: &str = "eV";

/// A finite energy, displayed with four fractional digits: `-76.4000 eV`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Energy(f64);

impl Energy {
    /// Wrap a value. NaN and infinities are rejected so they can never be
    /// rendered as text.
    pub fn new(value: f64) -> SimResult<Self> {
        if !value.is_finite() {
            return Err(SimError::NonFiniteEnergy(value));
        }
        // -0.0 would otherwise render as "-0.0000".
        Ok(Self(if value == 0.0 { 0.0 } else { value }))
    }

    /// The raw value in eV.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} {ENERGY_UNIT}", self.0)
    }
}

/// Format `value` as `"<value with 4 decimals> eV"`.
pub fn format_energy(value: f64) -> SimResult<String> {
    Energy::new(value).map(|e| e.to_string())
}
