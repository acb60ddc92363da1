//! Time-dependent Hamiltonians.
//!
//! The adiabatic Hamiltonian interpolates between an easy initial operator
//! and a problem operator:
//!
//!   H(t) = H_initial + s(t) · H_problem,   s(t) = t / T
//!
//! so that H(0) = H_initial and H(T) = H_initial + H_problem.
//!
//! # Example
//!
//! ```rust
//! use evoq_sim::hamiltonian::{LinearSchedule, TimeDependentHamiltonian};
//! use evoq_sim::operator::{Operator, PauliOp};
//!
//! let h = TimeDependentHamiltonian::new(
//!     Operator::pauli_string(&[PauliOp::X, PauliOp::X]),
//!     Operator::pauli_string(&[PauliOp::Z, PauliOp::Z]),
//!     LinearSchedule::new(10.0).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(h.at(0.0), Operator::pauli_string(&[PauliOp::X, PauliOp::X]));
//! ```

use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::operator::Operator;

/// Linear ramp `s(t) = t / T`, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSchedule {
    duration: f64,
}

impl LinearSchedule {
    /// Create a ramp over `duration` time units.
    pub fn new(duration: f64) -> SimResult<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "duration must be positive and finite, got {duration}"
            )));
        }
        Ok(Self { duration })
    }

    /// Total evolution time T.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Interpolation weight at time `t`.
    pub fn s(&self, t: f64) -> f64 {
        (t / self.duration).clamp(0.0, 1.0)
    }
}

/// `H(t) = H_initial + s(t) · H_problem`.
#[derive(Debug, Clone)]
pub struct TimeDependentHamiltonian {
    initial: Operator,
    problem: Operator,
    schedule: LinearSchedule,
}

impl TimeDependentHamiltonian {
    /// Combine two operators of equal dimension under a linear schedule.
    pub fn new(initial: Operator, problem: Operator, schedule: LinearSchedule) -> SimResult<Self> {
        if initial.dim() != problem.dim() {
            return Err(SimError::DimensionMismatch {
                expected: initial.dim(),
                found: problem.dim(),
            });
        }
        Ok(Self {
            initial,
            problem,
            schedule,
        })
    }

    /// Hilbert-space dimension.
    pub fn dim(&self) -> usize {
        self.initial.dim()
    }

    /// The operator at s = 0.
    pub fn initial(&self) -> &Operator {
        &self.initial
    }

    /// The operator switched on by the ramp.
    pub fn problem(&self) -> &Operator {
        &self.problem
    }

    /// The interpolation schedule.
    pub fn schedule(&self) -> &LinearSchedule {
        &self.schedule
    }

    /// Materialise H(t).
    pub fn at(&self, t: f64) -> Operator {
        let mut matrix = self.initial.matrix().clone();
        matrix.scaled_add(Complex64::new(self.schedule.s(t), 0.0), self.problem.matrix());
        Operator::from_square(matrix)
    }

    /// H(t) · ψ, without building the summed matrix.
    pub fn apply_at(&self, t: f64, psi: ArrayView1<'_, Complex64>) -> Array1<Complex64> {
        let mut out = self.initial.apply(psi);
        let s = self.schedule.s(t);
        if s != 0.0 {
            out.scaled_add(Complex64::new(s, 0.0), &self.problem.apply(psi));
        }
        out
    }
}
