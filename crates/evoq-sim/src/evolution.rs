//! Adiabatic evolution driver.
//!
//! Integrates `i dψ/dt = H(t) ψ` across a [`TimeGrid`] and records the
//! expectation value of an observable at every grid point.
//!
//! # Example
//!
//! ```rust
//! use evoq_sim::evolution::{AdiabaticEvolution, AdiabaticProblem};
//!
//! let result = AdiabaticEvolution::new(AdiabaticProblem::two_qubit_default(), 10.0, 100)
//!     .run()
//!     .unwrap();
//! assert_eq!(result.times().len(), 100);
//! assert!((result.final_energy() - 1.0).abs() < 1e-4);
//! ```

use ndarray::Array1;
use num_complex::Complex64;
use tracing::debug;

use crate::energy::Energy;
use crate::error::{SimError, SimResult};
use crate::grid::{TimeGrid, sample_buffer};
use crate::hamiltonian::{LinearSchedule, TimeDependentHamiltonian};
use crate::integrate::{Propagator, Solver};
use crate::operator::{Operator, PauliOp};
use crate::state::{self, StateVector};

/// Largest tolerated deviation of `‖ψ(t)‖` from 1 at any grid point.
pub const NORM_TOLERANCE: f64 = 1e-6;
/// Largest tolerated `|Im ⟨ψ|O|ψ⟩|` at any grid point.
pub const IMAGINARY_TOLERANCE: f64 = 1e-8;
/// Tolerance used when checking operators for Hermiticity.
pub const HERMITIAN_TOLERANCE: f64 = 1e-12;

/// The operators and initial state of one adiabatic run.
#[derive(Debug, Clone)]
pub struct AdiabaticProblem {
    initial: Operator,
    problem: Operator,
    observable: Operator,
    psi0: StateVector,
}

impl AdiabaticProblem {
    /// Assemble a problem, checking dimensions and Hermiticity.
    pub fn new(
        initial: Operator,
        problem: Operator,
        observable: Operator,
        psi0: StateVector,
    ) -> SimResult<Self> {
        let dim = psi0.dim();
        for op in [&initial, &problem, &observable] {
            if op.dim() != dim {
                return Err(SimError::DimensionMismatch {
                    expected: dim,
                    found: op.dim(),
                });
            }
        }
        if !initial.is_hermitian(HERMITIAN_TOLERANCE) {
            return Err(SimError::NotHermitian("initial"));
        }
        if !problem.is_hermitian(HERMITIAN_TOLERANCE) {
            return Err(SimError::NotHermitian("problem"));
        }
        if !observable.is_hermitian(HERMITIAN_TOLERANCE) {
            return Err(SimError::NotHermitian("observable"));
        }
        Ok(Self {
            initial,
            problem,
            observable,
            psi0,
        })
    }

    /// `H_initial = σx⊗σx`, `H_problem = σz⊗σz`, observable `H_problem`,
    /// `ψ0 = |0⟩⊗|0⟩`.
    pub fn two_qubit_default() -> Self {
        let problem = Operator::pauli_string(&[PauliOp::Z, PauliOp::Z]);
        Self {
            initial: Operator::pauli_string(&[PauliOp::X, PauliOp::X]),
            observable: problem.clone(),
            problem,
            psi0: StateVector::zero_state(1).tensor(&StateVector::zero_state(1)),
        }
    }

    /// Hamiltonian at s = 0.
    pub fn initial(&self) -> &Operator {
        &self.initial
    }

    /// Hamiltonian switched on by the ramp.
    pub fn problem(&self) -> &Operator {
        &self.problem
    }

    /// Operator whose expectation value is recorded.
    pub fn observable(&self) -> &Operator {
        &self.observable
    }

    /// State at t = 0.
    pub fn psi0(&self) -> &StateVector {
        &self.psi0
    }
}

/// Configured evolution run.
#[derive(Debug, Clone)]
pub struct AdiabaticEvolution {
    problem: AdiabaticProblem,
    duration: f64,
    num_points: usize,
    solver: Solver,
}

impl AdiabaticEvolution {
    /// Evolve `problem` over `[0, duration]`, sampling `num_points` times.
    pub fn new(problem: AdiabaticProblem, duration: f64, num_points: usize) -> Self {
        Self {
            problem,
            duration,
            num_points,
            solver: Solver::default(),
        }
    }

    /// Override the integration method.
    #[must_use]
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    /// The problem being evolved.
    pub fn problem(&self) -> &AdiabaticProblem {
        &self.problem
    }

    /// Integrate and collect the expectation-value trace.
    ///
    /// Parameters are validated before any integration happens. A
    /// non-finite amplitude, norm drift beyond [`NORM_TOLERANCE`] or a
    /// complex expectation beyond [`IMAGINARY_TOLERANCE`] aborts the run
    /// with [`SimError::NumericalFailure`].
    pub fn run(&self) -> SimResult<EvolutionResult> {
        let grid = TimeGrid::linspace(self.duration, self.num_points)?;
        self.solver.validate()?;
        let schedule = LinearSchedule::new(self.duration)?;
        let hamiltonian = TimeDependentHamiltonian::new(
            self.problem.initial.clone(),
            self.problem.problem.clone(),
            schedule,
        )?;

        debug!(
            dim = hamiltonian.dim(),
            duration = self.duration,
            num_points = self.num_points,
            solver = self.solver.name(),
            "starting adiabatic evolution"
        );

        let mut psi: Array1<Complex64> = self.problem.psi0.amplitudes().to_owned();
        let mut expectations = sample_buffer(grid.len())?;
        let mut norms = sample_buffer(grid.len())?;
        self.record(0.0, &psi, &mut expectations, &mut norms)?;

        let mut propagator = Propagator::new(self.solver, &hamiltonian);
        for (t0, t1) in grid.intervals() {
            propagator.advance(&mut psi, t0, t1)?;
            self.record(t1, &psi, &mut expectations, &mut norms)?;
        }

        debug!(
            accepted = propagator.accepted,
            rejected = propagator.rejected,
            "adiabatic evolution finished"
        );

        Ok(EvolutionResult {
            times: grid.into_points(),
            expectations,
            norms,
            final_state: StateVector::from_raw(psi),
            accepted_steps: propagator.accepted,
            rejected_steps: propagator.rejected,
        })
    }

    fn record(
        &self,
        t: f64,
        psi: &Array1<Complex64>,
        expectations: &mut Vec<Complex64>,
        norms: &mut Vec<f64>,
    ) -> SimResult<()> {
        let norm = state::norm(psi.view());
        if !norm.is_finite() {
            return Err(SimError::numerical(t, "state norm is not finite"));
        }
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimError::numerical(
                t,
                format!("norm drifted to {norm}"),
            ));
        }
        let value = state::expectation(psi.view(), &self.problem.observable);
        if !value.re.is_finite() || !value.im.is_finite() {
            return Err(SimError::numerical(t, "expectation value is not finite"));
        }
        if value.im.abs() > IMAGINARY_TOLERANCE {
            return Err(SimError::numerical(
                t,
                format!("expectation value has imaginary part {}", value.im),
            ));
        }
        expectations.push(value);
        norms.push(norm);
        Ok(())
    }
}

/// Output of [`AdiabaticEvolution::run`].
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    times: Vec<f64>,
    expectations: Vec<Complex64>,
    norms: Vec<f64>,
    final_state: StateVector,
    accepted_steps: usize,
    rejected_steps: usize,
}

impl EvolutionResult {
    /// Grid points.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// `⟨ψ(t)|O|ψ(t)⟩` at every grid point.
    pub fn expectations(&self) -> &[Complex64] {
        &self.expectations
    }

    /// `‖ψ(t)‖` at every grid point.
    pub fn norms(&self) -> &[f64] {
        &self.norms
    }

    /// State at the final grid point.
    pub fn final_state(&self) -> &StateVector {
        &self.final_state
    }

    /// Real part of the last expectation value.
    pub fn final_energy(&self) -> f64 {
        self.expectations.last().map_or(f64::NAN, |z| z.re)
    }

    /// The final value as a reportable [`Energy`].
    pub fn energy(&self) -> SimResult<Energy> {
        Energy::new(self.final_energy())
    }

    /// Largest `|Im ⟨O⟩|` over the trace.
    pub fn max_imaginary(&self) -> f64 {
        self.expectations
            .iter()
            .map(|z| z.im.abs())
            .fold(0.0, f64::max)
    }

    /// Largest `|‖ψ‖ - 1|` over the trace.
    pub fn max_norm_drift(&self) -> f64 {
        self.norms
            .iter()
            .map(|n| (n - 1.0).abs())
            .fold(0.0, f64::max)
    }

    /// Integrator steps accepted.
    pub fn accepted_steps(&self) -> usize {
        self.accepted_steps
    }

    /// Integrator steps rejected (adaptive solver only).
    pub fn rejected_steps(&self) -> usize {
        self.rejected_steps
    }
}
