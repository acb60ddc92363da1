//! Evoqution adiabatic time-evolution engine.
//!
//! Simulates a quantum state under the interpolated Hamiltonian
//!
//!   H(t) = H_initial + (t / T) · H_problem
//!
//! by integrating the time-dependent Schrödinger equation across an evenly
//! spaced grid, then reports the expectation value of the problem
//! Hamiltonian at the final time:
//!
//! - **Operators**: dense complex matrices built from Pauli tensor products
//! - **Integrators**: classical RK4 and adaptive Dormand-Prince 5(4)
//! - **Checks**: norm drift, imaginary expectation values and non-finite
//!   amplitudes abort the run instead of producing a number
//!
//! # Quick start
//!
//! ```rust
//! use evoq_sim::evolve_and_measure;
//!
//! // σx⊗σx → σz⊗σz from |00⟩, T = 10, 100 samples
//! let energy = evolve_and_measure(10.0, 100).unwrap();
//! assert_eq!(energy, "1.0000 eV");
//! ```

pub mod energy;
pub mod error;
pub mod evolution;
pub mod grid;
pub mod hamiltonian;
pub mod integrate;
pub mod model;
pub mod operator;
pub mod state;

pub use energy::{ENERGY_UNIT, Energy, format_energy};
pub use error::{SimError, SimResult};
pub use evolution::{AdiabaticEvolution, AdiabaticProblem, EvolutionResult};
pub use grid::TimeGrid;
pub use hamiltonian::{LinearSchedule, TimeDependentHamiltonian};
pub use integrate::Solver;
pub use model::{
    DEFAULT_DURATION, DEFAULT_NUM_POINTS, FixedPairModel, HamiltonianModel, evolve_and_measure,
    run_adiabatic_simulation, simulate_molecule,
};
pub use operator::{Operator, PauliOp};
pub use state::StateVector;
