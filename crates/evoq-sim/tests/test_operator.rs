//! Tests for operators, states and the interpolated Hamiltonian.

use evoq_sim::{LinearSchedule, Operator, PauliOp, StateVector, TimeDependentHamiltonian};
use ndarray::Array1;
use num_complex::Complex64;

fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

// ---------------------------------------------------------------------------
// Operator construction
// ---------------------------------------------------------------------------

#[test]
fn xx_swaps_00_and_11() {
    let xx = Operator::pauli_string(&[PauliOp::X, PauliOp::X]);
    assert_eq!(xx.dim(), 4);
    let m = xx.matrix();
    for (r, col) in [(0, 3), (1, 2), (2, 1), (3, 0)] {
        assert_eq!(m[[r, col]], c(1.0));
    }
    assert_eq!(m.iter().filter(|z| z.norm() > 0.0).count(), 4);
}

#[test]
fn zz_is_diag_plus_minus_minus_plus() {
    let zz = Operator::pauli_string(&[PauliOp::Z, PauliOp::Z]);
    let diag: Vec<Complex64> = (0..4).map(|i| zz.matrix()[[i, i]]).collect();
    assert_eq!(diag, vec![c(1.0), c(-1.0), c(-1.0), c(1.0)]);
}

#[test]
fn kron_matches_pauli_string() {
    let x = Operator::pauli(PauliOp::X);
    let z = Operator::pauli(PauliOp::Z);
    assert_eq!(x.kron(&z), Operator::pauli_string(&[PauliOp::X, PauliOp::Z]));
}

#[test]
fn pauli_strings_are_hermitian() {
    for ops in [
        [PauliOp::X, PauliOp::X],
        [PauliOp::Z, PauliOp::Z],
        [PauliOp::Y, PauliOp::X],
        [PauliOp::I, PauliOp::Y],
    ] {
        let op = Operator::pauli_string(&ops);
        assert!(op.is_hermitian(1e-12));
        assert_eq!(op.dagger(), op);
    }
}

#[test]
fn non_hermitian_detected() {
    let mut m = Operator::zeros(2).matrix().clone();
    m[[0, 1]] = Complex64::new(0.0, 1.0);
    m[[1, 0]] = Complex64::new(0.0, 1.0);
    let op = Operator::from_matrix(m).unwrap();
    assert!(!op.is_hermitian(1e-12));
}

#[test]
fn checked_add_rejects_mismatched_dimensions() {
    let x = Operator::pauli(PauliOp::X);
    let zz = Operator::pauli_string(&[PauliOp::Z, PauliOp::Z]);
    assert!(x.checked_add(&zz).is_err());
    let sum = x.checked_add(&Operator::pauli(PauliOp::Z)).unwrap();
    assert_eq!(sum.matrix()[[0, 0]], c(1.0));
    assert_eq!(sum.matrix()[[0, 1]], c(1.0));
}

// ---------------------------------------------------------------------------
// Time-dependent Hamiltonian
// ---------------------------------------------------------------------------

fn adiabatic() -> TimeDependentHamiltonian {
    TimeDependentHamiltonian::new(
        Operator::pauli_string(&[PauliOp::X, PauliOp::X]),
        Operator::pauli_string(&[PauliOp::Z, PauliOp::Z]),
        LinearSchedule::new(10.0).unwrap(),
    )
    .unwrap()
}

#[test]
fn hamiltonian_endpoints() {
    let h = adiabatic();
    assert_eq!(h.at(0.0), *h.initial());
    let end = h.initial().checked_add(h.problem()).unwrap();
    assert_eq!(h.at(10.0), end);
}

#[test]
fn hamiltonian_midpoint_weight() {
    let h = adiabatic();
    let mid = h.at(5.0);
    assert!((mid.matrix()[[0, 0]] - c(0.5)).norm() < 1e-15);
    assert!((mid.matrix()[[1, 1]] - c(-0.5)).norm() < 1e-15);
    assert_eq!(mid.matrix()[[0, 3]], c(1.0));
}

#[test]
fn apply_at_matches_materialised_operator() {
    let h = adiabatic();
    let psi = Array1::from(vec![c(0.5), Complex64::new(0.0, 0.5), c(-0.5), c(0.5)]);
    for t in [0.0, 2.5, 7.0, 10.0] {
        let direct = h.at(t).apply(psi.view());
        let lazy = h.apply_at(t, psi.view());
        for (a, b) in direct.iter().zip(lazy.iter()) {
            assert!((a - b).norm() < 1e-14);
        }
    }
}

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

#[test]
fn zero_pair_expectations() {
    let psi0 = StateVector::basis(2, 0)
        .unwrap()
        .tensor(&StateVector::basis(2, 0).unwrap());
    let zz = Operator::pauli_string(&[PauliOp::Z, PauliOp::Z]);
    let xx = Operator::pauli_string(&[PauliOp::X, PauliOp::X]);
    assert_eq!(psi0.expectation(&zz).unwrap(), c(1.0));
    assert_eq!(psi0.expectation(&xx).unwrap(), c(0.0));
    assert_eq!(psi0.norm(), 1.0);
}

#[test]
fn basis_index_out_of_range() {
    assert!(StateVector::basis(2, 2).is_err());
}

#[test]
fn from_amplitudes_accepts_normalised_superposition() {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let psi = StateVector::from_amplitudes(Array1::from(vec![c(h), Complex64::new(0.0, h)])).unwrap();
    let y = Operator::pauli(PauliOp::Y);
    // |+i⟩ is the +1 eigenstate of σy
    assert!((psi.expectation(&y).unwrap() - c(1.0)).norm() < 1e-12);
}
