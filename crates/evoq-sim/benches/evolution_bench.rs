//! Benchmarks for the adiabatic evolution engine
//!
//! Run with: cargo bench -p evoq-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use evoq_sim::{
    AdiabaticEvolution, AdiabaticProblem, LinearSchedule, Operator, PauliOp, Solver, StateVector,
    TimeDependentHamiltonian,
};
use ndarray::Array1;
use num_complex::Complex64;

/// Benchmark the full default run with each solver
fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("adiabatic_evolution");

    for solver in [Solver::dormand_prince(), Solver::rk4(10)] {
        group.bench_function(solver.name(), |b| {
            b.iter(|| {
                AdiabaticEvolution::new(AdiabaticProblem::two_qubit_default(), 10.0, 100)
                    .with_solver(black_box(solver))
                    .run()
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark how the grid size drives cost
fn bench_grid_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_size");

    for num_points in &[10usize, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("dopri5", num_points),
            num_points,
            |b, &n| {
                b.iter(|| {
                    AdiabaticEvolution::new(AdiabaticProblem::two_qubit_default(), 10.0, n)
                        .run()
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark H(t)·ψ for growing registers
fn bench_hamiltonian_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamiltonian_apply");

    for n_qubits in &[2usize, 4, 6] {
        let xs = vec![PauliOp::X; *n_qubits];
        let zs = vec![PauliOp::Z; *n_qubits];
        let h = TimeDependentHamiltonian::new(
            Operator::pauli_string(&xs),
            Operator::pauli_string(&zs),
            LinearSchedule::new(10.0).unwrap(),
        )
        .unwrap();
        let psi: Array1<Complex64> = StateVector::zero_state(*n_qubits).amplitudes().to_owned();

        group.bench_with_input(BenchmarkId::new("qubits", n_qubits), n_qubits, |b, _| {
            b.iter(|| h.apply_at(black_box(5.0), psi.view()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_solvers,
    bench_grid_size,
    bench_hamiltonian_apply
);
criterion_main!(benches);
