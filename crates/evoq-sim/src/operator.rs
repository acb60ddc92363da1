//! Dense complex operators.
//!
//! Operators are square `Complex64` matrices over a small Hilbert space.
//! Multi-qubit operators are assembled from single-qubit Paulis with the
//! Kronecker product:
//!
//!   σx ⊗ σx,  σz ⊗ σz, ...
//!
//! # Example
//!
//! ```rust
//! use evoq_sim::operator::{Operator, PauliOp};
//!
//! let zz = Operator::pauli_string(&[PauliOp::Z, PauliOp::Z]);
//! assert_eq!(zz.dim(), 4);
//! assert!(zz.is_hermitian(1e-12));
//! ```

use ndarray::linalg::kron;
use ndarray::{Array1, Array2, ArrayView1, arr2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// The 2×2 matrix of this Pauli in the computational basis.
    pub fn matrix(self) -> Array2<Complex64> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::i();
        match self {
            PauliOp::I => arr2(&[[one, zero], [zero, one]]),
            PauliOp::X => arr2(&[[zero, one], [one, zero]]),
            PauliOp::Y => arr2(&[[zero, -i], [i, zero]]),
            PauliOp::Z => arr2(&[[one, zero], [zero, -one]]),
        }
    }
}

/// A square complex matrix acting on state vectors of length `dim()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    matrix: Array2<Complex64>,
}

impl Operator {
    /// Wrap a raw matrix. Fails if the matrix is empty or not square.
    pub fn from_matrix(matrix: Array2<Complex64>) -> SimResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows == 0 || rows != cols {
            return Err(SimError::InvalidParameter(format!(
                "operator matrix must be square and non-empty, got {rows}x{cols}"
            )));
        }
        Ok(Self { matrix })
    }

    /// Caller guarantees `matrix` is square.
    pub(crate) fn from_square(matrix: Array2<Complex64>) -> Self {
        debug_assert_eq!(matrix.nrows(), matrix.ncols());
        Self { matrix }
    }

    /// Single-qubit Pauli operator.
    pub fn pauli(op: PauliOp) -> Self {
        Self { matrix: op.matrix() }
    }

    /// Tensor product of Paulis, leftmost factor first.
    ///
    /// An empty slice yields the 1×1 identity.
    pub fn pauli_string(ops: &[PauliOp]) -> Self {
        ops.iter()
            .fold(Self::identity(1), |acc, op| acc.kron(&Self::pauli(*op)))
    }

    /// Identity on a `dim`-dimensional space.
    pub fn identity(dim: usize) -> Self {
        Self {
            matrix: Array2::eye(dim),
        }
    }

    /// Zero operator on a `dim`-dimensional space.
    pub fn zeros(dim: usize) -> Self {
        Self {
            matrix: Array2::zeros((dim, dim)),
        }
    }

    /// Hilbert-space dimension.
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Kronecker product `self ⊗ other`.
    #[must_use]
    pub fn kron(&self, other: &Operator) -> Self {
        Self {
            matrix: kron(&self.matrix, &other.matrix),
        }
    }

    /// `factor · self`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            matrix: self.matrix.mapv(|z| z * factor),
        }
    }

    /// `self + other`, checking that both act on the same space.
    pub fn checked_add(&self, other: &Operator) -> SimResult<Self> {
        if self.dim() != other.dim() {
            return Err(SimError::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            });
        }
        Ok(Self {
            matrix: &self.matrix + &other.matrix,
        })
    }

    /// Matrix–vector product `self · psi`.
    pub fn apply(&self, psi: ArrayView1<'_, Complex64>) -> Array1<Complex64> {
        self.matrix.dot(&psi)
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        Self {
            matrix: self.matrix.t().mapv(|z| z.conj()),
        }
    }

    /// True if `self` equals its conjugate transpose element-wise within `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        let n = self.dim();
        (0..n).all(|r| {
            (r..n).all(|c| (self.matrix[[r, c]] - self.matrix[[c, r]].conj()).norm() <= tol)
        })
    }
}
