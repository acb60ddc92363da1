//! Pure-state vectors.

use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::operator::Operator;

/// Allowed deviation from unit norm when a state is constructed from raw
/// amplitudes.
const UNIT_NORM_TOLERANCE: f64 = 1e-9;

/// A unit-norm complex state vector.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Array1<Complex64>,
}

impl StateVector {
    /// Computational basis state `|index⟩` in a `dim`-dimensional space.
    pub fn basis(dim: usize, index: usize) -> SimResult<Self> {
        if index >= dim {
            return Err(SimError::InvalidParameter(format!(
                "basis index {index} out of range for dimension {dim}"
            )));
        }
        let mut amplitudes = Array1::zeros(dim);
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(Self { amplitudes })
    }

    /// `|0...0⟩` on `num_qubits` qubits.
    pub fn zero_state(num_qubits: usize) -> Self {
        let mut amplitudes = Array1::zeros(1 << num_qubits);
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    /// Build a state from raw amplitudes.
    ///
    /// The amplitudes must be finite and already normalised.
    pub fn from_amplitudes(amplitudes: Array1<Complex64>) -> SimResult<Self> {
        if amplitudes.is_empty() {
            return Err(SimError::InvalidParameter(
                "state vector must not be empty".to_string(),
            ));
        }
        let state = Self { amplitudes };
        if !state.is_finite() {
            return Err(SimError::InvalidParameter(
                "state vector contains non-finite amplitudes".to_string(),
            ));
        }
        let norm = state.norm();
        if (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
            return Err(SimError::InvalidParameter(format!(
                "state vector must have unit norm, got {norm}"
            )));
        }
        Ok(state)
    }

    pub(crate) fn from_raw(amplitudes: Array1<Complex64>) -> Self {
        Self { amplitudes }
    }

    /// Tensor product `self ⊗ other`.
    #[must_use]
    pub fn tensor(&self, other: &StateVector) -> Self {
        let amplitudes = self
            .amplitudes
            .iter()
            .flat_map(|a| other.amplitudes.iter().map(move |b| a * b))
            .collect();
        Self { amplitudes }
    }

    /// Hilbert-space dimension.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitudes in the computational basis.
    pub fn amplitudes(&self) -> ArrayView1<'_, Complex64> {
        self.amplitudes.view()
    }

    /// Euclidean norm `‖ψ‖`.
    pub fn norm(&self) -> f64 {
        norm(self.amplitudes.view())
    }

    /// Rescale to unit norm in place.
    ///
    /// Fails on the zero vector or non-finite amplitudes.
    pub fn normalize(&mut self) -> SimResult<()> {
        let norm = self.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "cannot normalise a state with norm {norm}"
            )));
        }
        self.amplitudes.mapv_inplace(|z| z / norm);
        Ok(())
    }

    /// True if every amplitude is finite.
    pub fn is_finite(&self) -> bool {
        self.amplitudes
            .iter()
            .all(|z| z.re.is_finite() && z.im.is_finite())
    }

    /// `⟨ψ|O|ψ⟩`, returned with its imaginary part so callers can check it.
    pub fn expectation(&self, observable: &Operator) -> SimResult<Complex64> {
        if observable.dim() != self.dim() {
            return Err(SimError::DimensionMismatch {
                expected: self.dim(),
                found: observable.dim(),
            });
        }
        Ok(expectation(self.amplitudes.view(), observable))
    }
}

pub(crate) fn norm(psi: ArrayView1<'_, Complex64>) -> f64 {
    psi.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
}

/// `⟨ψ|O|ψ⟩` without dimension checks.
pub(crate) fn expectation(psi: ArrayView1<'_, Complex64>, observable: &Operator) -> Complex64 {
    let o_psi = observable.apply(psi);
    psi.iter().zip(o_psi.iter()).map(|(a, b)| a.conj() * b).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::PauliOp;

    #[test]
    fn test_zero_state_is_first_basis_vector() {
        assert_eq!(StateVector::zero_state(2), StateVector::basis(4, 0).unwrap());
    }

    #[test]
    fn test_tensor_of_basis_states() {
        let one = StateVector::basis(2, 1).unwrap();
        let zero = StateVector::basis(2, 0).unwrap();
        // |1⟩ ⊗ |0⟩ = |10⟩ = index 2
        assert_eq!(one.tensor(&zero), StateVector::basis(4, 2).unwrap());
    }

    #[test]
    fn test_from_amplitudes_rejects_unnormalised() {
        let amps = Array1::from(vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)]);
        assert!(StateVector::from_amplitudes(amps).is_err());
    }

    #[test]
    fn test_normalize_rescales_drifted_state() {
        let mut psi = StateVector::from_raw(Array1::from(vec![
            Complex64::new(3.0, 0.0),
            Complex64::new(0.0, 4.0),
        ]));
        psi.normalize().unwrap();
        assert!((psi.norm() - 1.0).abs() < 1e-15);
        assert!((psi.amplitudes()[1] - Complex64::new(0.0, 0.8)).norm() < 1e-15);

        let mut zero = StateVector::from_raw(Array1::zeros(2));
        assert!(zero.normalize().is_err());
    }

    #[test]
    fn test_expectation_dimension_mismatch() {
        let psi = StateVector::zero_state(1);
        let zz = Operator::pauli_string(&[PauliOp::Z, PauliOp::Z]);
        assert!(matches!(
            psi.expectation(&zz),
            Err(SimError::DimensionMismatch {
                expected: 2,
                found: 4
            })
        ));
    }
}
