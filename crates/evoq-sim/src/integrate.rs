//! Runge-Kutta integrators for the time-dependent Schrödinger equation.
//!
//!   i dψ/dt = H(t) ψ   ⇔   dψ/dt = -i H(t) ψ
//!
//! # Classical RK4
//!
//! Fixed step, `substeps` equal slices per grid interval. Local error
//! O(dt⁵).
//!
//! # Dormand-Prince 5(4)
//!
//! Embedded pair with local extrapolation: the fifth-order solution is
//! propagated, the difference to the fourth-order solution drives the step
//! size. Every grid point is hit exactly; the last accepted step size is
//! carried over to the next interval.

use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::TimeDependentHamiltonian;

/// Default absolute tolerance for [`Solver::DormandPrince`].
pub const DEFAULT_ATOL: f64 = 1e-10;
/// Default relative tolerance for [`Solver::DormandPrince`].
pub const DEFAULT_RTOL: f64 = 1e-8;
/// Default step budget per grid interval for [`Solver::DormandPrince`].
pub const DEFAULT_MAX_STEPS: usize = 10_000;
/// Default number of RK4 sub-steps per grid interval.
pub const DEFAULT_RK4_SUBSTEPS: usize = 10;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;
const CLIP_SLACK: f64 = 0.01;

/// Integration method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Solver {
    /// Fixed-step classical Runge-Kutta.
    Rk4 {
        /// Equal sub-steps per grid interval (≥ 1).
        substeps: usize,
    },
    /// Adaptive Dormand-Prince 5(4).
    DormandPrince {
        /// Absolute tolerance per amplitude.
        atol: f64,
        /// Relative tolerance per amplitude.
        rtol: f64,
        /// Maximum attempted steps per grid interval.
        max_steps: usize,
    },
}

impl Default for Solver {
    fn default() -> Self {
        Self::dormand_prince()
    }
}

impl Solver {
    /// RK4 with the given number of sub-steps per interval.
    pub fn rk4(substeps: usize) -> Self {
        Self::Rk4 { substeps }
    }

    /// Dormand-Prince with default tolerances.
    pub fn dormand_prince() -> Self {
        Self::DormandPrince {
            atol: DEFAULT_ATOL,
            rtol: DEFAULT_RTOL,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Short identifier used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rk4 { .. } => "rk4",
            Self::DormandPrince { .. } => "dopri5",
        }
    }

    /// Check solver settings before integrating.
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            Self::Rk4 { substeps } => {
                if substeps == 0 {
                    return Err(SimError::InvalidParameter(
                        "rk4 substeps must be at least 1".to_string(),
                    ));
                }
            }
            Self::DormandPrince {
                atol,
                rtol,
                max_steps,
            } => {
                let valid = |tol: f64| tol.is_finite() && tol >= 0.0;
                if !valid(atol) || !valid(rtol) || atol + rtol <= 0.0 {
                    return Err(SimError::InvalidParameter(format!(
                        "dopri5 tolerances must be non-negative and not both zero (atol={atol}, rtol={rtol})"
                    )));
                }
                if max_steps == 0 {
                    return Err(SimError::InvalidParameter(
                        "dopri5 max_steps must be at least 1".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Stateful propagator for one evolution run.
pub(crate) struct Propagator<'a> {
    solver: Solver,
    hamiltonian: &'a TimeDependentHamiltonian,
    /// Step size carried across intervals (adaptive solver only).
    step: Option<f64>,
    /// Accepted steps so far.
    pub(crate) accepted: usize,
    /// Rejected steps so far.
    pub(crate) rejected: usize,
}

impl<'a> Propagator<'a> {
    pub(crate) fn new(solver: Solver, hamiltonian: &'a TimeDependentHamiltonian) -> Self {
        Self {
            solver,
            hamiltonian,
            step: None,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Advance `psi` from `t0` to `t1`.
    pub(crate) fn advance(&mut self, psi: &mut Array1<Complex64>, t0: f64, t1: f64) -> SimResult<()> {
        match self.solver {
            Solver::Rk4 { substeps } => self.advance_rk4(psi, t0, t1, substeps),
            Solver::DormandPrince {
                atol,
                rtol,
                max_steps,
            } => self.advance_dopri(psi, t0, t1, atol, rtol, max_steps),
        }
    }

    fn advance_rk4(
        &mut self,
        psi: &mut Array1<Complex64>,
        t0: f64,
        t1: f64,
        substeps: usize,
    ) -> SimResult<()> {
        let dt = (t1 - t0) / substeps as f64;
        for k in 0..substeps {
            let t = t0 + k as f64 * dt;
            *psi = rk4_step(self.hamiltonian, t, psi.view(), dt);
            self.accepted += 1;
        }
        if !all_finite(psi.view()) {
            return Err(SimError::numerical(t1, "rk4 produced non-finite amplitudes"));
        }
        Ok(())
    }

    fn advance_dopri(
        &mut self,
        psi: &mut Array1<Complex64>,
        t0: f64,
        t1: f64,
        atol: f64,
        rtol: f64,
        max_steps: usize,
    ) -> SimResult<()> {
        let mut t = t0;
        let mut h = self.step.unwrap_or(t1 - t0);
        let mut attempts = 0usize;

        while t < t1 {
            if attempts >= max_steps {
                return Err(SimError::numerical(
                    t,
                    format!("dopri5 exceeded {max_steps} steps in interval [{t0}, {t1}]"),
                ));
            }
            attempts += 1;

            // Only a step that no longer moves t is too small.
            if h <= 0.0 || t + h <= t {
                return Err(SimError::numerical(t, "dopri5 step size underflow"));
            }
            // Stretch the step to the grid point rather than leave a sliver.
            let remaining = t1 - t;
            let clipped = remaining - h < CLIP_SLACK * h;
            let dt = if clipped { remaining } else { h };

            let (next, err) = dopri_step(self.hamiltonian, t, psi.view(), dt, atol, rtol);
            if !err.is_finite() || !all_finite(next.view()) {
                return Err(SimError::numerical(
                    t,
                    "dopri5 produced non-finite amplitudes",
                ));
            }

            let factor = if err == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * err.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
            };

            if err <= 1.0 {
                t = if clipped { t1 } else { t + dt };
                *psi = next;
                self.accepted += 1;
                // A step clipped to the grid says nothing about the natural
                // step size; keep the larger one.
                h = if clipped { h.max(dt * factor) } else { dt * factor };
            } else {
                self.rejected += 1;
                trace!(t, dt, err, "dopri5 step rejected");
                h = dt * factor.min(1.0);
            }
        }

        self.step = Some(h);
        Ok(())
    }
}

/// dψ/dt = -i H(t) ψ
fn rhs(h: &TimeDependentHamiltonian, t: f64, psi: ArrayView1<'_, Complex64>) -> Array1<Complex64> {
    h.apply_at(t, psi).mapv_into(|z| Complex64::new(z.im, -z.re))
}

/// `psi + Σ_j c_j · k_j`
fn combine(psi: ArrayView1<'_, Complex64>, terms: &[(f64, &Array1<Complex64>)]) -> Array1<Complex64> {
    let mut out = psi.to_owned();
    for (c, k) in terms {
        if *c != 0.0 {
            out.scaled_add(Complex64::new(*c, 0.0), *k);
        }
    }
    out
}

fn rk4_step(
    h: &TimeDependentHamiltonian,
    t: f64,
    psi: ArrayView1<'_, Complex64>,
    dt: f64,
) -> Array1<Complex64> {
    let half = 0.5 * dt;
    let k1 = rhs(h, t, psi);
    let k2 = rhs(h, t + half, combine(psi, &[(half, &k1)]).view());
    let k3 = rhs(h, t + half, combine(psi, &[(half, &k2)]).view());
    let k4 = rhs(h, t + dt, combine(psi, &[(dt, &k3)]).view());
    let sixth = dt / 6.0;
    combine(
        psi,
        &[(sixth, &k1), (2.0 * sixth, &k2), (2.0 * sixth, &k3), (sixth, &k4)],
    )
}

// Dormand-Prince 5(4) tableau.
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights (also row 7 of the tableau, FSAL).
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Fifth minus fourth order weights.
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

/// One Dormand-Prince step. Returns the fifth-order solution and the
/// scaled RMS error norm (≤ 1 means accept).
fn dopri_step(
    h: &TimeDependentHamiltonian,
    t: f64,
    psi: ArrayView1<'_, Complex64>,
    dt: f64,
    atol: f64,
    rtol: f64,
) -> (Array1<Complex64>, f64) {
    let k1 = rhs(h, t, psi);
    let k2 = rhs(h, t + C2 * dt, combine(psi, &[(dt * A21, &k1)]).view());
    let k3 = rhs(
        h,
        t + C3 * dt,
        combine(psi, &[(dt * A31, &k1), (dt * A32, &k2)]).view(),
    );
    let k4 = rhs(
        h,
        t + C4 * dt,
        combine(psi, &[(dt * A41, &k1), (dt * A42, &k2), (dt * A43, &k3)]).view(),
    );
    let k5 = rhs(
        h,
        t + C5 * dt,
        combine(
            psi,
            &[
                (dt * A51, &k1),
                (dt * A52, &k2),
                (dt * A53, &k3),
                (dt * A54, &k4),
            ],
        )
        .view(),
    );
    let k6 = rhs(
        h,
        t + dt,
        combine(
            psi,
            &[
                (dt * A61, &k1),
                (dt * A62, &k2),
                (dt * A63, &k3),
                (dt * A64, &k4),
                (dt * A65, &k5),
            ],
        )
        .view(),
    );
    let next = combine(
        psi,
        &[
            (dt * B1, &k1),
            (dt * B3, &k3),
            (dt * B4, &k4),
            (dt * B5, &k5),
            (dt * B6, &k6),
        ],
    );
    let k7 = rhs(h, t + dt, next.view());

    let zero = Array1::zeros(psi.len());
    let err = combine(
        zero.view(),
        &[
            (dt * E1, &k1),
            (dt * E3, &k3),
            (dt * E4, &k4),
            (dt * E5, &k5),
            (dt * E6, &k6),
            (dt * E7, &k7),
        ],
    );

    let sum_sq: f64 = err
        .iter()
        .zip(psi.iter().zip(next.iter()))
        .map(|(e, (y0, y1))| {
            let scale = atol + rtol * y0.norm().max(y1.norm());
            (e.norm() / scale).powi(2)
        })
        .sum();
    let err_norm = (sum_sq / psi.len() as f64).sqrt();

    (next, err_norm)
}

fn all_finite(psi: ArrayView1<'_, Complex64>) -> bool {
    psi.iter().all(|z| z.re.is_finite() && z.im.is_finite())
}
