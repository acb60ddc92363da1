//! Evenly spaced time grids.

use crate::error::{SimError, SimResult};

/// Sample points at which the evolution reports its state.
///
/// Invariants: at least two points, strictly increasing, first point is
/// exactly 0 and last point is exactly the duration.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    /// `num_points` evenly spaced values on `[0, duration]`, both ends included.
    pub fn linspace(duration: f64, num_points: usize) -> SimResult<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "duration must be positive and finite, got {duration}"
            )));
        }
        if num_points < 2 {
            return Err(SimError::InvalidParameter(format!(
                "num_points must be at least 2, got {num_points}"
            )));
        }

        let last = num_points - 1;
        let step = duration / last as f64;
        let mut points = sample_buffer(num_points)?;
        points.extend((0..num_points).map(|k| if k == last { duration } else { k as f64 * step }));

        if points.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SimError::InvalidParameter(format!(
                "{num_points} points do not resolve a duration of {duration}"
            )));
        }
        Ok(Self { points })
    }

    /// All sample points.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a grid holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Final time.
    pub fn duration(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Consume the grid, returning its points.
    pub fn into_points(self) -> Vec<f64> {
        self.points
    }

    /// Consecutive `(t_k, t_{k+1})` pairs.
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Empty vector with room for `len` per-point samples.
///
/// Reservation failure is reported instead of aborting the process.
pub(crate) fn sample_buffer<T>(len: usize) -> SimResult<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        SimError::InvalidParameter(format!("cannot allocate {len} time points: {e}"))
    })?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_shape() {
        let grid = TimeGrid::linspace(10.0, 100).unwrap();
        assert_eq!(grid.len(), 100);
        assert_eq!(grid.points()[0], 0.0);
        assert_eq!(grid.duration(), 10.0);
        assert_eq!(grid.intervals().count(), 99);
    }

    #[test]
    fn test_two_point_grid() {
        let grid = TimeGrid::linspace(3.0, 2).unwrap();
        assert_eq!(grid.points(), &[0.0, 3.0]);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(TimeGrid::linspace(0.0, 10).is_err());
        assert!(TimeGrid::linspace(-2.0, 10).is_err());
        assert!(TimeGrid::linspace(f64::NAN, 10).is_err());
        assert!(TimeGrid::linspace(1.0, 1).is_err());
        assert!(TimeGrid::linspace(1.0, 0).is_err());
    }

    #[test]
    fn test_unallocatable_grid_is_an_error() {
        let err = TimeGrid::linspace(10.0, 1usize << 58).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter(_)), "{err}");

        let err = TimeGrid::linspace(10.0, usize::MAX).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter(_)), "{err}");
    }
}
