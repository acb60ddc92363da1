//! Property-based tests for the time grid and energy formatting.

use evoq_sim::{Energy, SimError, TimeGrid, format_energy};
use proptest::prelude::*;

#[test]
fn formats_reference_values() {
    assert_eq!(format_energy(-76.4).unwrap(), "-76.4000 eV");
    assert_eq!(format_energy(0.0).unwrap(), "0.0000 eV");
    assert_eq!(format_energy(1.0).unwrap(), "1.0000 eV");
    assert_eq!(format_energy(0.123456).unwrap(), "0.1235 eV");
}

#[test]
fn refuses_to_format_non_finite_values() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            format_energy(value),
            Err(SimError::NonFiniteEnergy(_))
        ));
    }
}

proptest! {
    #[test]
    fn grid_is_strictly_increasing_and_spans_duration(
        duration in 1e-3f64..1e4,
        num_points in 2usize..2000,
    ) {
        let grid = TimeGrid::linspace(duration, num_points).unwrap();
        let points = grid.points();
        prop_assert_eq!(points.len(), num_points);
        prop_assert_eq!(points[0], 0.0);
        prop_assert_eq!(points[num_points - 1], duration);
        for w in points.windows(2) {
            prop_assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn formatted_energy_has_four_decimals_and_unit(value in -1e6f64..1e6) {
        let text = Energy::new(value).unwrap().to_string();
        let number = text.strip_suffix(" eV").expect("unit suffix");
        let (_, frac) = number.split_once('.').expect("decimal point");
        prop_assert_eq!(frac.len(), 4);
        let parsed: f64 = number.parse().unwrap();
        prop_assert!((parsed - value).abs() <= 5e-5 + 1e-9 * value.abs());
    }
}
