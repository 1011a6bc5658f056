//! Piecewise-linear interpolation over a [`Table`].
//!
//! Queries outside `[x_min, x_max]` clamp to the boundary value. Solvers may
//! overshoot the physical range while iterating, so an out-of-range query is
//! answered rather than rejected. No extrapolation, no smoothing.

use crate::error::{TableError, TableResult};
use crate::table::{LowerBound, Table};
use tracing::trace;
use tt_core::numeric::Real;

/// Interpolate `table` at composition `x`.
///
/// ```text
/// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
/// ```
pub fn interpolate(table: &Table, x: Real) -> TableResult<Real> {
    if !x.is_finite() {
        return Err(TableError::NonFiniteQuery { value: x });
    }

    match table.lower_bound(x) {
        LowerBound::Below => {
            trace!(x, x_min = table.x_min(), "clamping composition to table minimum");
            Ok(table.first().1)
        }
        LowerBound::Above => {
            trace!(x, x_max = table.x_max(), "clamping composition to table maximum");
            Ok(table.last().1)
        }
        LowerBound::At(i) if i + 1 >= table.len() => Ok(table.last().1),
        LowerBound::At(i) => {
            let (x0, y0) = table.points()[i];
            let (x1, y1) = table.points()[i + 1];
            let dx = x1 - x0;
            if dx <= 0.0 {
                return Err(TableError::InternalConsistency {
                    what: "zero-width interpolation bracket",
                });
            }
            Ok(y0 + (y1 - y0) * (x - x0) / dx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_between_knots() {
        let t = Table::new(vec![(0.0, 0.0), (1.0, 10.0)]).unwrap();
        assert_eq!(interpolate(&t, 0.25).unwrap(), 2.5);
        assert_eq!(interpolate(&t, 0.5).unwrap(), 5.0);
    }

    #[test]
    fn clamps_outside_range() {
        let t = Table::new(vec![(0.2, 5.0), (0.8, 9.0)]).unwrap();
        assert_eq!(interpolate(&t, 0.0).unwrap(), 5.0);
        assert_eq!(interpolate(&t, 1.0).unwrap(), 9.0);
        assert_eq!(interpolate(&t, -3.0).unwrap(), 5.0);
        assert_eq!(interpolate(&t, 7.0).unwrap(), 9.0);
    }

    #[test]
    fn exact_at_boundaries() {
        let t = Table::new(vec![(0.2, 5.0), (0.8, 9.0)]).unwrap();
        assert_eq!(interpolate(&t, 0.2).unwrap(), 5.0);
        assert_eq!(interpolate(&t, 0.8).unwrap(), 9.0);
    }

    #[test]
    fn non_monotone_values_follow_segments() {
        let t = Table::new(vec![(0.0, 100.0), (0.5, 150.0), (1.0, 100.0)]).unwrap();
        assert!((interpolate(&t, 0.25).unwrap() - 125.0).abs() < 1e-12);
        assert_eq!(interpolate(&t, 0.5).unwrap(), 150.0);
        assert!((interpolate(&t, 0.9).unwrap() - 110.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_nan_query() {
        let t = Table::new(vec![(0.0, 0.0), (1.0, 10.0)]).unwrap();
        assert!(matches!(
            interpolate(&t, f64::NAN),
            Err(TableError::NonFiniteQuery { .. })
        ));
        assert!(interpolate(&t, f64::NEG_INFINITY).is_err());
    }
}
