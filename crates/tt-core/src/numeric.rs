use crate::TtError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TtError::NonFinite { what, value: v })
    }
}

/// Ensure `v` is finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, TtError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(TtError::OutOfRange {
            what,
            value: v,
            min: 0.0,
            max: Real::INFINITY,
        })
    }
}

/// Ensure `v` lies in the closed unit interval `[0, 1]`.
pub fn ensure_unit_interval(v: Real, what: &'static str) -> Result<Real, TtError> {
    let v = ensure_finite(v, what)?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(TtError::OutOfRange {
            what,
            value: v,
            min: 0.0,
            max: 1.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn unit_interval_bounds_are_inclusive() {
        assert_eq!(ensure_unit_interval(0.0, "x").unwrap(), 0.0);
        assert_eq!(ensure_unit_interval(1.0, "x").unwrap(), 1.0);
        assert!(matches!(
            ensure_unit_interval(1.0 + 1e-9, "x"),
            Err(TtError::OutOfRange { .. })
        ));
        assert!(matches!(
            ensure_unit_interval(-0.1, "x"),
            Err(TtError::OutOfRange { .. })
        ));
        assert!(matches!(
            ensure_unit_interval(Real::INFINITY, "x"),
            Err(TtError::NonFinite { .. })
        ));
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(ensure_positive(1e-30, "rho").is_ok());
        assert!(ensure_positive(0.0, "rho").is_err());
        assert!(ensure_positive(-1.0, "rho").is_err());
    }
}
