use crate::WfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
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
    if a == b {
        // also covers matching infinities
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, WfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(WfError::NonFinite { what, value: v })
    }
}

/// Finite and not negative.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, WfError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(WfError::Negative { what, value: v });
    }
    Ok(v)
}

pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, WfError> {
    let v = ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(WfError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

/// `num / den` when `den > 0`, otherwise zero.
#[inline]
pub fn ratio_or_zero(num: Real, den: Real) -> Real {
    if den > 0.0 { num / den } else { 0.0 }
}

/// Multiplier left after removing `pct` percent, e.g. 20 -> 0.8.
#[inline]
pub fn reduction_factor(pct: Real) -> Real {
    1.0 - pct / 100.0
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
        assert!(nearly_equal(Real::INFINITY, Real::INFINITY, tol));
        assert!(!nearly_equal(Real::INFINITY, 1e300, tol));
    }

    #[test]
    fn infinity_only_matches_itself() {
        let tol = Tolerances::default();
        assert!(!nearly_equal(Real::INFINITY, 5.0, tol));
        assert!(!nearly_equal(5.0, Real::INFINITY, tol));
        assert!(!nearly_equal(Real::NEG_INFINITY, Real::INFINITY, tol));
        assert!(!nearly_equal(Real::NAN, Real::NAN, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert_eq!(ensure_non_negative(0.0, "x"), Ok(0.0));
        assert!(matches!(
            ensure_non_negative(-1.0, "x"),
            Err(WfError::Negative { what: "x", .. })
        ));
        assert!(ensure_non_negative(Real::INFINITY, "x").is_err());
    }

    #[test]
    fn ensure_in_range_bounds_are_inclusive() {
        assert!(ensure_in_range(0.0, 0.0, 100.0, "pct").is_ok());
        assert!(ensure_in_range(100.0, 0.0, 100.0, "pct").is_ok());
        let err = ensure_in_range(120.0, 0.0, 100.0, "pct").unwrap_err();
        assert!(err.to_string().contains("pct"));
    }

    #[test]
    fn ratio_or_zero_guards_denominator() {
        assert_eq!(ratio_or_zero(3.0, 2.0), 1.5);
        assert_eq!(ratio_or_zero(3.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(3.0, -1.0), 0.0);
    }

    #[test]
    fn reduction_factor_identity_at_zero() {
        assert_eq!(reduction_factor(0.0), 1.0);
        assert_eq!(reduction_factor(100.0), 0.0);
        assert!(nearly_equal(reduction_factor(25.0), 0.75, Tolerances::default()));
    }
}
