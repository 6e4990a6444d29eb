//! Scalar type and floating-point helpers.

use crate::CfError;

/// Scalar type for all field and geometry arithmetic.
pub type Real = f64;

/// Paired absolute and relative tolerance for float comparisons.
///
/// The defaults suit normalized, order-one quantities; comparisons of
/// larger sums pass a wider pair.
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

/// True when `a` and `b` agree within either tolerance.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass a finite value through, or report which input went bad.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CfError::NonFinite { what, value: v })
    }
}

/// Largest magnitude among three velocity components; the CFL bound pairs
/// this with the sound speed.
#[inline]
pub fn max_abs3(u: Real, v: Real, w: Real) -> Real {
    u.abs().max(v.abs()).max(w.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_uses_both_tolerances() {
        let tol = Tolerances::default();
        // Absolute branch near zero, relative branch at scale.
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(nearly_equal(1e6, 1e6 * (1.0 + 1e-10), tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn non_finite_inputs_are_reported() {
        assert_eq!(ensure_finite(2.5, "dx").unwrap(), 2.5);
        let err = ensure_finite(Real::INFINITY, "dx").unwrap_err();
        assert!(format!("{err}").contains("not finite"));
    }

    #[test]
    fn max_abs3_picks_the_largest_magnitude() {
        assert_eq!(max_abs3(-3.0, 2.0, 1.0), 3.0);
        assert_eq!(max_abs3(0.0, 0.0, -0.5), 0.5);
    }
}
