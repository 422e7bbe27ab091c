//! Membership degrees and piecewise-linear membership functions
//!
//! A `Degree` is a truth value in `[0, 1]`. A `MembershipFunction` maps any
//! real input to a `Degree`; only the triangular and trapezoidal shapes the
//! rule bases use are provided. Control points are validated at
//! construction, so evaluation is total and never divides by zero.

use serde::Serialize;

use crate::error::{FisError, FisResult};

// ============================================================================
// Degree
// ============================================================================

/// A fuzzy truth value in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Degree(f64);

impl Degree {
    /// The empty degree
    pub const ZERO: Degree = Degree(0.0);
    /// Full membership
    pub const ONE: Degree = Degree(1.0);

    /// Create a degree, clamping against floating-point overshoot
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// The raw value
    pub fn value(self) -> f64 {
        self.0
    }

    /// Fuzzy NOT (complement)
    pub fn not(self) -> Self {
        Self::new(1.0 - self.0)
    }

    /// Fuzzy AND (t-norm) - minimum
    pub fn and(self, other: Self) -> Self {
        Self::new(self.0.min(other.0))
    }

    /// Fuzzy OR (t-conorm) - maximum
    pub fn or(self, other: Self) -> Self {
        Self::new(self.0.max(other.0))
    }

    /// Algebraic product t-norm
    pub fn product(self, other: Self) -> Self {
        Self::new(self.0 * other.0)
    }

    /// Probabilistic sum t-conorm
    pub fn probabilistic_sum(self, other: Self) -> Self {
        Self::new(self.0 + other.0 - self.0 * other.0)
    }
}

impl From<f64> for Degree {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

// ============================================================================
// Membership functions
// ============================================================================

/// A piecewise-linear membership function
///
/// Evaluable at any real `x`, not just grid points. Degenerate ramps
/// (equal neighboring control points) behave as steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MembershipFunction {
    /// Triangular `(a, b, c)`: zero outside `[a, c]`, peak 1 at `b`
    Triangular { a: f64, b: f64, c: f64 },
    /// Trapezoidal `(a, b, c, d)`: zero outside `[a, d]`, plateau 1 on `[b, c]`
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Create a triangular membership function; requires `a <= b <= c`
    pub fn triangular(a: f64, b: f64, c: f64) -> FisResult<Self> {
        if ![a, b, c].iter().all(|v| v.is_finite()) {
            return Err(FisError::invalid_definition(format!(
                "triangular control points must be finite, got ({}, {}, {})",
                a, b, c
            )));
        }
        if !(a <= b && b <= c) {
            return Err(FisError::invalid_definition(format!(
                "triangular control points must satisfy a <= b <= c, got ({}, {}, {})",
                a, b, c
            )));
        }
        Ok(Self::Triangular { a, b, c })
    }

    /// Create a trapezoidal membership function; requires `a <= b <= c <= d`
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> FisResult<Self> {
        if ![a, b, c, d].iter().all(|v| v.is_finite()) {
            return Err(FisError::invalid_definition(format!(
                "trapezoidal control points must be finite, got ({}, {}, {}, {})",
                a, b, c, d
            )));
        }
        if !(a <= b && b <= c && c <= d) {
            return Err(FisError::invalid_definition(format!(
                "trapezoidal control points must satisfy a <= b <= c <= d, got ({}, {}, {}, {})",
                a, b, c, d
            )));
        }
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Evaluate membership for a crisp value
    pub fn evaluate(&self, x: f64) -> Degree {
        let result = match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x == b {
                    1.0
                } else if x < b {
                    // a <= x < b, so b > a
                    (x - a) / (b - a)
                } else {
                    // b < x <= c, so c > b
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x >= b && x <= c {
                    1.0
                } else if x < b {
                    // a <= x < b, so b > a
                    (x - a) / (b - a)
                } else {
                    // c < x <= d, so d > c
                    (d - x) / (d - c)
                }
            }
        };

        Degree::new(result)
    }

    /// The interval where membership is nonzero (closure thereof)
    pub fn support(&self) -> (f64, f64) {
        match *self {
            MembershipFunction::Triangular { a, c, .. } => (a, c),
            MembershipFunction::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// The interval where membership is 1
    pub fn core(&self) -> (f64, f64) {
        match *self {
            MembershipFunction::Triangular { b, .. } => (b, b),
            MembershipFunction::Trapezoidal { b, c, .. } => (b, c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_degree_operations() {
        let a = Degree::new(0.6);
        let b = Degree::new(0.4);

        assert!(close(a.and(b).value(), 0.4));
        assert!(close(a.or(b).value(), 0.6));
        assert!(close(a.not().value(), 0.4));
        assert!(close(a.product(b).value(), 0.24));
        assert!(close(a.probabilistic_sum(b).value(), 0.76));
    }

    #[test]
    fn test_degree_clamps() {
        assert_eq!(Degree::new(1.5).value(), 1.0);
        assert_eq!(Degree::new(-0.5).value(), 0.0);
    }

    #[test]
    fn test_triangular_shape() {
        let mf = MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap();

        assert_eq!(mf.evaluate(0.0).value(), 0.0);
        assert_eq!(mf.evaluate(5.0).value(), 1.0);
        assert_eq!(mf.evaluate(10.0).value(), 0.0);
        assert!(close(mf.evaluate(2.5).value(), 0.5));
        assert!(close(mf.evaluate(7.5).value(), 0.5));
        assert_eq!(mf.evaluate(-1.0).value(), 0.0);
        assert_eq!(mf.evaluate(11.0).value(), 0.0);
    }

    #[test]
    fn test_triangular_degenerate_left() {
        // a == b: immediate jump to the peak, no division by zero
        let mf = MembershipFunction::triangular(0.0, 0.0, 2.0).unwrap();

        assert_eq!(mf.evaluate(0.0).value(), 1.0);
        assert!(close(mf.evaluate(1.0).value(), 0.5));
        assert_eq!(mf.evaluate(2.0).value(), 0.0);
        assert!(mf.evaluate(0.0).value().is_finite());
    }

    #[test]
    fn test_triangular_degenerate_right() {
        // b == c
        let mf = MembershipFunction::triangular(8.0, 10.0, 10.0).unwrap();

        assert_eq!(mf.evaluate(10.0).value(), 1.0);
        assert!(close(mf.evaluate(9.0).value(), 0.5));
        assert_eq!(mf.evaluate(8.0).value(), 0.0);
    }

    #[test]
    fn test_trapezoidal_shape() {
        let mf = MembershipFunction::trapezoidal(0.0, 2.0, 6.0, 8.0).unwrap();

        assert_eq!(mf.evaluate(0.0).value(), 0.0);
        assert!(close(mf.evaluate(1.0).value(), 0.5));
        assert_eq!(mf.evaluate(2.0).value(), 1.0);
        assert_eq!(mf.evaluate(4.0).value(), 1.0);
        assert_eq!(mf.evaluate(6.0).value(), 1.0);
        assert!(close(mf.evaluate(7.0).value(), 0.5));
        assert_eq!(mf.evaluate(8.0).value(), 0.0);
    }

    #[test]
    fn test_trapezoidal_degenerate_shoulders() {
        // Left shoulder, as used by the credit-history "poor" term
        let mf = MembershipFunction::trapezoidal(0.0, 0.0, 2.0, 4.0).unwrap();
        assert_eq!(mf.evaluate(0.0).value(), 1.0);
        assert_eq!(mf.evaluate(2.0).value(), 1.0);
        assert_eq!(mf.evaluate(4.0).value(), 0.0);

        // Right shoulder
        let mf = MembershipFunction::trapezoidal(60.0, 80.0, 100.0, 100.0).unwrap();
        assert_eq!(mf.evaluate(100.0).value(), 1.0);
        assert_eq!(mf.evaluate(60.0).value(), 0.0);
        assert!(close(mf.evaluate(70.0).value(), 0.5));
    }

    #[test]
    fn test_boundary_is_exact() {
        let mf = MembershipFunction::trapezoidal(0.0, 0.0, 2.0, 4.0).unwrap();
        // exactly at the outer control point: the defined edge value
        assert_eq!(mf.evaluate(4.0).value(), 0.0);
    }

    #[test]
    fn test_monotone_edges() {
        let mf = MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap();

        let mut prev = -1.0;
        for i in 0..=50 {
            let x = i as f64 * 0.1; // rising edge [0, 5]
            let v = mf.evaluate(x).value();
            assert!(v >= prev);
            prev = v;
        }

        let mut prev = 2.0;
        for i in 50..=100 {
            let x = i as f64 * 0.1; // falling edge [5, 10]
            let v = mf.evaluate(x).value();
            assert!(v <= prev);
            prev = v;
        }
    }

    #[test]
    fn test_rejects_unordered_points() {
        assert!(MembershipFunction::triangular(5.0, 3.0, 10.0).is_err());
        assert!(MembershipFunction::triangular(0.0, 10.0, 5.0).is_err());
        assert!(MembershipFunction::trapezoidal(0.0, 5.0, 3.0, 10.0).is_err());
        assert!(MembershipFunction::trapezoidal(1.0, 0.0, 3.0, 10.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite_points() {
        assert!(MembershipFunction::triangular(0.0, f64::NAN, 1.0).is_err());
        assert!(MembershipFunction::trapezoidal(0.0, 1.0, 2.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_support_and_core() {
        let tri = MembershipFunction::triangular(3.0, 5.0, 7.0).unwrap();
        assert_eq!(tri.support(), (3.0, 7.0));
        assert_eq!(tri.core(), (5.0, 5.0));

        let trap = MembershipFunction::trapezoidal(0.0, 2.0, 6.0, 8.0).unwrap();
        assert_eq!(trap.support(), (0.0, 8.0));
        assert_eq!(trap.core(), (2.0, 6.0));
    }
}
