// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar helpers used by flattening and tessellation.
//!
//! Everything here is a pure function; it is safe to call from any thread.

/// Tolerance used by [`approx_eq`] and [`is_approx_zero`] for `f64`.
pub const EPSILON_F64: f64 = 1e-12;

/// Tolerance used by [`approx_eq`] and [`is_approx_zero`] for `f32`.
pub const EPSILON_F32: f32 = 1e-6;

/// Floating point types with an absolute comparison tolerance.
///
/// Each type carries its own tolerance, matched to its precision.
pub trait ApproxEq: Copy {
    /// The absolute tolerance for this type.
    const EPSILON: Self;

    /// Returns `true` if `|self - other| < EPSILON`.
    fn approx_eq(self, other: Self) -> bool;

    /// Returns `true` if `|self| <= EPSILON`.
    fn is_approx_zero(self) -> bool;
}

macro_rules! impl_approx_eq {
    ($($ty:ty => $epsilon:expr),* $(,)?) => {
        $(
            impl ApproxEq for $ty {
                const EPSILON: Self = $epsilon;

                // `Self::EPSILON` would name the inherent machine epsilon.
                #[inline]
                fn approx_eq(self, other: Self) -> bool {
                    (self - other).abs() < <Self as ApproxEq>::EPSILON
                }

                #[inline]
                fn is_approx_zero(self) -> bool {
                    self.abs() <= <Self as ApproxEq>::EPSILON
                }
            }
        )*
    };
}

impl_approx_eq!(f32 => EPSILON_F32, f64 => EPSILON_F64);

/// Compare two values with the tolerance of their type.
///
/// Strict: a difference of exactly `EPSILON` is not equal.
#[inline]
pub fn approx_eq<T: ApproxEq>(a: T, b: T) -> bool {
    a.approx_eq(b)
}

/// Test a value against zero with the tolerance of its type.
///
/// Inclusive: a magnitude of exactly `EPSILON` counts as zero.
#[inline]
pub fn is_approx_zero<T: ApproxEq>(x: T) -> bool {
    x.is_approx_zero()
}

/// Approximate the distance between `(x1, y1)` and `(x2, y2)` without a square root.
///
/// This is the "alpha max plus beta min" estimator with alpha = 1 and beta = 3/8:
/// `max(dx, dy) + 0.375 * min(dx, dy)`. The relative error against the Euclidean
/// distance stays below 7% in either direction.
#[inline]
pub fn fast_distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    if dx > dy {
        dx + 0.375 * dy
    } else {
        dy + 0.375 * dx
    }
}

/// Returns `a` if `a < b`, otherwise `b`.
///
/// Ties and unordered comparisons (NaN) yield `b`.
#[inline]
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b {
        a
    } else {
        b
    }
}

/// Returns `b` if `a < b`, otherwise `a`.
///
/// Ties and unordered comparisons (NaN) yield `a`.
#[inline]
pub fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a < b {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_per_type() {
        assert!(approx_eq(1.0_f64, 1.0 + 1e-13));
        assert!(!approx_eq(1.0_f64, 1.0 + 1e-11));
        assert!(approx_eq(1.0_f32, 1.0 + 1e-7));
        assert!(!approx_eq(1.0_f32, 1.0 + 1e-5));
    }

    #[test]
    fn tolerance_is_wider_than_machine_epsilon() {
        assert_eq!(<f32 as ApproxEq>::EPSILON, EPSILON_F32);
        assert_eq!(<f64 as ApproxEq>::EPSILON, EPSILON_F64);
        assert!(approx_eq(1.0_f32, 1.0 + 5e-7));
        assert!(approx_eq(0.0_f64, 5e-13));
        assert!(1.0_f64.approx_eq(1.0 + 1e-13));
        assert!(!approx_eq(0.0_f64, EPSILON_F64));
        assert!(is_approx_zero(5e-7_f32));
        assert!(is_approx_zero(EPSILON_F64));
    }

    #[test]
    fn zero_is_inclusive() {
        assert!(is_approx_zero(0.0_f32));
        assert!(is_approx_zero(-0.0_f64));
        assert!(is_approx_zero(EPSILON_F32));
        assert!(is_approx_zero(-EPSILON_F64));
        assert!(!is_approx_zero(2e-6_f32));
        assert!(!is_approx_zero(2e-12_f64));
        assert!(!is_approx_zero(f32::NAN));
    }

    #[test]
    fn fast_distance_known_values() {
        assert_eq!(fast_distance(0.0, 0.0, 3.0, 4.0), 5.125);
        assert_eq!(fast_distance(3.0, 4.0, 0.0, 0.0), 5.125);
        assert_eq!(fast_distance(1.0, 1.0, 1.0, 1.0), 0.0);
        assert_eq!(fast_distance(-2.0, 0.0, 2.0, 0.0), 4.0);
    }

    #[test]
    fn fast_distance_error_bound() {
        for step in 0..360 {
            let angle = (step as f32).to_radians();
            let (x, y) = (100.0 * angle.cos(), 100.0 * angle.sin());
            let approx = fast_distance(0.0, 0.0, x, y);
            let exact = x.hypot(y);
            let error = (approx - exact) / exact;
            assert!(error.abs() < 0.07, "error at {step} degrees: {error}");
        }
    }

    #[test]
    fn min_max_ties() {
        // Ties go to `b` for `min` and to `a` for `max`; signed zeros tell them apart.
        assert!(min(0.0_f32, -0.0).is_sign_negative());
        assert!(min(-0.0_f32, 0.0).is_sign_positive());
        assert!(max(-0.0_f32, 0.0).is_sign_negative());
        assert!(max(0.0_f32, -0.0).is_sign_positive());
        assert_eq!(min(1, 2), 1);
        assert_eq!(max(1, 2), 2);
    }

    #[test]
    fn min_max_nan() {
        assert_eq!(min(f32::NAN, 1.0), 1.0);
        assert!(min(1.0, f32::NAN).is_nan());
        assert!(max(f32::NAN, 1.0).is_nan());
        assert_eq!(max(1.0, f32::NAN), 1.0);
    }
}
