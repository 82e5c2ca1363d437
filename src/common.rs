// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

use arrayvec::ArrayVec;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("pathgeom requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn copysign(self, sign: Self) -> Self => copysign;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn sqrt(self) -> Self => sqrt;
}

/// Roots of `c0 + c1 t + c2 t²` strictly inside (0, 1), in increasing
/// order and without repeats.
///
/// The root of larger magnitude is formed first and the other one from the
/// product of the roots, so neither loses precision to cancellation. A
/// vanishing `c2` leaves only the linear root.
pub(crate) fn unit_quadratic_roots(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let candidates = if c2 == 0.0 {
        [-c0 / c1, f64::NAN]
    } else {
        let disc = c1 * c1 - 4.0 * c0 * c2;
        if disc < 0.0 {
            [f64::NAN; 2]
        } else {
            let q = -0.5 * (c1 + disc.sqrt().copysign(c1));
            if q == 0.0 {
                // c1 and the discriminant both vanish: a double root at 0.
                [0.0, f64::NAN]
            } else {
                [q / c2, c0 / q]
            }
        }
    };
    let mut roots: ArrayVec<f64, 2> = candidates
        .into_iter()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .collect();
    if roots.len() == 2 {
        if roots[0] == roots[1] {
            roots.pop();
        } else if roots[0] > roots[1] {
            roots.swap(0, 1);
        }
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::unit_quadratic_roots;

    fn assert_roots(c0: f64, c1: f64, c2: f64, expected: &[f64]) {
        let roots = unit_quadratic_roots(c0, c1, c2);
        assert_eq!(roots.len(), expected.len(), "{roots:?} vs {expected:?}");
        for (r, e) in roots.iter().zip(expected) {
            assert!((r - e).abs() < 1e-12, "{roots:?} vs {expected:?}");
        }
    }

    #[test]
    fn roots_in_unit_interval() {
        // (t - 0.25)(t - 0.75)
        assert_roots(0.1875, -1.0, 1.0, &[0.25, 0.75]);
        // Same, scaled and negated.
        assert_roots(-0.375, 2.0, -2.0, &[0.25, 0.75]);
        // Only one root falls inside.
        assert_roots(-0.125, -0.5, 1.0, &[0.25 + 0.1875f64.sqrt()]);
        // Linear.
        assert_roots(-1.0, 4.0, 0.0, &[0.25]);
        // Double root.
        assert_roots(0.25, -1.0, 1.0, &[0.5]);
    }

    #[test]
    fn roots_outside_or_missing() {
        assert_roots(1.0, 0.0, 1.0, &[]);
        // Roots at -0.5 and 1.
        assert_roots(-0.5, -0.5, 1.0, &[]);
        assert_roots(0.0, 0.0, 0.0, &[]);
        assert_roots(0.0, 0.0, 1.0, &[]);
        // Roots at the end points are excluded.
        assert_roots(0.0, -1.0, 1.0, &[]);
        // A nearly vanishing quadratic term still yields the linear root.
        assert_roots(-1.0, 4.0, 1e-300, &[0.25]);
    }
}
