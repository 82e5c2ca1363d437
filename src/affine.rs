// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transforms, and the point-mapping capability paths are transformed by.

use core::ops::{Mul, MulAssign};

use crate::{Point, EPSILON};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A mapping from one coordinate pair to another.
///
/// Paths apply a transform per vertex: curves are transformed by mapping
/// their control points, which is exact for affine transforms and an
/// approximation for anything else.
pub trait Transform {
    /// Map a single point.
    fn transform_point(&self, p: Point) -> Point;

    /// Map the coordinate pairs of a flat `[x0, y0, x1, y1, ...]` slice in place.
    ///
    /// A trailing odd coordinate is left untouched.
    fn transform_coords(&self, coords: &mut [f64]) {
        for pair in coords.chunks_exact_mut(2) {
            let p = self.transform_point(Point::new(pair[0], pair[1]));
            pair[0] = p.x;
            pair[1] = p.y;
        }
    }
}

impl<T: Transform + ?Sized> Transform for &T {
    #[inline]
    fn transform_point(&self, p: Point) -> Point {
        (**self).transform_point(p)
    }
}

/// `None` is the identity.
impl<T: Transform> Transform for Option<T> {
    #[inline]
    fn transform_point(&self, p: Point) -> Point {
        match self {
            Some(t) => t.transform_point(p),
            None => p,
        }
    }

    fn transform_coords(&self, coords: &mut [f64]) {
        if let Some(t) = self {
            t.transform_coords(coords);
        }
    }
}

/// A 2D affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine::scale(1.0);

    /// Construct an affine transform from coefficients.
    ///
    /// If the coefficients are `(a, b, c, d, e, f)`, then the resulting
    /// transformation represents this augmented matrix:
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    ///
    /// so that `(A * B) * p == A * (B * p)`.
    #[inline(always)]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// An affine transform representing uniform scaling.
    #[inline(always)]
    pub const fn scale(s: f64) -> Affine {
        Affine([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    /// An affine transform representing non-uniform scaling
    /// with different scale values for x and y
    #[inline(always)]
    pub const fn scale_non_uniform(s_x: f64, s_y: f64) -> Affine {
        Affine([s_x, 0.0, 0.0, s_y, 0.0, 0.0])
    }

    /// An affine transform representing rotation.
    ///
    /// The rotation angle is in radians; in a y-down space a positive angle
    /// turns clockwise.
    #[inline]
    pub fn rotate(th: f64) -> Affine {
        let (s, c) = th.sin_cos();
        Affine([c, s, -s, c, 0.0, 0.0])
    }

    /// An affine transform representing translation.
    #[inline(always)]
    pub const fn translate(x: f64, y: f64) -> Affine {
        Affine([1.0, 0.0, 0.0, 1.0, x, y])
    }

    /// Get the coefficients of the transform.
    #[inline(always)]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// Compute the determinant of this transform.
    #[inline]
    pub fn determinant(self) -> f64 {
        self.0[0] * self.0[3] - self.0[1] * self.0[2]
    }

    /// Compute the inverse transform.
    ///
    /// Returns `None` when the transform is singular, that is when the
    /// determinant is within [`EPSILON`] of zero.
    pub fn inverse(self) -> Option<Affine> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < EPSILON {
            return None;
        }
        let inv_det = det.recip();
        Some(Affine([
            inv_det * self.0[3],
            -inv_det * self.0[1],
            -inv_det * self.0[2],
            inv_det * self.0[0],
            inv_det * (self.0[2] * self.0[5] - self.0[3] * self.0[4]),
            inv_det * (self.0[1] * self.0[4] - self.0[0] * self.0[5]),
        ]))
    }

    /// Is this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Default for Affine {
    #[inline(always)]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Transform for Affine {
    #[inline]
    fn transform_point(&self, p: Point) -> Point {
        *self * p
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        Affine([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}

// Conversions to and from mint
#[cfg(feature = "mint")]
impl From<Affine> for mint::ColumnMatrix2x3<f64> {
    #[inline(always)]
    fn from(a: Affine) -> mint::ColumnMatrix2x3<f64> {
        mint::ColumnMatrix2x3 {
            x: mint::Vector2 {
                x: a.0[0],
                y: a.0[1],
            },
            y: mint::Vector2 {
                x: a.0[2],
                y: a.0[3],
            },
            z: mint::Vector2 {
                x: a.0[4],
                y: a.0[5],
            },
        }
    }
}

#[cfg(feature = "mint")]
impl From<mint::ColumnMatrix2x3<f64>> for Affine {
    #[inline(always)]
    fn from(m: mint::ColumnMatrix2x3<f64>) -> Affine {
        Affine([m.x.x, m.x.y, m.y.x, m.y.y, m.z.x, m.z.y])
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, Point, Transform};
    use std::f64::consts::PI;

    fn assert_near(p0: Point, p1: Point) {
        assert!(p0.distance(p1) < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn affine_basic() {
        let p = Point::new(3.0, 4.0);

        assert_near(Affine::default() * p, p);
        assert_near(Affine::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_near(Affine::rotate(0.0) * p, p);
        assert_near(Affine::rotate(PI / 2.0) * p, Point::new(-4.0, 3.0));
        assert_near(Affine::translate(5.0, 6.0) * p, Point::new(8.0, 10.0));
    }

    #[test]
    fn affine_mul() {
        let a1 = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let a2 = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);

        let px = Point::new(1.0, 0.0);
        let py = Point::new(0.0, 1.0);
        assert_near(a1 * (a2 * px), (a1 * a2) * px);
        assert_near(a1 * (a2 * py), (a1 * a2) * py);
    }

    #[test]
    fn affine_inv() {
        let a = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);
        let a_inv = a.inverse().unwrap();

        let p = Point::new(3.0, 4.0);
        assert_near(a_inv * (a * p), p);
        assert_near(a * (a_inv * p), p);
    }

    #[test]
    fn singular_has_no_inverse() {
        assert!(Affine::scale(0.0).inverse().is_none());
        assert!(Affine::new([1.0, 2.0, 2.0, 4.0, 0.0, 0.0]).inverse().is_none());
        assert!(Affine::scale_non_uniform(1e-12, 1.0).inverse().is_none());
    }

    #[test]
    fn transform_coords_in_place() {
        let mut coords = [1.0, 2.0, 3.0, 4.0, 9.0];
        Affine::translate(1.0, -1.0).transform_coords(&mut coords);
        assert_eq!(coords, [2.0, 1.0, 4.0, 3.0, 9.0]);

        let none: Option<Affine> = None;
        none.transform_coords(&mut coords);
        assert_eq!(coords, [2.0, 1.0, 4.0, 3.0, 9.0]);
    }
}
