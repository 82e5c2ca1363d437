// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::common::unit_quadratic_roots;
use crate::{Line, ParamCurve, ParamCurveExtrema, Point, MAX_EXTREMA};

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline(always)]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Squared distance of the farther control point from the chord.
    #[inline]
    pub fn flatness_squared(&self) -> f64 {
        let chord = Line::new(self.p0, self.p3);
        chord
            .distance_squared_to(self.p1)
            .max(chord.distance_squared_to(self.p2))
    }

    /// The smallest and largest x among the control points.
    #[inline]
    pub(crate) fn x_range(&self) -> (f64, f64) {
        (
            self.p0.x.min(self.p1.x).min(self.p2.x).min(self.p3.x),
            self.p0.x.max(self.p1.x).max(self.p2.x).max(self.p3.x),
        )
    }

    /// Derivative at `t`, divided by three.
    #[inline]
    fn deriv_third(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt;
        let b = 2.0 * mt * t;
        let c = t * t;
        Point::new(
            a * (self.p1.x - self.p0.x) + b * (self.p2.x - self.p1.x) + c * (self.p3.x - self.p2.x),
            a * (self.p1.y - self.p0.y) + b * (self.p2.y - self.p1.y) + c * (self.p3.y - self.p2.y),
        )
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let f = |p0: f64, p1: f64, p2: f64, p3: f64| {
            p0 * (mt * mt * mt) + (p1 * (mt * mt * 3.0) + (p2 * (mt * 3.0) + p3 * t) * t) * t
        };
        Point::new(
            f(self.p0.x, self.p1.x, self.p2.x, self.p3.x),
            f(self.p0.y, self.p1.y, self.p2.y, self.p3.y),
        )
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let scale = t1 - t0;
        let d0 = self.deriv_third(t0);
        let d1 = self.deriv_third(t1);
        let p1 = Point::new(p0.x + scale * d0.x, p0.y + scale * d0.y);
        let p2 = Point::new(p3.x - scale * d1.x, p3.y - scale * d1.y);
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        let pm = self.p1.midpoint(self.p2);
        let c0 = self.p0.midpoint(self.p1);
        let c5 = self.p2.midpoint(self.p3);
        let c1 = c0.midpoint(pm);
        let c4 = pm.midpoint(c5);
        let mid = c1.midpoint(c4);
        (
            CubicBez::new(self.p0, c0, c1, mid),
            CubicBez::new(mid, c4, c5, self.p3),
        )
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveExtrema for CubicBez {
    fn y_extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        let d0 = self.p1.y - self.p0.y;
        let d1 = self.p2.y - self.p1.y;
        let d2 = self.p3.y - self.p2.y;
        unit_quadratic_roots(d0, 2.0 * (d1 - d0), d0 - 2.0 * d1 + d2)
    }
}

#[cfg(test)]
mod tests {
    use crate::{CubicBez, ParamCurve, ParamCurveExtrema, Point};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!(p0.distance(p1) < epsilon, "{p0:?} != {p1:?}");
    }

    #[test]
    fn cubicbez_eval_endpoints() {
        let c = CubicBez::new((0.3, 0.1), (1.0, 5.0), (3.0, -2.0), (4.7, 0.9));
        assert_eq!(c.eval(0.0), c.p0);
        assert_eq!(c.eval(1.0), c.p3);
    }

    #[test]
    fn cubicbez_subsegment() {
        let c = CubicBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8), (9.7, 9.3));
        let t0 = 0.1;
        let t1 = 0.8;
        let cs = c.subsegment(t0..t1);
        let epsilon = 1e-12;
        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let ts = t0 + t * (t1 - t0);
            assert_near(c.eval(ts), cs.eval(t), epsilon);
        }
    }

    #[test]
    fn cubicbez_subdivide_halves() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 3.0), (3.0, 3.0), (4.0, 0.0));
        let (a, b) = c.subdivide();
        assert_eq!(a.p3, b.p0);
        assert_near(a.p3, c.eval(0.5), 1e-12);
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            assert_near(a.eval(t), c.eval(0.5 * t), 1e-12);
            assert_near(b.eval(t), c.eval(0.5 + 0.5 * t), 1e-12);
        }
    }

    #[test]
    fn cubicbez_extrema() {
        // An S-curve in y has two turning points.
        let c = CubicBez::new((0.0, 0.0), (1.0, 4.0), (2.0, -4.0), (3.0, 0.0));
        let ex = c.y_extrema();
        assert_eq!(ex.len(), 2);
        assert!(ex[0] < ex[1]);
        let ranges = c.y_monotonic_ranges();
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0].start, 0.0);
        assert_eq!(ranges[2].end, 1.0);
    }

    #[test]
    fn cubicbez_flatness() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, -3.0), (4.0, 0.0));
        assert_eq!(c.flatness_squared(), 9.0);
    }
}
