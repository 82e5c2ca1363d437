// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::{Line, ParamCurve, ParamCurveExtrema, Point, MAX_EXTREMA};

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBez {
    /// The start point.
    pub p0: Point,
    /// The control point.
    pub p1: Point,
    /// The end point.
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline(always)]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    /// Squared distance of the control point from the chord.
    ///
    /// The curve lies in the triangle of its control points, so no point
    /// of it is farther from the chord than this.
    #[inline]
    pub fn flatness_squared(&self) -> f64 {
        Line::new(self.p0, self.p2).distance_squared_to(self.p1)
    }

    /// The smallest and largest x among the control points.
    #[inline]
    pub(crate) fn x_range(&self) -> (f64, f64) {
        (
            self.p0.x.min(self.p1.x).min(self.p2.x),
            self.p0.x.max(self.p1.x).max(self.p2.x),
        )
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let x = self.p0.x * (mt * mt) + (self.p1.x * (mt * 2.0) + self.p2.x * t) * t;
        let y = self.p0.y * (mt * mt) + (self.p1.y * (mt * 2.0) + self.p2.y * t) * t;
        Point::new(x, y)
    }

    fn subsegment(&self, range: Range<f64>) -> QuadBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p2 = self.eval(t1);
        let dx = (self.p1.x - self.p0.x) + t0 * ((self.p2.x - self.p1.x) - (self.p1.x - self.p0.x));
        let dy = (self.p1.y - self.p0.y) + t0 * ((self.p2.y - self.p1.y) - (self.p1.y - self.p0.y));
        let p1 = Point::new(p0.x + dx * (t1 - t0), p0.y + dy * (t1 - t0));
        QuadBez { p0, p1, p2 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (QuadBez, QuadBez) {
        let c0 = self.p0.midpoint(self.p1);
        let c1 = self.p1.midpoint(self.p2);
        let pm = c0.midpoint(c1);
        (
            QuadBez::new(self.p0, c0, pm),
            QuadBez::new(pm, c1, self.p2),
        )
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p2
    }
}

impl ParamCurveExtrema for QuadBez {
    fn y_extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        let mut result = ArrayVec::new();
        let d0 = self.p1.y - self.p0.y;
        let d1 = self.p2.y - self.p1.y;
        let dd = d1 - d0;
        if dd != 0.0 {
            let t = -d0 / dd;
            if t > 0.0 && t < 1.0 {
                result.push(t);
            }
        }
        result
    }
}
