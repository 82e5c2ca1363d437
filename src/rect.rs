// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use crate::{Affine, PathIterator, PathError, Point, SegmentKind, Shape, Transform, WindingRule};

/// A rectangle.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate (top edge in y-down spaces).
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate (bottom edge in y-down spaces).
    pub y1: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect::new(0., 0., 0., 0.);

    /// A new rectangle from minimum and maximum coordinates.
    #[inline(always)]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect::new(p0.x, p0.y, p1.x, p1.y).abs()
    }

    /// The width of the rectangle.
    ///
    /// Note: nothing forbids negative width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    ///
    /// Note: nothing forbids negative height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The origin of the rectangle.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Take absolute value of width and height.
    ///
    /// The resulting rect has the same extents as the original, but is
    /// guaranteed to have non-negative width and height.
    #[inline]
    pub fn abs(&self) -> Rect {
        let Rect { x0, y0, x1, y1 } = *self;
        Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// Compute the union with one point.
    ///
    /// This method includes the perimeter of zero-area rectangles.
    /// Thus, a succession of `union_pt` operations on a series of
    /// points yields their enclosing rectangle.
    #[inline]
    pub fn union_pt(&self, pt: Point) -> Rect {
        Rect::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// Whether this rectangle has zero (or negative) area.
    #[inline]
    pub fn is_zero_area(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Whether every corner is within `epsilon` of `other`'s.
    pub fn is_near(&self, other: Rect, epsilon: f64) -> bool {
        Point::new(self.x0, self.y0).is_near(Point::new(other.x0, other.y0), epsilon)
            && Point::new(self.x1, self.y1).is_near(Point::new(other.x1, other.y1), epsilon)
    }
}

impl From<(Point, Point)> for Rect {
    fn from(points: (Point, Point)) -> Rect {
        Rect::from_points(points.0, points.1)
    }
}

/// The outline of a [`Rect`], as a path iterator.
///
/// This is clockwise in a y-down coordinate system for positive area.
#[derive(Clone, Debug)]
pub struct RectPathIter {
    corners: [Point; 4],
    ix: usize,
}

impl RectPathIter {
    fn new(rect: Rect, transform: Option<Affine>) -> RectPathIter {
        let mut corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        for c in &mut corners {
            *c = transform.transform_point(*c);
        }
        // A rectangle with NaN or negative extent has no outline.
        let ix = if rect.width() >= 0.0 && rect.height() >= 0.0 {
            0
        } else {
            5
        };
        RectPathIter { corners, ix }
    }
}

impl PathIterator for RectPathIter {
    fn winding_rule(&self) -> WindingRule {
        WindingRule::NonZero
    }

    fn is_done(&self) -> bool {
        self.ix > 4
    }

    fn advance(&mut self) {
        self.ix += 1;
    }

    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
        match self.ix {
            0..=3 => {
                let p = self.corners[self.ix];
                coords[0] = p.x;
                coords[1] = p.y;
                Ok(if self.ix == 0 {
                    SegmentKind::MoveTo
                } else {
                    SegmentKind::LineTo
                })
            }
            4 => Ok(SegmentKind::Close),
            _ => Err(PathError::IteratorExhausted),
        }
    }
}

impl Shape for Rect {
    type PathIter<'iter> = RectPathIter;

    fn path_iter(&self, transform: Option<Affine>) -> RectPathIter {
        RectPathIter::new(*self, transform)
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        self.abs()
    }

    /// Half-open containment matching the crossing rule for outlines: the
    /// right edge and the edge at the smaller y are inside, the other two are
    /// not.
    #[inline]
    fn contains(&self, pt: Point) -> bool {
        let r = self.abs();
        pt.x > r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y < r.y1
    }

    fn contains_rect(&self, rect: Rect) -> bool {
        !rect.is_zero_area()
            && !self.is_zero_area()
            && rect.x0 >= self.x0
            && rect.y0 >= self.y0
            && rect.x1 <= self.x1
            && rect.y1 <= self.y1
    }

    fn intersects(&self, rect: Rect) -> bool {
        !rect.is_zero_area()
            && !self.is_zero_area()
            && rect.x1 > self.x0
            && rect.y1 > self.y0
            && rect.x0 < self.x1
            && rect.y0 < self.y1
    }

    #[inline]
    fn as_rect(&self) -> Option<Rect> {
        Some(*self)
    }
}
