// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path segment tags and elements.

use core::ops::Mul;

use crate::{Affine, PathError, Point, Transform};

/// The maximum number of scalars any segment carries.
pub const MAX_SEGMENT_COORDS: usize = 6;

/// The tag of a path segment.
///
/// The number of coordinates a segment carries is a function of its tag
/// alone; see [`SegmentKind::coord_count`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// Start a new subpath at a point.
    MoveTo,
    /// A straight line to a point.
    LineTo,
    /// A quadratic Bézier: one control point, then the end point.
    QuadTo,
    /// A cubic Bézier: two control points, then the end point.
    CubicTo,
    /// Close the current subpath back to its start.
    Close,
}

impl SegmentKind {
    /// Number of scalars carried by a segment of this kind.
    #[inline]
    pub const fn coord_count(self) -> usize {
        match self {
            SegmentKind::MoveTo | SegmentKind::LineTo => 2,
            SegmentKind::QuadTo => 4,
            SegmentKind::CubicTo => 6,
            SegmentKind::Close => 0,
        }
    }

    /// Number of points carried by a segment of this kind.
    #[inline]
    pub const fn point_count(self) -> usize {
        self.coord_count() / 2
    }
}

/// The element of a path.
///
/// A valid path has `MoveTo` at the beginning of its first subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic bezier using the current location and the two points.
    QuadTo(Point, Point),
    /// Draw a cubic bezier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

impl PathEl {
    /// The tag of this element.
    #[inline]
    pub fn kind(&self) -> SegmentKind {
        match self {
            PathEl::MoveTo(_) => SegmentKind::MoveTo,
            PathEl::LineTo(_) => SegmentKind::LineTo,
            PathEl::QuadTo(..) => SegmentKind::QuadTo,
            PathEl::CurveTo(..) => SegmentKind::CubicTo,
            PathEl::ClosePath => SegmentKind::Close,
        }
    }

    /// Get the end point of the path element, if it exists.
    pub fn end_point(&self) -> Option<Point> {
        match self {
            PathEl::MoveTo(p) => Some(*p),
            PathEl::LineTo(p1) => Some(*p1),
            PathEl::QuadTo(_, p2) => Some(*p2),
            PathEl::CurveTo(_, _, p3) => Some(*p3),
            PathEl::ClosePath => None,
        }
    }

    /// Decode an element from a tag and the leading scalars of `coords`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingCoordinates`] if `coords` is shorter than
    /// the tag's arity.
    pub fn from_coords(kind: SegmentKind, coords: &[f64]) -> Result<PathEl, PathError> {
        if coords.len() < kind.coord_count() {
            return Err(PathError::MissingCoordinates);
        }
        let pt = |i: usize| Point::new(coords[2 * i], coords[2 * i + 1]);
        Ok(match kind {
            SegmentKind::MoveTo => PathEl::MoveTo(pt(0)),
            SegmentKind::LineTo => PathEl::LineTo(pt(0)),
            SegmentKind::QuadTo => PathEl::QuadTo(pt(0), pt(1)),
            SegmentKind::CubicTo => PathEl::CurveTo(pt(0), pt(1), pt(2)),
            SegmentKind::Close => PathEl::ClosePath,
        })
    }

    /// Write this element's scalars into `coords` and return its tag.
    pub fn write_coords(&self, coords: &mut [f64; MAX_SEGMENT_COORDS]) -> SegmentKind {
        let mut put = |i: usize, p: Point| {
            coords[2 * i] = p.x;
            coords[2 * i + 1] = p.y;
        };
        match *self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => put(0, p),
            PathEl::QuadTo(p1, p2) => {
                put(0, p1);
                put(1, p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                put(0, p1);
                put(1, p2);
                put(2, p3);
            }
            PathEl::ClosePath => {}
        }
        self.kind()
    }

    /// Map every point of this element through a transform.
    pub fn transform(&self, t: &impl Transform) -> PathEl {
        match *self {
            PathEl::MoveTo(p) => PathEl::MoveTo(t.transform_point(p)),
            PathEl::LineTo(p) => PathEl::LineTo(t.transform_point(p)),
            PathEl::QuadTo(p1, p2) => PathEl::QuadTo(t.transform_point(p1), t.transform_point(p2)),
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(
                t.transform_point(p1),
                t.transform_point(p2),
                t.transform_point(p3),
            ),
            PathEl::ClosePath => PathEl::ClosePath,
        }
    }

    /// Whether `other` has the same tag and every point within `epsilon`.
    pub fn is_near(&self, other: &PathEl, epsilon: f64) -> bool {
        match (*self, *other) {
            (PathEl::MoveTo(a), PathEl::MoveTo(b)) | (PathEl::LineTo(a), PathEl::LineTo(b)) => {
                a.is_near(b, epsilon)
            }
            (PathEl::QuadTo(a1, a2), PathEl::QuadTo(b1, b2)) => {
                a1.is_near(b1, epsilon) && a2.is_near(b2, epsilon)
            }
            (PathEl::CurveTo(a1, a2, a3), PathEl::CurveTo(b1, b2, b3)) => {
                a1.is_near(b1, epsilon) && a2.is_near(b2, epsilon) && a3.is_near(b3, epsilon)
            }
            (PathEl::ClosePath, PathEl::ClosePath) => true,
            _ => false,
        }
    }
}

impl Mul<PathEl> for Affine {
    type Output = PathEl;

    fn mul(self, other: PathEl) -> PathEl {
        other.transform(&self)
    }
}
