// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A generic trait for shapes.

use crate::crossings;
use crate::{Affine, Flattening, Path, PathError, PathIterator, Point, Rect};

/// A generic trait for open and closed shapes.
///
/// A shape only has to produce its outline through [`path_iter`] and report
/// a [`bounding_box`]; containment and overlap queries are derived from the
/// outline by the crossing engine. Shapes that can answer those queries
/// directly, such as [`Rect`], override them.
///
/// [`path_iter`]: Shape::path_iter
/// [`bounding_box`]: Shape::bounding_box
pub trait Shape {
    /// The iterator returned by the [`path_iter`] method.
    ///
    /// [`path_iter`]: Shape::path_iter
    type PathIter<'iter>: PathIterator + 'iter
    where
        Self: 'iter;

    /// Walk the outline, optionally mapped through `transform`.
    fn path_iter(&self, transform: Option<Affine>) -> Self::PathIter<'_>;

    /// Walk the outline with every curve replaced by lines.
    ///
    /// See [`Flattening`] for the meaning of `flatness`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidFlatness`] when `flatness` is negative or NaN.
    fn flattened_iter(
        &self,
        transform: Option<Affine>,
        flatness: f64,
    ) -> Result<Flattening<Self::PathIter<'_>>, PathError> {
        Flattening::new(self.path_iter(transform), flatness)
    }

    /// The smallest rectangle that encloses the shape.
    ///
    /// For curved shapes this may be conservative: it is allowed to enclose
    /// control points that lie off the curve.
    fn bounding_box(&self) -> Rect;

    /// Whether the point is inside the shape, according to its winding rule.
    ///
    /// Non-finite points are never inside.
    fn contains(&self, pt: Point) -> bool {
        if !pt.is_finite() {
            return false;
        }
        crossings::contains_point(self.path_iter(None), pt).unwrap_or_else(|e| {
            log::warn!("containment query on malformed outline: {e}");
            false
        })
    }

    /// Whether the rectangle lies entirely inside the shape.
    ///
    /// Empty or NaN rectangles are never contained. The answer is
    /// conservative: a rectangle that touches the outline is reported as not
    /// contained even when the outline only grazes it.
    fn contains_rect(&self, rect: Rect) -> bool {
        crossings::contains_rect(self.path_iter(None), rect).unwrap_or_else(|e| {
            log::warn!("rectangle containment query on malformed outline: {e}");
            false
        })
    }

    /// Whether the rectangle and the interior of the shape overlap.
    ///
    /// Empty or NaN rectangles never intersect.
    fn intersects(&self, rect: Rect) -> bool {
        crossings::intersects_rect(self.path_iter(None), rect).unwrap_or_else(|e| {
            log::warn!("rectangle overlap query on malformed outline: {e}");
            false
        })
    }

    /// If the shape is a rectangle, make it available.
    fn as_rect(&self) -> Option<Rect> {
        None
    }

    /// If the shape is stored as a [`Path`], make it available.
    fn as_path(&self) -> Option<&Path> {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Affine, PathError, PathIterator, Point, Rect, SegmentKind, Shape, WindingRule,
    };

    /// An outline that forgets to start with a move.
    struct Headless;

    struct HeadlessIter(usize);

    impl PathIterator for HeadlessIter {
        fn winding_rule(&self) -> WindingRule {
            WindingRule::NonZero
        }

        fn is_done(&self) -> bool {
            self.0 >= 3
        }

        fn advance(&mut self) {
            self.0 += 1;
        }

        fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
            let pts = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)];
            let (x, y) = *pts.get(self.0).ok_or(PathError::IteratorExhausted)?;
            coords[0] = x;
            coords[1] = y;
            Ok(SegmentKind::LineTo)
        }
    }

    impl Shape for Headless {
        type PathIter<'iter> = HeadlessIter;

        fn path_iter(&self, _transform: Option<Affine>) -> HeadlessIter {
            HeadlessIter(0)
        }

        fn bounding_box(&self) -> Rect {
            Rect::new(0.0, 0.0, 4.0, 4.0)
        }
    }

    #[test]
    fn malformed_outline_contains_nothing() {
        assert!(!Headless.contains(Point::new(3.0, 1.0)));
        assert!(!Headless.intersects(Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!Headless.contains_rect(Rect::new(3.0, 0.5, 3.5, 1.0)));
    }

    #[test]
    fn non_finite_points_are_outside() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        let path = crate::Path::from_shape(&r, None).unwrap();
        assert!(!path.contains(Point::new(f64::NAN, 0.5)));
        assert!(!path.contains(Point::new(0.5, f64::INFINITY)));
    }

    #[test]
    fn transformed_outline() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0);
        let mut it = r.path_iter(Some(Affine::translate(1.0, 0.0)));
        let mut coords = [0.0; 6];
        assert_eq!(it.current_segment(&mut coords), Ok(SegmentKind::MoveTo));
        assert_eq!(&coords[..2], &[1.0, 0.0]);
        it.advance();
        assert_eq!(it.current_segment(&mut coords), Ok(SegmentKind::LineTo));
        assert_eq!(&coords[..2], &[3.0, 0.0]);
    }
}
