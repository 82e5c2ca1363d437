// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A read-only region captured from any shape.

use crate::{
    Affine, Path, PathError, PathIter, PathIterator, Point, Rect, SegmentKind, Shape, Transform,
    EPSILON,
};

/// The region enclosed by a shape, frozen at construction.
///
/// An area keeps the outline and winding rule of the shape it was made from
/// and answers the same queries; it cannot be extended segment by segment.
/// Two areas are equal when iterating them yields the same segment tags with
/// coordinates within [`EPSILON`] of each other, under the same winding rule.
///
/// ```
/// use pathgeom::{Area, Point, Rect, Shape};
///
/// let a = Area::new(&Rect::new(0.0, 0.0, 2.0, 1.0)).unwrap();
/// let b = Area::new(&Rect::new(0.0, 0.0, 2.0, 1.0 + 1e-12)).unwrap();
/// assert_eq!(a, b);
/// assert!(a.contains(Point::new(1.0, 0.5)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Area {
    path: Path,
}

impl Area {
    /// Capture the outline of `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] if the shape's outline draws
    /// before it moves.
    pub fn new<S: Shape + ?Sized>(shape: &S) -> Result<Area, PathError> {
        Ok(Area {
            path: Path::from_shape(shape, None)?,
        })
    }

    /// Whether the area has no outline to enclose anything with.
    ///
    /// Only moves and closes do not count as outline.
    pub fn is_empty(&self) -> bool {
        !self.path.elements().any(|el| {
            matches!(
                el.kind(),
                SegmentKind::LineTo | SegmentKind::QuadTo | SegmentKind::CubicTo
            )
        })
    }

    /// Map the outline through `t`, in place.
    pub fn transform(&mut self, t: &impl Transform) {
        self.path.transform(t);
    }

    /// A copy of the outline as a mutable path.
    pub fn to_path(&self) -> Path {
        self.path.clone()
    }
}

impl From<Path> for Area {
    fn from(path: Path) -> Self {
        Area { path }
    }
}

impl PartialEq for Area {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.path.iter(), other.path.iter());
        a.winding_rule() == b.winding_rule()
            && self.path.segment_count() == other.path.segment_count()
            && a.elements()
                .zip(b.elements())
                .all(|(a, b)| a.is_near(&b, EPSILON))
    }
}

impl Shape for Area {
    type PathIter<'iter> = PathIter<'iter>;

    fn path_iter(&self, transform: Option<Affine>) -> PathIter<'_> {
        self.path.path_iter(transform)
    }

    fn bounding_box(&self) -> Rect {
        self.path.bounding_box()
    }

    fn contains(&self, pt: Point) -> bool {
        self.path.contains(pt)
    }

    fn as_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, Area, Path, PathIterator, Point, Rect, Shape, WindingRule};

    #[test]
    fn equality_is_approximate() {
        let a = Area::new(&Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        let b = Area::new(&Rect::new(0.0, 0.0, 1.0, 1.0 + 1e-10)).unwrap();
        let c = Area::new(&Rect::new(0.0, 0.0, 1.0, 1.001)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn equality_needs_same_structure() {
        let rect = Area::new(&Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        let mut path = Path::from_shape(&Rect::new(0.0, 0.0, 1.0, 1.0), None).unwrap();
        assert_eq!(Area::from(path.clone()), rect);
        path.set_winding_rule(WindingRule::EvenOdd);
        assert_ne!(Area::from(path.clone()), rect);
        path.set_winding_rule(WindingRule::NonZero);
        path.move_to((5.0, 5.0));
        assert_ne!(Area::from(path), rect);
    }

    #[test]
    fn area_of_area_is_equal() {
        let mut path = Path::new(WindingRule::EvenOdd);
        path.move_to((0.0, 0.0));
        path.quad_to((1.0, 2.0), (2.0, 0.0)).unwrap();
        path.close_path().unwrap();
        let a = Area::new(&path).unwrap();
        let b = Area::new(&a).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.path_iter(None).elements().count(), 3);
    }

    #[test]
    fn emptiness() {
        assert!(Area::default().is_empty());
        let mut path = Path::default();
        path.move_to((1.0, 1.0));
        assert!(Area::from(path).is_empty());
        assert!(!Area::new(&Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap().is_empty());
    }

    #[test]
    fn queries_follow_source() {
        let mut area = Area::new(&Rect::new(0.0, 0.0, 2.0, 2.0)).unwrap();
        assert!(area.contains(Point::new(1.0, 1.0)));
        assert!(area.intersects(Rect::new(1.0, 1.0, 3.0, 3.0)));
        assert!(area.contains_rect(Rect::new(0.5, 0.5, 1.5, 1.5)));
        area.transform(&Affine::translate(10.0, 0.0));
        assert_eq!(area.bounding_box(), Rect::new(10.0, 0.0, 12.0, 2.0));
        assert!(!area.contains(Point::new(1.0, 1.0)));
        assert_eq!(area.to_path().segment_count(), 5);
    }
}
