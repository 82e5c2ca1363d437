// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutable paths built from lines and Bézier curves.

use crate::buffer::SegmentBuffer;
use crate::{
    Affine, Elements, Flattening, PathEl, PathError, PathIter, PathIterator, Point, Rect,
    SegmentKind, Shape, Transform, INITIAL_CAPACITY,
};

/// The rule deciding which points a set of closed outlines encloses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingRule {
    /// A point is inside when a ray from it crosses the outline an odd
    /// number of times.
    EvenOdd,
    /// A point is inside when the signed crossings of a ray from it do not
    /// cancel out.
    #[default]
    NonZero,
}

impl WindingRule {
    /// Whether a signed crossing count from a point query means "inside".
    #[inline]
    pub fn is_inside(self, crossings: i32) -> bool {
        match self {
            WindingRule::EvenOdd => (crossings & 1) != 0,
            WindingRule::NonZero => crossings != 0,
        }
    }
}

impl TryFrom<u8> for WindingRule {
    type Error = PathError;

    fn try_from(value: u8) -> Result<Self, PathError> {
        match value {
            0 => Ok(WindingRule::EvenOdd),
            1 => Ok(WindingRule::NonZero),
            other => Err(PathError::InvalidWindingRule(other)),
        }
    }
}

impl From<WindingRule> for u8 {
    fn from(rule: WindingRule) -> u8 {
        match rule {
            WindingRule::EvenOdd => 0,
            WindingRule::NonZero => 1,
        }
    }
}

/// A path that can contain lines, quadratic and cubic Bézier segments, and
/// multiple subpaths.
///
/// Segments are kept in a compact buffer of tags and coordinates. Every
/// drawing segment must follow a position established by a move; the
/// builder methods enforce this and report [`PathError::MissingMoveTo`]
/// otherwise.
///
/// `Clone` produces a fully independent copy.
///
/// ```
/// use pathgeom::{Path, Point, WindingRule};
///
/// let mut path = Path::new(WindingRule::EvenOdd);
/// assert!(path.line_to((1.0, 1.0)).is_err());
/// path.move_to((0.0, 0.0));
/// path.line_to((1.0, 1.0)).unwrap();
/// path.close_path().unwrap();
/// path.close_path().unwrap();
/// assert_eq!(path.segment_count(), 3);
/// assert_eq!(path.current_point(), Some(Point::new(0.0, 0.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub(crate) buffer: SegmentBuffer,
    rule: WindingRule,
}

impl Default for Path {
    fn default() -> Self {
        Path::new(WindingRule::default())
    }
}

impl Path {
    /// Create a new, empty path.
    pub fn new(rule: WindingRule) -> Path {
        Path::with_capacity(rule, INITIAL_CAPACITY)
    }

    /// Create a new, empty path with room for `segments` segments.
    pub fn with_capacity(rule: WindingRule, segments: usize) -> Path {
        Path {
            buffer: SegmentBuffer::with_capacity(segments, 2 * segments),
            rule,
        }
    }

    /// Create a path holding a copy of another shape's outline.
    ///
    /// The winding rule is taken from the shape's iterator.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] if the shape's outline draws
    /// before it moves.
    pub fn from_shape<S: Shape + ?Sized>(
        shape: &S,
        transform: Option<Affine>,
    ) -> Result<Path, PathError> {
        if let Some(path) = shape.as_path() {
            let mut copy = path.clone();
            if let Some(t) = transform {
                copy.transform(&t);
            }
            return Ok(copy);
        }
        let it = shape.path_iter(transform);
        let mut path = Path::new(it.winding_rule());
        path.append(it, false)?;
        Ok(path)
    }

    /// The winding rule.
    #[inline]
    pub fn winding_rule(&self) -> WindingRule {
        self.rule
    }

    /// Replace the winding rule.
    pub fn set_winding_rule(&mut self, rule: WindingRule) {
        self.rule = rule;
    }

    /// Replace the winding rule from its raw value: 0 is even-odd, 1 is
    /// non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidWindingRule`] for any other value, leaving
    /// the rule unchanged.
    pub fn set_winding_rule_raw(&mut self, rule: u8) -> Result<(), PathError> {
        self.rule = WindingRule::try_from(rule)?;
        Ok(())
    }

    /// Start a new subpath at `p`.
    ///
    /// A move directly after another move replaces it.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        let p = p.into();
        if self.buffer.last_kind() == Some(SegmentKind::MoveTo) {
            self.buffer.last_coords_mut().copy_from_slice(&[p.x, p.y]);
        } else {
            self.buffer.push(SegmentKind::MoveTo, &[p.x, p.y]);
        }
    }

    /// Draw a line to `p`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] if the path is empty.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) -> Result<(), PathError> {
        let p = p.into();
        self.push_drawing(SegmentKind::LineTo, &[p.x, p.y])
    }

    /// Draw a quadratic Bézier curve through control point `p1` to `p2`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] if the path is empty.
    pub fn quad_to<P: Into<Point>>(&mut self, p1: P, p2: P) -> Result<(), PathError> {
        let (p1, p2) = (p1.into(), p2.into());
        self.push_drawing(SegmentKind::QuadTo, &[p1.x, p1.y, p2.x, p2.y])
    }

    /// Draw a cubic Bézier curve through control points `p1` and `p2` to `p3`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] if the path is empty.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) -> Result<(), PathError> {
        let (p1, p2, p3) = (p1.into(), p2.into(), p3.into());
        self.push_drawing(
            SegmentKind::CubicTo,
            &[p1.x, p1.y, p2.x, p2.y, p3.x, p3.y],
        )
    }

    /// Close the current subpath with a line back to its start.
    ///
    /// Closing an already closed subpath does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] if the path is empty.
    pub fn close_path(&mut self) -> Result<(), PathError> {
        match self.buffer.last_kind() {
            None => Err(PathError::MissingMoveTo),
            Some(SegmentKind::Close) => Ok(()),
            Some(_) => {
                self.buffer.push(SegmentKind::Close, &[]);
                Ok(())
            }
        }
    }

    /// Push a generic path element onto the path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] if `el` draws and the path is empty.
    pub fn push(&mut self, el: PathEl) -> Result<(), PathError> {
        match el {
            PathEl::MoveTo(p) => {
                self.move_to(p);
                Ok(())
            }
            PathEl::LineTo(p) => self.line_to(p),
            PathEl::QuadTo(p1, p2) => self.quad_to(p1, p2),
            PathEl::CurveTo(p1, p2, p3) => self.curve_to(p1, p2, p3),
            PathEl::ClosePath => self.close_path(),
        }
    }

    fn push_drawing(&mut self, kind: SegmentKind, coords: &[f64]) -> Result<(), PathError> {
        if self.buffer.is_empty() {
            return Err(PathError::MissingMoveTo);
        }
        self.buffer.push(kind, coords);
        Ok(())
    }

    /// Append the remaining segments of `src` to this path.
    ///
    /// When `connect` is true and this path is not empty, a leading move in
    /// `src` becomes a line to the same point. If that point is already the
    /// end of this path's last drawn segment, and that segment is not a
    /// close, the move is dropped altogether.
    ///
    /// # Errors
    ///
    /// Returns an error if `src` fails to produce a segment, or draws before
    /// any position is established. Segments appended before the failure
    /// are kept.
    pub fn append<I: PathIterator>(&mut self, mut src: I, mut connect: bool) -> Result<(), PathError> {
        let mut coords = [0.0; 6];
        while !src.is_done() {
            let kind = src.current_segment(&mut coords)?;
            if kind == SegmentKind::MoveTo && connect && !self.buffer.is_empty() {
                let p = Point::new(coords[0], coords[1]);
                let joined = self.buffer.last_kind() != Some(SegmentKind::Close)
                    && self.last_stored_point() == Some(p);
                if !joined {
                    self.line_to(p)?;
                }
            } else {
                self.push(PathEl::from_coords(kind, &coords)?)?;
            }
            src.advance();
            connect = false;
        }
        Ok(())
    }

    /// The final stored coordinate pair, regardless of segment type.
    fn last_stored_point(&self) -> Option<Point> {
        match *self.buffer.coords() {
            [.., x, y] => Some(Point::new(x, y)),
            _ => None,
        }
    }

    /// The point the next drawing segment starts from.
    ///
    /// After a close this is the start of the closed subpath. Returns `None`
    /// for an empty path.
    pub fn current_point(&self) -> Option<Point> {
        let n = self.buffer.len();
        let mut end = self.buffer.coord_len();
        if self.buffer.last_kind()? == SegmentKind::Close {
            // Walk back to the move that opened the subpath.
            for ix in (1..n.saturating_sub(1)).rev() {
                match self.buffer.kind(ix) {
                    Some(SegmentKind::MoveTo) | None => break,
                    Some(kind) => end -= kind.coord_count(),
                }
            }
        }
        match self.buffer.coords_at(0, end) {
            [.., x, y] => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    /// Map every stored coordinate through `t`, in place.
    pub fn transform(&mut self, t: &impl Transform) {
        log::trace!("transforming {} path coordinates", self.buffer.coord_len());
        self.buffer.transform(t);
    }

    /// A copy of this path mapped through `t`.
    #[must_use]
    pub fn transformed(&self, t: &impl Transform) -> Path {
        let mut path = self.clone();
        path.transform(t);
        path
    }

    /// Remove every segment, keeping the winding rule and allocation.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Release storage beyond what the current segments need.
    pub fn trim_to_size(&mut self) {
        self.buffer.shrink_to_fit();
    }

    /// Number of segments, including moves and closes.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.buffer.len()
    }

    /// Number of stored scalars.
    #[inline]
    pub fn coord_count(&self) -> usize {
        self.buffer.coord_len()
    }

    /// Room for segments and scalars before storage grows again.
    pub fn capacity(&self) -> (usize, usize) {
        self.buffer.capacity()
    }

    /// Returns `true` if the path contains no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Iterate over the segments as stored.
    pub fn iter(&self) -> PathIter<'_> {
        PathIter::new(self, None)
    }

    /// Iterate over the segments mapped through `t`.
    ///
    /// The path itself is not modified.
    pub fn iter_with<T: Transform>(&self, t: T) -> PathIter<'_, T> {
        PathIter::new(self, t)
    }

    /// Iterate over the segments as [`PathEl`] values.
    pub fn elements(&self) -> Elements<PathIter<'_>> {
        self.iter().elements()
    }

    /// Iterate over the segments with curves replaced by lines.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidFlatness`] when `flatness` is negative or NaN.
    pub fn flattened(&self, flatness: f64) -> Result<Flattening<PathIter<'_>>, PathError> {
        Flattening::new(self.iter(), flatness)
    }
}

impl Extend<PathEl> for Path {
    /// Extend the path, skipping elements that would draw before a move.
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        for el in iter {
            if let Err(e) = self.push(el) {
                log::warn!("dropping {:?}: {e}", el.kind());
            }
        }
    }
}

impl Shape for Path {
    type PathIter<'iter> = PathIter<'iter>;

    fn path_iter(&self, transform: Option<Affine>) -> PathIter<'_> {
        PathIter::new(self, transform)
    }

    /// The bounds of every stored coordinate, control points included.
    ///
    /// An empty path has a zero rectangle at the origin.
    fn bounding_box(&self) -> Rect {
        let mut pts = self
            .buffer
            .coords()
            .chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]));
        let Some(first) = pts.next() else {
            return Rect::ZERO;
        };
        pts.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
    }

    fn contains(&self, pt: Point) -> bool {
        // A lone move encloses nothing.
        if self.buffer.len() < 2 || !pt.is_finite() {
            return false;
        }
        crate::crossings::contains_point(self.iter(), pt).unwrap_or(false)
    }

    #[inline]
    fn as_path(&self) -> Option<&Path> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Affine, Path, PathEl, PathError, PathIterator, Point, Rect, SegmentKind, Shape,
        WindingRule, EPSILON,
    };

    fn square() -> Path {
        let mut path = Path::new(WindingRule::NonZero);
        path.move_to((0.0, 0.0));
        path.line_to((4.0, 0.0)).unwrap();
        path.line_to((4.0, 4.0)).unwrap();
        path.line_to((0.0, 4.0)).unwrap();
        path.close_path().unwrap();
        path
    }

    #[test]
    fn square_queries() {
        let path = square();
        assert!(path.contains(Point::new(2.0, 2.0)));
        assert!(!path.contains(Point::new(5.0, 5.0)));
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 4.0, 4.0));
        let kinds: Vec<_> = path.elements().map(|el| el.kind()).collect();
        assert_eq!(
            kinds,
            [
                SegmentKind::MoveTo,
                SegmentKind::LineTo,
                SegmentKind::LineTo,
                SegmentKind::LineTo,
                SegmentKind::Close
            ]
        );
    }

    #[test]
    fn drawing_needs_a_position() {
        let mut path = Path::default();
        assert_eq!(path.line_to((1.0, 1.0)), Err(PathError::MissingMoveTo));
        assert_eq!(
            path.quad_to((1.0, 1.0), (2.0, 2.0)),
            Err(PathError::MissingMoveTo)
        );
        assert_eq!(
            path.curve_to((1.0, 1.0), (2.0, 2.0), (3.0, 3.0)),
            Err(PathError::MissingMoveTo)
        );
        assert_eq!(path.close_path(), Err(PathError::MissingMoveTo));
        assert!(path.is_empty());
    }

    #[test]
    fn close_is_idempotent() {
        let mut path = square();
        let n = path.segment_count();
        path.close_path().unwrap();
        assert_eq!(path.segment_count(), n);
    }

    #[test]
    fn moves_coalesce() {
        let mut path = Path::default();
        path.move_to((1.0, 1.0));
        path.move_to((2.0, 3.0));
        assert_eq!(path.segment_count(), 1);
        assert_eq!(path.coord_count(), 2);
        assert_eq!(path.current_point(), Some(Point::new(2.0, 3.0)));
        // A move after a close starts a new subpath.
        path.line_to((5.0, 5.0)).unwrap();
        path.close_path().unwrap();
        path.move_to((7.0, 7.0));
        assert_eq!(path.segment_count(), 4);
    }

    #[test]
    fn growth_boundaries() {
        for n in [9, 10, 11, 19, 20, 21] {
            let mut open = Path::with_capacity(WindingRule::NonZero, 1);
            open.move_to((0.0, 0.0));
            for i in 1..=n {
                open.line_to((f64::from(i), 0.0)).unwrap();
            }
            let mut closed = open.clone();
            closed.close_path().unwrap();
            let a: Vec<_> = open.elements().collect();
            let b: Vec<_> = closed.elements().collect();
            assert_eq!(a.len(), n as usize + 1);
            assert_eq!(b.len(), a.len() + 1);
            assert_eq!(a[..], b[..a.len()]);
            assert_eq!(b.last(), Some(&PathEl::ClosePath));
            assert_eq!(a.last(), Some(&PathEl::LineTo(Point::new(f64::from(n), 0.0))));
        }
    }

    #[test]
    fn capacity_grows_in_steps() {
        let mut path = Path::with_capacity(WindingRule::NonZero, 0);
        path.move_to((0.0, 0.0));
        let (segments, coords) = path.capacity();
        assert!(segments >= 1 && coords >= 2);
        // Growth is never one element at a time.
        assert!(segments >= 10);
        path.trim_to_size();
        assert!(path.capacity().0 < segments);
    }

    #[test]
    fn current_point_after_close() {
        let mut path = Path::default();
        assert_eq!(path.current_point(), None);
        path.move_to((1.0, 1.0));
        path.quad_to((2.0, 0.0), (3.0, 1.0)).unwrap();
        assert_eq!(path.current_point(), Some(Point::new(3.0, 1.0)));
        path.close_path().unwrap();
        assert_eq!(path.current_point(), Some(Point::new(1.0, 1.0)));
        path.move_to((10.0, 10.0));
        path.curve_to((11.0, 10.0), (12.0, 11.0), (12.0, 12.0))
            .unwrap();
        path.line_to((10.0, 12.0)).unwrap();
        path.close_path().unwrap();
        assert_eq!(path.current_point(), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn round_trip_through_shape() {
        let mut path = square();
        path.move_to((1.0, 1.0));
        path.curve_to((2.0, 0.0), (3.0, 2.0), (3.0, 3.0)).unwrap();
        path.set_winding_rule(WindingRule::EvenOdd);
        let copy = Path::from_shape(&path, None).unwrap();
        assert_eq!(copy, path);
        let rect = Rect::new(0.0, 0.0, 1.0, 2.0);
        let once = Path::from_shape(&rect, None).unwrap();
        let twice = Path::from_shape(&once, None).unwrap();
        assert_eq!(once.winding_rule(), WindingRule::NonZero);
        assert!(once
            .elements()
            .zip(twice.elements())
            .all(|(a, b)| a.is_near(&b, EPSILON)));
    }

    #[test]
    fn copies_are_independent() {
        let original = square();
        let mut copy = original.clone();
        copy.transform(&Affine::translate(10.0, 0.0));
        copy.line_to((0.0, 0.0)).unwrap();
        assert_eq!(original.bounding_box(), Rect::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(original.segment_count(), 5);
    }

    #[test]
    fn append_connects() {
        let mut other = Path::default();
        other.move_to((4.0, 0.0));
        other.line_to((8.0, 0.0)).unwrap();

        // Same point as the current end: the move disappears.
        let mut path = Path::default();
        path.move_to((0.0, 0.0));
        path.line_to((4.0, 0.0)).unwrap();
        path.append(other.iter(), true).unwrap();
        assert_eq!(path.segment_count(), 3);

        // Different point: the move becomes a line.
        let mut path = Path::default();
        path.move_to((0.0, 0.0));
        path.line_to((2.0, 0.0)).unwrap();
        path.append(other.iter(), true).unwrap();
        let els: Vec<_> = path.elements().collect();
        assert_eq!(els[2], PathEl::LineTo(Point::new(4.0, 0.0)));
        assert_eq!(els.len(), 4);

        // After a close the move is turned into a line even if it matches.
        let mut path = Path::default();
        path.move_to((4.0, 0.0));
        path.line_to((0.0, 0.0)).unwrap();
        path.line_to((4.0, 0.0)).unwrap();
        path.close_path().unwrap();
        path.append(other.iter(), true).unwrap();
        assert_eq!(path.segment_count(), 6);

        // Without connect, moves are kept.
        let mut path = square();
        path.append(other.iter(), false).unwrap();
        let els: Vec<_> = path.elements().collect();
        assert_eq!(els[5], PathEl::MoveTo(Point::new(4.0, 0.0)));

        // Connecting onto an empty path is a plain copy.
        let mut path = Path::default();
        path.append(other.iter(), true).unwrap();
        assert_eq!(path, other);
    }

    #[test]
    fn append_rejects_headless_source() {
        let mut headless = Path::default();
        headless.move_to((0.0, 0.0));
        headless.line_to((1.0, 0.0)).unwrap();
        let mut it = headless.iter();
        it.advance();
        let mut path = Path::default();
        assert_eq!(path.append(it, false), Err(PathError::MissingMoveTo));
    }

    #[test]
    fn winding_rules() {
        assert_eq!(WindingRule::try_from(0), Ok(WindingRule::EvenOdd));
        assert_eq!(WindingRule::try_from(1), Ok(WindingRule::NonZero));
        assert_eq!(
            WindingRule::try_from(2),
            Err(PathError::InvalidWindingRule(2))
        );
        assert_eq!(u8::from(WindingRule::EvenOdd), 0);
        let mut path = square();
        assert_eq!(
            path.set_winding_rule_raw(9),
            Err(PathError::InvalidWindingRule(9))
        );
        assert_eq!(path.winding_rule(), WindingRule::NonZero);
        path.set_winding_rule_raw(0).unwrap();
        assert_eq!(path.winding_rule(), WindingRule::EvenOdd);

        assert!(WindingRule::EvenOdd.is_inside(-3));
        assert!(!WindingRule::EvenOdd.is_inside(-2));
        assert!(WindingRule::NonZero.is_inside(-2));
        assert!(!WindingRule::NonZero.is_inside(0));
    }

    #[test]
    fn transform_in_place() {
        let mut path = square();
        path.transform(&Affine::scale(0.5));
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 2.0, 2.0));
        let moved = path.transformed(&Affine::translate(1.0, 1.0));
        assert_eq!(moved.bounding_box(), Rect::new(1.0, 1.0, 3.0, 3.0));
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn bounds_include_control_points() {
        let mut path = Path::default();
        assert_eq!(path.bounding_box(), Rect::ZERO);
        path.move_to((0.0, 0.0));
        path.quad_to((1.0, 5.0), (2.0, 0.0)).unwrap();
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 2.0, 5.0));
    }

    #[test]
    fn reset_keeps_rule() {
        let mut path = square();
        path.set_winding_rule(WindingRule::EvenOdd);
        path.reset();
        assert!(path.is_empty());
        assert_eq!(path.current_point(), None);
        assert_eq!(path.winding_rule(), WindingRule::EvenOdd);
    }

    #[test]
    fn extend_skips_headless_elements() {
        let mut path = Path::default();
        path.extend([
            PathEl::LineTo(Point::new(1.0, 1.0)),
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(1.0, 1.0)),
        ]);
        assert_eq!(path.segment_count(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_inconsistent_storage() {
        let mut path = Path::new(WindingRule::EvenOdd);
        path.move_to((0.0, 0.0));
        path.line_to((4.0, 0.0)).unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);

        // Drop the line's coordinates but keep its tag.
        let truncated = json.replace(",4.0,0.0]", "]");
        assert_ne!(truncated, json);
        let err = serde_json::from_str::<Path>(&truncated).unwrap_err();
        assert!(err.to_string().contains("coordinate count"), "{err}");

        let headless = r#"{"buffer":{"kinds":["LineTo"],"coords":[1.0,2.0]},"rule":"NonZero"}"#;
        assert!(serde_json::from_str::<Path>(headless).is_err());
    }
}
