// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path iteration protocol.

use crate::{Affine, Path, PathEl, PathError, SegmentKind, Transform, WindingRule};

/// Forward-only, single-pass traversal of a shape's segments.
///
/// This is the protocol every [`Shape`](crate::Shape) speaks, and the only
/// thing the crossing engine and the flattener consume. An iterator starts
/// positioned on its first segment; [`advance`](PathIterator::advance) moves
/// to the next, and once [`is_done`](PathIterator::is_done) reports `true`
/// the iterator stays finished.
///
/// ```
/// use pathgeom::{Path, PathIterator, SegmentKind, WindingRule};
///
/// let mut path = Path::new(WindingRule::EvenOdd);
/// path.move_to((1.0, 2.0));
/// path.quad_to((3.0, 4.0), (5.0, 6.0)).unwrap();
///
/// let mut it = path.iter();
/// let mut coords = [0.0; 6];
/// assert_eq!(it.winding_rule(), WindingRule::EvenOdd);
/// it.advance();
/// assert_eq!(it.current_segment(&mut coords).unwrap(), SegmentKind::QuadTo);
/// assert_eq!(&coords[..4], &[3.0, 4.0, 5.0, 6.0]);
/// it.advance();
/// assert!(it.is_done());
/// assert!(it.current_segment(&mut coords).is_err());
/// ```
pub trait PathIterator {
    /// The rule deciding which points the traversed outline encloses.
    fn winding_rule(&self) -> WindingRule;

    /// Whether every segment has been visited.
    fn is_done(&self) -> bool;

    /// Move to the next segment. Does nothing once the iterator is done.
    fn advance(&mut self);

    /// Write the current segment's scalars into `coords` and return its tag.
    ///
    /// Only the first [`SegmentKind::coord_count`] entries are written.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IteratorExhausted`] once the iterator is done.
    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError>;

    /// The current segment as a [`PathEl`].
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IteratorExhausted`] once the iterator is done.
    fn current_el(&self) -> Result<PathEl, PathError> {
        let mut coords = [0.0; 6];
        let kind = self.current_segment(&mut coords)?;
        PathEl::from_coords(kind, &coords)
    }

    /// Adapt into a standard [`Iterator`] over the remaining elements.
    fn elements(self) -> Elements<Self>
    where
        Self: Sized,
    {
        Elements { inner: self }
    }
}

impl<I: PathIterator + ?Sized> PathIterator for &mut I {
    #[inline]
    fn winding_rule(&self) -> WindingRule {
        (**self).winding_rule()
    }

    #[inline]
    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    #[inline]
    fn advance(&mut self) {
        (**self).advance();
    }

    #[inline]
    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
        (**self).current_segment(coords)
    }
}

/// A cursor over the segments of a [`Path`].
///
/// The iterator borrows the path, so the path cannot change underneath it.
/// Every yielded segment is mapped through `T`; `None` leaves the
/// coordinates as stored.
#[derive(Clone, Debug)]
pub struct PathIter<'a, T = Option<Affine>> {
    path: &'a Path,
    segment: usize,
    offset: usize,
    transform: T,
}

impl<'a, T: Transform> PathIter<'a, T> {
    pub(crate) fn new(path: &'a Path, transform: T) -> Self {
        PathIter {
            path,
            segment: 0,
            offset: 0,
            transform,
        }
    }
}

impl<T: Transform> PathIterator for PathIter<'_, T> {
    #[inline]
    fn winding_rule(&self) -> WindingRule {
        self.path.winding_rule()
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.segment >= self.path.buffer.len()
    }

    fn advance(&mut self) {
        if let Some(kind) = self.path.buffer.kind(self.segment) {
            self.offset += kind.coord_count();
            self.segment += 1;
        }
    }

    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
        let kind = self
            .path
            .buffer
            .kind(self.segment)
            .ok_or(PathError::IteratorExhausted)?;
        let n = kind.coord_count();
        coords[..n].copy_from_slice(self.path.buffer.coords_at(self.offset, n));
        self.transform.transform_coords(&mut coords[..n]);
        Ok(kind)
    }
}

/// A standard [`Iterator`] over the elements of a [`PathIterator`].
///
/// Created by [`PathIterator::elements`].
#[derive(Clone, Debug)]
pub struct Elements<I> {
    inner: I,
}

impl<I: PathIterator> Iterator for Elements<I> {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        // A protocol iterator only fails to read when it is done.
        let el = self.inner.current_el().ok()?;
        self.inner.advance();
        Some(el)
    }
}
