// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact storage for path segments.

use alloc::vec::Vec;

use crate::{SegmentKind, Transform};

#[cfg(any(feature = "serde", test))]
use crate::PathError;

/// Number of segments a path reserves room for when first created.
pub const INITIAL_CAPACITY: usize = 20;

/// Smallest number of segments added when a path's storage grows.
pub const CAPACITY_STEP_MIN: usize = 10;

/// Segment count above which growth slows to an eighth of the current capacity.
pub const CAPACITY_STEP_MAX: usize = 500;

/// How many slots to add to storage currently holding `capacity` slots.
///
/// Buffers up to `max_step` slots at least double. Larger ones grow by
/// `max_step` or an eighth, whichever is more.
fn capacity_step(capacity: usize, min_step: usize, max_step: usize) -> usize {
    if capacity > max_step {
        max_step.max(capacity >> 3)
    } else {
        capacity.max(min_step)
    }
}

/// Parallel arrays of segment tags and their coordinates.
///
/// The coordinates of segment `i` start at the sum of the arities of the
/// segments before it; the arity table on [`SegmentKind`] is the only
/// source of that arithmetic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSegments"))]
pub(crate) struct SegmentBuffer {
    kinds: Vec<SegmentKind>,
    coords: Vec<f64>,
}

/// Deserialized segment storage, not yet checked for consistency.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
struct RawSegments {
    kinds: Vec<SegmentKind>,
    coords: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSegments> for SegmentBuffer {
    type Error = PathError;

    fn try_from(raw: RawSegments) -> Result<Self, PathError> {
        SegmentBuffer::from_parts(raw.kinds, raw.coords)
    }
}

impl SegmentBuffer {
    pub(crate) fn with_capacity(segments: usize, coords: usize) -> SegmentBuffer {
        SegmentBuffer {
            kinds: Vec::with_capacity(segments),
            coords: Vec::with_capacity(coords),
        }
    }

    /// Reassemble storage from its two arrays.
    ///
    /// The first segment must be a move and the coordinates must match the
    /// tags' arities exactly.
    #[cfg(any(feature = "serde", test))]
    pub(crate) fn from_parts(
        kinds: Vec<SegmentKind>,
        coords: Vec<f64>,
    ) -> Result<SegmentBuffer, PathError> {
        if matches!(kinds.first(), Some(k) if *k != SegmentKind::MoveTo) {
            return Err(PathError::MissingMoveTo);
        }
        let needed: usize = kinds.iter().map(|k| k.coord_count()).sum();
        if needed != coords.len() {
            return Err(PathError::CoordinateMismatch);
        }
        Ok(SegmentBuffer { kinds, coords })
    }

    /// Number of segments.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Number of stored scalars.
    #[inline]
    pub(crate) fn coord_len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub(crate) fn kind(&self, ix: usize) -> Option<SegmentKind> {
        self.kinds.get(ix).copied()
    }

    #[inline]
    pub(crate) fn last_kind(&self) -> Option<SegmentKind> {
        self.kinds.last().copied()
    }

    /// The `count` scalars starting at `offset`.
    #[inline]
    pub(crate) fn coords_at(&self, offset: usize, count: usize) -> &[f64] {
        &self.coords[offset..offset + count]
    }

    /// All stored scalars, in segment order.
    #[inline]
    pub(crate) fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// The scalars of the last segment.
    pub(crate) fn last_coords_mut(&mut self) -> &mut [f64] {
        let n = self.last_kind().map_or(0, SegmentKind::coord_count);
        let start = self.coords.len() - n;
        &mut self.coords[start..]
    }

    /// Append a segment. `coords` must hold exactly the tag's arity.
    pub(crate) fn push(&mut self, kind: SegmentKind, coords: &[f64]) {
        debug_assert_eq!(coords.len(), kind.coord_count());
        self.reserve(1, coords.len());
        self.kinds.push(kind);
        self.coords.extend_from_slice(coords);
    }

    /// Make room for `segments` more tags and `coords` more scalars.
    ///
    /// Grows by the capacity step rather than by exactly what is needed.
    pub(crate) fn reserve(&mut self, segments: usize, coords: usize) {
        if self.kinds.len() + segments > self.kinds.capacity() {
            let cap = self.kinds.capacity();
            let target = cap + capacity_step(cap, CAPACITY_STEP_MIN, CAPACITY_STEP_MAX).max(segments);
            log::trace!("growing segment storage from {cap} to {target}");
            self.kinds.reserve_exact(target - self.kinds.len());
        }
        if self.coords.len() + coords > self.coords.capacity() {
            let cap = self.coords.capacity();
            let step = capacity_step(cap, 2 * CAPACITY_STEP_MIN, 2 * CAPACITY_STEP_MAX);
            let target = cap + step.max(coords);
            log::trace!("growing coordinate storage from {cap} to {target}");
            self.coords.reserve_exact(target - self.coords.len());
        }
    }

    /// Map every stored coordinate pair in place. Tags are untouched.
    pub(crate) fn transform(&mut self, t: &impl Transform) {
        t.transform_coords(&mut self.coords);
    }

    pub(crate) fn clear(&mut self) {
        self.kinds.clear();
        self.coords.clear();
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.kinds.shrink_to_fit();
        self.coords.shrink_to_fit();
    }

    pub(crate) fn capacity(&self) -> (usize, usize) {
        (self.kinds.capacity(), self.coords.capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_policy() {
        assert_eq!(capacity_step(0, 10, 500), 10);
        assert_eq!(capacity_step(7, 10, 500), 10);
        assert_eq!(capacity_step(40, 10, 500), 40);
        assert_eq!(capacity_step(600, 10, 500), 500);
        assert_eq!(capacity_step(8000, 10, 500), 1000);
    }

    #[test]
    fn grows_in_steps() {
        let mut buf = SegmentBuffer::with_capacity(2, 4);
        buf.push(SegmentKind::MoveTo, &[0.0, 0.0]);
        buf.push(SegmentKind::LineTo, &[1.0, 0.0]);
        assert_eq!(buf.capacity(), (2, 4));
        buf.push(SegmentKind::CubicTo, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        let (segs, coords) = buf.capacity();
        assert!(segs >= 2 + CAPACITY_STEP_MIN);
        assert!(coords >= 4 + 2 * CAPACITY_STEP_MIN);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.coord_len(), 10);
        assert_eq!(buf.coords_at(4, 6), &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn last_coords_follow_arity() {
        let mut buf = SegmentBuffer::default();
        buf.push(SegmentKind::MoveTo, &[0.0, 0.0]);
        buf.push(SegmentKind::QuadTo, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(&*buf.last_coords_mut(), &[1.0, 2.0, 3.0, 4.0][..]);
        buf.push(SegmentKind::Close, &[]);
        assert!(buf.last_coords_mut().is_empty());
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.last_kind(), None);
    }

    #[test]
    fn from_parts_checks_consistency() {
        use SegmentKind::{Close, LineTo, MoveTo};
        let buf = SegmentBuffer::from_parts(vec![MoveTo, LineTo, Close], vec![0.0, 0.0, 4.0, 0.0])
            .unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.coords_at(2, 2), &[4.0, 0.0]);
        assert!(SegmentBuffer::from_parts(vec![], vec![]).unwrap().is_empty());
        assert_eq!(
            SegmentBuffer::from_parts(vec![MoveTo, LineTo], vec![0.0, 0.0]),
            Err(PathError::CoordinateMismatch)
        );
        assert_eq!(
            SegmentBuffer::from_parts(vec![MoveTo], vec![0.0, 0.0, 1.0]),
            Err(PathError::CoordinateMismatch)
        );
        assert_eq!(
            SegmentBuffer::from_parts(vec![LineTo, MoveTo], vec![1.0, 1.0, 0.0, 0.0]),
            Err(PathError::MissingMoveTo)
        );
    }
}
