// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replacing curves with chains of lines.

use smallvec::SmallVec;

use crate::{
    CubicBez, ParamCurve, PathEl, PathError, PathIterator, Point, QuadBez, SegmentKind,
    WindingRule,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// How many times a curve may be bisected before its pieces are emitted as
/// lines regardless of their flatness.
pub const DEFAULT_RECURSION_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug)]
enum Piece {
    Quad(QuadBez),
    Cubic(CubicBez),
}

impl Piece {
    fn flatness_squared(&self) -> f64 {
        match self {
            Piece::Quad(q) => q.flatness_squared(),
            Piece::Cubic(c) => c.flatness_squared(),
        }
    }

    fn end(&self) -> Point {
        match self {
            Piece::Quad(q) => q.end(),
            Piece::Cubic(c) => c.end(),
        }
    }

    fn subdivide(&self) -> (Piece, Piece) {
        match self {
            Piece::Quad(q) => {
                let (a, b) = q.subdivide();
                (Piece::Quad(a), Piece::Quad(b))
            }
            Piece::Cubic(c) => {
                let (a, b) = c.subdivide();
                (Piece::Cubic(a), Piece::Cubic(b))
            }
        }
    }
}

/// What the flattener currently presents.
#[derive(Clone, Copy, Debug)]
enum Current {
    MoveTo(Point),
    LineTo(Point),
    Close,
    Done,
}

/// A [`PathIterator`] adaptor that replaces every curve of the wrapped
/// iterator with lines.
///
/// Curves are bisected until the control points of each piece lie within
/// `flatness` of its chord, which bounds the distance between the curve and
/// the emitted line. Bisection stops at the recursion limit even if a piece
/// is still not flat, so the guarantee only holds for curves that become
/// flat within that many levels.
///
/// Moves, lines and closes pass through unchanged.
///
/// ```
/// use pathgeom::{Path, PathEl, PathIterator, Point, WindingRule};
///
/// let mut path = Path::new(WindingRule::NonZero);
/// path.move_to((0.0, 0.0));
/// path.quad_to((1.0, 2.0), (2.0, 0.0)).unwrap();
/// let els: Vec<_> = path.flattened(0.01).unwrap().elements().collect();
/// assert!(els.len() > 2);
/// assert!(els.iter().skip(1).all(|el| matches!(el, PathEl::LineTo(_))));
/// assert_eq!(els.last(), Some(&PathEl::LineTo(Point::new(2.0, 0.0))));
/// ```
#[derive(Clone, Debug)]
pub struct Flattening<I> {
    src: I,
    flatness: f64,
    flatness_sq: f64,
    limit: usize,
    /// Curve pieces still to emit, the next one on top.
    stack: SmallVec<[(Piece, usize); 16]>,
    current: Current,
    /// Start of the subpath being read.
    start: Point,
    /// End of the last segment read from `src`.
    last: Point,
}

impl<I: PathIterator> Flattening<I> {
    /// Flatten `src` with the default recursion limit.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidFlatness`] when `flatness` is negative or NaN.
    pub fn new(src: I, flatness: f64) -> Result<Self, PathError> {
        Flattening::with_limit(src, flatness, DEFAULT_RECURSION_LIMIT)
    }

    /// Flatten `src`, bisecting any curve at most `limit` times.
    ///
    /// A limit of zero replaces every curve with its chord.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidFlatness`] when `flatness` is negative or NaN.
    pub fn with_limit(src: I, flatness: f64, limit: usize) -> Result<Self, PathError> {
        if flatness.is_nan() || flatness < 0.0 {
            return Err(PathError::InvalidFlatness);
        }
        let mut flattening = Flattening {
            src,
            flatness,
            flatness_sq: flatness * flatness,
            limit,
            stack: SmallVec::new(),
            current: Current::Done,
            start: Point::ZERO,
            last: Point::ZERO,
        };
        flattening.load();
        Ok(flattening)
    }

    /// The maximum distance allowed between a curve and its lines.
    pub fn flatness(&self) -> f64 {
        self.flatness
    }

    /// The maximum number of bisections of a single curve.
    pub fn recursion_limit(&self) -> usize {
        self.limit
    }

    /// Present the next line of a pending curve, or else the next segment of
    /// the wrapped iterator.
    fn load(&mut self) {
        loop {
            if let Some(p) = self.next_piece() {
                self.current = Current::LineTo(p);
                return;
            }
            if self.src.is_done() {
                self.current = Current::Done;
                return;
            }
            let el = match self.src.current_el() {
                Ok(el) => el,
                Err(e) => {
                    log::warn!("stopping flattening early: {e}");
                    self.current = Current::Done;
                    return;
                }
            };
            self.src.advance();
            match el {
                PathEl::MoveTo(p) => {
                    self.start = p;
                    self.last = p;
                    self.current = Current::MoveTo(p);
                    return;
                }
                PathEl::LineTo(p) => {
                    self.last = p;
                    self.current = Current::LineTo(p);
                    return;
                }
                PathEl::ClosePath => {
                    self.last = self.start;
                    self.current = Current::Close;
                    return;
                }
                PathEl::QuadTo(p1, p2) => {
                    let q = QuadBez::new(self.last, p1, p2);
                    self.stack.push((Piece::Quad(q), 0));
                    self.last = p2;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    let c = CubicBez::new(self.last, p1, p2, p3);
                    self.stack.push((Piece::Cubic(c), 0));
                    self.last = p3;
                }
            }
        }
    }

    /// Bisect pending pieces until the top one is flat, then pop it.
    fn next_piece(&mut self) -> Option<Point> {
        while let Some((piece, level)) = self.stack.pop() {
            let flat = piece.flatness_squared() <= self.flatness_sq;
            if flat || level >= self.limit {
                if !flat {
                    log::debug!(
                        "flattening hit recursion limit {} with deviation {}",
                        self.limit,
                        piece.flatness_squared().sqrt()
                    );
                }
                return Some(piece.end());
            }
            let (a, b) = piece.subdivide();
            self.stack.push((b, level + 1));
            self.stack.push((a, level + 1));
        }
        None
    }
}

impl<I: PathIterator> PathIterator for Flattening<I> {
    #[inline]
    fn winding_rule(&self) -> WindingRule {
        self.src.winding_rule()
    }

    #[inline]
    fn is_done(&self) -> bool {
        matches!(self.current, Current::Done)
    }

    fn advance(&mut self) {
        if !self.is_done() {
            self.load();
        }
    }

    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
        match self.current {
            Current::MoveTo(p) => {
                coords[0] = p.x;
                coords[1] = p.y;
                Ok(SegmentKind::MoveTo)
            }
            Current::LineTo(p) => {
                coords[0] = p.x;
                coords[1] = p.y;
                Ok(SegmentKind::LineTo)
            }
            Current::Close => Ok(SegmentKind::Close),
            Current::Done => Err(PathError::IteratorExhausted),
        }
    }
}
