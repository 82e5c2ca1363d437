// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crossing numbers of rays and rectangles against path outlines.
//!
//! Containment is decided by casting a ray from the query point toward
//! positive x and summing the signed crossings of every edge with it: +1
//! for an edge heading toward increasing y, -1 for one heading toward
//! decreasing y. Open subpaths are treated as closed by a line back to
//! their start.
//!
//! Vertices on the ray are resolved by treating every edge as half-open in
//! y: an edge spanning `y0..y1` is crossed at `py` when
//! `min(y0, y1) <= py < max(y0, y1)`, and the crossing only counts when the
//! edge meets the ray at an x no smaller than the query x. Horizontal edges
//! never cross. As a consequence a point on the outline of an axis-aligned
//! square is inside on the top and right edges and outside on the bottom
//! and left ones, so squares that tile the plane claim every point exactly
//! once.
//!
//! Curves are not flattened for these queries. Quadratic and cubic segments
//! are split where y turns around, and each monotonic piece is solved to
//! machine precision for the parameter where it meets the ray.

use crate::{
    CubicBez, ParamCurve, ParamCurveExtrema, PathEl, PathError, PathIterator, Point, QuadBez,
    Rect, WindingRule,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Bisection depth past which curves are treated as their chords. Each
/// level halves the parameter interval, so beyond the mantissa width of an
/// `f64` further splits cannot make progress.
const MAX_RECT_LEVEL: u32 = 52;

/// The result of sweeping a rectangle against an outline.
///
/// Counts are doubled with respect to [`point_crossings`]: an edge passing
/// all the way through the band to the right of the rectangle counts once
/// at its top and once at its bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectCrossings {
    /// The outline stays clear of the rectangle and crosses the band to its
    /// right this many times, signed by direction.
    Count(i32),
    /// The outline passes through the rectangle's interior.
    Intersects,
}

impl RectCrossings {
    /// Whether the rectangle lies inside the outline under `rule`.
    pub fn is_inside(self, rule: WindingRule) -> bool {
        match self {
            RectCrossings::Count(c) => is_inside_doubled(rule, c),
            RectCrossings::Intersects => false,
        }
    }

    /// Whether the rectangle and the interior of the outline overlap under
    /// `rule`.
    pub fn overlaps(self, rule: WindingRule) -> bool {
        match self {
            RectCrossings::Count(c) => is_inside_doubled(rule, c),
            RectCrossings::Intersects => true,
        }
    }
}

fn is_inside_doubled(rule: WindingRule, crossings: i32) -> bool {
    match rule {
        WindingRule::EvenOdd => (crossings & 2) != 0,
        WindingRule::NonZero => crossings != 0,
    }
}

/// Whether `pt` is inside the outline, by the outline's own winding rule.
///
/// # Errors
///
/// Returns [`PathError::MissingMoveTo`] if the outline does not start with a
/// move, or any error the iterator reports.
pub fn contains_point<I: PathIterator>(it: I, pt: Point) -> Result<bool, PathError> {
    let rule = it.winding_rule();
    Ok(rule.is_inside(point_crossings(it, pt)?))
}

/// Whether `rect` lies entirely inside the outline.
///
/// Empty and NaN rectangles are never inside.
///
/// # Errors
///
/// Returns [`PathError::MissingMoveTo`] if the outline does not start with a
/// move, or any error the iterator reports.
pub fn contains_rect<I: PathIterator>(it: I, rect: Rect) -> Result<bool, PathError> {
    if rect.is_zero_area() {
        return Ok(false);
    }
    let rule = it.winding_rule();
    Ok(rect_crossings(it, rect)?.is_inside(rule))
}

/// Whether `rect` overlaps the interior of the outline.
///
/// Empty and NaN rectangles never overlap.
///
/// # Errors
///
/// Returns [`PathError::MissingMoveTo`] if the outline does not start with a
/// move, or any error the iterator reports.
pub fn intersects_rect<I: PathIterator>(it: I, rect: Rect) -> Result<bool, PathError> {
    if rect.is_zero_area() {
        return Ok(false);
    }
    let rule = it.winding_rule();
    Ok(rect_crossings(it, rect)?.overlaps(rule))
}

/// Signed number of times the outline crosses the ray from `pt` toward
/// positive x.
///
/// An empty outline has no crossings.
///
/// # Errors
///
/// Returns [`PathError::MissingMoveTo`] if the outline does not start with a
/// move, or any error the iterator reports.
pub fn point_crossings<I: PathIterator>(mut it: I, pt: Point) -> Result<i32, PathError> {
    if it.is_done() {
        return Ok(0);
    }
    let PathEl::MoveTo(mut start) = it.current_el()? else {
        return Err(PathError::MissingMoveTo);
    };
    it.advance();
    let mut cur = start;
    let mut crossings = 0;
    while !it.is_done() {
        match it.current_el()? {
            PathEl::MoveTo(p) => {
                if cur.y != start.y {
                    crossings += point_crossings_for_line(cur, start, pt);
                }
                start = p;
                cur = p;
            }
            PathEl::LineTo(p) => {
                crossings += point_crossings_for_line(cur, p, pt);
                cur = p;
            }
            PathEl::QuadTo(p1, p2) => {
                crossings += point_crossings_for_quad(&QuadBez::new(cur, p1, p2), pt);
                cur = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                crossings += point_crossings_for_cubic(&CubicBez::new(cur, p1, p2, p3), pt);
                cur = p3;
            }
            PathEl::ClosePath => {
                if cur.y != start.y {
                    crossings += point_crossings_for_line(cur, start, pt);
                }
                cur = start;
            }
        }
        it.advance();
    }
    if cur.y != start.y {
        crossings += point_crossings_for_line(cur, start, pt);
    }
    Ok(crossings)
}

/// Signed crossing of the ray from `pt` toward positive x by the line from
/// `p0` to `p1`: 0, or ±1 by the line's direction in y.
pub fn point_crossings_for_line(p0: Point, p1: Point, pt: Point) -> i32 {
    let (sign, ylo, yhi) = if p0.y < p1.y {
        (1, p0.y, p1.y)
    } else {
        (-1, p1.y, p0.y)
    };
    // Also rejects horizontal lines and NaN coordinates.
    if !(ylo..yhi).contains(&pt.y) {
        return 0;
    }
    if pt.x > p0.x.max(p1.x) {
        return 0;
    }
    if pt.x <= p0.x.min(p1.x) {
        return sign;
    }
    let x = p0.x + (pt.y - p0.y) * (p1.x - p0.x) / (p1.y - p0.y);
    if x >= pt.x {
        sign
    } else {
        0
    }
}

/// Signed crossings of the ray from `pt` toward positive x by a quadratic
/// Bézier segment.
pub fn point_crossings_for_quad(q: &QuadBez, pt: Point) -> i32 {
    let (ylo, yhi) = min_max([q.p0.y, q.p1.y, q.p2.y]);
    if !(ylo..yhi).contains(&pt.y) || pt.x > q.x_range().1 {
        return 0;
    }
    q.y_monotonic_ranges()
        .into_iter()
        .map(|range| monotonic_crossing(&q.subsegment(range), pt))
        .sum()
}

/// Signed crossings of the ray from `pt` toward positive x by a cubic
/// Bézier segment.
pub fn point_crossings_for_cubic(c: &CubicBez, pt: Point) -> i32 {
    let (ylo, yhi) = min_max([c.p0.y, c.p1.y, c.p2.y, c.p3.y]);
    if !(ylo..yhi).contains(&pt.y) || pt.x > c.x_range().1 {
        return 0;
    }
    c.y_monotonic_ranges()
        .into_iter()
        .map(|range| monotonic_crossing(&c.subsegment(range), pt))
        .sum()
}

fn min_max<const N: usize>(values: [f64; N]) -> (f64, f64) {
    values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// A curve whose horizontal extent is bounded by its control points.
trait RayCurve: ParamCurve {
    fn x_range(&self) -> (f64, f64);
}

impl RayCurve for QuadBez {
    fn x_range(&self) -> (f64, f64) {
        QuadBez::x_range(self)
    }
}

impl RayCurve for CubicBez {
    fn x_range(&self) -> (f64, f64) {
        CubicBez::x_range(self)
    }
}

/// Crossing of the ray by a piece of curve that is monotonic in y.
///
/// Such a piece meets any horizontal line at most once, so it contributes
/// like a line with the same end points, except that the meeting point is
/// found on the curve itself.
fn monotonic_crossing<C: RayCurve>(c: &C, pt: Point) -> i32 {
    let (p0, p1) = (c.start(), c.end());
    let (sign, ylo, yhi) = if p0.y < p1.y {
        (1, p0.y, p1.y)
    } else {
        (-1, p1.y, p0.y)
    };
    if !(ylo..yhi).contains(&pt.y) {
        return 0;
    }
    let (xlo, xhi) = c.x_range();
    if pt.x > xhi {
        return 0;
    }
    if pt.x <= xlo {
        return sign;
    }
    if c.eval(monotonic_root(c, pt.y)).x >= pt.x {
        sign
    } else {
        0
    }
}

/// Refinement steps after which [`monotonic_root`] gives up on narrowing
/// its bracket. Every other step at least halves it.
const MAX_ROOT_STEPS: usize = 128;

/// Bracket width below which [`monotonic_root`] stops refining.
const ROOT_TOLERANCE: f64 = 1e-15;

/// Parameter at which a piece monotonic in y reaches height `y`.
///
/// The end points of the piece must bracket `y`. Steps alternate between
/// the secant of the bracket and its midpoint, and each keeps the crossing
/// inside the bracket, so the result lies in [0, 1] even where rounding
/// makes the piece wiggle about `y`.
fn monotonic_root<C: ParamCurve>(c: &C, y: f64) -> f64 {
    let mut f_lo = c.start().y - y;
    let mut f_hi = c.end().y - y;
    if f_lo == 0.0 {
        return 0.0;
    }
    if f_hi == 0.0 {
        return 1.0;
    }
    let (mut lo, mut hi) = (0.0, 1.0);
    for step in 0..MAX_ROOT_STEPS {
        if hi - lo <= ROOT_TOLERANCE {
            break;
        }
        let secant = lo - f_lo * (hi - lo) / (f_hi - f_lo);
        let t = if step % 2 == 0 && secant > lo && secant < hi {
            secant
        } else {
            0.5 * (lo + hi)
        };
        let f = c.eval(t).y - y;
        if f == 0.0 {
            return t;
        }
        if (f < 0.0) == (f_lo < 0.0) {
            lo = t;
            f_lo = f;
        } else {
            hi = t;
            f_hi = f;
        }
    }
    if f_lo.abs() <= f_hi.abs() {
        lo
    } else {
        hi
    }
}

/// Sweep `rect` against the outline.
///
/// Returns [`RectCrossings::Intersects`] as soon as any part of the outline
/// is found inside the rectangle; otherwise the doubled crossing count of
/// the band to the right of the rectangle. Curves are bisected toward the
/// rectangle until each piece can be classified. An empty or NaN rectangle
/// has no crossings.
///
/// # Errors
///
/// Returns [`PathError::MissingMoveTo`] if the outline does not start with a
/// move, or any error the iterator reports.
pub fn rect_crossings<I: PathIterator>(mut it: I, rect: Rect) -> Result<RectCrossings, PathError> {
    if rect.is_zero_area() || it.is_done() {
        return Ok(RectCrossings::Count(0));
    }
    let PathEl::MoveTo(mut start) = it.current_el()? else {
        return Err(PathError::MissingMoveTo);
    };
    it.advance();
    let mut cur = start;
    let mut crossings = 0;
    let r = &rect;
    while !it.is_done() {
        let next = match it.current_el()? {
            PathEl::MoveTo(p) => {
                let c = if cur != start {
                    rect_line(crossings, r, cur, start)
                } else {
                    Some(crossings)
                };
                start = p;
                cur = p;
                c
            }
            PathEl::LineTo(p) => {
                let c = rect_line(crossings, r, cur, p);
                cur = p;
                c
            }
            PathEl::QuadTo(p1, p2) => {
                let c = rect_quad(crossings, r, QuadBez::new(cur, p1, p2), 0);
                cur = p2;
                c
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let c = rect_cubic(crossings, r, CubicBez::new(cur, p1, p2, p3), 0);
                cur = p3;
                c
            }
            PathEl::ClosePath => {
                let c = if cur != start {
                    rect_line(crossings, r, cur, start)
                } else {
                    Some(crossings)
                };
                cur = start;
                c
            }
        };
        match next {
            Some(c) => crossings = c,
            None => return Ok(RectCrossings::Intersects),
        }
        it.advance();
    }
    if cur != start {
        match rect_line(crossings, r, cur, start) {
            Some(c) => crossings = c,
            None => return Ok(RectCrossings::Intersects),
        }
    }
    Ok(RectCrossings::Count(crossings))
}

fn strictly_inside(r: &Rect, p: Point) -> bool {
    p.x > r.x0 && p.x < r.x1 && p.y > r.y0 && p.y < r.y1
}

/// Crossings of the band right of `r` by a chord from `y0` to `y1`, for
/// geometry known to lie right of `r`.
fn shadow_crossings(mut crossings: i32, r: &Rect, y0: f64, y1: f64) -> i32 {
    if y0 < y1 {
        if y0 <= r.y0 && y1 > r.y0 {
            crossings += 1;
        }
        if y0 < r.y1 && y1 >= r.y1 {
            crossings += 1;
        }
    } else if y1 < y0 {
        if y1 <= r.y0 && y0 > r.y0 {
            crossings -= 1;
        }
        if y1 < r.y1 && y0 >= r.y1 {
            crossings -= 1;
        }
    }
    crossings
}

/// Classify a line against `r`. `None` means the line enters the rectangle.
fn rect_line(crossings: i32, r: &Rect, p0: Point, p1: Point) -> Option<i32> {
    if (p0.y >= r.y1 && p1.y >= r.y1)
        || (p0.y <= r.y0 && p1.y <= r.y0)
        || (p0.x <= r.x0 && p1.x <= r.x0)
    {
        return Some(crossings);
    }
    if p0.x >= r.x1 && p1.x >= r.x1 {
        return Some(shadow_crossings(crossings, r, p0.y, p1.y));
    }
    if strictly_inside(r, p0) || strictly_inside(r, p1) {
        return None;
    }
    // Clip the line to the rectangle's horizontal band and see which side
    // the clipped piece falls on.
    let clip = |from: Point, to: Point| {
        if from.y < r.y0 {
            from.x + (r.y0 - from.y) * (to.x - from.x) / (to.y - from.y)
        } else if from.y > r.y1 {
            from.x + (r.y1 - from.y) * (to.x - from.x) / (to.y - from.y)
        } else {
            from.x
        }
    };
    let (xi0, xi1) = (clip(p0, p1), clip(p1, p0));
    if xi0 <= r.x0 && xi1 <= r.x0 {
        return Some(crossings);
    }
    if xi0 >= r.x1 && xi1 >= r.x1 {
        return Some(shadow_crossings(crossings, r, p0.y, p1.y));
    }
    None
}

/// Classify a quadratic curve against `r`, bisecting where the control
/// points alone cannot decide.
fn rect_quad(crossings: i32, r: &Rect, q: QuadBez, level: u32) -> Option<i32> {
    match classify_control_points(crossings, r, &[q.p0, q.p1, q.p2]) {
        Classified::Clear(n) => return Some(n),
        Classified::Hit => return None,
        Classified::Undecided => {}
    }
    if level > MAX_RECT_LEVEL {
        return rect_line(crossings, r, q.p0, q.p2);
    }
    let (a, b) = q.subdivide();
    if a.p2.is_nan() {
        log::debug!("skipping non-finite curve in rectangle sweep");
        return Some(crossings);
    }
    let crossings = rect_quad(crossings, r, a, level + 1)?;
    rect_quad(crossings, r, b, level + 1)
}

/// Classify a cubic curve against `r`, bisecting where the control points
/// alone cannot decide.
fn rect_cubic(crossings: i32, r: &Rect, c: CubicBez, level: u32) -> Option<i32> {
    match classify_control_points(crossings, r, &[c.p0, c.p1, c.p2, c.p3]) {
        Classified::Clear(n) => return Some(n),
        Classified::Hit => return None,
        Classified::Undecided => {}
    }
    if level > MAX_RECT_LEVEL {
        return rect_line(crossings, r, c.p0, c.p3);
    }
    let (a, b) = c.subdivide();
    if a.p3.is_nan() {
        log::debug!("skipping non-finite curve in rectangle sweep");
        return Some(crossings);
    }
    let crossings = rect_cubic(crossings, r, a, level + 1)?;
    rect_cubic(crossings, r, b, level + 1)
}

enum Classified {
    /// The curve stays out of the rectangle; the updated crossing count.
    Clear(i32),
    /// An end point lies inside the rectangle.
    Hit,
    Undecided,
}

/// Decide a curve from its control polygon alone, if possible.
fn classify_control_points(crossings: i32, r: &Rect, pts: &[Point]) -> Classified {
    let (first, last) = (pts[0], pts[pts.len() - 1]);
    if pts.iter().all(|p| p.y >= r.y1)
        || pts.iter().all(|p| p.y <= r.y0)
        || pts.iter().all(|p| p.x <= r.x0)
    {
        return Classified::Clear(crossings);
    }
    if pts.iter().all(|p| p.x >= r.x1) {
        // Only the end points matter: the control points may reach into
        // the band while both ends stay above or below it.
        return Classified::Clear(shadow_crossings(crossings, r, first.y, last.y));
    }
    if strictly_inside(r, first) || strictly_inside(r, last) {
        return Classified::Hit;
    }
    Classified::Undecided
}
