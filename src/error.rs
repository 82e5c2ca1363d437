// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors from building and iterating paths.

use core::fmt;

/// An error which can be returned when building or reading a path.
///
/// All of these are contract violations by the caller; none of them is
/// transient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PathError {
    /// A drawing segment was appended before any position was established,
    /// or an iterator did not start with a move.
    MissingMoveTo,
    /// A raw winding rule value that is neither even-odd nor non-zero.
    InvalidWindingRule(u8),
    /// The current segment of a finished iterator was read.
    IteratorExhausted,
    /// A segment was decoded from fewer scalars than its tag requires.
    MissingCoordinates,
    /// A flattening tolerance that is negative or NaN.
    InvalidFlatness,
    /// Stored coordinates do not add up to what the segment tags require.
    CoordinateMismatch,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::MissingMoveTo => {
                write!(f, "missing initial moveto in path definition")
            }
            PathError::InvalidWindingRule(rule) => {
                write!(f, "winding rule must be even-odd (0) or non-zero (1), got {rule}")
            }
            PathError::IteratorExhausted => write!(f, "path iterator out of bounds"),
            PathError::MissingCoordinates => {
                write!(f, "not enough coordinates for segment type")
            }
            PathError::InvalidFlatness => write!(f, "flatness must be a number >= 0"),
            PathError::CoordinateMismatch => {
                write!(f, "coordinate count does not match segment types")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PathError {}
