// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D paths, with a focus on exact containment queries.
//!
//! The pathgeom library stores piecewise paths made of lines, quadratic and
//! cubic Bézier curves in a compact buffer, walks them through a single-pass
//! iteration protocol (optionally transformed, optionally flattened into
//! lines), and answers point-in-shape and rectangle-overlap queries with a
//! crossing-number algorithm that solves curves exactly instead of relying
//! on a flattening tolerance.
//!
//! # Examples
//!
//! Building a path and querying it:
//! ```
//! use pathgeom::{Path, Point, Rect, Shape, WindingRule};
//!
//! let mut path = Path::new(WindingRule::NonZero);
//! path.move_to((0.0, 0.0));
//! path.line_to((4.0, 0.0)).unwrap();
//! path.line_to((4.0, 4.0)).unwrap();
//! path.line_to((0.0, 4.0)).unwrap();
//! path.close_path().unwrap();
//!
//! assert!(path.contains(Point::new(2.0, 2.0)));
//! assert!(!path.contains(Point::new(5.0, 5.0)));
//! assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 4.0, 4.0));
//! assert!(path.intersects(Rect::new(3.0, 3.0, 6.0, 6.0)));
//! ```
//!
//! Every shape speaks the same iteration protocol, so primitives and paths
//! are interchangeable:
//! ```
//! use pathgeom::{Path, PathIterator, Rect, SegmentKind};
//!
//! let rect = Rect::new(1.0, 1.0, 3.0, 2.0);
//! let path = Path::from_shape(&rect, None).unwrap();
//! let mut it = path.iter();
//! let mut coords = [0.0; 6];
//! assert_eq!(it.current_segment(&mut coords).unwrap(), SegmentKind::MoveTo);
//! assert_eq!(&coords[..2], &[1.0, 1.0]);
//! ```
//!
//! # Feature Flags
//!
//! - `std` (enabled by default): Get floating point functions from the standard library.
//! - `libm`: Use floating point implementations from [libm][].
//!   This is useful for `no_std` environments.
//! - `mint`: Enable `From`/`Into` conversion of pathgeom and [mint][] types.
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on the value types.
//! - `schemars`: Add best-effort support for JSON schemas using [schemars][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//! The crate always requires an allocator.
//!
//! [libm]: https://docs.rs/libm
//! [mint]: https://docs.rs/mint
//! [schemars]: https://docs.rs/schemars

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if
)]
#![allow(
    single_use_lifetimes,
    clippy::exhaustive_enums,
    clippy::match_same_arms,
    clippy::missing_assert_message,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("pathgeom requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

// Only the serialization tests use serde_json.
#[cfg(all(test, not(feature = "serde")))]
use serde_json as _;

extern crate alloc;

mod affine;
mod area;
mod buffer;
mod common;
pub mod crossings;
mod cubicbez;
mod error;
mod flatten;
mod iter;
mod line;
mod param_curve;
mod path;
mod point;
mod quadbez;
mod rect;
mod segment;
mod shape;

pub use crate::affine::*;
pub use crate::area::*;
pub use crate::buffer::*;
pub use crate::crossings::RectCrossings;
pub use crate::cubicbez::*;
pub use crate::error::*;
pub use crate::flatten::*;
pub use crate::iter::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::path::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::rect::*;
pub use crate::segment::*;
pub use crate::shape::*;

/// Tolerance for near-equality of coordinates and near-zero determinants.
pub const EPSILON: f64 = 1e-9;
