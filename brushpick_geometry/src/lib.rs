// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=brushpick_geometry --heading-base-level=0

//! Brushpick Geometry: a Kurbo-native geometry kernel for brush selection.
//!
//! The kernel answers two questions about vector features in map coordinates:
//!
//! - What is the axis-aligned extent of a geometry? See [`bounding_extent`].
//! - Does a resting brush (a circle) or a moving brush (a capsule) touch it?
//!   See [`intersects_circle`], [`intersects_swept_capsule`] and [`Capsule`].
//!
//! Geometries are points, line strings, polygons with holes, and their
//! multi-part forms ([`Geometry`]). All functions are pure and allocation-free.
//!
//! ## Areal geometries
//!
//! A polygon is hit when the brush path reaches one of its rings, when the
//! brush path starts inside it, or when the whole polygon fits inside the
//! brush. The last case matters for small features under a large brush: no
//! ring crosses the brush outline, yet the polygon must be selected.
//!
//! Containment uses the even-odd rule, so a brush resting wholly inside a
//! hole does not hit the polygon.
//!
//! ## Minimal usage
//!
//! ```
//! use brushpick_geometry::{Geometry, Polygon, intersects_swept_capsule, bounding_extent};
//! use kurbo::Point;
//!
//! let square = Geometry::Polygon(Polygon::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ]));
//!
//! let extent = bounding_extent(&square).unwrap();
//! assert_eq!(extent.width(), 10.0);
//!
//! // A stroke passing straight through the square.
//! assert!(intersects_swept_capsule(
//!     &square,
//!     Point::new(-20.0, 5.0),
//!     Point::new(20.0, 5.0),
//!     1.0,
//! ));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bounds;
pub mod distance;
pub mod hit;
pub mod types;

pub use bounds::bounding_extent;
pub use hit::{Capsule, intersects_circle, intersects_swept_capsule, point_in_polygon};
pub use types::{Geometry, GeometryError, GeometryKind, Polygon};
