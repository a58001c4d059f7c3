// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=brushpick_index --heading-base-level=0

//! Brushpick Index: a bulk-built 2D AABB index for brush strokes.
//!
//! A brush stroke asks the same question hundreds of times per second: which
//! features have a bounding box touching this small swept box? This crate
//! answers it.
//!
//! - Build an index once from `(box, payload)` pairs.
//! - Query by overlapping rectangle, optionally into caller-owned buffers.
//! - Rebuild wholesale when the data changes; there is no incremental update API.
//!
//! Overlap is inclusive, so touching boxes and zero-area point boxes are found.
//! The index is a pre-filter: it may return boxes whose real geometry misses the
//! query, but it never misses a box that overlaps it.
//!
//! Backends are pluggable via a simple trait so you can swap the spatial strategy
//! without API churn. The default backend is a packed (STR) R-tree.
//!
//! # Example
//!
//! ```rust
//! use brushpick_index::{Aabb2D, Index};
//!
//! let idx: Index<u32> = Index::build([
//!     (Aabb2D::new(0.0, 0.0, 10.0, 10.0), 1),
//!     (Aabb2D::new(5.0, 5.0, 15.0, 15.0), 2),
//!     (Aabb2D::from_point(40.0, 40.0), 3),
//! ]);
//!
//! let mut hits: Vec<_> = idx.query(Aabb2D::new(6.0, 6.0, 7.0, 7.0)).collect();
//! hits.sort();
//! assert_eq!(hits, [1, 2]);
//! ```
//!
//! ## Choosing a backend
//!
//! - [`Packed`] (default, [`Index`]): static R-tree; good on irregular data.
//! - [`Grid`] ([`GridIndex`]): uniform grid sized from the data; very fast on evenly spread layers.
//! - [`FlatVec`] ([`LinearIndex`]): linear scans; smallest, fine for a few dozen entries.
//!
//! ### Float semantics
//!
//! Boxes with NaN or infinite coordinates are dropped at build time.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::{FlatVec, Grid, Packed};
pub use index::{GridIndex, Index, IndexGeneric, LinearIndex};
pub use types::Aabb2D;
