// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::{FlatVec, Grid, Packed};
use crate::types::{Aabb2D, union_all};

/// A bulk-built AABB index parameterized by a spatial backend.
///
/// Payloads are stored in insertion order; the backend only sees dense slot
/// numbers. The index is immutable after [`IndexGeneric::build`].
#[derive(Clone)]
pub struct IndexGeneric<P, B: Backend> {
    entries: Vec<(Aabb2D, P)>,
    bounds: Option<Aabb2D>,
    backend: B,
}

impl<P: Copy, B: Backend> IndexGeneric<P, B> {
    /// Build an index over `(aabb, payload)` entries.
    ///
    /// Boxes with non-finite coordinates are dropped so they cannot poison
    /// queries; everything else is indexed as given.
    pub fn build(entries: impl IntoIterator<Item = (Aabb2D, P)>) -> Self {
        let entries: Vec<(Aabb2D, P)> = entries
            .into_iter()
            .filter(|(aabb, _)| aabb.is_finite() && !aabb.is_empty())
            .collect();
        let pairs: Vec<(usize, Aabb2D)> = entries
            .iter()
            .enumerate()
            .map(|(slot, (aabb, _))| (slot, *aabb))
            .collect();
        Self {
            bounds: union_all(pairs.iter().map(|(_, a)| a)),
            backend: B::build(&pairs),
            entries,
        }
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of all indexed boxes, `None` when empty.
    pub fn bounds(&self) -> Option<Aabb2D> {
        self.bounds
    }

    /// Payloads whose AABB overlaps `rect`.
    pub fn query(&self, rect: Aabb2D) -> impl Iterator<Item = P> + '_ {
        let mut slots = Vec::new();
        self.backend.query_rect_into(&rect, &mut slots);
        slots.into_iter().map(|slot| self.entries[slot].1)
    }

    /// Append payloads whose AABB overlaps `rect` to `out`, reusing the caller's buffer.
    ///
    /// `scratch` holds slot numbers between calls and is cleared on entry.
    pub fn query_into(&self, rect: &Aabb2D, scratch: &mut Vec<usize>, out: &mut Vec<P>) {
        scratch.clear();
        if self.bounds.is_none_or(|b| !b.overlaps(rect)) {
            return;
        }
        self.backend.query_rect_into(rect, scratch);
        out.extend(scratch.iter().map(|&slot| self.entries[slot].1));
    }

    /// The stored box for each payload, in build order.
    pub fn entries(&self) -> impl Iterator<Item = (Aabb2D, P)> + '_ {
        self.entries.iter().copied()
    }
}

impl<P, B: Backend> Debug for IndexGeneric<P, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexGeneric")
            .field("entries", &self.entries.len())
            .field("bounds", &self.bounds)
            .field("backend", &self.backend)
            .finish()
    }
}

/// Default index using the packed R-tree backend.
pub type Index<P> = IndexGeneric<P, Packed>;

/// Index using linear scans.
pub type LinearIndex<P> = IndexGeneric<P, FlatVec>;

/// Index using a uniform grid.
pub type GridIndex<P> = IndexGeneric<P, Grid>;
