// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::Aabb2D;

/// Spatial backend abstraction used by [`IndexGeneric`](crate::IndexGeneric).
///
/// Backends are built once from the full entry set and never mutated. When the
/// underlying data changes, the owner builds a new backend.
pub trait Backend: Debug + Sized {
    /// Build the structure from `(slot, aabb)` pairs. Slots are dense indices
    /// into the owner's payload table.
    fn build(items: &[(usize, Aabb2D)]) -> Self;

    /// Append every slot whose AABB overlaps `rect` to `out`.
    ///
    /// Each matching slot is appended exactly once. Order is unspecified.
    fn query_rect_into(&self, rect: &Aabb2D, out: &mut Vec<usize>);

    /// Number of slots stored.
    fn len(&self) -> usize;

    /// Whether the backend stores no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
