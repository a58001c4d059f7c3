// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny layers.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
#[derive(Clone, Default)]
pub struct FlatVec {
    entries: Vec<(usize, Aabb2D)>,
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Backend for FlatVec {
    fn build(items: &[(usize, Aabb2D)]) -> Self {
        Self {
            entries: items.to_vec(),
        }
    }

    fn query_rect_into(&self, rect: &Aabb2D, out: &mut Vec<usize>) {
        for (slot, aabb) in &self.entries {
            if aabb.overlaps(rect) {
                out.push(*slot);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_scan_finds_overlaps() {
        let b = FlatVec::build(&[
            (0, Aabb2D::new(0.0, 0.0, 10.0, 10.0)),
            (1, Aabb2D::new(20.0, 20.0, 30.0, 30.0)),
        ]);
        let mut out = Vec::new();
        b.query_rect_into(&Aabb2D::new(5.0, 5.0, 21.0, 21.0), &mut out);
        out.sort_unstable();
        assert_eq!(out, [0, 1]);

        out.clear();
        b.query_rect_into(&Aabb2D::new(11.0, 11.0, 19.0, 19.0), &mut out);
        assert!(out.is_empty());
    }
}
