// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed R-tree backend built with sort-tile-recursive (STR) packing.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, cmp_f, union_all};

/// Default node fan-out.
const MAX_CHILDREN: usize = 8;

/// Static R-tree with STR packing.
///
/// Leaves are filled by sorting entries into vertical slices by x-center and
/// then by y-center within each slice, which keeps sibling boxes compact.
/// Parent levels are packed the same way until a single root remains.
#[derive(Clone, Default)]
pub struct Packed {
    root: Option<usize>,
    arena: Vec<PNode>,
    len: usize,
}

#[derive(Clone, Debug)]
struct PNode {
    bbox: Aabb2D,
    kind: PKind,
}

#[derive(Clone, Debug)]
enum PKind {
    Leaf(Vec<(usize, Aabb2D)>),
    Inner(Vec<usize>),
}

impl Packed {
    /// Number of slices for `count` items packed into groups of `MAX_CHILDREN`.
    fn slice_count(count: usize) -> usize {
        let groups = count.div_ceil(MAX_CHILDREN);
        let mut gx = 1_usize;
        while gx * gx < groups {
            gx += 1;
        }
        gx
    }

    fn str_order<T>(items: &mut [T], bbox_of: impl Fn(&T) -> Aabb2D) -> usize {
        items.sort_by(|a, b| cmp_f(bbox_of(a).center().0, bbox_of(b).center().0));
        let slice_size = items.len().div_ceil(Self::slice_count(items.len()));
        for slice in items.chunks_mut(slice_size) {
            slice.sort_by(|a, b| cmp_f(bbox_of(a).center().1, bbox_of(b).center().1));
        }
        slice_size
    }

    fn pack(items: &[(usize, Aabb2D)]) -> Self {
        if items.is_empty() {
            return Self::default();
        }
        let mut sorted = items.to_vec();
        let slice_size = Self::str_order(&mut sorted, |e| e.1);

        let mut arena: Vec<PNode> = Vec::new();
        let mut level: Vec<usize> = Vec::new();
        for slice in sorted.chunks(slice_size) {
            for chunk in slice.chunks(MAX_CHILDREN) {
                let Some(bbox) = union_all(chunk.iter().map(|(_, b)| b)) else {
                    continue;
                };
                level.push(arena.len());
                arena.push(PNode {
                    bbox,
                    kind: PKind::Leaf(chunk.to_vec()),
                });
            }
        }

        while level.len() > 1 {
            let slice_size = Self::str_order(&mut level, |&i| arena[i].bbox);
            let mut next = Vec::with_capacity(level.len().div_ceil(MAX_CHILDREN));
            for slice in level.chunks(slice_size) {
                for chunk in slice.chunks(MAX_CHILDREN) {
                    let Some(bbox) = union_all(chunk.iter().map(|&i| &arena[i].bbox)) else {
                        continue;
                    };
                    next.push(arena.len());
                    arena.push(PNode {
                        bbox,
                        kind: PKind::Inner(chunk.to_vec()),
                    });
                }
            }
            level = next;
        }

        Self {
            root: level.first().copied(),
            arena,
            len: items.len(),
        }
    }

    /// Height of the tree (0 when empty, 1 for a single leaf).
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self.root;
        while let Some(i) = cur {
            depth += 1;
            cur = match &self.arena[i].kind {
                PKind::Inner(children) => children.first().copied(),
                PKind::Leaf(_) => None,
            };
        }
        depth
    }
}

impl Backend for Packed {
    fn build(items: &[(usize, Aabb2D)]) -> Self {
        Self::pack(items)
    }

    fn query_rect_into(&self, rect: &Aabb2D, out: &mut Vec<usize>) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            let n = &self.arena[i];
            if !n.bbox.overlaps(rect) {
                continue;
            }
            match &n.kind {
                PKind::Leaf(entries) => {
                    for (slot, bbox) in entries {
                        if bbox.overlaps(rect) {
                            out.push(*slot);
                        }
                    }
                }
                PKind::Inner(children) => stack.extend_from_slice(children),
            }
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Debug for Packed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Packed")
            .field("arena_nodes", &self.arena.len())
            .field("entries", &self.len)
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}
