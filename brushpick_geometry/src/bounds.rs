// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding extents.

use kurbo::Rect;

use crate::types::Geometry;

/// Axis-aligned box enclosing every coordinate of `geometry`.
///
/// Multi-part geometries yield the union of their part extents. Returns `None`
/// when the geometry has no coordinates.
pub fn bounding_extent(geometry: &Geometry) -> Option<Rect> {
    let mut acc: Option<Rect> = None;
    geometry.for_each_point(|p| {
        acc = Some(match acc {
            Some(r) => r.union_pt(p),
            None => Rect::from_points(p, p),
        });
    });
    acc
}
