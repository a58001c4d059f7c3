// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned box type shared by every backend.

use core::cmp::Ordering;

/// Axis-aligned bounding box in map units.
///
/// Bounds are inclusive: a box whose `min == max` on both axes is a valid,
/// zero-area box (the extent of a point feature).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2D {
    /// Minimum x.
    pub min_x: f64,
    /// Minimum y.
    pub min_y: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Maximum y.
    pub max_y: f64,
}

impl Aabb2D {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create an AABB from origin and size.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Degenerate box covering a single point.
    pub const fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Whether this AABB contains the point (edges included).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && self.min_y <= y && x <= self.max_x && y <= self.max_y
    }

    /// Whether the two boxes share at least one point. Touching edges overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// The intersection of two AABBs. May be empty; check with [`Aabb2D::is_empty`].
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min_x: max_f(self.min_x, other.min_x),
            min_y: max_f(self.min_y, other.min_y),
            max_x: min_f(self.max_x, other.max_x),
            max_y: min_f(self.max_y, other.max_y),
        }
    }

    /// Smallest box enclosing both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: min_f(self.min_x, other.min_x),
            min_y: min_f(self.min_y, other.min_y),
            max_x: max_f(self.max_x, other.max_x),
            max_y: max_f(self.max_y, other.max_y),
        }
    }

    /// Grow the box by `d` on every side.
    pub fn inflate(&self, d: f64) -> Self {
        Self::new(self.min_x - d, self.min_y - d, self.max_x + d, self.max_y + d)
    }

    /// Return true if the AABB is inverted (no points). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    /// Width on the x axis, zero for inverted boxes.
    pub fn width(&self) -> f64 {
        max_f(self.max_x - self.min_x, 0.0)
    }

    /// Height on the y axis, zero for inverted boxes.
    pub fn height(&self) -> f64 {
        max_f(self.max_y - self.min_y, 0.0)
    }

    /// Area, zero for degenerate boxes.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Center point `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
        )
    }

    /// Whether all four coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}

/// Union of all boxes in the slice, or `None` if it is empty.
pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a Aabb2D>) -> Option<Aabb2D> {
    let mut it = boxes.into_iter();
    let first = *it.next()?;
    Some(it.fold(first, |acc, b| acc.union(b)))
}

pub(crate) fn cmp_f(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn min_f(a: f64, b: f64) -> f64 {
    if b < a { b } else { a }
}

fn max_f(a: f64, b: f64) -> f64 {
    if b > a { b } else { a }
}
