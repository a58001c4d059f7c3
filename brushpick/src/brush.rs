// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The brush itself: where it is and how big it is.

use kurbo::{Circle, Point};

use crate::config::{DEFAULT_RADIUS_PX, clamp_radius_px};

/// Cursor position and radius of the brush.
///
/// The radius is kept in screen pixels; the map-unit radius is derived from
/// the current view scale whenever it is read.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BrushState {
    center: Point,
    radius_px: u32,
    map_units_per_pixel: f64,
}

impl Default for BrushState {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_PX)
    }
}

impl BrushState {
    /// A brush at the origin with a 1:1 view scale.
    pub fn new(radius_px: u32) -> Self {
        Self {
            center: Point::ZERO,
            radius_px: clamp_radius_px(i64::from(radius_px)),
            map_units_per_pixel: 1.0,
        }
    }

    /// Brush center in map coordinates.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Move the brush.
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Radius in screen pixels.
    pub fn radius_px(&self) -> u32 {
        self.radius_px
    }

    /// Set the radius, clamped to the allowed range. Returns whether it changed.
    pub fn set_radius_px(&mut self, requested: i64) -> bool {
        let r = clamp_radius_px(requested);
        let changed = r != self.radius_px;
        self.radius_px = r;
        changed
    }

    /// Current view scale.
    pub fn map_units_per_pixel(&self) -> f64 {
        self.map_units_per_pixel
    }

    /// Update the view scale. Non-finite or non-positive scales are ignored.
    pub fn set_map_units_per_pixel(&mut self, mupp: f64) -> bool {
        if !(mupp.is_finite() && mupp > 0.0) {
            tracing::debug!(mupp, "ignoring invalid view scale");
            return false;
        }
        self.map_units_per_pixel = mupp;
        true
    }

    /// Convert a screen distance into map units at the current scale.
    pub fn px_to_map(&self, px: f64) -> f64 {
        px * self.map_units_per_pixel
    }

    /// Radius in map units at the current scale.
    pub fn radius_map_units(&self) -> f64 {
        self.px_to_map(f64::from(self.radius_px))
    }

    /// Outline of the brush at its center.
    pub fn cursor(&self) -> Circle {
        Circle::new(self.center, self.radius_map_units())
    }
}
