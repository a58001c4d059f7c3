// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tool configuration and the policies it selects.
//!
//! [`BrushConfig`] is plain serde data. Storing it is the host's job; the
//! engine only reads it and writes back the last-used radius.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::event::Modifiers;
use crate::host::FeatureId;

/// Smallest brush radius in pixels.
pub const MIN_RADIUS_PX: u32 = 1;
/// Largest brush radius in pixels.
pub const MAX_RADIUS_PX: u32 = 200;
/// Radius used when nothing has been configured.
pub const DEFAULT_RADIUS_PX: u32 = 20;
/// Wheel step used when nothing has been configured.
pub const DEFAULT_RADIUS_STEP_PX: u32 = 2;
/// Pointer travel, in pixels, below which moves do not record a segment.
pub const DEFAULT_MIN_MOVE_PX: f64 = 2.0;

/// Clamp any requested radius into `[MIN_RADIUS_PX, MAX_RADIUS_PX]`.
pub fn clamp_radius_px(requested: i64) -> u32 {
    let clamped = requested.clamp(i64::from(MIN_RADIUS_PX), i64::from(MAX_RADIUS_PX));
    if clamped != requested {
        tracing::debug!(requested, clamped, "brush radius out of range");
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Value was clamped into the u32 radius range above."
    )]
    let r = clamped as u32;
    r
}

/// Which layers a stroke tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetScope {
    /// Only the host's active layer.
    #[default]
    ActiveLayer,
    /// Every loaded vector layer with polygon geometry.
    PolygonLayers,
    /// Every loaded vector layer.
    VectorLayers,
}

/// How a stroke's hits combine with the existing selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Discard the prior selection and install the stroke's hits.
    #[default]
    Replace,
    /// Union the stroke's hits into the prior selection.
    Add,
}

impl SelectionMode {
    /// The other mode.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Replace => Self::Add,
            Self::Add => Self::Replace,
        }
    }

    /// Apply `hits` to `current` under this mode.
    ///
    /// `Replace` with no hits clears `current`.
    pub fn apply(self, current: &mut BTreeSet<FeatureId>, hits: &BTreeSet<FeatureId>) {
        match self {
            Self::Replace => current.clone_from(hits),
            Self::Add => current.extend(hits.iter().copied()),
        }
    }
}

/// Spatial index backend used for per-layer indexes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexBackend {
    /// Packed R-tree.
    #[default]
    Packed,
    /// Uniform grid.
    Grid,
    /// Linear scan.
    Linear,
}

/// Persistable brush tool settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Brush radius in screen pixels; also the last-used radius.
    pub radius_px: u32,
    /// Which layers a stroke targets.
    pub scope: TargetScope,
    /// Default combine mode.
    pub mode: SelectionMode,
    /// Pixels added or removed per wheel notch.
    pub radius_step_px: u32,
    /// Modifier that flips [`BrushConfig::mode`] for one stroke when held at press.
    /// Empty disables the override.
    pub add_modifier: Modifiers,
    /// Modifier that turns wheel input into radius changes. Empty means plain wheel input.
    pub radius_modifier: Modifiers,
    /// Minimum pointer travel in pixels before a move records a segment.
    pub min_move_px: f64,
    /// Backend for per-layer spatial indexes.
    pub index_backend: IndexBackend,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius_px: DEFAULT_RADIUS_PX,
            scope: TargetScope::default(),
            mode: SelectionMode::default(),
            radius_step_px: DEFAULT_RADIUS_STEP_PX,
            add_modifier: Modifiers::SHIFT,
            radius_modifier: Modifiers::SHIFT,
            min_move_px: DEFAULT_MIN_MOVE_PX,
            index_backend: IndexBackend::default(),
        }
    }
}

impl BrushConfig {
    /// Copy of the config with out-of-range values pulled back into range.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        out.radius_px = clamp_radius_px(i64::from(self.radius_px));
        out.radius_step_px = self.radius_step_px.clamp(1, MAX_RADIUS_PX);
        if out.radius_step_px != self.radius_step_px {
            tracing::debug!(
                requested = self.radius_step_px,
                clamped = out.radius_step_px,
                "radius step out of range"
            );
        }
        if !(self.min_move_px.is_finite() && self.min_move_px >= 0.0) {
            tracing::debug!(requested = self.min_move_px, "invalid minimum move, using default");
            out.min_move_px = DEFAULT_MIN_MOVE_PX;
        }
        out
    }
}
