// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between the brush engine and the map application.
//!
//! The engine never owns map data. It reads layers and features through
//! [`MapHost`], pushes finished selections back through it, and asks it to
//! draw transient feedback.

use std::collections::BTreeSet;
use std::fmt;

use brushpick_geometry::{Geometry, GeometryKind};
use kurbo::{Circle, Point};

use crate::config::{SelectionMode, TargetScope};
use crate::error::HostError;

/// Identifier of a layer, unique within a host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

/// Identifier of a feature, unique within its layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a layer holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayerKind {
    /// Vector features of the given geometry class.
    Vector(GeometryKind),
    /// Raster data; never targeted.
    Raster,
    /// Anything else the host shows in its layer list; never targeted.
    Other,
}

impl LayerKind {
    /// Whether the layer holds vector features.
    pub fn is_vector(self) -> bool {
        matches!(self, Self::Vector(_))
    }
}

/// A layer as listed by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerInfo {
    /// Layer identifier.
    pub id: LayerId,
    /// Display name, used in status messages.
    pub name: String,
    /// Layer content.
    pub kind: LayerKind,
}

/// Features of one layer, in the host's order.
pub type FeatureIter<'a> = Box<dyn Iterator<Item = Result<(FeatureId, Geometry), HostError>> + 'a>;

/// Transient brush feedback for the host to draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    /// Brush outline at the pointer, in map units.
    pub cursor: Option<Circle>,
    /// Points recorded so far in the current stroke.
    pub rubber_band: Vec<Point>,
    /// Radius of the stroke's most recent segment, in map units.
    pub stroke_radius: f64,
    /// Features confirmed so far in the current stroke, across layers.
    pub pending_hits: usize,
}

/// Map application services used by the brush.
///
/// Only the data accessors are required. Feedback hooks default to no-ops so
/// headless hosts can skip them.
pub trait MapHost {
    /// All layers in stable display order.
    fn layers(&self) -> Vec<LayerInfo>;

    /// The layer the user is currently working on, if any.
    fn active_layer(&self) -> Option<LayerId>;

    /// Every feature of `layer` with its geometry in map coordinates.
    fn features(&self, layer: LayerId) -> Result<FeatureIter<'_>, HostError>;

    /// Features currently selected in `layer`.
    fn current_selection(&self, layer: LayerId) -> BTreeSet<FeatureId>;

    /// Combine `ids` with the selection of `layer` under `mode`.
    fn set_selection(&mut self, layer: LayerId, ids: &BTreeSet<FeatureId>, mode: SelectionMode);

    /// Whether `feature` would be drawn with the current styling and filters.
    fn is_rendered(&self, layer: LayerId, feature: FeatureId) -> bool {
        let _ = (layer, feature);
        true
    }

    /// Draw or replace the brush feedback.
    fn draw_overlay(&mut self, overlay: &Overlay) {
        let _ = overlay;
    }

    /// Remove any brush feedback.
    fn clear_overlay(&mut self) {}

    /// Show a one-line status message.
    fn show_status(&mut self, message: &str) {
        let _ = message;
    }
}

/// Layers a stroke should test under `scope`, in the host's listing order.
pub fn target_layers<H: MapHost + ?Sized>(host: &H, scope: TargetScope) -> Vec<LayerInfo> {
    let active = host.active_layer();
    host.layers()
        .into_iter()
        .filter(|layer| match scope {
            TargetScope::ActiveLayer => active == Some(layer.id) && layer.kind.is_vector(),
            TargetScope::PolygonLayers => layer.kind == LayerKind::Vector(GeometryKind::Polygon),
            TargetScope::VectorLayers => layer.kind.is_vector(),
        })
        .collect()
}
