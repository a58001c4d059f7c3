// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`MapHost`] for tests, demos and benchmarks.

use std::cell::Cell;
use std::collections::BTreeSet;

use brushpick_geometry::Geometry;

use crate::config::SelectionMode;
use crate::error::HostError;
use crate::host::{FeatureId, FeatureIter, LayerId, LayerInfo, LayerKind, MapHost, Overlay};

#[derive(Clone, Debug)]
enum Record {
    Feature(Geometry),
    Unreadable,
}

#[derive(Clone, Debug)]
struct MemoryLayer {
    info: LayerInfo,
    records: Vec<(FeatureId, Record)>,
    selection: BTreeSet<FeatureId>,
    hidden: BTreeSet<FeatureId>,
    next_id: u64,
}

/// A map held entirely in memory.
///
/// Feature ids are assigned per layer in insertion order starting at 1.
/// Selection is stored as plain sets and combined with
/// [`SelectionMode::apply`].
#[derive(Clone, Debug, Default)]
pub struct MemoryMap {
    layers: Vec<MemoryLayer>,
    active: Option<LayerId>,
    next_layer: u64,
    overlay: Option<Overlay>,
    status: Option<String>,
    feature_reads: Cell<usize>,
    selection_writes: usize,
}

impl MemoryMap {
    /// An empty map with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer and return its id.
    pub fn add_layer(&mut self, name: impl Into<String>, kind: LayerKind) -> LayerId {
        self.next_layer += 1;
        let id = LayerId(self.next_layer);
        self.layers.push(MemoryLayer {
            info: LayerInfo {
                id,
                name: name.into(),
                kind,
            },
            records: Vec::new(),
            selection: BTreeSet::new(),
            hidden: BTreeSet::new(),
            next_id: 0,
        });
        id
    }

    /// Remove a layer with its features and selection. Clears it as the active layer.
    pub fn remove_layer(&mut self, layer: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.info.id != layer);
        if self.active == Some(layer) {
            self.active = None;
        }
        self.layers.len() != before
    }

    /// Add a feature to `layer`. Returns `None` if the layer does not exist.
    pub fn add_feature(
        &mut self,
        layer: LayerId,
        geometry: impl Into<Geometry>,
    ) -> Option<FeatureId> {
        self.push_record(layer, Record::Feature(geometry.into()))
    }

    /// Add a feature whose record fails to load.
    pub fn add_unreadable(&mut self, layer: LayerId) -> Option<FeatureId> {
        self.push_record(layer, Record::Unreadable)
    }

    /// Remove a feature. The caller is responsible for invalidating any cached index.
    pub fn remove_feature(&mut self, layer: LayerId, feature: FeatureId) -> bool {
        let Some(l) = self.layer_mut(layer) else {
            return false;
        };
        let before = l.records.len();
        l.records.retain(|(id, _)| *id != feature);
        l.selection.remove(&feature);
        l.records.len() != before
    }

    /// Set the active layer.
    pub fn set_active(&mut self, layer: Option<LayerId>) {
        self.active = layer;
    }

    /// Mark a feature as filtered out by styling.
    pub fn set_hidden(&mut self, layer: LayerId, feature: FeatureId, hidden: bool) {
        if let Some(l) = self.layer_mut(layer) {
            if hidden {
                l.hidden.insert(feature);
            } else {
                l.hidden.remove(&feature);
            }
        }
    }

    /// Overwrite the selection of `layer` directly.
    pub fn select(&mut self, layer: LayerId, ids: impl IntoIterator<Item = FeatureId>) {
        if let Some(l) = self.layer_mut(layer) {
            l.selection = ids.into_iter().collect();
        }
    }

    /// Current selection of `layer`, empty for unknown layers.
    pub fn selection(&self, layer: LayerId) -> BTreeSet<FeatureId> {
        self.layer(layer)
            .map(|l| l.selection.clone())
            .unwrap_or_default()
    }

    /// The overlay last drawn, `None` after it was cleared.
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// The last status message shown.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// How many times any layer's features were read.
    pub fn feature_reads(&self) -> usize {
        self.feature_reads.get()
    }

    /// How many times a selection was pushed.
    pub fn selection_writes(&self) -> usize {
        self.selection_writes
    }

    fn layer(&self, id: LayerId) -> Option<&MemoryLayer> {
        self.layers.iter().find(|l| l.info.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut MemoryLayer> {
        self.layers.iter_mut().find(|l| l.info.id == id)
    }

    fn push_record(&mut self, layer: LayerId, record: Record) -> Option<FeatureId> {
        let l = self.layer_mut(layer)?;
        l.next_id += 1;
        let id = FeatureId(l.next_id);
        l.records.push((id, record));
        Some(id)
    }
}

impl MapHost for MemoryMap {
    fn layers(&self) -> Vec<LayerInfo> {
        self.layers.iter().map(|l| l.info.clone()).collect()
    }

    fn active_layer(&self) -> Option<LayerId> {
        self.active
    }

    fn features(&self, layer: LayerId) -> Result<FeatureIter<'_>, HostError> {
        let l = self.layer(layer).ok_or(HostError::LayerUnavailable(layer))?;
        self.feature_reads.set(self.feature_reads.get() + 1);
        Ok(Box::new(l.records.iter().map(move |(id, record)| match record {
            Record::Feature(g) => Ok((*id, g.clone())),
            Record::Unreadable => Err(HostError::FeatureUnreadable {
                layer,
                feature: *id,
                reason: "record is corrupt".into(),
            }),
        })))
    }

    fn current_selection(&self, layer: LayerId) -> BTreeSet<FeatureId> {
        self.selection(layer)
    }

    fn set_selection(&mut self, layer: LayerId, ids: &BTreeSet<FeatureId>, mode: SelectionMode) {
        self.selection_writes += 1;
        if let Some(l) = self.layer_mut(layer) {
            mode.apply(&mut l.selection, ids);
        }
    }

    fn is_rendered(&self, layer: LayerId, feature: FeatureId) -> bool {
        self.layer(layer).is_some_and(|l| !l.hidden.contains(&feature))
    }

    fn draw_overlay(&mut self, overlay: &Overlay) {
        self.overlay = Some(overlay.clone());
    }

    fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    fn show_status(&mut self, message: &str) {
        self.status = Some(message.to_owned());
    }
}
