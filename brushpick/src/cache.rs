// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazily built, per-layer spatial indexes.
//!
//! An index is built the first time a stroke targets its layer and reused by
//! later strokes until the host reports that the layer's features changed.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use brushpick_geometry::{Geometry, bounding_extent};
use brushpick_index::{Aabb2D, GridIndex, Index, LinearIndex};

use crate::config::IndexBackend;
use crate::host::{FeatureId, LayerId, MapHost};

#[derive(Debug)]
enum AnyIndex {
    Packed(Index<usize>),
    Grid(GridIndex<usize>),
    Linear(LinearIndex<usize>),
}

impl AnyIndex {
    fn build(backend: IndexBackend, entries: Vec<(Aabb2D, usize)>) -> Self {
        match backend {
            IndexBackend::Packed => Self::Packed(Index::build(entries)),
            IndexBackend::Grid => Self::Grid(GridIndex::build(entries)),
            IndexBackend::Linear => Self::Linear(LinearIndex::build(entries)),
        }
    }

    fn query_into(&self, rect: &Aabb2D, scratch: &mut Vec<usize>, out: &mut Vec<usize>) {
        match self {
            Self::Packed(i) => i.query_into(rect, scratch, out),
            Self::Grid(i) => i.query_into(rect, scratch, out),
            Self::Linear(i) => i.query_into(rect, scratch, out),
        }
    }
}

/// The index and feature geometries of one layer.
#[derive(Debug)]
pub struct LayerIndex {
    index: AnyIndex,
    features: Vec<(FeatureId, Geometry)>,
    skipped: usize,
}

impl LayerIndex {
    /// Read every feature of `layer` from `host` and index its extent.
    ///
    /// Unreadable features and geometries that fail validation are skipped.
    /// A layer that cannot be read at all yields an empty index.
    pub fn build<H: MapHost + ?Sized>(host: &H, layer: LayerId, backend: IndexBackend) -> Self {
        let mut features = Vec::new();
        let mut entries = Vec::new();
        let mut skipped = 0_usize;
        match host.features(layer) {
            Ok(iter) => {
                for record in iter {
                    let (id, geometry) = match record {
                        Ok(pair) => pair,
                        Err(err) => {
                            tracing::debug!(%layer, %err, "skipping unreadable feature");
                            skipped += 1;
                            continue;
                        }
                    };
                    if let Err(err) = geometry.validate() {
                        tracing::debug!(%layer, feature = %id, %err, "skipping invalid geometry");
                        skipped += 1;
                        continue;
                    }
                    let Some(r) = bounding_extent(&geometry) else {
                        skipped += 1;
                        continue;
                    };
                    entries.push((Aabb2D::new(r.x0, r.y0, r.x1, r.y1), features.len()));
                    features.push((id, geometry));
                }
            }
            Err(err) => tracing::debug!(%layer, %err, "layer unavailable, indexing nothing"),
        }
        tracing::debug!(
            %layer,
            ?backend,
            indexed = features.len(),
            skipped,
            "built layer index"
        );
        Self {
            index: AnyIndex::build(backend, entries),
            features,
            skipped,
        }
    }

    /// Number of indexed features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no feature was indexed.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features dropped while building.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Append slots of features whose extent overlaps `rect` to `out`.
    pub fn candidates_into(&self, rect: &Aabb2D, scratch: &mut Vec<usize>, out: &mut Vec<usize>) {
        self.index.query_into(rect, scratch, out);
    }

    /// The feature stored at `slot`.
    pub fn feature(&self, slot: usize) -> Option<(FeatureId, &Geometry)> {
        self.features.get(slot).map(|(id, g)| (*id, g))
    }
}

/// Per-layer indexes shared read-only with strokes.
#[derive(Debug, Default)]
pub struct IndexCache {
    backend: IndexBackend,
    layers: HashMap<LayerId, Rc<LayerIndex>>,
    builds: usize,
}

impl IndexCache {
    /// An empty cache building indexes with `backend`.
    pub fn new(backend: IndexBackend) -> Self {
        Self {
            backend,
            layers: HashMap::new(),
            builds: 0,
        }
    }

    /// Backend used for new builds.
    pub fn backend(&self) -> IndexBackend {
        self.backend
    }

    /// Switch backend. Existing indexes are dropped when it changes.
    pub fn set_backend(&mut self, backend: IndexBackend) {
        if backend != self.backend {
            self.backend = backend;
            self.clear();
        }
    }

    /// The index of `layer`, building it on first use.
    pub fn get_or_build<H: MapHost + ?Sized>(
        &mut self,
        host: &H,
        layer: LayerId,
    ) -> Rc<LayerIndex> {
        if let Some(index) = self.layers.get(&layer) {
            return Rc::clone(index);
        }
        let index = Rc::new(LayerIndex::build(host, layer, self.backend));
        self.builds += 1;
        self.layers.insert(layer, Rc::clone(&index));
        index
    }

    /// Forget the index of `layer`. Returns whether one was cached.
    ///
    /// Strokes already holding the old index keep using it until they end.
    pub fn invalidate(&mut self, layer: LayerId) -> bool {
        let dropped = self.layers.remove(&layer).is_some();
        if dropped {
            tracing::debug!(%layer, "layer index invalidated");
        }
        dropped
    }

    /// Drop indexes of layers `host` no longer lists. Returns how many went.
    pub fn prune<H: MapHost + ?Sized>(&mut self, host: &H) -> usize {
        if self.layers.is_empty() {
            return 0;
        }
        let live: HashSet<LayerId> = host.layers().into_iter().map(|l| l.id).collect();
        let before = self.layers.len();
        self.layers.retain(|id, _| live.contains(id));
        let pruned = before - self.layers.len();
        if pruned > 0 {
            tracing::debug!(pruned, "dropped indexes of removed layers");
        }
        pruned
    }

    /// Forget every index.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Whether `layer` currently has a cached index.
    pub fn contains(&self, layer: LayerId) -> bool {
        self.layers.contains_key(&layer)
    }

    /// Number of index builds since creation.
    pub fn build_count(&self) -> usize {
        self.builds
    }
}
