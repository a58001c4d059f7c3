// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns stroke segments into per-layer feature selections.
//!
//! A stroke opens a session over its target layers. Each segment queries the
//! layer indexes with the segment's swept extent, confirms candidates with the
//! precise capsule test, and records hits. Nothing reaches the host until
//! [`SelectionEngine::commit`], so cancelling never leaves a partial merge.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use brushpick_geometry::Capsule;
use brushpick_index::Aabb2D;
use kurbo::Point;

use crate::cache::{IndexCache, LayerIndex};
use crate::config::{SelectionMode, TargetScope};
use crate::host::{FeatureId, LayerId, LayerInfo, MapHost, target_layers};
use crate::tracker::StrokeSegment;

/// What a stroke did to one layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerOutcome {
    /// Layer identifier.
    pub layer: LayerId,
    /// Layer display name.
    pub name: String,
    /// Features the stroke touched.
    pub hits: BTreeSet<FeatureId>,
    /// Hits that were not selected before the stroke.
    pub newly_selected: usize,
}

/// Summary of a committed stroke.
///
/// `Display` renders the status line shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrokeReport {
    /// Mode the stroke was committed with.
    pub mode: SelectionMode,
    /// One entry per targeted layer, in the host's layer order.
    pub layers: Vec<LayerOutcome>,
    /// Segments processed.
    pub segments: usize,
    /// Time spent querying, testing and committing.
    pub elapsed: Duration,
}

impl StrokeReport {
    /// Hits across all layers.
    pub fn total(&self) -> usize {
        self.layers.iter().map(|l| l.hits.len()).sum()
    }

    /// Hits in `layer`, if it was targeted.
    pub fn hits(&self, layer: LayerId) -> Option<&BTreeSet<FeatureId>> {
        self.layers.iter().find(|l| l.layer == layer).map(|l| &l.hits)
    }
}

impl fmt::Display for StrokeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed.as_millis();
        if self.layers.is_empty() {
            return write!(f, "Brush selected 0 features in {ms} ms");
        }
        write!(f, "Brush selected {} feature(s) [", self.total())?;
        for (i, l) in self.layers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", l.name, l.hits.len())?;
        }
        write!(f, "] in {ms} ms")
    }
}

#[derive(Debug)]
struct LayerPass {
    info: LayerInfo,
    index: Rc<LayerIndex>,
    hits: BTreeSet<FeatureId>,
    // Matched geometrically but not drawn; not retested.
    hidden: BTreeSet<FeatureId>,
}

#[derive(Debug)]
struct StrokeSession {
    mode: SelectionMode,
    passes: Vec<LayerPass>,
    segments: usize,
    busy: Duration,
}

/// Per-stroke selection state plus query buffers reused across strokes.
#[derive(Debug, Default)]
pub struct SelectionEngine {
    session: Option<StrokeSession>,
    scratch: Vec<usize>,
    candidates: Vec<usize>,
}

impl SelectionEngine {
    /// An engine with no stroke in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a stroke over the layers `scope` selects, building their indexes if needed.
    ///
    /// A stroke already in progress is discarded.
    pub fn begin_stroke<H: MapHost + ?Sized>(
        &mut self,
        host: &H,
        cache: &mut IndexCache,
        scope: TargetScope,
        mode: SelectionMode,
    ) {
        if self.session.take().is_some() {
            tracing::debug!("new stroke replaced an unfinished one");
        }
        let started = Instant::now();
        cache.prune(host);
        let passes: Vec<LayerPass> = target_layers(host, scope)
            .into_iter()
            .map(|info| LayerPass {
                index: cache.get_or_build(host, info.id),
                info,
                hits: BTreeSet::new(),
                hidden: BTreeSet::new(),
            })
            .collect();
        tracing::debug!(?scope, ?mode, layers = passes.len(), "stroke started");
        self.session = Some(StrokeSession {
            mode,
            passes,
            segments: 0,
            busy: started.elapsed(),
        });
    }

    /// Test one segment against every target layer. Returns the number of new hits.
    pub fn process_segment<H: MapHost + ?Sized>(
        &mut self,
        host: &H,
        segment: &StrokeSegment,
    ) -> usize {
        let found = self.sweep(host, segment.capsule(), segment.swept_extent());
        if let Some(session) = &mut self.session {
            session.segments += 1;
        }
        found
    }

    /// Test a resting brush, for strokes that never moved.
    pub fn process_point<H: MapHost + ?Sized>(
        &mut self,
        host: &H,
        center: Point,
        radius: f64,
    ) -> usize {
        let segment = StrokeSegment {
            start: center,
            end: center,
            radius,
        };
        self.sweep(host, segment.capsule(), segment.swept_extent())
    }

    fn sweep<H: MapHost + ?Sized>(&mut self, host: &H, capsule: Capsule, extent: Aabb2D) -> usize {
        let Self {
            session,
            scratch,
            candidates,
        } = self;
        let Some(session) = session else {
            tracing::debug!("segment outside of a stroke ignored");
            return 0;
        };
        let started = Instant::now();
        let mut found = 0;
        for pass in &mut session.passes {
            candidates.clear();
            pass.index.candidates_into(&extent, scratch, candidates);
            for &slot in candidates.iter() {
                let Some((id, geometry)) = pass.index.feature(slot) else {
                    continue;
                };
                if pass.hits.contains(&id) || pass.hidden.contains(&id) {
                    continue;
                }
                if !capsule.hits(geometry) {
                    continue;
                }
                if host.is_rendered(pass.info.id, id) {
                    pass.hits.insert(id);
                    found += 1;
                } else {
                    pass.hidden.insert(id);
                }
            }
        }
        session.busy += started.elapsed();
        tracing::trace!(candidates = candidates.len(), found, "segment tested");
        found
    }

    /// Push the stroke's hits to the host and close the stroke.
    ///
    /// Returns `None` when no stroke was in progress.
    pub fn commit<H: MapHost + ?Sized>(&mut self, host: &mut H) -> Option<StrokeReport> {
        let session = self.session.take()?;
        let started = Instant::now();
        let mut layers = Vec::with_capacity(session.passes.len());
        for pass in session.passes {
            let before = host.current_selection(pass.info.id);
            let newly_selected = pass.hits.iter().filter(|id| !before.contains(id)).count();
            if session.mode == SelectionMode::Replace || !pass.hits.is_empty() {
                host.set_selection(pass.info.id, &pass.hits, session.mode);
            }
            layers.push(LayerOutcome {
                layer: pass.info.id,
                name: pass.info.name,
                hits: pass.hits,
                newly_selected,
            });
        }
        let report = StrokeReport {
            mode: session.mode,
            layers,
            segments: session.segments,
            elapsed: session.busy + started.elapsed(),
        };
        tracing::debug!(
            total = report.total(),
            segments = report.segments,
            mode = ?report.mode,
            "stroke committed"
        );
        Some(report)
    }

    /// Drop the stroke without touching the host. Returns whether one was in progress.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.session.take().is_some();
        if cancelled {
            tracing::debug!("stroke cancelled");
        }
        cancelled
    }

    /// Whether a stroke is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Mode of the stroke in progress.
    pub fn mode(&self) -> Option<SelectionMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    /// Hits so far in `layer` for the stroke in progress.
    pub fn hits(&self, layer: LayerId) -> Option<&BTreeSet<FeatureId>> {
        self.session
            .as_ref()?
            .passes
            .iter()
            .find(|p| p.info.id == layer)
            .map(|p| &p.hits)
    }

    /// Hits so far across all layers of the stroke in progress.
    pub fn pending_hits(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| s.passes.iter().map(|p| p.hits.len()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexBackend;
    use crate::host::LayerKind;
    use crate::memory::MemoryMap;
    use brushpick_geometry::{Geometry, GeometryKind, Polygon};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn seg(a: Point, b: Point, radius: f64) -> StrokeSegment {
        StrokeSegment {
            start: a,
            end: b,
            radius,
        }
    }

    fn point_layer(points: &[Point]) -> (MemoryMap, LayerId) {
        let mut map = MemoryMap::new();
        let l = map.add_layer("points", LayerKind::Vector(GeometryKind::Point));
        for &pt in points {
            map.add_feature(l, pt);
        }
        map.set_active(Some(l));
        (map, l)
    }

    fn stroke(
        map: &mut MemoryMap,
        cache: &mut IndexCache,
        mode: SelectionMode,
        segments: &[StrokeSegment],
    ) -> StrokeReport {
        let mut engine = SelectionEngine::new();
        engine.begin_stroke(&*map, cache, TargetScope::ActiveLayer, mode);
        for s in segments {
            engine.process_segment(&*map, s);
        }
        engine.commit(map).unwrap()
    }

    fn ids(v: &[u64]) -> BTreeSet<FeatureId> {
        v.iter().copied().map(FeatureId).collect()
    }

    #[test]
    fn only_the_near_point_is_selected() {
        let (mut map, l) = point_layer(&[p(0.0, 0.0), p(300.0, 0.0)]);
        let mut cache = IndexCache::default();
        let mut engine = SelectionEngine::new();
        engine.begin_stroke(&map, &mut cache, TargetScope::ActiveLayer, SelectionMode::Replace);
        engine.process_point(&map, p(2.0, 0.0), 10.0);
        let report = engine.commit(&mut map).unwrap();
        assert_eq!(report.total(), 1);
        assert_eq!(map.selection(l), ids(&[1]));
    }

    #[test]
    fn starting_a_stroke_forgets_removed_layers() {
        let (mut map, l) = point_layer(&[p(0.0, 0.0)]);
        let gone = map.add_layer("gone", LayerKind::Vector(GeometryKind::Point));
        map.add_feature(gone, p(0.0, 0.0));
        let mut cache = IndexCache::default();
        let mut engine = SelectionEngine::new();
        engine.begin_stroke(&map, &mut cache, TargetScope::VectorLayers, SelectionMode::Add);
        engine.cancel();
        assert!(cache.contains(gone));

        map.remove_layer(gone);
        engine.begin_stroke(&map, &mut cache, TargetScope::VectorLayers, SelectionMode::Add);
        engine.process_point(&map, p(0.0, 0.0), 1.0);
        let report = engine.commit(&mut map).unwrap();
        assert!(!cache.contains(gone));
        assert!(cache.contains(l));
        assert_eq!(report.layers.len(), 1);
    }

    #[test]
    fn add_mode_unions_with_existing_selection() {
        let (mut map, l) = point_layer(&[p(0.0, 0.0), p(50.0, 0.0), p(100.0, 0.0)]);
        map.select(l, [FeatureId(3)]);
        let mut cache = IndexCache::default();
        let path = [seg(p(-5.0, 0.0), p(5.0, 0.0), 1.0)];
        let report = stroke(&mut map, &mut cache, SelectionMode::Add, &path);
        assert_eq!(map.selection(l), ids(&[1, 3]));
        assert_eq!(report.layers[0].newly_selected, 1);
    }

    #[test]
    fn replace_is_idempotent() {
        let (mut map, l) = point_layer(&[p(0.0, 0.0), p(50.0, 0.0), p(100.0, 0.0)]);
        map.select(l, [FeatureId(3)]);
        let mut cache = IndexCache::default();
        let path = [seg(p(-5.0, 0.0), p(55.0, 0.0), 1.0)];
        stroke(&mut map, &mut cache, SelectionMode::Replace, &path);
        let first = map.selection(l);
        stroke(&mut map, &mut cache, SelectionMode::Replace, &path);
        assert_eq!(map.selection(l), first);
        assert_eq!(first, ids(&[1, 2]));
    }

    #[test]
    fn replace_with_no_hits_clears() {
        let (mut map, l) = point_layer(&[p(0.0, 0.0)]);
        map.select(l, [FeatureId(1)]);
        let mut cache = IndexCache::default();
        let report = stroke(
            &mut map,
            &mut cache,
            SelectionMode::Replace,
            &[seg(p(500.0, 500.0), p(600.0, 500.0), 1.0)],
        );
        assert_eq!(report.total(), 0);
        assert!(map.selection(l).is_empty());
    }

    #[test]
    fn add_with_no_hits_leaves_host_alone() {
        let (mut map, l) = point_layer(&[p(0.0, 0.0)]);
        map.select(l, [FeatureId(1)]);
        let mut cache = IndexCache::default();
        stroke(&mut map, &mut cache, SelectionMode::Add, &[seg(p(500.0, 0.0), p(501.0, 0.0), 1.0)]);
        assert_eq!(map.selection(l), ids(&[1]));
        assert_eq!(map.selection_writes(), 0);
    }

    #[test]
    fn polygon_crossed_by_many_segments_is_selected_once() {
        let mut map = MemoryMap::new();
        let l = map.add_layer("parcels", LayerKind::Vector(GeometryKind::Polygon));
        map.add_feature(
            l,
            Polygon::new(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]),
        );
        map.set_active(Some(l));
        let mut cache = IndexCache::default();
        let mut engine = SelectionEngine::new();
        engine.begin_stroke(&map, &mut cache, TargetScope::ActiveLayer, SelectionMode::Add);
        let mut found = 0;
        let mut x = -60.0;
        while x < 60.0 {
            found += engine.process_segment(&map, &seg(p(x, 5.0), p(x + 4.0, 5.0), 50.0));
            x += 4.0;
        }
        assert_eq!(found, 1);
        let report = engine.commit(&mut map).unwrap();
        assert_eq!(report.total(), 1);
        assert_eq!(report.segments, 30);
    }

    #[test]
    fn each_segment_keeps_its_own_radius() {
        let (mut map, l) = point_layer(&[p(0.0, 8.0), p(20.0, 8.0)]);
        let mut cache = IndexCache::default();
        stroke(
            &mut map,
            &mut cache,
            SelectionMode::Replace,
            &[
                seg(p(0.0, 0.0), p(10.0, 0.0), 10.0),
                seg(p(10.0, 0.0), p(20.0, 0.0), 2.0),
            ],
        );
        assert_eq!(map.selection(l), ids(&[1]));
    }

    #[test]
    fn hidden_features_are_never_selected() {
        let (mut map, l) = point_layer(&[p(0.0, 0.0), p(1.0, 0.0)]);
        map.set_hidden(l, FeatureId(2), true);
        let mut cache = IndexCache::default();
        stroke(&mut map, &mut cache, SelectionMode::Add, &[seg(p(-5.0, 0.0), p(5.0, 0.0), 3.0)]);
        assert_eq!(map.selection(l), ids(&[1]));
    }

    #[test]
    fn cancel_leaves_host_untouched() {
        let (mut map, l) = point_layer(&[p(0.0, 0.0)]);
        map.select(l, [FeatureId(42)]);
        let mut cache = IndexCache::default();
        let mut engine = SelectionEngine::new();
        engine.begin_stroke(&map, &mut cache, TargetScope::ActiveLayer, SelectionMode::Replace);
        engine.process_point(&map, p(0.0, 0.0), 5.0);
        assert_eq!(engine.pending_hits(), 1);
        assert!(engine.cancel());
        assert!(!engine.is_active());
        assert!(engine.commit(&mut map).is_none());
        assert_eq!(map.selection(l), ids(&[42]));
        assert_eq!(map.selection_writes(), 0);
    }

    #[test]
    fn non_vector_and_empty_layers_are_harmless() {
        let mut map = MemoryMap::new();
        let r = map.add_layer("ortho", LayerKind::Raster);
        map.add_layer("empty", LayerKind::Vector(GeometryKind::Line));
        map.set_active(Some(r));
        let mut cache = IndexCache::default();
        let mut engine = SelectionEngine::new();
        engine.begin_stroke(&map, &mut cache, TargetScope::ActiveLayer, SelectionMode::Replace);
        engine.process_point(&map, p(0.0, 0.0), 5.0);
        let report = engine.commit(&mut map).unwrap();
        assert!(report.layers.is_empty());

        engine.begin_stroke(&map, &mut cache, TargetScope::VectorLayers, SelectionMode::Replace);
        engine.process_point(&map, p(0.0, 0.0), 5.0);
        let report = engine.commit(&mut map).unwrap();
        assert_eq!(report.layers.len(), 1);
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn index_never_loses_a_capsule_hit() {
        // Deterministic scatter of mixed geometries.
        let mut map = MemoryMap::new();
        let l = map.add_layer("mixed", LayerKind::Vector(GeometryKind::Polygon));
        let mut all = Vec::new();
        for i in 0..40_u32 {
            for j in 0..40_u32 {
                let (x, y) = (f64::from(i) * 7.3, f64::from(j) * 5.9);
                let g: Geometry = match (i + j) % 3 {
                    0 => p(x, y).into(),
                    1 => Geometry::LineString(vec![p(x, y), p(x + 3.0, y + 1.5)]),
                    _ => Polygon::new(vec![p(x, y), p(x + 2.0, y), p(x + 1.0, y + 2.0)]).into(),
                };
                all.push(g.clone());
                map.add_feature(l, g);
            }
        }
        map.set_active(Some(l));
        let segments = [
            seg(p(3.0, 3.0), p(150.0, 90.0), 4.0),
            seg(p(150.0, 90.0), p(150.0, 90.0), 11.0),
            seg(p(150.0, 90.0), p(40.0, 200.0), 0.5),
        ];
        for backend in [IndexBackend::Packed, IndexBackend::Grid, IndexBackend::Linear] {
            let mut cache = IndexCache::new(backend);
            map.select(l, Vec::new());
            stroke(&mut map, &mut cache, SelectionMode::Replace, &segments);
            let expected: BTreeSet<FeatureId> = all
                .iter()
                .enumerate()
                .filter(|(_, g)| segments.iter().any(|s| s.capsule().hits(g)))
                .map(|(i, _)| FeatureId(i as u64 + 1))
                .collect();
            assert!(!expected.is_empty());
            assert_eq!(map.selection(l), expected, "{backend:?}");
        }
    }

    #[test]
    fn report_renders_status_line() {
        let report = StrokeReport {
            mode: SelectionMode::Add,
            layers: vec![
                LayerOutcome {
                    layer: LayerId(1),
                    name: "parcels".into(),
                    hits: ids(&[1, 2, 3]),
                    newly_selected: 3,
                },
                LayerOutcome {
                    layer: LayerId(2),
                    name: "roads".into(),
                    hits: BTreeSet::new(),
                    newly_selected: 0,
                },
            ],
            segments: 4,
            elapsed: Duration::from_millis(12),
        };
        assert_eq!(
            report.to_string(),
            "Brush selected 3 feature(s) [parcels: 3, roads: 0] in 12 ms"
        );
        let empty = StrokeReport {
            layers: Vec::new(),
            ..report
        };
        assert_eq!(empty.to_string(), "Brush selected 0 features in 12 ms");
    }
}
