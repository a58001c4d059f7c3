// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive brush tool: host events in, selections and feedback out.
//!
//! ## States
//!
//! - `Idle`: no stroke. Moves only update the cursor circle.
//! - `Dragging`: a stroke is being painted. Moves record segments once the
//!   pointer travelled far enough, or right away after a radius change.
//! - `Finalizing`: the release is being committed. Transient; the tool is
//!   back in `Idle` before [`BrushTool::handle`] returns.
//!
//! `Cancel`, `Deactivate` and a repeated `Activate` drop a stroke without
//! merging anything. Pointer events that do not fit the current state are
//! ignored.
//!
//! ## Minimal example
//!
//! ```
//! use brushpick::{BrushConfig, BrushTool, LayerKind, MemoryMap, Modifiers, Response, ToolEvent};
//! use brushpick_geometry::GeometryKind;
//! use kurbo::Point;
//!
//! let mut map = MemoryMap::new();
//! let wells = map.add_layer("wells", LayerKind::Vector(GeometryKind::Point));
//! map.add_feature(wells, Point::new(10.0, 0.0));
//! map.add_feature(wells, Point::new(500.0, 0.0));
//! map.set_active(Some(wells));
//!
//! let mut tool = BrushTool::new(BrushConfig::default());
//! tool.handle(&mut map, ToolEvent::Activate);
//! tool.handle(&mut map, ToolEvent::Press { pos: Point::ZERO, modifiers: Modifiers::empty() });
//! tool.handle(&mut map, ToolEvent::Move { pos: Point::new(30.0, 0.0) });
//! let Response::Committed(report) =
//!     tool.handle(&mut map, ToolEvent::Release { pos: Point::new(30.0, 0.0) })
//! else {
//!     panic!("stroke should commit");
//! };
//! assert_eq!(report.total(), 1);
//! assert_eq!(map.selection(wells).len(), 1);
//! ```

use std::collections::BTreeSet;

use kurbo::Point;

use crate::brush::BrushState;
use crate::cache::IndexCache;
use crate::config::{BrushConfig, SelectionMode};
use crate::engine::{SelectionEngine, StrokeReport};
use crate::event::{Modifiers, ToolEvent};
use crate::host::{FeatureId, LayerId, MapHost, Overlay};
use crate::tracker::StrokeTracker;

/// Where the tool is in a stroke.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ToolState {
    /// No stroke in progress.
    #[default]
    Idle,
    /// Button held, stroke being painted.
    Dragging,
    /// Release received, stroke being committed.
    Finalizing,
}

/// Outcome of handling one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// The event did not apply; the host may handle it itself.
    Ignored,
    /// Tool state or feedback changed.
    Updated,
    /// A stroke finished and its selection was pushed to the host.
    Committed(StrokeReport),
    /// A stroke was dropped without touching the selection.
    Cancelled,
}

/// Paint-to-select map tool.
#[derive(Debug)]
pub struct BrushTool {
    config: BrushConfig,
    brush: BrushState,
    tracker: StrokeTracker,
    engine: SelectionEngine,
    cache: IndexCache,
    state: ToolState,
    active: bool,
    // Last seen modifiers, reported to the host but never consulted.
    modifiers: Modifiers,
    // Radius changed since the last recorded segment.
    radius_dirty: bool,
}

impl BrushTool {
    /// An inactive tool using `config`.
    pub fn new(config: BrushConfig) -> Self {
        let config = config.sanitized();
        Self {
            brush: BrushState::new(config.radius_px),
            tracker: StrokeTracker::new(),
            engine: SelectionEngine::new(),
            cache: IndexCache::new(config.index_backend),
            state: ToolState::Idle,
            active: false,
            modifiers: Modifiers::empty(),
            radius_dirty: false,
            config,
        }
    }

    /// Current configuration, including the last-used radius.
    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect from the next stroke, except the radius.
    pub fn set_config(&mut self, config: BrushConfig) {
        let config = config.sanitized();
        self.cache.set_backend(config.index_backend);
        self.set_radius_px(i64::from(config.radius_px));
        self.config = config;
    }

    /// The brush.
    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    /// Current state.
    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Whether the tool is the active map tool.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Modifiers seen most recently.
    ///
    /// Informational only. The stroke mode is decided by the modifiers carried
    /// on [`ToolEvent::Press`], so a later [`ToolEvent::Modifiers`] never
    /// changes a stroke in progress.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Mode of the stroke in progress.
    pub fn stroke_mode(&self) -> Option<SelectionMode> {
        self.engine.mode()
    }

    /// Hits so far in `layer` for the stroke in progress.
    pub fn pending_hits(&self, layer: LayerId) -> Option<&BTreeSet<FeatureId>> {
        self.engine.hits(layer)
    }

    /// Set the brush radius in pixels, e.g. from a slider. Clamped to the allowed range.
    ///
    /// Returns whether the radius changed.
    pub fn set_radius_px(&mut self, requested: i64) -> bool {
        let changed = self.brush.set_radius_px(requested);
        self.config.radius_px = self.brush.radius_px();
        if changed && self.state == ToolState::Dragging {
            self.radius_dirty = true;
        }
        changed
    }

    /// Drop the cached index of `layer` after its features changed.
    pub fn invalidate_layer(&mut self, layer: LayerId) -> bool {
        self.cache.invalidate(layer)
    }

    /// Drop every cached index.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Feed one host event through the tool.
    pub fn handle<H: MapHost + ?Sized>(&mut self, host: &mut H, event: ToolEvent) -> Response {
        match event {
            ToolEvent::Activate => {
                let cancelled = self.abort();
                if cancelled {
                    host.clear_overlay();
                }
                self.active = true;
                if cancelled {
                    Response::Cancelled
                } else {
                    Response::Updated
                }
            }
            ToolEvent::Deactivate => {
                let cancelled = self.abort();
                host.clear_overlay();
                self.active = false;
                if cancelled {
                    Response::Cancelled
                } else {
                    Response::Updated
                }
            }
            ToolEvent::Cancel => {
                if self.abort() {
                    host.clear_overlay();
                    Response::Cancelled
                } else {
                    Response::Ignored
                }
            }
            ToolEvent::Modifiers(m) => {
                self.modifiers = m;
                Response::Updated
            }
            ToolEvent::ViewScale(mupp) => {
                let before = self.brush.map_units_per_pixel();
                if !self.brush.set_map_units_per_pixel(mupp) {
                    return Response::Ignored;
                }
                if self.state == ToolState::Dragging && mupp != before {
                    self.radius_dirty = true;
                }
                if self.active {
                    self.redraw(host);
                }
                Response::Updated
            }
            _ if !self.active => {
                tracing::debug!(?event, "pointer event while inactive");
                Response::Ignored
            }
            ToolEvent::Press { pos, modifiers } => self.press(host, pos, modifiers),
            ToolEvent::Move { pos } => {
                self.brush.set_center(pos);
                if self.state == ToolState::Dragging {
                    self.record(host, pos, false);
                }
                self.redraw(host);
                Response::Updated
            }
            ToolEvent::Release { pos } => self.release(host, pos),
            ToolEvent::Wheel { delta, modifiers } => self.wheel(host, delta, modifiers),
        }
    }

    fn press<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        pos: Point,
        modifiers: Modifiers,
    ) -> Response {
        if self.state != ToolState::Idle {
            tracing::debug!(state = ?self.state, "press during a stroke ignored");
            return Response::Ignored;
        }
        self.modifiers = modifiers;
        let add = self.config.add_modifier;
        let flip = !add.is_empty() && modifiers.contains(add);
        let mode = if flip {
            self.config.mode.flipped()
        } else {
            self.config.mode
        };
        self.brush.set_center(pos);
        self.tracker.begin(pos, self.brush.radius_map_units());
        self.engine.begin_stroke(&*host, &mut self.cache, self.config.scope, mode);
        self.radius_dirty = false;
        self.state = ToolState::Dragging;
        self.redraw(host);
        Response::Updated
    }

    fn release<H: MapHost + ?Sized>(&mut self, host: &mut H, pos: Point) -> Response {
        if self.state != ToolState::Dragging {
            tracing::debug!(state = ?self.state, "release without a stroke ignored");
            return Response::Ignored;
        }
        self.brush.set_center(pos);
        self.record(host, pos, true);
        self.state = ToolState::Finalizing;
        if self.tracker.segments().is_empty()
            && let Some(&press) = self.tracker.points().first()
        {
            let radius = self.brush.radius_map_units();
            self.engine.process_point(&*host, press, radius);
        }
        self.tracker.end();
        self.radius_dirty = false;
        let report = self.engine.commit(host);
        host.clear_overlay();
        self.state = ToolState::Idle;
        match report {
            Some(report) => {
                host.show_status(&report.to_string());
                tracing::info!(
                    total = report.total(),
                    segments = report.segments,
                    elapsed = ?report.elapsed,
                    "brush selection applied"
                );
                Response::Committed(report)
            }
            None => Response::Ignored,
        }
    }

    fn wheel<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        delta: f64,
        modifiers: Modifiers,
    ) -> Response {
        if !modifiers.contains(self.config.radius_modifier) {
            return Response::Ignored;
        }
        let step = i64::from(self.config.radius_step_px);
        let step = if delta > 0.0 {
            step
        } else if delta < 0.0 {
            -step
        } else {
            return Response::Ignored;
        };
        let current = i64::from(self.brush.radius_px());
        if self.set_radius_px(current + step) {
            tracing::trace!(radius_px = self.brush.radius_px(), "brush radius changed");
        }
        self.redraw(host);
        Response::Updated
    }

    /// Record `pos` as a segment if it moved far enough or the radius changed.
    fn record<H: MapHost + ?Sized>(&mut self, host: &H, pos: Point, force: bool) {
        let Some(last) = self.tracker.last_point() else {
            return;
        };
        let threshold = self.brush.px_to_map(self.config.min_move_px);
        let moved = pos.distance_squared(last) >= threshold * threshold;
        if !(moved || self.radius_dirty || (force && pos != last)) {
            return;
        }
        self.tracker.set_radius(self.brush.radius_map_units());
        if let Some(segment) = self.tracker.extend(pos) {
            self.engine.process_segment(host, &segment);
            self.radius_dirty = false;
        }
    }

    fn redraw<H: MapHost + ?Sized>(&self, host: &mut H) {
        let dragging = self.state == ToolState::Dragging;
        host.draw_overlay(&Overlay {
            cursor: Some(self.brush.cursor()),
            rubber_band: if dragging {
                self.tracker.points().to_vec()
            } else {
                Vec::new()
            },
            stroke_radius: self.tracker.radius(),
            pending_hits: self.engine.pending_hits(),
        });
    }

    fn abort(&mut self) -> bool {
        if self.state == ToolState::Idle {
            return false;
        }
        self.tracker.end();
        self.engine.cancel();
        self.radius_dirty = false;
        self.state = ToolState::Idle;
        true
    }
}
