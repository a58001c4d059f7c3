// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=brushpick --heading-base-level=0

//! Brushpick: paint over a map to select vector features.
//!
//! The user holds the button and drags a circular brush across the map. Every
//! feature the brush touches along its path is selected, and the result is
//! merged into (or replaces) the layer's selection when the button is released.
//!
//! ## Pieces
//!
//! - [`BrushTool`]: the event-driven state machine a host feeds with [`ToolEvent`]s.
//! - [`StrokeTracker`]: records the stroke as radius-tagged [`StrokeSegment`]s.
//! - [`SelectionEngine`]: tests segments against layer indexes and commits hits.
//! - [`IndexCache`]: lazily built per-layer spatial indexes from [`brushpick_index`].
//! - [`MapHost`]: what the map application provides. [`MemoryMap`] is an
//!   in-memory implementation.
//!
//! Hit tests run on swept capsules from [`brushpick_geometry`], so fast strokes
//! leave no gaps between sampled pointer positions.
//!
//! ## Minimal usage
//!
//! ```
//! use brushpick::{BrushConfig, BrushTool, LayerKind, MemoryMap, Modifiers, SelectionMode, ToolEvent};
//! use brushpick_geometry::{GeometryKind, Polygon};
//! use kurbo::Point;
//!
//! let mut map = MemoryMap::new();
//! let parcels = map.add_layer("parcels", LayerKind::Vector(GeometryKind::Polygon));
//! for i in 0..5 {
//!     let x = f64::from(i) * 100.0;
//!     map.add_feature(parcels, Polygon::new(vec![
//!         Point::new(x, 0.0),
//!         Point::new(x + 50.0, 0.0),
//!         Point::new(x + 50.0, 50.0),
//!         Point::new(x, 50.0),
//!     ]));
//! }
//! map.set_active(Some(parcels));
//!
//! let mut tool = BrushTool::new(BrushConfig {
//!     mode: SelectionMode::Replace,
//!     ..BrushConfig::default()
//! });
//! tool.handle(&mut map, ToolEvent::Activate);
//! tool.handle(&mut map, ToolEvent::Press { pos: Point::new(25.0, 25.0), modifiers: Modifiers::empty() });
//! tool.handle(&mut map, ToolEvent::Move { pos: Point::new(225.0, 25.0) });
//! tool.handle(&mut map, ToolEvent::Release { pos: Point::new(225.0, 25.0) });
//!
//! assert_eq!(map.selection(parcels).len(), 3);
//! assert!(map.status().unwrap().starts_with("Brush selected 3 feature(s) [parcels: 3]"));
//! ```

pub mod brush;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod host;
pub mod memory;
pub mod tool;
pub mod tracker;

pub use brush::BrushState;
pub use cache::{IndexCache, LayerIndex};
pub use config::{
    BrushConfig, DEFAULT_RADIUS_PX, IndexBackend, MAX_RADIUS_PX, MIN_RADIUS_PX, SelectionMode,
    TargetScope, clamp_radius_px,
};
pub use engine::{LayerOutcome, SelectionEngine, StrokeReport};
pub use error::HostError;
pub use event::{Modifiers, ToolEvent};
pub use host::{
    FeatureId, FeatureIter, LayerId, LayerInfo, LayerKind, MapHost, Overlay, target_layers,
};
pub use memory::MemoryMap;
pub use tool::{BrushTool, Response, ToolState};
pub use tracker::{StrokeSegment, StrokeTracker};
