// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint select.
//!
//! Build a small map, paint two strokes across it, and print what got selected.
//! The second stroke holds Shift at press, which flips replace into add for that stroke.
//!
//! Run:
//! - `RUST_LOG=brushpick=debug cargo run -p brushpick_demos --example paint_select`

use brushpick::{
    BrushConfig, BrushTool, LayerKind, MapHost, MemoryMap, Modifiers, Response, SelectionMode,
    TargetScope, ToolEvent,
};
use brushpick_geometry::{Geometry, GeometryKind, Polygon};
use kurbo::Point;
use tracing_subscriber::EnvFilter;

fn parcel(x: f64, y: f64, s: f64) -> Polygon {
    Polygon::new(vec![
        Point::new(x, y),
        Point::new(x + s, y),
        Point::new(x + s, y + s),
        Point::new(x, y + s),
    ])
}

fn stroke(tool: &mut BrushTool, map: &mut MemoryMap, path: &[Point], modifiers: Modifiers) {
    let (first, rest) = path.split_first().expect("stroke needs at least one point");
    tool.handle(map, ToolEvent::Press { pos: *first, modifiers });
    for &pos in rest {
        tool.handle(map, ToolEvent::Move { pos });
    }
    let last = *rest.last().unwrap_or(first);
    if let Response::Committed(report) = tool.handle(map, ToolEvent::Release { pos: last }) {
        println!("{report}");
        for layer in &report.layers {
            println!("  {}: {:?} ({} new)", layer.name, layer.hits, layer.newly_selected);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut map = MemoryMap::new();
    let parcels = map.add_layer("parcels", LayerKind::Vector(GeometryKind::Polygon));
    let roads = map.add_layer("roads", LayerKind::Vector(GeometryKind::Line));
    map.add_layer("ortho", LayerKind::Raster);
    for i in 0..8 {
        for j in 0..8 {
            map.add_feature(parcels, parcel(f64::from(i) * 30.0, f64::from(j) * 30.0, 20.0));
        }
    }
    for j in 0..8 {
        let y = f64::from(j) * 30.0 + 25.0;
        map.add_feature(
            roads,
            Geometry::LineString(vec![Point::new(-10.0, y), Point::new(250.0, y)]),
        );
    }
    map.set_active(Some(parcels));

    let mut tool = BrushTool::new(BrushConfig {
        radius_px: 6,
        mode: SelectionMode::Replace,
        scope: TargetScope::VectorLayers,
        ..BrushConfig::default()
    });
    tool.handle(&mut map, ToolEvent::Activate);
    tool.handle(&mut map, ToolEvent::ViewScale(1.5));

    let across: Vec<Point> = (0..=24).map(|i| Point::new(f64::from(i) * 10.0, 10.0)).collect();
    stroke(&mut tool, &mut map, &across, Modifiers::empty());

    let down: Vec<Point> = (0..=24).map(|i| Point::new(100.0, f64::from(i) * 10.0)).collect();
    stroke(&mut tool, &mut map, &down, Modifiers::SHIFT);

    for layer in map.layers() {
        println!("{} selection: {:?}", layer.name, map.selection(layer.id));
    }
}
