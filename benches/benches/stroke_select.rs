// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use brushpick::{
    BrushConfig, BrushTool, IndexBackend, LayerKind, MemoryMap, Modifiers, SelectionMode,
    ToolEvent,
};
use brushpick_geometry::{GeometryKind, Polygon};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;

/// A `n` x `n` grid of small parcels in one active polygon layer.
fn parcel_map(n: usize, cell: f64) -> MemoryMap {
    let mut map = MemoryMap::new();
    let layer = map.add_layer("parcels", LayerKind::Vector(GeometryKind::Polygon));
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let s = cell * 0.7;
            map.add_feature(
                layer,
                Polygon::new(vec![
                    Point::new(x0, y0),
                    Point::new(x0 + s, y0),
                    Point::new(x0 + s, y0 + s),
                    Point::new(x0, y0 + s),
                ]),
            );
        }
    }
    map.set_active(Some(layer));
    map
}

/// Pointer samples along a diagonal sweep.
fn stroke_path(samples: usize, extent: f64) -> Vec<Point> {
    (0..samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            Point::new(t * extent, t * extent * 0.6 + (t * 40.0).sin() * 20.0)
        })
        .collect()
}

fn run_stroke(tool: &mut BrushTool, map: &mut MemoryMap, path: &[Point]) -> usize {
    let Some((&first, rest)) = path.split_first() else {
        return 0;
    };
    tool.handle(
        map,
        ToolEvent::Press {
            pos: first,
            modifiers: Modifiers::empty(),
        },
    );
    for &pos in rest {
        tool.handle(map, ToolEvent::Move { pos });
    }
    let last = rest.last().copied().unwrap_or(first);
    match tool.handle(map, ToolEvent::Release { pos: last }) {
        brushpick::Response::Committed(report) => report.total(),
        _ => 0,
    }
}

fn bench_stroke_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("stroke_select");
    let path = stroke_path(500, 2000.0);
    for &n in &[100usize, 200] {
        group.throughput(Throughput::Elements(path.len() as u64));
        for backend in [IndexBackend::Packed, IndexBackend::Grid, IndexBackend::Linear] {
            if backend == IndexBackend::Linear && n > 100 {
                continue;
            }
            let map = parcel_map(n, 20.0);
            let config = BrushConfig {
                radius_px: 15,
                mode: SelectionMode::Replace,
                index_backend: backend,
                ..BrushConfig::default()
            };

            // Index already cached: measures per-segment work only.
            group.bench_function(format!("{backend:?}_warm_n{n}"), |b| {
                let mut map = map.clone();
                let mut tool = BrushTool::new(config.clone());
                tool.handle(&mut map, ToolEvent::Activate);
                run_stroke(&mut tool, &mut map, &path);
                b.iter(|| black_box(run_stroke(&mut tool, &mut map, &path)));
            });

            // Fresh tool: includes the lazy index build.
            group.bench_function(format!("{backend:?}_cold_n{n}"), |b| {
                b.iter_batched(
                    || {
                        let mut tool = BrushTool::new(config.clone());
                        let mut map = map.clone();
                        tool.handle(&mut map, ToolEvent::Activate);
                        (tool, map)
                    },
                    |(mut tool, mut map)| black_box(run_stroke(&mut tool, &mut map, &path)),
                    BatchSize::LargeInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_stroke_select);
criterion_main!(benches);
