// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use brushpick_index::{Aabb2D, Index};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

fn gen_stroke_extents(segments: usize, step: f64, radius: f64) -> Vec<Aabb2D> {
    (0..segments)
        .map(|i| {
            let x = 20.0 + i as f64 * step;
            Aabb2D::new(x, 300.0, x + step, 300.0 + step).inflate(radius)
        })
        .collect()
}

fn to_rstar_rects(v: &[Aabb2D]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y]))
        .collect()
}

fn bench_rtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let stroke = gen_stroke_extents(150, 4.0, 15.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("brushpick_build_stroke_n{}", n), |b| {
            b.iter_batched(
                || {
                    let entries: Vec<_> = rects
                        .iter()
                        .copied()
                        .enumerate()
                        .map(|(i, r)| (r, i as u32))
                        .collect();
                    entries
                },
                |entries| {
                    let idx = Index::<u32>::build(entries);
                    let mut scratch = Vec::new();
                    let mut out = Vec::new();
                    for rect in &stroke {
                        idx.query_into(rect, &mut scratch, &mut out);
                    }
                    black_box(out.len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_stroke_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let mut hits = 0_usize;
                    for q in &stroke {
                        let aabb = AABB::from_corners([q.min_x, q.min_y], [q.max_x, q.max_y]);
                        hits += tree.locate_in_envelope_intersecting(&aabb).count();
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare);
criterion_main!(benches);
