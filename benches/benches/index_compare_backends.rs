// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use brushpick_index::{Aabb2D, GridIndex, Index, LinearIndex};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::from_xywh(x0, y0, cell * 0.8, cell * 0.8));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb2D> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Aabb2D::from_xywh(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

/// Swept extents of a zig-zag stroke with `segments` steps of `step` units and brush `radius`.
fn gen_stroke_extents(segments: usize, step: f64, radius: f64) -> Vec<Aabb2D> {
    let mut out = Vec::with_capacity(segments);
    let (mut x, mut y) = (50.0, 50.0);
    for i in 0..segments {
        let (nx, ny) = (x + step, if i % 2 == 0 { y + step * 0.5 } else { y - step * 0.25 });
        out.push(Aabb2D::new(x.min(nx), y.min(ny), x.max(nx), y.max(ny)).inflate(radius));
        (x, y) = (nx, ny);
    }
    out
}

fn entries(rects: &[Aabb2D]) -> Vec<(Aabb2D, u32)> {
    rects
        .iter()
        .copied()
        .enumerate()
        .map(|(i, r)| (r, i as u32))
        .collect()
}

macro_rules! bench_backend {
    ($name:ident, $index:ty, $label:literal) => {
        fn $name(c: &mut Criterion) {
            let mut group = c.benchmark_group($label);
            for &n in &[64usize, 128, 256] {
                let rects = gen_grid_rects(n, 10.0);
                group.throughput(Throughput::Elements((n * n) as u64));
                group.bench_function(format!("build_n{}", n), |b| {
                    b.iter_batched(
                        || entries(&rects),
                        |e| black_box(<$index>::build(e).len()),
                        BatchSize::SmallInput,
                    )
                });
                let idx = <$index>::build(entries(&rects));
                let stroke = gen_stroke_extents(200, 4.0, 20.0);
                group.bench_function(format!("stroke_query_n{}", n), |b| {
                    let mut scratch = Vec::new();
                    let mut out = Vec::new();
                    b.iter(|| {
                        let mut hits = 0_usize;
                        for rect in &stroke {
                            out.clear();
                            idx.query_into(rect, &mut scratch, &mut out);
                            hits += out.len();
                        }
                        black_box(hits)
                    })
                });
            }
            let clustered = gen_clustered_rects(40, 500, 120.0);
            let idx = <$index>::build(entries(&clustered));
            let stroke = gen_stroke_extents(400, 5.0, 30.0);
            group.bench_function("stroke_query_clustered", |b| {
                let mut scratch = Vec::new();
                let mut out = Vec::new();
                b.iter(|| {
                    let mut hits = 0_usize;
                    for rect in &stroke {
                        out.clear();
                        idx.query_into(rect, &mut scratch, &mut out);
                        hits += out.len();
                    }
                    black_box(hits)
                })
            });
            group.finish();
        }
    };
}

bench_backend!(bench_packed, Index<u32>, "packed");
bench_backend!(bench_grid, GridIndex<u32>, "grid");
bench_backend!(bench_linear, LinearIndex<u32>, "linear");

criterion_group!(benches, bench_packed, bench_grid, bench_linear);
criterion_main!(benches);
