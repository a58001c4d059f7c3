// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend sized from the data it is built over.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, union_all};

/// Upper bound on cells per axis; keeps memory bounded for sparse layers.
const MAX_CELLS_PER_AXIS: usize = 256;

/// Uniform grid backend.
///
/// The grid covers the union of all entry boxes. The cell size follows the
/// mean entry extent so most entries land in a handful of cells, and is
/// coarsened when that would exceed [`MAX_CELLS_PER_AXIS`]. Every entry is
/// registered in each cell its box covers. Queries append straight into the
/// caller's buffer and emit a spanning entry from exactly one cell.
#[derive(Clone)]
pub struct Grid {
    bounds: Aabb2D,
    cell_w: f64,
    cell_h: f64,
    nx: usize,
    ny: usize,
    cells: Vec<Vec<usize>>,
    entries: Vec<(usize, Aabb2D)>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            bounds: Aabb2D::new(0.0, 0.0, 0.0, 0.0),
            cell_w: 1.0,
            cell_h: 1.0,
            nx: 0,
            ny: 0,
            cells: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl Grid {
    #[inline]
    fn floor_to_i64(v: f64) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Cell coordinates are clamped to the grid right after this cast."
        )]
        let i = v as i64;
        if (i as f64) > v { i - 1 } else { i }
    }

    fn axis_cells(extent: f64, mean: f64, n: usize) -> (usize, f64) {
        if extent <= 0.0 {
            return (1, 1.0);
        }
        let target = if mean > 0.0 {
            mean
        } else {
            // All entries are points; aim for a few entries per cell.
            extent / (n as f64).max(1.0)
        };
        let wanted = Self::floor_to_i64(extent / target).max(0) as usize + 1;
        let cells = wanted.clamp(1, MAX_CELLS_PER_AXIS);
        (cells, extent / cells as f64)
    }

    fn cell_x(&self, x: f64) -> usize {
        let c = Self::floor_to_i64((x - self.bounds.min_x) / self.cell_w);
        c.clamp(0, self.nx as i64 - 1) as usize
    }

    fn cell_y(&self, y: f64) -> usize {
        let c = Self::floor_to_i64((y - self.bounds.min_y) / self.cell_h);
        c.clamp(0, self.ny as i64 - 1) as usize
    }
}

impl Backend for Grid {
    fn build(items: &[(usize, Aabb2D)]) -> Self {
        let Some(bounds) = union_all(items.iter().map(|(_, a)| a)) else {
            return Self::default();
        };
        let n = items.len();
        let (sum_w, sum_h) = items
            .iter()
            .fold((0.0, 0.0), |(w, h), (_, a)| (w + a.width(), h + a.height()));
        let (nx, cell_w) = Self::axis_cells(bounds.width(), sum_w / n as f64, n);
        let (ny, cell_h) = Self::axis_cells(bounds.height(), sum_h / n as f64, n);

        let mut grid = Self {
            bounds,
            cell_w,
            cell_h,
            nx,
            ny,
            cells: vec![Vec::new(); nx * ny],
            entries: items.to_vec(),
        };
        for (i, (_, aabb)) in items.iter().enumerate() {
            let (x0, x1) = (grid.cell_x(aabb.min_x), grid.cell_x(aabb.max_x));
            let (y0, y1) = (grid.cell_y(aabb.min_y), grid.cell_y(aabb.max_y));
            for cy in y0..=y1 {
                for cx in x0..=x1 {
                    grid.cells[cy * nx + cx].push(i);
                }
            }
        }
        grid
    }

    fn query_rect_into(&self, rect: &Aabb2D, out: &mut Vec<usize>) {
        if self.entries.is_empty() || !self.bounds.overlaps(rect) {
            return;
        }
        let (x0, x1) = (self.cell_x(rect.min_x), self.cell_x(rect.max_x));
        let (y0, y1) = (self.cell_y(rect.min_y), self.cell_y(rect.max_y));
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                for &i in &self.cells[cy * self.nx + cx] {
                    let (id, aabb) = &self.entries[i];
                    if !aabb.overlaps(rect) {
                        continue;
                    }
                    // Report a spanning entry only from the cell holding the
                    // lower corner of its overlap with `rect`.
                    let owner_x = self.cell_x(aabb.min_x.max(rect.min_x));
                    let owner_y = self.cell_y(aabb.min_y.max(rect.min_y));
                    if owner_x == cx && owner_y == cy {
                        out.push(*id);
                    }
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Grid")
            .field("cell_w", &self.cell_w)
            .field("cell_h", &self.cell_h)
            .field("nx", &self.nx)
            .field("ny", &self.ny)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
