// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple).
//! - `grid`: uniform grid fitted to the data bounds, great locality for evenly spread layers.
//! - `packed`: static R-tree with sort-tile-recursive packing; the general-purpose default.
//!
//! STR note
//! --------
//! For `n` entries and fan-out `M` the packer needs `P = ceil(n / M)` leaves. It sorts entries
//! by x-center, cuts them into `S = ceil(sqrt(P))` vertical slices, sorts each slice by
//! y-center and fills leaves of `M` consecutive entries. Parent levels repeat the process on
//! node boxes until one root remains.

pub mod flatvec;
pub mod grid;
pub mod packed;

pub use flatvec::FlatVec;
pub use grid::Grid;
pub use packed::Packed;
