// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by a [`MapHost`](crate::host::MapHost).
//!
//! None of these abort a stroke. A failing feature is skipped and a failing
//! layer contributes no candidates.

use brushpick_geometry::GeometryError;

use crate::host::{FeatureId, LayerId};

/// Failure while reading layer data from the host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The layer is unknown or no longer loaded.
    #[error("layer {0} is not available")]
    LayerUnavailable(LayerId),
    /// A single feature record could not be read.
    #[error("feature {feature} of layer {layer} could not be read: {reason}")]
    FeatureUnreadable {
        /// Owning layer.
        layer: LayerId,
        /// The unreadable feature.
        feature: FeatureId,
        /// Host-provided description.
        reason: String,
    },
    /// The host produced a geometry that cannot be tested.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
