// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events consumed by [`BrushTool`](crate::tool::BrushTool).
//!
//! Hosts translate their own pointer, wheel and key callbacks into these
//! values. Positions are already in map coordinates.

use kurbo::Point;
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Keyboard modifiers held while an event happened.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Super.
        const META    = 0b0000_1000;
    }
}

/// A host event, already mapped into map coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToolEvent {
    /// Primary button pressed.
    Press {
        /// Pointer position.
        pos: Point,
        /// Modifiers held at press time.
        modifiers: Modifiers,
    },
    /// Pointer moved, with or without the button held.
    Move {
        /// Pointer position.
        pos: Point,
    },
    /// Primary button released.
    Release {
        /// Pointer position.
        pos: Point,
    },
    /// Wheel or other secondary axis input.
    Wheel {
        /// Signed wheel delta; only its sign is used.
        delta: f64,
        /// Modifiers held during the wheel input.
        modifiers: Modifiers,
    },
    /// Modifier state changed without pointer input.
    Modifiers(Modifiers),
    /// The view scale changed (pan/zoom), in map units per pixel.
    ViewScale(f64),
    /// Explicit cancel, e.g. the Escape key.
    Cancel,
    /// The tool became the active map tool.
    Activate,
    /// The tool stopped being the active map tool.
    Deactivate,
}
