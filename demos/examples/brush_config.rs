// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brush config.
//!
//! Load a partial brush configuration from JSON, fill in defaults, pull
//! out-of-range values back into range, and write it back.
//!
//! Run:
//! - `cargo run -p brushpick_demos --example brush_config`

use brushpick::{BrushConfig, BrushTool, MemoryMap, Modifiers, ToolEvent};

fn main() -> Result<(), serde_json::Error> {
    let stored = r#"{ "radius_px": 450, "mode": "replace", "add_modifier": "CONTROL" }"#;
    let config: BrushConfig = serde_json::from_str(stored)?;
    println!("loaded:    {config:?}");

    let mut tool = BrushTool::new(config);
    println!("effective: {:?}", tool.config());

    // Shift+wheel shrinks the brush; the tool keeps the last-used radius in its config.
    let mut map = MemoryMap::new();
    tool.handle(&mut map, ToolEvent::Activate);
    for _ in 0..10 {
        tool.handle(
            &mut map,
            ToolEvent::Wheel {
                delta: -1.0,
                modifiers: Modifiers::SHIFT,
            },
        );
    }
    println!("saved:     {}", serde_json::to_string_pretty(tool.config())?);
    Ok(())
}
