// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry basics.
//!
//! Compare resting and swept brush tests against a polygon with a hole.
//!
//! Run:
//! - `cargo run -p brushpick_demos --example geometry_basics`

use brushpick_geometry::{
    Capsule, Geometry, Polygon, bounding_extent, intersects_circle, intersects_swept_capsule,
};
use kurbo::Point;

fn ring(x: f64, y: f64, s: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + s, y),
        Point::new(x + s, y + s),
        Point::new(x, y + s),
    ]
}

fn main() {
    let donut = Geometry::Polygon(Polygon::with_holes(
        ring(0.0, 0.0, 100.0),
        vec![ring(25.0, 25.0, 50.0)],
    ));
    println!("extent: {:?}", bounding_extent(&donut));

    // Inside the hole, away from its ring: not a hit.
    let center = Point::new(50.0, 50.0);
    println!("circle r=5 at hole center: {}", intersects_circle(&donut, center, 5.0));
    // Large enough to reach the hole's ring.
    println!("circle r=30 at hole center: {}", intersects_circle(&donut, center, 30.0));

    // Two samples far outside, but the sweep between them crosses the polygon.
    let a = Point::new(-50.0, 10.0);
    let b = Point::new(150.0, 10.0);
    println!(
        "endpoints alone: {} {}, swept: {}",
        intersects_circle(&donut, a, 2.0),
        intersects_circle(&donut, b, 2.0),
        intersects_swept_capsule(&donut, a, b, 2.0)
    );

    let capsule = Capsule::new(a, b, 2.0);
    println!("query box for that sweep: {:?}", capsule.bounding_box());
}
