// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precise brush intersection tests.
//!
//! A brush sweep from `start` to `end` with radius `r` covers the capsule of
//! all points within `r` of the segment `start..end`. A resting brush is the
//! same capsule with `start == end`, i.e. a circle, so both tests share one
//! implementation.
//!
//! Areal geometries are hit when any of these hold:
//! - a boundary edge comes within `r` of the segment (covers crossings),
//! - the polygon contains either segment endpoint (brush inside the polygon),
//! - the polygon lies entirely inside the capsule (small polygon, big brush).

use kurbo::{Line, Point, Rect};

use crate::distance::{point_in_ring, point_segment_dist_sq, ring_edges, segment_segment_dist_sq};
use crate::types::{Geometry, Polygon};

/// The region swept by a circle of `radius` moving along `line`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Capsule {
    /// Centerline of the sweep.
    pub line: Line,
    /// Brush radius in map units.
    pub radius: f64,
}

impl Capsule {
    /// Capsule swept from `start` to `end`. Negative or NaN radii are treated as `0.0`.
    pub fn new(start: Point, end: Point, radius: f64) -> Self {
        Self {
            line: Line::new(start, end),
            radius: if radius > 0.0 { radius } else { 0.0 },
        }
    }

    /// A resting brush.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, center, radius)
    }

    /// Whether the sweep has zero length.
    pub fn is_circle(&self) -> bool {
        self.line.p0 == self.line.p1
    }

    /// Axis-aligned extent of the capsule: the segment's box inflated by the radius.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.line.p0, self.line.p1).inflate(self.radius, self.radius)
    }

    /// Whether `p` lies inside the capsule (boundary included).
    pub fn contains_point(&self, p: Point) -> bool {
        point_segment_dist_sq(p, self.line.p0, self.line.p1) <= self.radius_sq()
    }

    /// Whether the capsule touches `geometry`.
    pub fn hits(&self, geometry: &Geometry) -> bool {
        match geometry {
            Geometry::Point(p) => self.contains_point(*p),
            Geometry::MultiPoint(pts) => pts.iter().any(|p| self.contains_point(*p)),
            Geometry::LineString(pts) => self.hits_polyline(pts),
            Geometry::MultiLineString(lines) => lines.iter().any(|l| self.hits_polyline(l)),
            Geometry::Polygon(poly) => self.hits_polygon(poly),
            Geometry::MultiPolygon(polys) => polys.iter().any(|p| self.hits_polygon(p)),
        }
    }

    #[inline]
    fn radius_sq(&self) -> f64 {
        self.radius * self.radius
    }

    fn near_edge(&self, a: Point, b: Point) -> bool {
        segment_segment_dist_sq(self.line.p0, self.line.p1, a, b) <= self.radius_sq()
    }

    fn hits_polyline(&self, pts: &[Point]) -> bool {
        match pts {
            [] => false,
            [p] => self.contains_point(*p),
            _ => pts.windows(2).any(|w| self.near_edge(w[0], w[1])),
        }
    }

    fn hits_polygon(&self, poly: &Polygon) -> bool {
        let Some(&first) = poly.exterior.first() else {
            return false;
        };
        // Enclosed: one exterior vertex inside the capsule means either the whole
        // polygon is inside or some exterior edge leaves it; both are hits.
        if self.contains_point(first) {
            return true;
        }
        if poly.rings().any(|ring| ring_edges(ring).any(|(a, b)| self.near_edge(a, b))) {
            return true;
        }
        // No boundary within reach: the brush is either wholly inside or wholly outside.
        point_in_polygon(self.line.p0, poly)
    }
}

/// Even-odd containment over all rings, so points inside a hole are outside the polygon.
pub fn point_in_polygon(p: Point, poly: &Polygon) -> bool {
    poly.rings().filter(|ring| point_in_ring(p, ring)).count() % 2 == 1
}

/// Whether any part of `geometry` lies within or crosses the circle of `radius` at `center`.
pub fn intersects_circle(geometry: &Geometry, center: Point, radius: f64) -> bool {
    Capsule::circle(center, radius).hits(geometry)
}

/// Whether `geometry` intersects the capsule swept by a circle of `radius` moving
/// from `start` to `end`. A zero-length sweep is the circle test.
pub fn intersects_swept_capsule(
    geometry: &Geometry,
    start: Point,
    end: Point,
    radius: f64,
) -> bool {
    Capsule::new(start, end, radius).hits(geometry)
}
