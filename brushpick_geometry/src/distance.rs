// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance and containment primitives on points, segments and rings.
//!
//! Everything works on squared distances so the kernel never needs a square root.

use kurbo::{Line, ParamCurveNearest, Point};

/// Squared distance from `p` to the segment `a..b`. A zero-length segment acts as a point.
#[inline]
pub fn point_segment_dist_sq(p: Point, a: Point, b: Point) -> f64 {
    if a == b {
        return (p - a).hypot2();
    }
    Line::new(a, b).nearest(p, 0.0).distance_sq
}

/// Sign of the turn `a -> b -> c`: positive for counter-clockwise, negative for clockwise.
#[inline]
fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// Whether `c`, known to be collinear with `a..b`, lies within the segment's box.
#[inline]
fn on_segment(a: Point, b: Point, c: Point) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

/// Whether the closed segments `a..b` and `c..d` share a point, collinear overlaps included.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(c, d, a))
        || (d2 == 0.0 && on_segment(c, d, b))
        || (d3 == 0.0 && on_segment(a, b, c))
        || (d4 == 0.0 && on_segment(a, b, d))
}

/// Squared minimum distance between the closed segments `a..b` and `c..d`.
pub fn segment_segment_dist_sq(a: Point, b: Point, c: Point, d: Point) -> f64 {
    if segments_intersect(a, b, c, d) {
        return 0.0;
    }
    point_segment_dist_sq(a, c, d)
        .min(point_segment_dist_sq(b, c, d))
        .min(point_segment_dist_sq(c, a, b))
        .min(point_segment_dist_sq(d, a, b))
}

/// Edges of a ring, including the implied closing edge.
///
/// For an explicitly closed ring the closing edge has zero length, which is harmless
/// for distance tests.
pub fn ring_edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let closing = match (ring.first(), ring.last()) {
        (Some(&first), Some(&last)) if ring.len() > 1 => Some((last, first)),
        _ => None,
    };
    ring.windows(2).map(|w| (w[0], w[1])).chain(closing)
}

/// Crossing-number test of `p` against one ring. Points exactly on the boundary may go
/// either way; callers pair this with a boundary distance test.
pub fn point_in_ring(p: Point, ring: &[Point]) -> bool {
    let mut inside = false;
    for (a, b) in ring_edges(ring) {
        if (a.y > p.y) != (b.y > p.y) {
            let x_at = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_at {
                inside = !inside;
            }
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn point_to_segment() {
        assert_eq!(point_segment_dist_sq(p(5.0, 3.0), p(0.0, 0.0), p(10.0, 0.0)), 9.0);
        // Past the end: distance to the endpoint.
        assert_eq!(point_segment_dist_sq(p(13.0, 4.0), p(0.0, 0.0), p(10.0, 0.0)), 25.0);
        // Degenerate segment.
        assert_eq!(point_segment_dist_sq(p(3.0, 4.0), p(0.0, 0.0), p(0.0, 0.0)), 25.0);
    }

    #[test]
    fn crossing_and_touching_segments() {
        assert!(segments_intersect(p(0.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(10.0, 0.0)));
        // T-junction.
        assert!(segments_intersect(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 0.0), p(5.0, 5.0)));
        // Collinear overlap.
        assert!(segments_intersect(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 0.0), p(15.0, 0.0)));
        // Collinear, disjoint.
        assert!(!segments_intersect(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)));
        // Parallel.
        assert!(!segments_intersect(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 1.0), p(10.0, 1.0)));
    }

    #[test]
    fn segment_distance() {
        assert_eq!(
            segment_segment_dist_sq(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 2.0), p(10.0, 2.0)),
            4.0
        );
        assert_eq!(
            segment_segment_dist_sq(p(0.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(10.0, 0.0)),
            0.0
        );
    }

    #[test]
    fn ring_containment_open_and_closed() {
        let open = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        let closed = [
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 10.0),
            p(0.0, 10.0),
            p(0.0, 0.0),
        ];
        for ring in [&open[..], &closed[..]] {
            assert!(point_in_ring(p(5.0, 5.0), ring));
            assert!(!point_in_ring(p(15.0, 5.0), ring));
            assert!(!point_in_ring(p(-1.0, 5.0), ring));
        }
        assert_eq!(ring_edges(&open).count(), 4);
        assert_eq!(ring_edges(&[p(1.0, 1.0)]).count(), 0);
    }
}
