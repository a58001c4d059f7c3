// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records a brush stroke as a chain of radius-tagged segments.

use brushpick_geometry::Capsule;
use brushpick_index::Aabb2D;
use kurbo::Point;

/// One piece of a stroke: the brush moved from `start` to `end` with `radius`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrokeSegment {
    /// Previous recorded point.
    pub start: Point,
    /// Newly recorded point.
    pub end: Point,
    /// Radius in map units in effect when the segment was recorded.
    pub radius: f64,
}

impl StrokeSegment {
    /// The region the brush covered along this segment.
    pub fn capsule(&self) -> Capsule {
        Capsule::new(self.start, self.end, self.radius)
    }

    /// Axis-aligned box around the capsule, used to query spatial indexes.
    pub fn swept_extent(&self) -> Aabb2D {
        let r = self.capsule().bounding_box();
        Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
    }

    /// Whether the brush did not move.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Accumulates a stroke between press and release.
#[derive(Clone, Debug, Default)]
pub struct StrokeTracker {
    points: Vec<Point>,
    segments: Vec<StrokeSegment>,
    radius: f64,
    active: bool,
}

impl StrokeTracker {
    /// An idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke at `point`, discarding any previous one.
    pub fn begin(&mut self, point: Point, radius: f64) {
        self.points.clear();
        self.segments.clear();
        self.points.push(point);
        self.radius = radius;
        self.active = true;
    }

    /// Record `point` and return the segment reaching it from the previous point.
    ///
    /// Returns `None` when no stroke is in progress.
    pub fn extend(&mut self, point: Point) -> Option<StrokeSegment> {
        if !self.active {
            tracing::debug!(?point, "stroke extended before it began");
            return None;
        }
        let start = *self.points.last()?;
        let segment = StrokeSegment {
            start,
            end: point,
            radius: self.radius,
        };
        self.points.push(point);
        self.segments.push(segment);
        tracing::trace!(?start, end = ?point, radius = self.radius, "stroke segment");
        Some(segment)
    }

    /// Radius for segments recorded from now on.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// Radius for the next segment.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Finish the stroke and hand back its segments.
    pub fn end(&mut self) -> Vec<StrokeSegment> {
        self.active = false;
        self.points.clear();
        std::mem::take(&mut self.segments)
    }

    /// Points recorded so far, press point first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Most recently recorded point.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Segments recorded so far.
    pub fn segments(&self) -> &[StrokeSegment] {
        &self.segments
    }

    /// Whether a stroke is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }
}
