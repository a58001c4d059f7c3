// Copyright 2025 the Brushpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector feature geometry: points, lines, polygons and their multi-part forms.

use alloc::vec::Vec;
use kurbo::Point;

/// Coarse geometry class of a feature or layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Points and multipoints.
    Point,
    /// Line strings and multi line strings.
    Line,
    /// Polygons and multipolygons.
    Polygon,
}

/// A polygon with one exterior ring and any number of holes.
///
/// Rings may be closed (first point repeated at the end) or open; the closing
/// edge is implied either way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    /// Outer boundary.
    pub exterior: Vec<Point>,
    /// Holes.
    pub interiors: Vec<Vec<Point>>,
}

impl Polygon {
    /// Polygon without holes.
    pub fn new(exterior: Vec<Point>) -> Self {
        Self {
            exterior,
            interiors: Vec::new(),
        }
    }

    /// Polygon with holes.
    pub fn with_holes(exterior: Vec<Point>, interiors: Vec<Vec<Point>>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// All rings, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &[Point]> {
        core::iter::once(self.exterior.as_slice()).chain(self.interiors.iter().map(Vec::as_slice))
    }
}

/// Geometry of a single vector feature, in map coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A single point.
    Point(Point),
    /// Several points.
    MultiPoint(Vec<Point>),
    /// A polyline.
    LineString(Vec<Point>),
    /// Several polylines.
    MultiLineString(Vec<Vec<Point>>),
    /// A polygon, possibly with holes.
    Polygon(Polygon),
    /// Several polygons.
    MultiPolygon(Vec<Polygon>),
}

/// Reasons a geometry cannot take part in intersection tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A coordinate is NaN or infinite.
    #[error("geometry has a non-finite coordinate")]
    NonFinite,
    /// The geometry has no coordinates at all.
    #[error("geometry has no coordinates")]
    Empty,
}

impl Geometry {
    /// The coarse class of this geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) | Self::MultiPoint(_) => GeometryKind::Point,
            Self::LineString(_) | Self::MultiLineString(_) => GeometryKind::Line,
            Self::Polygon(_) | Self::MultiPolygon(_) => GeometryKind::Polygon,
        }
    }

    /// Visit every coordinate of the geometry, rings and parts included.
    pub fn for_each_point(&self, mut f: impl FnMut(Point)) {
        match self {
            Self::Point(p) => f(*p),
            Self::MultiPoint(pts) | Self::LineString(pts) => pts.iter().copied().for_each(f),
            Self::MultiLineString(lines) => lines.iter().flatten().copied().for_each(f),
            Self::Polygon(poly) => poly.rings().flatten().copied().for_each(f),
            Self::MultiPolygon(polys) => polys
                .iter()
                .flat_map(Polygon::rings)
                .flatten()
                .copied()
                .for_each(f),
        }
    }

    /// Check that the geometry can be tested: at least one coordinate, all finite.
    ///
    /// Zero-length lines and zero-area rings are valid; the kernel handles them
    /// through its distance tests.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let mut count = 0_usize;
        let mut finite = true;
        self.for_each_point(|p| {
            count += 1;
            finite &= p.x.is_finite() && p.y.is_finite();
        });
        if count == 0 {
            return Err(GeometryError::Empty);
        }
        if !finite {
            return Err(GeometryError::NonFinite);
        }
        Ok(())
    }
}

impl From<Point> for Geometry {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}
