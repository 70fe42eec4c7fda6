use serde::{Deserialize, Serialize};

use crate::{GeoBbox, GeoPoint, Winding};

/// Boundary ring of a polygon.
///
/// A ring is an ordered sequence of points in which the first and the last
/// points are expected to be exactly equal. This follows the OGC
/// `LinearRing` convention: the closing point is stored explicitly rather
/// than implied. A well-formed ring has at least 4 points (a triangle plus
/// the closing point); [`Ring::is_closed`] reports whether the closure
/// invariant actually holds for the stored points.
#[derive(Debug, Clone, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Ring {
    points: Vec<GeoPoint>,
}

impl Ring {
    /// Creates a new ring from the given points.
    ///
    /// The points are stored as given. Use [`Ring::is_closed`] to check the
    /// closure invariant.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Points of the ring, including the closing point.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Number of points in the ring, including the closing point.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the ring contains no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the first and the last points of the ring are exactly equal.
    ///
    /// The comparison is exact, without tolerance.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Number of edges of the ring.
    pub fn edge_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterates over the edges of the ring as pairs of consecutive points.
    ///
    /// Since the closing point is stored explicitly, the last yielded edge
    /// ends at the first point of the ring.
    pub fn iter_edges(&self) -> impl Iterator<Item = (&GeoPoint, &GeoPoint)> {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Signed shoelace area of the ring in square degrees.
    ///
    /// Longitude and latitude are treated as planar `x` and `y`, so the value
    /// is negative for counterclockwise rings and positive for clockwise
    /// ones.
    pub fn signed_area_deg2(&self) -> f64 {
        let sum: f64 = self
            .iter_edges()
            .map(|(a, b)| (b.lon() - a.lon()) * (b.lat() + a.lat()))
            .sum();
        sum / 2.0
    }

    /// Winding direction of the ring.
    ///
    /// Degenerate rings with zero area are reported as clockwise.
    pub fn winding(&self) -> Winding {
        if self.signed_area_deg2() < 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }

    /// Sum of the planar lengths of the ring edges, in degrees.
    pub fn perimeter_deg(&self) -> f64 {
        self.iter_edges()
            .map(|(a, b)| {
                let dx = b.lon() - a.lon();
                let dy = b.lat() - a.lat();
                (dx * dx + dy * dy).sqrt()
            })
            .sum()
    }

    /// The smallest axis-aligned box containing all points of the ring, or
    /// `None` for an empty ring.
    pub fn bounding_box(&self) -> Option<GeoBbox> {
        GeoBbox::from_points(self.points.iter())
    }

    /// Points of the ring as `[lon, lat]` pairs.
    pub fn to_positions(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.lon(), p.lat()]).collect()
    }
}
