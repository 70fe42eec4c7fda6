use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of a triplet of points, treating longitude and
    /// latitude as planar `x` and `y`.
    pub fn triplet(p: &GeoPoint, q: &GeoPoint, r: &GeoPoint) -> Self {
        let cross =
            (q.lat() - p.lat()) * (r.lon() - q.lon()) - (q.lon() - p.lon()) * (r.lat() - q.lat());
        if cross > 0.0 {
            Self::Clockwise
        } else if cross < 0.0 {
            Self::Counterclockwise
        } else {
            Self::Collinear
        }
    }
}

/// Rotational direction in which the points of a closed ring are listed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Winding {
    /// Points are listed in clockwise order.
    Clockwise,
    /// Points are listed in counterclockwise order.
    CounterClockwise,
}
