use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// The smallest axis-aligned rectangle containing a set of geographic points.
///
/// Invariant: `min_lon <= max_lon` and `min_lat <= max_lat`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBbox {
    /// Western edge, degrees.
    pub min_lon: f64,
    /// Southern edge, degrees.
    pub min_lat: f64,
    /// Eastern edge, degrees.
    pub max_lon: f64,
    /// Northern edge, degrees.
    pub max_lat: f64,
}

impl GeoBbox {
    /// Creates a new bounding box from its extents.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// A degenerate box containing a single point.
    pub fn from_point(p: &GeoPoint) -> Self {
        Self {
            min_lon: p.lon(),
            min_lat: p.lat(),
            max_lon: p.lon(),
            max_lat: p.lat(),
        }
    }

    /// Computes the bounding box of the given points, or `None` if the
    /// iterator is empty.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a GeoPoint>) -> Option<Self> {
        let first = points.next()?;
        let mut bbox = Self::from_point(first);

        for p in points {
            if bbox.min_lon > p.lon() {
                bbox.min_lon = p.lon();
            }
            if bbox.min_lat > p.lat() {
                bbox.min_lat = p.lat();
            }
            if bbox.max_lon < p.lon() {
                bbox.max_lon = p.lon();
            }
            if bbox.max_lat < p.lat() {
                bbox.max_lat = p.lat();
            }
        }

        Some(bbox)
    }

    /// Whether the point lies inside the box. Points on the boundary are
    /// considered inside.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.min_lon <= point.lon()
            && self.max_lon >= point.lon()
            && self.min_lat <= point.lat()
            && self.max_lat >= point.lat()
    }

    /// The smallest box containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            min_lon: if self.min_lon < other.min_lon {
                self.min_lon
            } else {
                other.min_lon
            },
            min_lat: if self.min_lat < other.min_lat {
                self.min_lat
            } else {
                other.min_lat
            },
            max_lon: if self.max_lon > other.max_lon {
                self.max_lon
            } else {
                other.max_lon
            },
            max_lat: if self.max_lat > other.max_lat {
                self.max_lat
            } else {
                other.max_lat
            },
        }
    }

    /// Longitude span of the box, degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span of the box, degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// The box as a `[min_lon, min_lat, max_lon, max_lat]` array.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

impl Display for GeoBbox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
