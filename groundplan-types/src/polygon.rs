use serde::{Deserialize, Serialize};

use crate::Ring;

/// Polygon geometry: one exterior ring and zero or more interior rings.
///
/// Interior rings represent holes in the polygon. The import engine validates
/// only the exterior ring; interiors are carried through so that callers can
/// decide what to do with them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Polygon {
    exterior: Ring,
    interiors: Vec<Ring>,
}

impl Polygon {
    /// Creates a new polygon from its rings.
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// The outer boundary of the polygon.
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    /// The holes of the polygon.
    pub fn interiors(&self) -> &[Ring] {
        &self.interiors
    }
}

/// How the exterior ring of an imported polygon was obtained from the source
/// geometry.
///
/// Lets callers distinguish a genuinely single-polygon input from one that
/// was coerced by taking the first polygon of a multi-polygon geometry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RingSource {
    /// The source geometry was a single polygon.
    Polygon,
    /// The source geometry was a multi-polygon; the first member polygon was
    /// used and the rest were discarded.
    MultiPolygonFirst {
        /// Number of member polygons that were discarded.
        discarded_polygons: usize,
    },
}
