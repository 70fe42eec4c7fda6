//! Structural and geometric validation of the selected ring.
//!
//! The checks run in a fixed order: structure first (so the geometric checks
//! never see malformed input), then coordinate bounds, then the
//! self-intersection scan, then winding. Each check returns the first
//! violation it finds.

use groundplan_types::{GeoPoint, Orientation, Ring, Winding};

use crate::candidate::RawRing;
use crate::error::ImportError;

/// Minimum number of points in a ring, including the closing point.
const MIN_RING_POINTS: usize = 4;

/// Checks the raw ring structure and converts it into a typed [`Ring`].
///
/// In order: the ring must have at least 4 positions, every position must be
/// a finite `[lon, lat]` pair (a third altitude value is accepted and
/// dropped), and the first and last points must be exactly equal.
pub(crate) fn validate_structure(raw: &RawRing) -> Result<Ring, ImportError> {
    if raw.len() < MIN_RING_POINTS {
        return Err(ImportError::InsufficientPoints { count: raw.len() });
    }

    let mut points = Vec::with_capacity(raw.len());
    for (index, position) in raw.iter().enumerate() {
        if position.len() < 2 {
            return Err(ImportError::InvalidPolygon(format!(
                "coordinate {index} must be a [lon, lat] pair, got {} values",
                position.len()
            )));
        }
        let (lon, lat) = (position[0], position[1]);
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ImportError::InvalidPolygon(format!(
                "coordinate {index} is not a pair of finite numbers: ({lon}, {lat})"
            )));
        }
        points.push(GeoPoint::new(lon, lat));
    }

    let ring = Ring::new(points);
    if !ring.is_closed() {
        return Err(ImportError::InvalidPolygon(
            "ring must be closed: the first and the last points differ".to_owned(),
        ));
    }

    Ok(ring)
}

/// Checks every point of the ring against the WGS84 coordinate ranges.
///
/// Longitude must lie in `[-180, 180]` and latitude in `[-90, 90]`, both
/// inclusive. The first violation is reported with its index and value.
pub(crate) fn validate_bounds(ring: &Ring) -> Result<(), ImportError> {
    for (index, point) in ring.points().iter().enumerate() {
        if !(-180.0..=180.0).contains(&point.lon()) || !(-90.0..=90.0).contains(&point.lat()) {
            return Err(ImportError::InvalidSrid {
                index,
                lon: point.lon(),
                lat: point.lat(),
            });
        }
    }

    Ok(())
}

/// Checks that no two non-adjacent edges of the ring properly cross.
///
/// This is a pairwise O(n²) scan over the edges; the coordinate ceiling in
/// [`ImportLimits`](crate::ImportLimits) bounds the worst-case `n`. Adjacent
/// edges and the wrap-around first/last pair share an endpoint and are
/// skipped. Touching endpoints and collinear overlaps do not count as
/// crossings.
pub(crate) fn validate_no_self_intersection(ring: &Ring) -> Result<(), ImportError> {
    let points = ring.points();
    let edge_count = ring.edge_count();

    for i in 0..edge_count {
        for j in (i + 2)..edge_count {
            // The last edge ends at the first point of the ring.
            if i == 0 && j == edge_count - 1 {
                continue;
            }
            if edges_cross(
                (&points[i], &points[i + 1]),
                (&points[j], &points[j + 1]),
            ) {
                return Err(ImportError::SelfIntersecting {
                    edge_a: i,
                    edge_b: j,
                });
            }
        }
    }

    Ok(())
}

/// Whether two segments properly cross: they intersect in a single interior
/// point of both.
fn edges_cross(a: (&GeoPoint, &GeoPoint), b: (&GeoPoint, &GeoPoint)) -> bool {
    let o1 = Orientation::triplet(a.0, a.1, b.0);
    let o2 = Orientation::triplet(a.0, a.1, b.1);
    let o3 = Orientation::triplet(b.0, b.1, a.0);
    let o4 = Orientation::triplet(b.0, b.1, a.1);

    if o1 == Orientation::Collinear
        || o2 == Orientation::Collinear
        || o3 == Orientation::Collinear
        || o4 == Orientation::Collinear
    {
        return false;
    }

    o1 != o2 && o3 != o4
}

/// Checks that the ring is wound counterclockwise.
///
/// The shoelace sum over `(lon, lat)` treated as planar `(x, y)` must be
/// strictly negative; a zero-area ring is rejected along with clockwise ones.
pub(crate) fn validate_winding(ring: &Ring) -> Result<(), ImportError> {
    match ring.winding() {
        Winding::CounterClockwise => Ok(()),
        Winding::Clockwise => Err(ImportError::InvalidWinding),
    }
}
