//! Area, perimeter, and bounding box computation.
//!
//! Area and perimeter prefer an external geodetic backend and fall back to a
//! deterministic planar approximation when the backend fails. The fallback is
//! pure computation, so metric computation as a whole never fails because of
//! the backend.

use groundplan_types::{GeoBbox, Ring};

use crate::error::{BackendError, ImportError};

/// Scale factor of the planar approximation: meters per degree at the
/// equator.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// External geodetic computation backend.
///
/// Models a spatial database capable of geography-aware measurements over
/// SRID 4326 geometries: the engine sends canonical WKT and receives meters
/// back. Implementations that perform I/O should bound it with a timeout and
/// report expiry as [`BackendError::Timeout`].
pub trait GeodeticBackend {
    /// Computes the geodetic area of the polygon, in square meters.
    fn polygon_area_m2(&self, wkt: &str) -> Result<f64, BackendError>;

    /// Computes the geodetic length of the polygon boundary, in meters.
    fn ring_perimeter_m(&self, wkt: &str) -> Result<f64, BackendError>;
}

/// Numeric outputs of a successful import.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Metrics {
    pub area_m2: f64,
    pub perimeter_m: f64,
    pub bbox: GeoBbox,
    pub wkt: String,
}

/// Computes area, perimeter, and bounding box of a validated ring.
///
/// Backend failures are logged and recovered by the planar fallback; a
/// backend result that is not a finite number is treated as a failure.
pub(crate) fn compute(
    ring: &Ring,
    backend: Option<&dyn GeodeticBackend>,
) -> Result<Metrics, ImportError> {
    let Some(bbox) = ring.bounding_box() else {
        return Err(ImportError::InvalidPolygon("ring has no points".to_owned()));
    };
    let wkt = ring_wkt(ring);

    let area_m2 = match backend.map(|b| b.polygon_area_m2(&wkt)) {
        Some(Ok(area)) if area.is_finite() => area.abs(),
        Some(Ok(area)) => {
            log::warn!("geodetic backend returned a non-finite area {area}, using planar approximation");
            planar_area_m2(ring)
        }
        Some(Err(e)) => {
            log::warn!("geodetic area computation failed, using planar approximation: {e}");
            planar_area_m2(ring)
        }
        None => planar_area_m2(ring),
    };

    let perimeter_m = match backend.map(|b| b.ring_perimeter_m(&wkt)) {
        Some(Ok(perimeter)) if perimeter.is_finite() => perimeter.abs(),
        Some(Ok(perimeter)) => {
            log::warn!(
                "geodetic backend returned a non-finite perimeter {perimeter}, using planar approximation"
            );
            planar_perimeter_m(ring)
        }
        Some(Err(e)) => {
            log::warn!("geodetic perimeter computation failed, using planar approximation: {e}");
            planar_perimeter_m(ring)
        }
        None => planar_perimeter_m(ring),
    };

    Ok(Metrics {
        area_m2,
        perimeter_m,
        bbox,
        wkt,
    })
}

/// Planar approximation of the ring area: the shoelace area in square
/// degrees scaled by [`METERS_PER_DEGREE`]².
pub fn planar_area_m2(ring: &Ring) -> f64 {
    ring.signed_area_deg2().abs() * METERS_PER_DEGREE * METERS_PER_DEGREE
}

/// Planar approximation of the boundary length, in meters.
pub fn planar_perimeter_m(ring: &Ring) -> f64 {
    ring.perimeter_deg() * METERS_PER_DEGREE
}

/// Writes the ring as canonical `POLYGON((lon lat, ...))` text.
pub fn ring_wkt(ring: &Ring) -> String {
    let coords: Vec<String> = ring
        .points()
        .iter()
        .map(|p| format!("{} {}", p.lon(), p.lat()))
        .collect();
    format!("POLYGON(({}))", coords.join(", "))
}
