//! Validation of asset geometries attached to a venue.
//!
//! Assets are points of interest, line features, and area features uploaded
//! as GeoJSON geometries alongside a venue boundary. Unlike boundary import,
//! asset validation has no winding or area requirements: only structure and
//! WGS84 bounds are checked.

use geojson::{Geometry, Value};
use groundplan_types::{GeoPoint, Polygon, Ring};

use crate::error::ImportError;
use crate::validate;

/// A validated asset geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetGeometry {
    /// A point of interest.
    Point(GeoPoint),
    /// A line feature with at least two points.
    Line(Vec<GeoPoint>),
    /// An area feature. Interior rings are carried through unchanged.
    Polygon(Polygon),
}

impl AssetGeometry {
    /// The exterior ring, for polygon assets.
    pub fn exterior(&self) -> Option<&Ring> {
        match self {
            Self::Polygon(polygon) => Some(polygon.exterior()),
            _ => None,
        }
    }
}

/// Validates a GeoJSON asset geometry.
///
/// `Point` and `LineString` geometries are checked for structure and WGS84
/// bounds and reported with their own error codes; `Polygon` geometries go
/// through the same structural and bounds validators as boundary rings. Any
/// other geometry type is rejected.
pub fn validate_asset_geometry(geometry: &Geometry) -> Result<AssetGeometry, ImportError> {
    match &geometry.value {
        Value::Point(position) => {
            let point = checked_point(position).map_err(ImportError::InvalidPoint)?;
            Ok(AssetGeometry::Point(point))
        }
        Value::LineString(positions) => {
            if positions.len() < 2 {
                return Err(ImportError::InvalidLineString(format!(
                    "line must have at least 2 points, got {}",
                    positions.len()
                )));
            }

            let mut points = Vec::with_capacity(positions.len());
            for (index, position) in positions.iter().enumerate() {
                let point = checked_point(position).map_err(|e| {
                    ImportError::InvalidLineString(format!("point {index}: {e}"))
                })?;
                points.push(point);
            }
            Ok(AssetGeometry::Line(points))
        }
        Value::Polygon(rings) => {
            let Some((outer, inner)) = rings.split_first() else {
                return Err(ImportError::InvalidPolygon(
                    "polygon has no coordinate rings".to_owned(),
                ));
            };

            let exterior = validate::validate_structure(outer)?;
            validate::validate_bounds(&exterior)?;

            let mut interiors = Vec::with_capacity(inner.len());
            for (index, raw) in inner.iter().enumerate() {
                let ring = validate::validate_structure(raw).map_err(|e| {
                    ImportError::InvalidPolygon(format!("interior ring {index}: {e}"))
                })?;
                validate::validate_bounds(&ring)?;
                interiors.push(ring);
            }

            Ok(AssetGeometry::Polygon(Polygon::new(exterior, interiors)))
        }
        other => Err(ImportError::InvalidGeometry(other.type_name().to_owned())),
    }
}

/// Parses a raw GeoJSON position into a point within WGS84 bounds.
fn checked_point(position: &[f64]) -> Result<GeoPoint, String> {
    if position.len() < 2 {
        return Err(format!(
            "expected a [lon, lat] pair, got {} values",
            position.len()
        ));
    }
    let (lon, lat) = (position[0], position[1]);
    if !lon.is_finite() || !lat.is_finite() {
        return Err(format!("coordinates must be finite numbers: ({lon}, {lat})"));
    }
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("coordinate ({lon}, {lat}) is outside WGS84 bounds"));
    }

    Ok(GeoPoint::new(lon, lat))
}
