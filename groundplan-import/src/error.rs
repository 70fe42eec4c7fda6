//! Error types used by the crate.

use groundplan_types::GeoBbox;
use thiserror::Error;

/// Import failure caused by the client input.
///
/// Every variant is deterministic for a given input and carries enough
/// context to reproduce the failure. [`ImportError::code`] gives a stable
/// machine-readable code for mapping to an HTTP response.
#[derive(Debug, Clone, Error)]
pub enum ImportError {
    /// The input is neither GeoJSON nor KML.
    #[error("unsupported file format: expected GeoJSON or KML")]
    InvalidFormat,

    /// The input looked like GeoJSON but could not be parsed.
    #[error("invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    /// The input looked like KML but could not be parsed.
    #[error("invalid KML: {0}")]
    InvalidKml(String),

    /// The input parsed, but contains no polygon geometries.
    #[error("file contains no polygon geometries")]
    NoPolygons,

    /// The selected polygon is structurally malformed.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    /// The selected ring has too few points.
    #[error("polygon must have at least 4 points including the closing point, got {count}")]
    InsufficientPoints {
        /// Number of points found.
        count: usize,
    },

    /// A coordinate lies outside the WGS84 longitude/latitude ranges.
    #[error("coordinate {index} is outside WGS84 bounds: ({lon}, {lat})")]
    InvalidSrid {
        /// Index of the offending coordinate in the ring.
        index: usize,
        /// Longitude of the offending coordinate.
        lon: f64,
        /// Latitude of the offending coordinate.
        lat: f64,
    },

    /// Two non-adjacent edges of the ring cross each other.
    #[error("polygon is self-intersecting: edge {edge_a} crosses edge {edge_b}")]
    SelfIntersecting {
        /// Index of the first crossing edge.
        edge_a: usize,
        /// Index of the second crossing edge.
        edge_b: usize,
    },

    /// The exterior ring is not wound counterclockwise.
    #[error("exterior ring must be wound counterclockwise")]
    InvalidWinding,

    /// An asset geometry has an unsupported type.
    #[error("unsupported geometry type: {0}")]
    InvalidGeometry(String),

    /// An asset point geometry is malformed.
    #[error("invalid point geometry: {0}")]
    InvalidPoint(String),

    /// An asset line geometry is malformed.
    #[error("invalid line geometry: {0}")]
    InvalidLineString(String),

    /// A point of the feature lies outside the container bounds.
    #[error("point ({lon}, {lat}) lies outside the venue bounds {bounds}")]
    OutOfBounds {
        /// Longitude of the offending point.
        lon: f64,
        /// Latitude of the offending point.
        lat: f64,
        /// Extents of the container the point must lie in.
        bounds: GeoBbox,
    },

    /// The computed area exceeds the configured maximum.
    #[error("geometry area {area_m2:.0} m2 is larger than the allowed maximum of {max_m2:.0} m2")]
    GeometryTooLarge {
        /// Computed area of the geometry.
        area_m2: f64,
        /// Configured area ceiling.
        max_m2: f64,
    },

    /// The computed area is below the configured minimum.
    #[error("geometry area {area_m2:.2} m2 is smaller than the allowed minimum of {min_m2:.0} m2")]
    GeometryTooSmall {
        /// Computed area of the geometry.
        area_m2: f64,
        /// Configured area floor.
        min_m2: f64,
    },

    /// The declared content type is not in the allow-list.
    #[error("unsupported content type: {0}")]
    InvalidMimeType(String),

    /// The geometry has more coordinates than the configured ceiling.
    #[error("too many coordinates: {count} is over the limit of {max}")]
    TooManyCoordinates {
        /// Number of coordinates in the geometry.
        count: usize,
        /// Configured coordinate ceiling.
        max: usize,
    },
}

impl ImportError {
    /// Stable machine-readable code of this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InvalidGeoJson(_) => "INVALID_GEOJSON",
            Self::InvalidKml(_) => "INVALID_KML",
            Self::NoPolygons => "NO_POLYGONS",
            Self::InvalidPolygon(_) => "INVALID_POLYGON",
            Self::InsufficientPoints { .. } => "INSUFFICIENT_POINTS",
            Self::InvalidSrid { .. } => "INVALID_SRID",
            Self::SelfIntersecting { .. } => "SELF_INTERSECTING",
            Self::InvalidWinding => "INVALID_WINDING",
            Self::InvalidGeometry(_) => "INVALID_GEOMETRY",
            Self::InvalidPoint(_) => "INVALID_POINT",
            Self::InvalidLineString(_) => "INVALID_LINESTRING",
            Self::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            Self::GeometryTooLarge { .. } => "GEOMETRY_TOO_LARGE",
            Self::GeometryTooSmall { .. } => "GEOMETRY_TOO_SMALL",
            Self::InvalidMimeType(_) => "INVALID_MIME_TYPE",
            Self::TooManyCoordinates { .. } => "TOO_MANY_COORDINATES",
        }
    }
}

/// Failure of the external geodetic computation backend.
///
/// Never surfaced to import callers: the engine recovers by falling back to
/// the planar approximation.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The backend could not be reached.
    #[error("geodetic backend unavailable: {0}")]
    Unavailable(String),

    /// The backend did not respond within the caller's deadline.
    #[error("geodetic backend timed out")]
    Timeout,

    /// The backend responded with a value that could not be used.
    #[error("geodetic backend returned an invalid result: {0}")]
    InvalidResult(String),
}
