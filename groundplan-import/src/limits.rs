//! Size and safety limits for imported geometries.
//!
//! The limits exist to bound worst-case CPU and memory for hostile input:
//! the coordinate ceiling keeps the quadratic self-intersection scan
//! tractable, and the MIME allow-list rejects payload types the engine was
//! never meant to parse.

use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// Default ceiling for the number of coordinates in a geometry.
pub const DEFAULT_MAX_COORDINATES: usize = 50_000;

/// Default minimum accepted geometry area, in square meters.
pub const DEFAULT_MIN_AREA_M2: f64 = 1.0;

/// Default maximum accepted geometry area, in square meters (10 km2).
pub const DEFAULT_MAX_AREA_M2: f64 = 10_000_000.0;

/// Content types accepted for boundary uploads.
const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/json",
    "application/geo+json",
    "text/json",
    "application/xml",
    "text/xml",
    "application/vnd.google-earth.kml+xml",
];

/// What to do when an uploaded file contains more than one candidate
/// polygon.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiFeaturePolicy {
    /// Use the first polygon and record a warning.
    #[default]
    FirstWins,
    /// Reject the file outright.
    Reject,
}

/// Configurable limits applied during import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportLimits {
    /// Maximum number of coordinates in a geometry.
    pub max_coordinates: usize,
    /// Minimum accepted area, square meters.
    pub min_area_m2: f64,
    /// Maximum accepted area, square meters.
    pub max_area_m2: f64,
    /// Policy for files containing more than one polygon.
    pub multi_feature: MultiFeaturePolicy,
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            max_coordinates: DEFAULT_MAX_COORDINATES,
            min_area_m2: DEFAULT_MIN_AREA_M2,
            max_area_m2: DEFAULT_MAX_AREA_M2,
            multi_feature: MultiFeaturePolicy::default(),
        }
    }
}

impl ImportLimits {
    /// Checks a declared content type against the allow-list.
    ///
    /// A missing content type is permitted; media type parameters (such as
    /// `charset`) are ignored.
    pub fn check_mime(&self, mime: Option<&str>) -> Result<(), ImportError> {
        let Some(mime) = mime else {
            return Ok(());
        };

        let essence = mime
            .split(';')
            .next()
            .unwrap_or(mime)
            .trim()
            .to_ascii_lowercase();
        if ALLOWED_MIME_TYPES.contains(&essence.as_str()) {
            Ok(())
        } else {
            Err(ImportError::InvalidMimeType(mime.to_owned()))
        }
    }

    /// Checks the total coordinate count of a geometry against the ceiling.
    pub fn check_coordinate_count(&self, count: usize) -> Result<(), ImportError> {
        if count > self.max_coordinates {
            Err(ImportError::TooManyCoordinates {
                count,
                max: self.max_coordinates,
            })
        } else {
            Ok(())
        }
    }

    /// Checks a computed area against the configured floor and ceiling.
    pub fn check_area(&self, area_m2: f64) -> Result<(), ImportError> {
        if area_m2 > self.max_area_m2 {
            return Err(ImportError::GeometryTooLarge {
                area_m2,
                max_m2: self.max_area_m2,
            });
        }
        if area_m2 < self.min_area_m2 {
            return Err(ImportError::GeometryTooSmall {
                area_m2,
                min_m2: self.min_area_m2,
            });
        }

        Ok(())
    }
}
