//! The import orchestrator.
//!
//! Sequences format detection, parsing, candidate selection, validation,
//! limits, and metric computation. Each stage transitions forward only on
//! success; the first failure is returned immediately and no partial results
//! are ever produced. There is no retry logic here: retries, if desired,
//! belong to the caller.

use geojson::{Feature, Geometry};
use groundplan_types::{GeoBbox, Polygon, Ring, RingSource};
use serde::Serialize;

use crate::adapters;
use crate::candidate::{self, Selection};
use crate::error::ImportError;
use crate::fit::{BboxContainment, ContainmentStrategy};
use crate::format::{self, Format};
use crate::limits::ImportLimits;
use crate::metrics::{self, GeodeticBackend};
use crate::validate;

/// Stage of the import pipeline, named for logging.
///
/// Success moves through the stages in declaration order and ends with a
/// result; a failure at any stage ends the run with the error of that stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum ImportStage {
    /// Classifying the input encoding.
    Detecting,
    /// Running the format's parser adapter.
    Parsing,
    /// Selecting the polygon to validate.
    Extracting,
    /// Checking point count, coordinate arity, and ring closure.
    ValidatingStructure,
    /// Checking WGS84 coordinate ranges.
    ValidatingBounds,
    /// Enforcing the coordinate ceiling.
    LimitingSize,
    /// Scanning for crossing edges.
    ValidatingIntersection,
    /// Checking the exterior ring orientation.
    ValidatingWinding,
    /// Computing area, perimeter, and bounding box.
    ComputingMetrics,
}

/// Outcome of a successful import.
///
/// Owned by the caller; the engine keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResult {
    /// Always `true`: a result is only produced for fully validated input.
    pub valid: bool,
    /// The exterior ring as `[lon, lat]` pairs, closing point included.
    pub ring: Vec<[f64; 2]>,
    /// Area of the polygon, square meters.
    pub area_m2: f64,
    /// Length of the exterior ring, meters.
    pub perimeter_m: f64,
    /// Bounding box of the exterior ring.
    pub bbox: GeoBbox,
    /// Canonical `POLYGON((lon lat, ...))` text of the exterior ring.
    pub geometry_wkt: String,
    /// The canonical ring as a GeoJSON feature, carrying the source
    /// feature's properties if it had any.
    pub geometry_geojson: Feature,
    /// The typed polygon, interior rings included.
    pub polygon: Polygon,
    /// How the exterior ring was obtained from the source geometry.
    pub source: RingSource,
    /// Human-readable summary.
    pub message: String,
    /// Notes about discarded features, member polygons, or holes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// The geometry import and validation engine.
///
/// Stateless across calls: concurrent imports on a shared instance never
/// interfere. The only potentially blocking operation is the geodetic
/// backend call, and its failure is recovered locally.
pub struct Importer {
    limits: ImportLimits,
    backend: Option<Box<dyn GeodeticBackend>>,
    containment: Box<dyn ContainmentStrategy>,
}

impl Default for Importer {
    fn default() -> Self {
        Self {
            limits: ImportLimits::default(),
            backend: None,
            containment: Box::new(BboxContainment),
        }
    }
}

impl Importer {
    /// Creates an engine with default limits, the planar metric fallback, and
    /// bounding-box containment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the import limits.
    pub fn with_limits(mut self, limits: ImportLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Installs a geodetic backend for area and perimeter computation.
    pub fn with_backend(mut self, backend: Box<dyn GeodeticBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Replaces the containment strategy used by [`Importer::check_fit`].
    pub fn with_containment(mut self, containment: Box<dyn ContainmentStrategy>) -> Self {
        self.containment = containment;
        self
    }

    /// The limits this engine applies.
    pub fn limits(&self) -> &ImportLimits {
        &self.limits
    }

    /// Imports a boundary file and returns the validated canonical geometry.
    ///
    /// `filename` is used in log records only. A declared `mime_hint` is
    /// checked against the allow-list before anything else; `None` is
    /// permitted.
    pub fn import(
        &self,
        content: &str,
        filename: &str,
        mime_hint: Option<&str>,
    ) -> Result<ImportResult, ImportError> {
        self.limits.check_mime(mime_hint)?;

        log::debug!("{filename}: {:?}", ImportStage::Detecting);
        let format = format::detect_format(content)?;

        log::debug!("{filename}: {:?} as {format}", ImportStage::Parsing);
        let candidates = match format {
            Format::GeoJson => adapters::geojson::parse(content)?,
            Format::Kml => adapters::kml::parse(content)?,
        };

        log::debug!("{filename}: {:?}", ImportStage::Extracting);
        let selection = candidate::select_candidate(candidates, self.limits.multi_feature)?;
        for warning in &selection.warnings {
            log::warn!("{filename}: {warning}");
        }

        log::debug!("{filename}: {:?}", ImportStage::ValidatingStructure);
        let exterior = validate::validate_structure(&selection.outer)?;
        let interiors = validated_interiors(&selection)?;

        log::debug!("{filename}: {:?}", ImportStage::ValidatingBounds);
        validate::validate_bounds(&exterior)?;

        let coordinate_count =
            selection.outer.len() + selection.interiors.iter().map(Vec::len).sum::<usize>();
        log::debug!(
            "{filename}: {:?} ({coordinate_count} coordinates)",
            ImportStage::LimitingSize
        );
        self.limits.check_coordinate_count(coordinate_count)?;

        log::debug!("{filename}: {:?}", ImportStage::ValidatingIntersection);
        validate::validate_no_self_intersection(&exterior)?;

        log::debug!("{filename}: {:?}", ImportStage::ValidatingWinding);
        validate::validate_winding(&exterior)?;

        log::debug!("{filename}: {:?}", ImportStage::ComputingMetrics);
        let metrics = metrics::compute(&exterior, self.backend.as_deref())?;
        self.limits.check_area(metrics.area_m2)?;

        Ok(build_result(exterior, interiors, selection, metrics))
    }

    /// Checks that a feature ring fits inside an optional container ring
    /// using the configured containment strategy.
    pub fn check_fit(&self, feature: &Ring, container: Option<&Ring>) -> Result<(), ImportError> {
        self.containment.fits(feature, container)
    }
}

/// Converts the interior rings of the selection, requiring sound structure
/// but no geometric properties.
fn validated_interiors(selection: &Selection) -> Result<Vec<Ring>, ImportError> {
    let mut interiors = Vec::with_capacity(selection.interiors.len());
    for (index, raw) in selection.interiors.iter().enumerate() {
        let ring = validate::validate_structure(raw)
            .map_err(|e| ImportError::InvalidPolygon(format!("interior ring {index}: {e}")))?;
        interiors.push(ring);
    }

    Ok(interiors)
}

fn build_result(
    exterior: Ring,
    interiors: Vec<Ring>,
    selection: Selection,
    metrics: metrics::Metrics,
) -> ImportResult {
    let ring = exterior.to_positions();
    let geometry_geojson = Feature {
        bbox: Some(metrics.bbox.to_array().to_vec()),
        geometry: Some(Geometry::new(geojson::Value::Polygon(vec![ring
            .iter()
            .map(|p| p.to_vec())
            .collect()]))),
        id: None,
        properties: selection.properties,
        foreign_members: None,
    };

    ImportResult {
        valid: true,
        ring,
        area_m2: metrics.area_m2,
        perimeter_m: metrics.perimeter_m,
        bbox: metrics.bbox,
        geometry_wkt: metrics.wkt,
        geometry_geojson,
        polygon: Polygon::new(exterior, interiors),
        source: selection.source,
        message: "Geometry imported successfully".to_owned(),
        warnings: selection.warnings,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::BackendError;
    use crate::metrics::METERS_PER_DEGREE;

    // ~111 m x ~111 m square at the equator, counterclockwise.
    const SMALL_SQUARE: &str =
        "[[[0.0, 0.0], [0.001, 0.0], [0.001, 0.001], [0.0, 0.001], [0.0, 0.0]]]";

    fn geojson_polygon(coordinates: &str) -> String {
        format!(r#"{{"type": "Polygon", "coordinates": {coordinates}}}"#)
    }

    fn kml_polygon(coordinates: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <Polygon>
        <outerBoundaryIs><LinearRing><coordinates>{coordinates}</coordinates></LinearRing></outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Document>
</kml>"#
        )
    }

    #[test]
    fn imports_a_valid_polygon() {
        let result = Importer::new()
            .import(&geojson_polygon(SMALL_SQUARE), "pitch.geojson", None)
            .unwrap();

        assert!(result.valid);
        assert_eq!(result.ring.len(), 5);
        assert_eq!(result.ring[0], result.ring[4]);
        assert_eq!(result.source, RingSource::Polygon);
        assert!(result.warnings.is_empty());

        let side_m = 0.001 * METERS_PER_DEGREE;
        assert_relative_eq!(result.area_m2, side_m * side_m);
        assert_relative_eq!(result.perimeter_m, side_m * 4.0);
        assert_eq!(result.bbox, GeoBbox::new(0.0, 0.0, 0.001, 0.001));
        assert!(result.geometry_wkt.starts_with("POLYGON((0 0,"));
        assert!(result.geometry_geojson.geometry.is_some());
    }

    #[test]
    fn import_is_deterministic() {
        let importer = Importer::new();
        let content = geojson_polygon(SMALL_SQUARE);

        let first = importer.import(&content, "a.geojson", None).unwrap();
        let second = importer.import(&content, "a.geojson", None).unwrap();

        assert_eq!(first.area_m2.to_bits(), second.area_m2.to_bits());
        assert_eq!(first.ring, second.ring);
        assert_eq!(first.bbox, second.bbox);
    }

    #[test]
    fn geojson_and_kml_agree() {
        let importer = Importer::new();
        let from_geojson = importer
            .import(&geojson_polygon(SMALL_SQUARE), "a.geojson", None)
            .unwrap();
        let from_kml = importer
            .import(
                &kml_polygon("0,0 0.001,0 0.001,0.001 0,0.001 0,0"),
                "a.kml",
                None,
            )
            .unwrap();

        assert_eq!(from_geojson.ring, from_kml.ring);
        assert_relative_eq!(from_geojson.area_m2, from_kml.area_m2);
    }

    #[test]
    fn mime_hint_is_checked_first() {
        let importer = Importer::new();

        assert_matches!(
            importer.import(
                &geojson_polygon(SMALL_SQUARE),
                "a.geojson",
                Some("application/geo+json")
            ),
            Ok(_)
        );
        // The content is valid; the declared type alone causes the failure.
        assert_matches!(
            importer.import(&geojson_polygon(SMALL_SQUARE), "a.pdf", Some("application/pdf")),
            Err(ImportError::InvalidMimeType(_))
        );
    }

    #[test]
    fn rejects_unknown_format() {
        assert_matches!(
            Importer::new().import("lon,lat\n0,0", "a.csv", None),
            Err(ImportError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_clockwise_winding() {
        let reversed =
            "[[[0.0, 0.001], [0.001, 0.001], [0.001, 0.0], [0.0, 0.0], [0.0, 0.001]]]";
        assert_matches!(
            Importer::new().import(&geojson_polygon(reversed), "a.geojson", None),
            Err(ImportError::InvalidWinding)
        );
    }

    #[test]
    fn rejects_self_intersection() {
        let bowtie =
            "[[[0.0, 0.0], [0.001, 0.001], [0.001, 0.0], [0.0, 0.001], [0.0, 0.0]]]";
        assert_matches!(
            Importer::new().import(&geojson_polygon(bowtie), "a.geojson", None),
            Err(ImportError::SelfIntersecting {
                edge_a: 0,
                edge_b: 2
            })
        );
    }

    #[test]
    fn rejects_open_ring() {
        let open = "[[[0.0, 0.0], [0.001, 0.0], [0.001, 0.001], [0.0, 0.001]]]";
        let err = Importer::new()
            .import(&geojson_polygon(open), "a.geojson", None)
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_POLYGON");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let beyond =
            "[[[180.0001, 0.0], [180.0, 0.0], [180.0, 0.001], [180.0001, 0.0]]]";
        assert_matches!(
            Importer::new().import(&geojson_polygon(beyond), "a.geojson", None),
            Err(ImportError::InvalidSrid { index: 0, .. })
        );
    }

    #[test]
    fn accepts_boundary_coordinates() {
        // Hugs the antimeridian: longitudes of exactly 180 are valid.
        let edge =
            "[[[179.999, 0.0], [180.0, 0.0], [180.0, 0.001], [179.999, 0.001], [179.999, 0.0]]]";
        assert_matches!(
            Importer::new().import(&geojson_polygon(edge), "a.geojson", None),
            Ok(_)
        );
    }

    #[test]
    fn coordinate_ceiling_runs_before_intersection_scan() {
        // The first four points cross; the padding keeps the ring closed and
        // pushes the count one over the ceiling.
        let mut coords: Vec<Vec<f64>> = vec![
            vec![0.0, 0.0],
            vec![0.001, 0.001],
            vec![0.001, 0.0],
            vec![0.0, 0.001],
        ];
        for i in 0..49_996 {
            coords.push(vec![-1e-9 * (i + 1) as f64, 0.001]);
        }
        coords.push(vec![0.0, 0.0]);
        assert_eq!(coords.len(), 50_001);

        let content =
            serde_json::json!({"type": "Polygon", "coordinates": [coords]}).to_string();
        assert_matches!(
            Importer::new().import(&content, "a.geojson", None),
            Err(ImportError::TooManyCoordinates {
                count: 50_001,
                max: 50_000
            })
        );
    }

    #[test]
    fn rejects_area_over_the_ceiling() {
        // ~11 km x ~11 km, well over the 10 km2 default ceiling.
        let large = "[[[0.0, 0.0], [0.1, 0.0], [0.1, 0.1], [0.0, 0.1], [0.0, 0.0]]]";
        let err = Importer::new()
            .import(&geojson_polygon(large), "a.geojson", None)
            .unwrap_err();

        assert_matches!(err, ImportError::GeometryTooLarge { .. });
        assert!(err.to_string().contains("10000000"));
    }

    #[test]
    fn rejects_area_under_the_floor() {
        // ~11 cm x ~11 cm.
        let tiny =
            "[[[0.0, 0.0], [0.000001, 0.0], [0.000001, 0.000001], [0.0, 0.000001], [0.0, 0.0]]]";
        assert_matches!(
            Importer::new().import(&geojson_polygon(tiny), "a.geojson", None),
            Err(ImportError::GeometryTooSmall { .. })
        );
    }

    #[test]
    fn multi_polygon_takes_first_and_warns() {
        let second =
            "[[[0.01, 0.01], [0.011, 0.01], [0.011, 0.011], [0.01, 0.011], [0.01, 0.01]]]";
        let content = format!(
            r#"{{"type": "MultiPolygon", "coordinates": [{SMALL_SQUARE}, {second}]}}"#
        );
        let result = Importer::new().import(&content, "a.geojson", None).unwrap();

        assert_eq!(
            result.source,
            RingSource::MultiPolygonFirst {
                discarded_polygons: 1
            }
        );
        assert_eq!(result.ring[1], [0.001, 0.0]);
        assert_eq!(
            result.warnings,
            vec!["File contains 2 polygons. Using first polygon.".to_owned()]
        );
    }

    #[test]
    fn reject_policy_fails_multi_feature_files() {
        let limits = ImportLimits {
            multi_feature: crate::limits::MultiFeaturePolicy::Reject,
            ..ImportLimits::default()
        };
        let content = format!(
            r#"{{"type": "MultiPolygon", "coordinates": [{SMALL_SQUARE}, {SMALL_SQUARE}]}}"#
        );
        assert_matches!(
            Importer::new().with_limits(limits).import(&content, "a.geojson", None),
            Err(ImportError::InvalidPolygon(_))
        );
    }

    #[test]
    fn holes_are_carried_and_warned() {
        let with_hole = r#"[
            [[0.0, 0.0], [0.001, 0.0], [0.001, 0.001], [0.0, 0.001], [0.0, 0.0]],
            [[0.0002, 0.0002], [0.0008, 0.0002], [0.0008, 0.0008], [0.0002, 0.0002]]
        ]"#;
        let result = Importer::new()
            .import(&geojson_polygon(with_hole), "a.geojson", None)
            .unwrap();

        assert_eq!(result.polygon.interiors().len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("interior rings"));
        // Metrics cover the exterior only.
        let side_m = 0.001 * METERS_PER_DEGREE;
        assert_relative_eq!(result.area_m2, side_m * side_m);
    }

    #[test]
    fn feature_properties_reach_the_canonical_feature() {
        let content = format!(
            r#"{{"type": "Feature", "properties": {{"name": "Pitch 1"}},
                "geometry": {{"type": "Polygon", "coordinates": {SMALL_SQUARE}}}}}"#
        );
        let result = Importer::new().import(&content, "a.geojson", None).unwrap();

        let properties = result.geometry_geojson.properties.unwrap();
        assert_eq!(properties["name"], "Pitch 1");
    }

    struct StubBackend;

    impl GeodeticBackend for StubBackend {
        fn polygon_area_m2(&self, _wkt: &str) -> Result<f64, BackendError> {
            Ok(12_345.0)
        }

        fn ring_perimeter_m(&self, _wkt: &str) -> Result<f64, BackendError> {
            Ok(444.0)
        }
    }

    struct FailingBackend;

    impl GeodeticBackend for FailingBackend {
        fn polygon_area_m2(&self, _wkt: &str) -> Result<f64, BackendError> {
            Err(BackendError::Unavailable("connection refused".to_owned()))
        }

        fn ring_perimeter_m(&self, _wkt: &str) -> Result<f64, BackendError> {
            Err(BackendError::Timeout)
        }
    }

    #[test]
    fn backend_metrics_are_used_when_available() {
        let result = Importer::new()
            .with_backend(Box::new(StubBackend))
            .import(&geojson_polygon(SMALL_SQUARE), "a.geojson", None)
            .unwrap();

        assert_relative_eq!(result.area_m2, 12_345.0);
        assert_relative_eq!(result.perimeter_m, 444.0);
    }

    #[test]
    fn backend_failure_is_recovered_locally() {
        let result = Importer::new()
            .with_backend(Box::new(FailingBackend))
            .import(&geojson_polygon(SMALL_SQUARE), "a.geojson", None)
            .unwrap();

        let side_m = 0.001 * METERS_PER_DEGREE;
        assert_relative_eq!(result.area_m2, side_m * side_m);
        assert_relative_eq!(result.perimeter_m, side_m * 4.0);
    }

    #[test]
    fn fit_check_uses_the_configured_strategy() {
        let importer = Importer::new();
        let venue = Ring::new(
            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]
                .iter()
                .map(|p| groundplan_types::GeoPoint::new(p[0], p[1]))
                .collect(),
        );
        let pitch = Ring::new(
            [[0.2, 0.2], [0.4, 0.2], [0.4, 0.4], [0.2, 0.4], [0.2, 0.2]]
                .iter()
                .map(|p| groundplan_types::GeoPoint::new(p[0], p[1]))
                .collect(),
        );

        assert_matches!(importer.check_fit(&pitch, Some(&venue)), Ok(()));
        assert_matches!(importer.check_fit(&pitch, None), Ok(()));
        assert_matches!(
            importer.check_fit(&venue, Some(&pitch)),
            Err(ImportError::OutOfBounds { .. })
        );
    }
}
