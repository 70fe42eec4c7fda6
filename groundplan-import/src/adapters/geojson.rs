//! GeoJSON parser adapter.

use geojson::{Feature, GeoJson, Value};

use crate::candidate::{Candidate, CandidateGeometry, Properties};
use crate::error::ImportError;

/// Parses GeoJSON text into candidate features.
///
/// Accepts a `FeatureCollection` (taking every feature with a polygonal
/// geometry), a single `Feature`, or a bare `Polygon`/`MultiPolygon`
/// geometry. Document order is preserved.
pub(crate) fn parse(content: &str) -> Result<Vec<Candidate>, ImportError> {
    let geojson: GeoJson = content
        .parse()
        .map_err(|e: geojson::Error| ImportError::InvalidGeoJson(e.to_string()))?;

    let candidates: Vec<Candidate> = match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(feature_candidate)
            .collect(),
        GeoJson::Feature(feature) => feature_candidate(feature).into_iter().collect(),
        GeoJson::Geometry(geometry) => {
            geometry_candidate(geometry.value, None).into_iter().collect()
        }
    };

    if candidates.is_empty() {
        Err(ImportError::NoPolygons)
    } else {
        Ok(candidates)
    }
}

fn feature_candidate(feature: Feature) -> Option<Candidate> {
    let properties = feature.properties;
    geometry_candidate(feature.geometry?.value, properties)
}

fn geometry_candidate(value: Value, properties: Option<Properties>) -> Option<Candidate> {
    match value {
        Value::Polygon(rings) => Some(Candidate {
            geometry: CandidateGeometry::Polygon(rings),
            properties,
        }),
        Value::MultiPolygon(members) => Some(Candidate {
            geometry: CandidateGeometry::MultiPolygon(members),
            properties,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const SQUARE: &str = r#"[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]"#;

    #[test]
    fn bare_polygon() {
        let content = format!(r#"{{"type": "Polygon", "coordinates": {SQUARE}}}"#);
        let candidates = parse(&content).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_matches!(&candidates[0].geometry, CandidateGeometry::Polygon(rings) if rings.len() == 1);
    }

    #[test]
    fn bare_multi_polygon() {
        let content = format!(r#"{{"type": "MultiPolygon", "coordinates": [{SQUARE}, {SQUARE}]}}"#);
        let candidates = parse(&content).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_matches!(
            &candidates[0].geometry,
            CandidateGeometry::MultiPolygon(members) if members.len() == 2
        );
    }

    #[test]
    fn feature_with_properties() {
        let content = format!(
            r#"{{"type": "Feature", "properties": {{"name": "Pitch 1"}},
                "geometry": {{"type": "Polygon", "coordinates": {SQUARE}}}}}"#
        );
        let candidates = parse(&content).unwrap();

        assert_eq!(candidates.len(), 1);
        let properties = candidates[0].properties.as_ref().unwrap();
        assert_eq!(properties["name"], "Pitch 1");
    }

    #[test]
    fn feature_collection_keeps_polygonal_features() {
        let content = format!(
            r#"{{"type": "FeatureCollection", "features": [
                {{"type": "Feature", "properties": null,
                  "geometry": {{"type": "Point", "coordinates": [0.0, 0.0]}}}},
                {{"type": "Feature", "properties": null,
                  "geometry": {{"type": "Polygon", "coordinates": {SQUARE}}}}},
                {{"type": "Feature", "properties": null, "geometry": null}}
            ]}}"#
        );
        let candidates = parse(&content).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_matches!(&candidates[0].geometry, CandidateGeometry::Polygon(_));
    }

    #[test]
    fn point_only_input() {
        let content = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;
        assert_matches!(parse(content), Err(ImportError::NoPolygons));
    }

    #[test]
    fn malformed_json() {
        assert_matches!(
            parse(r#"{"type": "Polygon", "coordinates": "#),
            Err(ImportError::InvalidGeoJson(_))
        );
    }
}
