//! KML parser adapter.

use kml::types::{Geometry, LinearRing, Placemark, Polygon};
use kml::Kml;
use serde_json::Value;

use crate::candidate::{Candidate, CandidateGeometry, Properties, RawRing};
use crate::error::ImportError;

/// Parses KML text into candidate features.
///
/// Walks `Document` and `Folder` containers in document order, taking every
/// `Polygon` it finds. A `MultiGeometry` is flattened: each nested polygon
/// becomes its own candidate. Placemark name and description are carried
/// through as candidate properties.
pub(crate) fn parse(content: &str) -> Result<Vec<Candidate>, ImportError> {
    let document: Kml = content
        .parse()
        .map_err(|e: kml::Error| ImportError::InvalidKml(e.to_string()))?;

    let mut candidates = Vec::new();
    collect_node(&document, &mut candidates);

    if candidates.is_empty() {
        Err(ImportError::NoPolygons)
    } else {
        Ok(candidates)
    }
}

fn collect_node(node: &Kml, out: &mut Vec<Candidate>) {
    match node {
        Kml::KmlDocument(document) => {
            for element in &document.elements {
                collect_node(element, out);
            }
        }
        Kml::Document { elements, .. } | Kml::Folder { elements, .. } => {
            for element in elements {
                collect_node(element, out);
            }
        }
        Kml::Placemark(placemark) => {
            if let Some(geometry) = &placemark.geometry {
                collect_geometry(geometry, placemark_properties(placemark).as_ref(), out);
            }
        }
        Kml::Polygon(polygon) => out.push(polygon_candidate(polygon, None)),
        Kml::MultiGeometry(multi) => {
            for geometry in &multi.geometries {
                collect_geometry(geometry, None, out);
            }
        }
        _ => {}
    }
}

fn collect_geometry(geometry: &Geometry, properties: Option<&Properties>, out: &mut Vec<Candidate>) {
    match geometry {
        Geometry::Polygon(polygon) => out.push(polygon_candidate(polygon, properties.cloned())),
        Geometry::MultiGeometry(multi) => {
            for nested in &multi.geometries {
                collect_geometry(nested, properties, out);
            }
        }
        _ => {}
    }
}

fn polygon_candidate(polygon: &Polygon, properties: Option<Properties>) -> Candidate {
    let mut rings = Vec::with_capacity(1 + polygon.inner.len());
    rings.push(ring_positions(&polygon.outer));
    rings.extend(polygon.inner.iter().map(ring_positions));

    Candidate {
        geometry: CandidateGeometry::Polygon(rings),
        properties,
    }
}

fn ring_positions(ring: &LinearRing) -> RawRing {
    ring.coords
        .iter()
        .map(|coord| match coord.z {
            Some(z) => vec![coord.x, coord.y, z],
            None => vec![coord.x, coord.y],
        })
        .collect()
}

fn placemark_properties(placemark: &Placemark) -> Option<Properties> {
    let mut properties = Properties::new();
    if let Some(name) = &placemark.name {
        properties.insert("name".to_owned(), Value::String(name.clone()));
    }
    if let Some(description) = &placemark.description {
        properties.insert("description".to_owned(), Value::String(description.clone()));
    }

    if properties.is_empty() {
        None
    } else {
        Some(properties)
    }
}
