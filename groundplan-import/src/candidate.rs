//! Candidate features and the ring selection policy.
//!
//! Parser adapters produce a list of [`Candidate`] values in document order.
//! The selection policy picks the single polygon the rest of the pipeline
//! will validate, recording what was discarded instead of dropping it
//! silently.

use groundplan_types::RingSource;
use serde_json::{Map, Value};

use crate::error::ImportError;
use crate::limits::MultiFeaturePolicy;

/// Free-form feature properties carried through from the source document.
pub type Properties = Map<String, Value>;

/// A raw coordinate position: `[lon, lat]`, optionally with trailing
/// dimensions such as altitude.
pub type RawPosition = Vec<f64>;

/// A raw coordinate ring as parsed from the source document.
pub type RawRing = Vec<RawPosition>;

/// A parsed feature prior to validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Raw geometry of the feature.
    pub geometry: CandidateGeometry,
    /// Properties of the feature, if the source document had any.
    pub properties: Option<Properties>,
}

/// Raw geometry of a [`Candidate`].
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateGeometry {
    /// A single polygon: the first ring is the outer boundary, the rest are
    /// holes.
    Polygon(Vec<RawRing>),
    /// A multi-polygon: each member is a list of rings as in
    /// [`CandidateGeometry::Polygon`].
    MultiPolygon(Vec<Vec<RawRing>>),
}

impl CandidateGeometry {
    /// Number of member polygons in this geometry.
    pub fn polygon_count(&self) -> usize {
        match self {
            Self::Polygon(_) => 1,
            Self::MultiPolygon(members) => members.len(),
        }
    }
}

/// Result of applying the selection policy to a candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The outer ring chosen for validation.
    pub outer: RawRing,
    /// Interior rings (holes) of the chosen polygon, not validated here.
    pub interiors: Vec<RawRing>,
    /// How the outer ring was obtained from the source geometry.
    pub source: RingSource,
    /// Properties of the selected feature, if the source document had any.
    pub properties: Option<Properties>,
    /// Number of candidate features that were not used.
    pub discarded_features: usize,
    /// Human-readable notes about discarded geometry.
    pub warnings: Vec<String>,
}

/// Selects the polygon to validate from the parsed candidates.
///
/// The first candidate is authoritative. For a multi-polygon the outer ring
/// of its first member is used. Every discarded feature, member polygon, or
/// hole is recorded in the returned warnings; with
/// [`MultiFeaturePolicy::Reject`] a file containing more than one polygon
/// fails instead.
pub(crate) fn select_candidate(
    candidates: Vec<Candidate>,
    policy: MultiFeaturePolicy,
) -> Result<Selection, ImportError> {
    let total_polygons: usize = candidates.iter().map(|c| c.geometry.polygon_count()).sum();
    let Some(first) = candidates.first() else {
        return Err(ImportError::NoPolygons);
    };

    let mut warnings = Vec::new();
    if total_polygons > 1 {
        match policy {
            MultiFeaturePolicy::Reject => {
                return Err(ImportError::InvalidPolygon(format!(
                    "file contains {total_polygons} polygons, expected exactly one"
                )));
            }
            MultiFeaturePolicy::FirstWins => {
                warnings.push(format!(
                    "File contains {total_polygons} polygons. Using first polygon."
                ));
            }
        }
    }

    let (rings, source) = match &first.geometry {
        CandidateGeometry::Polygon(rings) => (rings.as_slice(), RingSource::Polygon),
        CandidateGeometry::MultiPolygon(members) => {
            let Some(first_member) = members.first() else {
                return Err(ImportError::InvalidPolygon(
                    "multi-polygon has no member polygons".to_owned(),
                ));
            };
            (
                first_member.as_slice(),
                RingSource::MultiPolygonFirst {
                    discarded_polygons: members.len() - 1,
                },
            )
        }
    };

    let Some((outer, interiors)) = rings.split_first() else {
        return Err(ImportError::InvalidPolygon(
            "polygon has no coordinate rings".to_owned(),
        ));
    };
    if !interiors.is_empty() {
        warnings.push(format!(
            "Polygon contains {} interior rings (holes); only the outer boundary is validated.",
            interiors.len()
        ));
    }

    Ok(Selection {
        outer: outer.clone(),
        interiors: interiors.to_vec(),
        source,
        properties: first.properties.clone(),
        discarded_features: candidates.len() - 1,
        warnings,
    })
}
