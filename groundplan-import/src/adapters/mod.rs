//! Parser adapters turning raw input text into candidate features.
//!
//! One adapter per supported encoding. Both produce the same intermediate
//! representation, a list of [`Candidate`](crate::Candidate) values in
//! document order, so the rest of the pipeline does not care which format the
//! input arrived in.

pub(crate) mod geojson;
pub(crate) mod kml;
