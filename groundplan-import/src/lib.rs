//! Geometry import and validation engine for user-submitted boundary files.
//!
//! The engine takes GeoJSON or KML text describing a polygon boundary and
//! turns it into a validated, canonical geometry record with area, perimeter,
//! and bounding box. Input flows through a fixed pipeline: format detection,
//! parsing, candidate selection, structural validation, WGS84 bounds
//! validation, a self-intersection scan, winding-order enforcement, size and
//! area limits, and metric computation. The first failure stops the run with
//! a typed [`ImportError`]; success produces an [`ImportResult`] the caller
//! owns outright.
//!
//! The engine is stateless: a single [`Importer`] can serve concurrent calls
//! without locking. Area and perimeter prefer an external [`GeodeticBackend`]
//! and recover from its failure with a deterministic planar approximation.
//!
//! ```no_run
//! use groundplan_import::Importer;
//!
//! let importer = Importer::new();
//! let content = r#"{"type": "Polygon", "coordinates":
//!     [[[0.0, 0.0], [0.001, 0.0], [0.001, 0.001], [0.0, 0.001], [0.0, 0.0]]]}"#;
//! let result = importer.import(content, "pitch.geojson", None)?;
//! assert!(result.valid);
//! # Ok::<(), groundplan_import::ImportError>(())
//! ```

mod adapters;
mod candidate;
mod format;
mod validate;

pub mod assets;
pub mod error;
pub mod fit;
pub mod importer;
pub mod limits;
pub mod metrics;

pub use candidate::{Candidate, CandidateGeometry, Properties, RawPosition, RawRing, Selection};
pub use error::{BackendError, ImportError};
pub use fit::{BboxContainment, ContainmentStrategy};
pub use format::{detect_format, Format};
pub use importer::{ImportResult, ImportStage, Importer};
pub use limits::{ImportLimits, MultiFeaturePolicy};
pub use metrics::GeodeticBackend;
