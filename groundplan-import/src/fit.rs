//! Fit-in-container check.
//!
//! Used to verify that an imported feature (a pitch) lies inside a container
//! boundary (a venue). The containment test is a pluggable strategy so that
//! the default bounding-box approximation can be replaced with a true
//! polygon-in-polygon test without changing the interface.

use groundplan_types::Ring;

use crate::error::ImportError;

/// Strategy deciding whether a feature ring fits inside a container ring.
pub trait ContainmentStrategy {
    /// Checks that the feature lies inside the container.
    ///
    /// A `None` container means no constraint and always succeeds.
    fn fits(&self, feature: &Ring, container: Option<&Ring>) -> Result<(), ImportError>;
}

/// Approximates containment by the container's axis-aligned bounding box.
///
/// Every point of the feature ring must lie within the box. This accepts
/// features that are inside the container's box but outside its actual
/// boundary, and rejects nothing a true containment test would accept.
#[derive(Debug, Copy, Clone, Default)]
pub struct BboxContainment;

impl ContainmentStrategy for BboxContainment {
    fn fits(&self, feature: &Ring, container: Option<&Ring>) -> Result<(), ImportError> {
        let Some(container) = container else {
            return Ok(());
        };
        // An empty container ring constrains nothing.
        let Some(bounds) = container.bounding_box() else {
            return Ok(());
        };

        for point in feature.points() {
            if !bounds.contains(point) {
                return Err(ImportError::OutOfBounds {
                    lon: point.lon(),
                    lat: point.lat(),
                    bounds,
                });
            }
        }

        Ok(())
    }
}
