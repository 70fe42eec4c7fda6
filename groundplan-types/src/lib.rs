//! Geographic geometry primitives used by the Groundplan import engine.
//!
//! All types in this crate work with WGS84 coordinates: longitude and latitude
//! in degrees. There is no projection support; planar computations (winding,
//! shoelace area) treat longitude and latitude as `x` and `y` directly.

mod bbox;
mod orient;
mod point;
mod polygon;
mod ring;

pub use bbox::GeoBbox;
pub use orient::{Orientation, Winding};
pub use point::GeoPoint;
pub use polygon::{Polygon, RingSource};
pub use ring::Ring;
