//! Ground-plane (XZ) geometry for Sylvan: axis-aligned boxes and polygons with holes.
//!
//! Ground positions are `glam::DVec2` values where `x` is east and `y` holds the
//! world `z` coordinate.

mod aabb;
mod polygon;

pub use aabb::AabbXz;
pub use polygon::PolygonXz;

/// Lift a ground position to 3D, placing it at the given elevation.
#[inline]
pub fn with_elevation(pos: glam::DVec2, elevation: f64) -> glam::DVec3 {
    glam::DVec3::new(pos.x, elevation, pos.y)
}
