//! # Hit-Box Geometry
//!
//! Box math for decor footprints: extents and model offsets, yaw snapping,
//! rotation of footprint corners and enumeration of the cells a decor
//! occupies.

pub mod bounding_box;
pub mod hit_box;
pub mod rotation;

pub use bounding_box::{Aabb, BlockBox};
pub use hit_box::{CollisionKind, HitBox, MAX_EXTENT};
