//! # Rotation Snapping
//!
//! Actor yaw is continuous, decor orientation is not. Small decors snap to
//! the nearest 45°, anything wider than one cell snaps to the nearest 90° so
//! its footprint stays grid-aligned.
//!
//! Yaw follows the host convention: 0 faces south (+z), 90 west, 180 north,
//! 270 east.

use cgmath::Vector3;

use crate::engine_state::decor::facing::BlockFace;

const STEPS_45: [i32; 9] = [0, 45, 90, 135, 180, 225, 270, 315, 360];
const STEPS_90: [i32; 5] = [0, 90, 180, 270, 360];

const BLOCK_FACES_45: [BlockFace; 9] = [
    BlockFace::SOUTH,
    BlockFace::SOUTH_WEST,
    BlockFace::WEST,
    BlockFace::NORTH_WEST,
    BlockFace::NORTH,
    BlockFace::NORTH_EAST,
    BlockFace::EAST,
    BlockFace::SOUTH_EAST,
    BlockFace::SOUTH,
];

/// Index of the step nearest to `degrees`, after truncating to whole
/// degrees and wrapping into `[0, 360)`. Ties go to the lower step.
fn nearest_index(degrees: f32, steps: &[i32]) -> usize {
    let wrapped = (degrees as i32).rem_euclid(360);
    steps
        .iter()
        .enumerate()
        .min_by_key(|(_, step)| (wrapped - **step).abs())
        .map(|(index, _)| index)
        .unwrap_or(0)
}

/// Snaps to the nearest multiple of 45 in `[0, 360]`.
pub fn snap_to_45(degrees: f32) -> f32 {
    STEPS_45[nearest_index(degrees, &STEPS_45)] as f32
}

/// Snaps to the nearest multiple of 90 in `[0, 360]`.
pub fn snap_to_90(degrees: f32) -> f32 {
    STEPS_90[nearest_index(degrees, &STEPS_90)] as f32
}

/// The horizontal face (diagonals included) nearest to a yaw.
pub fn face_45(degrees: f32) -> BlockFace {
    BLOCK_FACES_45[nearest_index(degrees, &STEPS_45)]
}

/// Rotates a footprint offset for an actor looking along `yaw`.
///
/// The unrotated offset has `x` running to the actor's right and `z`
/// running away from the actor; `y` is never rotated. `yaw` is snapped to
/// 90° first.
///
/// # Examples
///
/// ```
/// # use cgmath::Vector3;
/// # use voxel_decor::engine_state::decor::geometry::rotation::rotate_offset;
/// // Facing north, depth runs towards -z and width towards +x.
/// assert_eq!(rotate_offset(Vector3::new(1, 0, 2), 180.0), Vector3::new(1, 0, -2));
/// ```
pub fn rotate_offset(offset: Vector3<i32>, yaw: f32) -> Vector3<i32> {
    let Vector3 { x, y, z } = offset;

    match (snap_to_90(yaw) as i32).rem_euclid(360) {
        90 => Vector3::new(-z, y, -x),
        180 => Vector3::new(x, y, -z),
        270 => Vector3::new(z, y, x),
        _ => Vector3::new(-x, y, z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping() {
        assert_eq!(snap_to_45(0.0), 0.0);
        assert_eq!(snap_to_45(30.0), 45.0);
        assert_eq!(snap_to_45(-30.0), 315.0);
        assert_eq!(snap_to_45(350.0), 360.0);
        assert_eq!(snap_to_90(44.0), 0.0);
        assert_eq!(snap_to_90(46.0), 90.0);
        assert_eq!(snap_to_90(-100.0), 270.0);
        assert_eq!(snap_to_90(45.0), 0.0);
    }

    #[test]
    fn faces() {
        assert_eq!(face_45(0.0), BlockFace::SOUTH);
        assert_eq!(face_45(100.0), BlockFace::WEST);
        assert_eq!(face_45(-45.0), BlockFace::SOUTH_EAST);
    }

    #[test]
    fn rotation_keeps_depth_in_front_of_actor() {
        let offset = Vector3::new(1, 1, 2);
        // south
        assert_eq!(rotate_offset(offset, 0.0), Vector3::new(-1, 1, 2));
        // west
        assert_eq!(rotate_offset(offset, 90.0), Vector3::new(-2, 1, -1));
        // north
        assert_eq!(rotate_offset(offset, 180.0), Vector3::new(1, 1, -2));
        // east
        assert_eq!(rotate_offset(offset, 270.0), Vector3::new(2, 1, 1));
        // full turn wraps
        assert_eq!(rotate_offset(offset, 360.0), rotate_offset(offset, 0.0));
    }
}
