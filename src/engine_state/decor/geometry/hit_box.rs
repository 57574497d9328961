//! # Hit Box
//!
//! The geometry of a decor kind: how far it extends from the cell it is
//! anchored to, where its model sits inside that cell, and what kind of
//! cell it fills.
//!
//! ## Extents
//!
//! - `x`: width, running to the placing actor's right
//! - `y`: height
//! - `z`: depth, running away from the placing actor
//!
//! Negative horizontal extents grow the footprint in the opposite
//! direction. The height is always positive; when a decor hangs from a
//! ceiling it is mirrored so the footprint grows downwards from the anchor.

use cgmath::{Point3, Vector3};

use super::bounding_box::BlockBox;
use super::rotation;
use crate::engine_state::decor::facing::{BlockFace, Facing, FacingMask};
use crate::error::{DecorError, Result};
use crate::host::{BlockPos, WorldPos};

/// Largest magnitude any extent or model offset may have.
pub const MAX_EXTENT: f64 = 8.0;

/// How a decor's footprint cells are filled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    /// Cells become barriers and block movement.
    SOLID,
    /// Cells become light emitters without collision.
    LIGHT,
    /// Cells are left untouched; several decors may share one cell.
    NONE,
}

/// Validated hit-box geometry of a decor kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitBox {
    x: f64,
    y: f64,
    z: f64,
    model_offset: Vector3<f64>,
    kind: CollisionKind,
}

impl HitBox {
    /// Creates a hit box with no model offset.
    ///
    /// # Errors
    /// Returns [`DecorError::Geometry`] if a horizontal extent is zero or
    /// outside `[-8, 8]`, the height is outside `(0, 8]`, or a horizontal
    /// extent wider than one cell is fractional.
    pub fn new(x: f64, y: f64, z: f64, kind: CollisionKind) -> Result<Self> {
        for (axis, value) in [("x", x), ("z", z)] {
            if value == 0.0 || !(-MAX_EXTENT..=MAX_EXTENT).contains(&value) {
                return Err(DecorError::Geometry(format!(
                    "{axis} extent {value} must be nonzero and within [-{MAX_EXTENT}, {MAX_EXTENT}]"
                )));
            }
        }

        // ceilings mirror the height themselves
        if y.is_nan() || y <= 0.0 || y > MAX_EXTENT {
            return Err(DecorError::Geometry(format!(
                "y extent {y} must be within (0, {MAX_EXTENT}]"
            )));
        }

        for (axis, value) in [("x", x), ("z", z)] {
            if value.abs() > 1.0 && value.fract() != 0.0 {
                return Err(DecorError::Geometry(format!(
                    "{axis} extent {value} spans several cells and must be a whole number"
                )));
            }
        }

        Ok(Self {
            x,
            y,
            z,
            model_offset: Vector3::new(0.0, 0.0, 0.0),
            kind,
        })
    }

    /// Shifts the rendered model relative to the anchor cell's centre.
    ///
    /// # Errors
    /// Returns [`DecorError::Geometry`] if any component is outside `[-8, 8]`.
    pub fn with_model_offset(mut self, x: f64, y: f64, z: f64) -> Result<Self> {
        for (axis, value) in [("x", x), ("y", y), ("z", z)] {
            if !(-MAX_EXTENT..=MAX_EXTENT).contains(&value) {
                return Err(DecorError::Geometry(format!(
                    "model offset {axis} {value} is outside [-{MAX_EXTENT}, {MAX_EXTENT}]"
                )));
            }
        }
        self.model_offset = Vector3::new(x, y, z);
        Ok(self)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn model_offset(&self) -> Vector3<f64> {
        self.model_offset
    }

    pub fn kind(&self) -> CollisionKind {
        self.kind
    }

    /// Whether either horizontal extent is more than one cell.
    pub fn is_wide(&self) -> bool {
        self.x.abs() > 1.0 || self.z.abs() > 1.0
    }

    /// Snaps an actor yaw to the step this geometry allows.
    pub fn snap_yaw(&self, yaw: f32) -> f32 {
        if self.is_wide() {
            rotation::snap_to_90(yaw)
        } else {
            rotation::snap_to_45(yaw)
        }
    }

    /// Yaw of the visual entity. Models face the actor, hence the half turn.
    pub fn display_yaw(&self, yaw: f32) -> f32 {
        self.snap_yaw(yaw) + 180.0
    }

    /// Where the visual entity stands for a decor anchored at `anchor`.
    pub fn display_position(&self, anchor: BlockPos) -> WorldPos {
        Point3::new(
            anchor.x as f64 + 0.5 + self.model_offset.x,
            anchor.y as f64 + 0.5 + self.model_offset.y,
            anchor.z as f64 + 0.5 + self.model_offset.z,
        )
    }

    pub fn is_ceiling(&self, facings: &FacingMask, face: BlockFace) -> bool {
        facings.has(Facing::CEILING) && face == BlockFace::DOWN
    }

    pub fn is_floor(&self, facings: &FacingMask, face: BlockFace) -> bool {
        facings.has(Facing::FLOOR) && face == BlockFace::UP
    }

    pub fn is_wall(&self, facings: &FacingMask, face: BlockFace) -> bool {
        facings.has(Facing::WALL) && Facing::of(face) == Facing::WALL
    }

    /// Horizontal size of each proxy, capped at one cell.
    pub fn interaction_width(&self) -> f32 {
        self.z.abs().min(1.0) as f32
    }

    /// Vertical size of each proxy; negative when hanging from a ceiling.
    pub fn interaction_height(&self, facings: &FacingMask, face: BlockFace) -> f32 {
        if self.is_ceiling(facings, face) {
            -self.y as f32
        } else {
            self.y as f32
        }
    }

    /// The cells a decor occupies when anchored at `anchor`.
    ///
    /// Extents are truncated to whole cells (a sub-cell extent still takes
    /// one cell). The far corner sits `extent - 1` cells from the anchor in
    /// the extent's direction, rotated for the actor's yaw.
    pub fn block_box(
        &self,
        anchor: BlockPos,
        facings: &FacingMask,
        face: BlockFace,
        yaw: f32,
    ) -> BlockBox {
        let cells = |extent: f64| match extent as i32 {
            0 => 1,
            whole => whole,
        };
        let toward_anchor = |cells: i32| if cells > 0 { cells - 1 } else { cells + 1 };

        let x = cells(self.x);
        let y = cells(self.interaction_height(facings, face) as f64);
        let z = cells(self.z);

        let offset = rotation::rotate_offset(
            Vector3::new(toward_anchor(x), toward_anchor(y), toward_anchor(z)),
            yaw,
        );

        BlockBox::of(anchor, anchor + offset)
    }

    /// The footprint cells that get a proxy: the layer the decor is attached
    /// by. Each proxy spans the decor's full height from there.
    pub fn proxy_cells(&self, block_box: &BlockBox, facings: &FacingMask, face: BlockFace) -> Vec<BlockPos> {
        if self.is_ceiling(facings, face) {
            block_box.layer(block_box.max.y)
        } else {
            block_box.layer(block_box.min.y)
        }
    }

    /// Position of a proxy inside its cell.
    ///
    /// Floor proxies stand on the cell's bottom centre and ceiling proxies
    /// hang from its top centre. Wall proxies are pushed against the wall
    /// the actor is facing and centred vertically.
    pub fn offset_in_block(&self, facings: &FacingMask, face: BlockFace, yaw: f32) -> Vector3<f64> {
        let ceiling = self.is_ceiling(facings, face);
        let wall = self.is_wall(facings, face);
        let (mut x, mut z) = (0.5, 0.5);

        if wall {
            let looking = rotation::face_45(-yaw);
            let half_width = self.interaction_width() as f64 / 2.0;

            if looking.is_diagonal() || looking.is_x() {
                x = half_width;
            }
            if looking.is_diagonal() || looking.is_z() {
                z = half_width;
            }

            match looking {
                BlockFace::WEST | BlockFace::NORTH_WEST => x = 1.0 - x,
                BlockFace::SOUTH | BlockFace::SOUTH_EAST => z = 1.0 - z,
                BlockFace::SOUTH_WEST => {
                    x = 1.0 - x;
                    z = 1.0 - z;
                }
                _ => {}
            }
        }

        let y = if wall && !ceiling && !self.is_floor(facings, face) {
            0.5 - self.interaction_height(facings, face) as f64 / 2.0
        } else if ceiling {
            1.0
        } else {
            0.0
        };

        Vector3::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> FacingMask {
        FacingMask::of(&[Facing::FLOOR])
    }

    #[test]
    fn extent_validation() {
        assert!(HitBox::new(0.0, 1.0, 1.0, CollisionKind::SOLID).is_err());
        assert!(HitBox::new(1.0, 9.0, 1.0, CollisionKind::SOLID).is_err());
        assert!(HitBox::new(-8.5, 1.0, 1.0, CollisionKind::SOLID).is_err());
        assert!(HitBox::new(2.5, 1.0, 1.0, CollisionKind::SOLID).is_err());
        assert!(HitBox::new(0.4125, 0.9375, 0.4125, CollisionKind::NONE).is_ok());
        assert!(HitBox::new(-8.0, 8.0, 3.0, CollisionKind::SOLID).is_ok());
    }

    #[test]
    fn height_must_be_positive() {
        for y in [-2.0, -0.5, 0.0, 8.25, f64::NAN] {
            assert!(
                matches!(HitBox::new(1.0, y, 1.0, CollisionKind::SOLID), Err(DecorError::Geometry(_))),
                "height {y}"
            );
        }
        let tall = HitBox::new(1.0, 8.0, 1.0, CollisionKind::SOLID).unwrap();
        let anchor = Point3::new(0, 70, 0);
        let bb = tall.block_box(anchor, &floor(), BlockFace::UP, 0.0);
        assert_eq!(bb.min.y, 70);
        assert_eq!(tall.proxy_cells(&bb, &floor(), BlockFace::UP), vec![anchor]);
    }

    #[test]
    fn model_offset_validation() {
        let hit_box = HitBox::new(1.0, 1.0, 1.0, CollisionKind::SOLID).unwrap();
        assert!(hit_box.with_model_offset(0.0, 8.5, 0.0).is_err());
        let shifted = hit_box.with_model_offset(0.0, -0.5, 0.25).unwrap();
        assert_eq!(
            shifted.display_position(Point3::new(0, 10, 0)),
            Point3::new(0.5, 10.0, 0.75)
        );
    }

    #[test]
    fn single_cell_box() {
        let hit_box = HitBox::new(0.5, 0.5, 0.5, CollisionKind::NONE).unwrap();
        let anchor = Point3::new(4, 70, -3);
        let bb = hit_box.block_box(anchor, &floor(), BlockFace::UP, 33.0);
        assert_eq!(bb, BlockBox::of(anchor, anchor));
    }

    #[test]
    fn wide_box_rotates_with_yaw() {
        let hit_box = HitBox::new(3.0, 1.0, 2.0, CollisionKind::SOLID).unwrap();
        let anchor = Point3::new(0, 0, 0);

        let north = hit_box.block_box(anchor, &floor(), BlockFace::UP, 180.0);
        assert_eq!(north, BlockBox::of(anchor, Point3::new(2, 0, -1)));

        let east = hit_box.block_box(anchor, &floor(), BlockFace::UP, 270.0);
        assert_eq!(east, BlockBox::of(anchor, Point3::new(1, 0, 2)));
        assert_eq!(east.cell_count(), 6);
    }

    #[test]
    fn ceiling_box_grows_down() {
        let hit_box = HitBox::new(1.0, 2.0, 1.0, CollisionKind::LIGHT).unwrap();
        let facings = FacingMask::of(&[Facing::FLOOR, Facing::CEILING]);
        let anchor = Point3::new(0, 10, 0);

        let hanging = hit_box.block_box(anchor, &facings, BlockFace::DOWN, 0.0);
        assert_eq!(hanging, BlockBox::of(Point3::new(0, 9, 0), anchor));
        assert_eq!(hit_box.proxy_cells(&hanging, &facings, BlockFace::DOWN), vec![anchor]);

        let standing = hit_box.block_box(anchor, &facings, BlockFace::UP, 0.0);
        assert_eq!(standing, BlockBox::of(anchor, Point3::new(0, 11, 0)));
        assert_eq!(hit_box.proxy_cells(&standing, &facings, BlockFace::UP), vec![anchor]);
    }

    #[test]
    fn interaction_dimensions() {
        let hit_box = HitBox::new(2.0, 1.5, 2.0, CollisionKind::SOLID).unwrap();
        let facings = Facing::any();
        assert_eq!(hit_box.interaction_width(), 1.0);
        assert_eq!(hit_box.interaction_height(&facings, BlockFace::UP), 1.5);
        assert_eq!(hit_box.interaction_height(&facings, BlockFace::DOWN), -1.5);
    }

    #[test]
    fn proxy_offsets() {
        let hit_box = HitBox::new(0.5, 0.5, 0.5, CollisionKind::NONE).unwrap();
        let facings = Facing::any();

        assert_eq!(
            hit_box.offset_in_block(&facings, BlockFace::UP, 0.0),
            Vector3::new(0.5, 0.0, 0.5)
        );
        assert_eq!(
            hit_box.offset_in_block(&facings, BlockFace::DOWN, 0.0),
            Vector3::new(0.5, 1.0, 0.5)
        );
        // looking south: pushed against the south wall of the cell
        assert_eq!(
            hit_box.offset_in_block(&facings, BlockFace::NORTH, 0.0),
            Vector3::new(0.5, 0.25, 0.75)
        );
    }

    #[test]
    fn yaw_snap_depends_on_width() {
        let small = HitBox::new(1.0, 1.0, 1.0, CollisionKind::SOLID).unwrap();
        let wide = HitBox::new(2.0, 1.0, 1.0, CollisionKind::SOLID).unwrap();
        assert_eq!(small.display_yaw(40.0), 225.0);
        assert_eq!(wide.display_yaw(40.0), 180.0);
    }
}
