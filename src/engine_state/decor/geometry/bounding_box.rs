//! # Bounding Boxes
//!
//! Two box types:
//! - [`BlockBox`]: an inclusive range of voxel cells, the footprint of a decor.
//! - [`Aabb`]: a continuous axis-aligned box used for entity queries.

use cgmath::Point3;

use crate::host::{BlockPos, WorldPos};

/// A continuous axis-aligned box. `min` is component-wise <= `max`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: WorldPos,
    pub max: WorldPos,
}

impl Aabb {
    /// Builds a box spanning two arbitrary corners.
    pub fn of(a: WorldPos, b: WorldPos) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// A cube of half-extent `radius` around `center`.
    pub fn around(center: WorldPos, radius: f64) -> Self {
        Self {
            min: Point3::new(center.x - radius, center.y - radius, center.z - radius),
            max: Point3::new(center.x + radius, center.y + radius, center.z + radius),
        }
    }

    /// Strict overlap: boxes that only touch on a face do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn contains(&self, point: WorldPos) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }
}

/// An inclusive box of voxel cells.
///
/// # Examples
///
/// ```
/// # use cgmath::Point3;
/// # use voxel_decor::engine_state::decor::geometry::BlockBox;
/// let footprint = BlockBox::of(Point3::new(2, 0, 0), Point3::new(0, 1, 0));
/// assert_eq!(footprint.positions().count(), 6);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockBox {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl BlockBox {
    pub fn of(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub fn size_x(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn size_y(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    pub fn size_z(&self) -> i32 {
        self.max.z - self.min.z + 1
    }

    pub fn cell_count(&self) -> usize {
        (self.size_x() * self.size_y() * self.size_z()) as usize
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x)
            && (self.min.y..=self.max.y).contains(&pos.y)
            && (self.min.z..=self.max.z).contains(&pos.z)
    }

    /// Every cell in the box, x fastest, then z, then y.
    pub fn positions(&self) -> impl Iterator<Item = BlockPos> + '_ {
        (self.min.y..=self.max.y).flat_map(move |y| {
            (self.min.z..=self.max.z)
                .flat_map(move |z| (self.min.x..=self.max.x).map(move |x| Point3::new(x, y, z)))
        })
    }

    /// The cells of one horizontal layer. Empty if `y` lies outside the box.
    pub fn layer(&self, y: i32) -> Vec<BlockPos> {
        if y < self.min.y || y > self.max.y {
            return Vec::new();
        }
        (self.min.z..=self.max.z)
            .flat_map(|z| (self.min.x..=self.max.x).map(move |x| Point3::new(x, y, z)))
            .collect()
    }

    /// The continuous volume the cells fill, from the near faces of `min`
    /// to the far faces of `max`.
    pub fn volume(&self) -> Aabb {
        Aabb {
            min: Point3::new(self.min.x as f64, self.min.y as f64, self.min.z as f64),
            max: Point3::new(
                (self.max.x + 1) as f64,
                (self.max.y + 1) as f64,
                (self.max.z + 1) as f64,
            ),
        }
    }

    /// Serialises as `minX,minY,minZ,maxX,maxY,maxZ` in floating-point form.
    pub fn to_tag_value(&self) -> String {
        format!(
            "{:?},{:?},{:?},{:?},{:?},{:?}",
            self.min.x as f64,
            self.min.y as f64,
            self.min.z as f64,
            self.max.x as f64,
            self.max.y as f64,
            self.max.z as f64
        )
    }

    /// Parses the text written by [`BlockBox::to_tag_value`].
    ///
    /// Returns `None` for anything other than six finite comma-separated numbers.
    pub fn from_tag_value(text: &str) -> Option<Self> {
        let mut values = [0i32; 6];
        let mut parts = text.split(',');

        for slot in values.iter_mut() {
            let value: f64 = parts.next()?.trim().parse().ok()?;
            if !value.is_finite() || value.abs() > i32::MAX as f64 {
                return None;
            }
            *slot = value.floor() as i32;
        }

        if parts.next().is_some() {
            return None;
        }

        Some(Self::of(
            Point3::new(values[0], values[1], values[2]),
            Point3::new(values[3], values[4], values[5]),
        ))
    }
}
