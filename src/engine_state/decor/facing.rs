//! # Facing Classifier
//!
//! Maps the face of the block a decor is placed against to one of three
//! facing buckets, and holds the per-definition mask of buckets a decor may
//! be attached to.

use crate::core::{Flag, FlagSet};

/// A direction a block face can point in, including the four diagonals.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockFace {
    UP,
    DOWN,
    NORTH,
    SOUTH,
    EAST,
    WEST,
    NORTH_EAST,
    NORTH_WEST,
    SOUTH_EAST,
    SOUTH_WEST,
}

impl BlockFace {
    /// Returns all ten faces.
    pub fn all() -> [BlockFace; 10] {
        [
            BlockFace::UP,
            BlockFace::DOWN,
            BlockFace::NORTH,
            BlockFace::SOUTH,
            BlockFace::EAST,
            BlockFace::WEST,
            BlockFace::NORTH_EAST,
            BlockFace::NORTH_WEST,
            BlockFace::SOUTH_EAST,
            BlockFace::SOUTH_WEST,
        ]
    }

    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            BlockFace::NORTH_EAST
                | BlockFace::NORTH_WEST
                | BlockFace::SOUTH_EAST
                | BlockFace::SOUTH_WEST
        )
    }

    /// Faces along the x axis.
    pub fn is_x(&self) -> bool {
        matches!(self, BlockFace::EAST | BlockFace::WEST)
    }

    /// Faces along the z axis.
    pub fn is_z(&self) -> bool {
        matches!(self, BlockFace::NORTH | BlockFace::SOUTH)
    }
}

/// Where a decor hangs relative to the block it was placed against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Placed on top of a block.
    FLOOR = 0,
    /// Hung from the underside of a block.
    CEILING = 1,
    /// Placed against the side of a block.
    WALL = 2,
}

impl Flag for Facing {
    type Storage = u8;

    fn bit_index(&self) -> u8 {
        *self as u8
    }
}

/// The set of facings a decor accepts.
pub type FacingMask = FlagSet<Facing>;

impl Facing {
    pub fn all() -> [Facing; 3] {
        [Facing::FLOOR, Facing::CEILING, Facing::WALL]
    }

    /// Classifies the face a decor is placed against.
    ///
    /// Placing against the top of a block (`UP`) puts the decor on the floor,
    /// against the bottom (`DOWN`) hangs it from the ceiling, and every
    /// horizontal or diagonal face is a wall.
    pub fn of(face: BlockFace) -> Facing {
        match face {
            BlockFace::UP => Facing::FLOOR,
            BlockFace::DOWN => Facing::CEILING,
            _ => Facing::WALL,
        }
    }

    /// The mask holding every facing.
    pub fn any() -> FacingMask {
        FacingMask::of(&Facing::all())
    }

    /// Lowercase name, as used in variant keys.
    pub fn name(&self) -> &'static str {
        match self {
            Facing::FLOOR => "floor",
            Facing::CEILING => "ceiling",
            Facing::WALL => "wall",
        }
    }
}

/// True when `mask` accepts placement against `face`.
pub fn accepts(mask: &FacingMask, face: BlockFace) -> bool {
    mask.has(Facing::of(face))
}

/// True when `mask` holds all three facings.
pub fn is_any_face(mask: &FacingMask) -> bool {
    mask.has_all(&Facing::all())
}
