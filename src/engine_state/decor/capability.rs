//! # Capability Lattice
//!
//! Optional behaviours a decor kind can opt into. Some combinations are
//! contradictory (a decor cannot both cycle through a variant list and pick
//! its variant from the light level), so every definition's set is checked
//! once against [`EXCLUSIONS`] when it is built.

use std::fmt;

use num_derive::FromPrimitive;

use crate::core::{Flag, FlagSet};

/// A behaviour a decor kind may have.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Capability {
    /// The display item can be dyed.
    PAINTABLE = 0,
    /// Actors can sit on it.
    SITTABLE = 1,
    /// A wrench cycles it through its variant list.
    WRENCHABLE = 2,
    /// Clicking cycles the light level of its cells.
    LIGHTABLE = 3,
    /// Has a variant list, but nothing cycles it.
    TYPED = 4,
    /// The variant is chosen by the current light level.
    LIGHT_TYPED = 5,
    /// The variant is chosen by the facing it was placed with.
    FACE_TYPED = 6,
}

/// Number of capabilities.
pub const CAPABILITY_COUNT: u8 = 7;

impl Flag for Capability {
    type Storage = u8;

    fn bit_index(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::PAINTABLE => "paintable",
            Capability::SITTABLE => "sittable",
            Capability::WRENCHABLE => "wrenchable",
            Capability::LIGHTABLE => "lightable",
            Capability::TYPED => "typed",
            Capability::LIGHT_TYPED => "light-typed",
            Capability::FACE_TYPED => "face-typed",
        };
        f.write_str(name)
    }
}

/// The capabilities of one decor kind.
pub type CapabilitySet = FlagSet<Capability>;

/// Pairs that may not appear together. Each row lists what its first entry excludes.
pub static EXCLUSIONS: [(Capability, &[Capability]); 3] = [
    (
        Capability::TYPED,
        &[
            Capability::WRENCHABLE,
            Capability::LIGHT_TYPED,
            Capability::FACE_TYPED,
        ],
    ),
    (
        Capability::WRENCHABLE,
        &[Capability::LIGHT_TYPED, Capability::FACE_TYPED],
    ),
    (
        Capability::LIGHT_TYPED,
        &[Capability::LIGHTABLE, Capability::FACE_TYPED],
    ),
];

/// Every capability present in `set`, in declaration order.
pub fn members(set: &CapabilitySet) -> Vec<Capability> {
    (0..CAPABILITY_COUNT)
        .filter_map(<Capability as num::FromPrimitive>::from_u8)
        .filter(|capability| set.has(*capability))
        .collect()
}

/// Finds the first excluded pair present in `set`.
///
/// # Returns
/// `Some((a, b))` when `a` and `b` are both set but `a` excludes `b`.
pub fn first_conflict(set: &CapabilitySet) -> Option<(Capability, Capability)> {
    EXCLUSIONS.iter().find_map(|(capability, excluded)| {
        if !set.has(*capability) {
            return None;
        }
        excluded
            .iter()
            .find(|other| set.has(**other))
            .map(|other| (*capability, *other))
    })
}
