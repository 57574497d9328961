//! # Flag Sets
//!
//! A small bitmask container for enums whose variants map to bit indices.
//! Used for capability sets on decor definitions and facing masks, where
//! membership checks happen on every placement and click.

use std::fmt;

use num_traits::{One, PrimInt, Zero};

/// Implemented by enums that can live in a [`FlagSet`].
///
/// The discriminant determines the bit index, so it must stay below the
/// bit width of `Storage`.
pub trait Flag: Copy {
    /// The primitive integer the flags are packed into.
    type Storage: PrimInt + fmt::Debug;

    /// Index of the bit this flag occupies.
    fn bit_index(&self) -> u8;

    /// The single-bit mask for this flag.
    fn mask(&self) -> Self::Storage {
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A packed set of flags of one enum type.
///
/// # Examples
///
/// ```
/// # use voxel_decor::core::FlagSet;
/// # use voxel_decor::engine_state::decor::capability::Capability;
/// let mut set = FlagSet::<Capability>::empty();
/// set.add(Capability::SITTABLE);
/// assert!(set.has(Capability::SITTABLE));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagSet<F: Flag> {
    bits: F::Storage,
}

impl<F: Flag> FlagSet<F> {
    /// Creates a set with no flags.
    pub fn empty() -> Self {
        Self {
            bits: F::Storage::zero(),
        }
    }

    /// Creates a set holding exactly the given flags.
    pub fn of(flags: &[F]) -> Self {
        let mut set = Self::empty();
        set.add_many(flags);
        set
    }

    /// Raw bits, mostly useful for logging.
    pub fn bits(&self) -> F::Storage {
        self.bits
    }

    pub fn add(&mut self, flag: F) {
        self.bits = self.bits | flag.mask();
    }

    pub fn remove(&mut self, flag: F) {
        self.bits = self.bits & !flag.mask();
    }

    pub fn has(&self, flag: F) -> bool {
        (self.bits & flag.mask()) != F::Storage::zero()
    }

    pub fn add_many(&mut self, flags: &[F]) {
        for &flag in flags {
            self.add(flag);
        }
    }

    /// True when every flag in `flags` is present. An empty slice is trivially contained.
    pub fn has_all(&self, flags: &[F]) -> bool {
        let combined = Self::combine(flags);
        (self.bits & combined) == combined
    }

    /// True when at least one flag in `flags` is present.
    pub fn has_any(&self, flags: &[F]) -> bool {
        (self.bits & Self::combine(flags)) != F::Storage::zero()
    }

    /// True when this set and `other` share at least one flag.
    pub fn intersects(&self, other: &Self) -> bool {
        (self.bits & other.bits) != F::Storage::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == F::Storage::zero()
    }

    fn combine(flags: &[F]) -> F::Storage {
        flags
            .iter()
            .fold(F::Storage::zero(), |acc, flag| acc | flag.mask())
    }
}

impl<F: Flag> Default for FlagSet<F> {
    fn default() -> Self {
        Self::empty()
    }
}
