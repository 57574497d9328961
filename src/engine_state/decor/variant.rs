//! # Variant State Machine
//!
//! Variants are alternate items (and therefore appearances) of one decor
//! kind. A kind keeps them in one of three table shapes:
//!
//! - **List**: wrenchable and typed kinds. Slot 0 is always the default
//!   variant derived from the base item. Wrenching advances one slot.
//! - **Light levels**: light-typed kinds. Each configured light level owns a
//!   variant; clicking advances to the next level in declared order.
//! - **Faces**: face-typed kinds. One variant per facing bucket, chosen at
//!   placement time.
//!
//! Every shape is a cyclic permutation: advancing `len()` times from any
//! entry returns to it.
//!
//! ## Typed keys
//!
//! A variant item carries `type = "<kind>.type.<variant>"` in its tags.
//! Items whose type tag does not have that shape classify as the default
//! variant, so plain base items and foreign tags never fail.

use std::sync::OnceLock;

use regex::Regex;

use crate::engine_state::decor::facing::Facing;
use crate::host::Item;

/// Item tag holding a decor or variant key.
pub const TYPE_TAG: &str = "type";

/// Name of the variant synthesized from a kind's base item.
pub const DEFAULT_VARIANT: &str = "default";

const TYPED_KEY_PATTERN: &str = r"^([a-z0-9./_-]+)\.type\.([a-z0-9./_-]+)$";

fn typed_key_regex() -> &'static Regex {
    static TYPED_KEY: OnceLock<Regex> = OnceLock::new();
    TYPED_KEY.get_or_init(|| Regex::new(TYPED_KEY_PATTERN).expect("typed key pattern compiles"))
}

/// Builds the typed key of a variant.
pub fn typed_key(kind: &str, variant: &str) -> String {
    format!("{kind}.type.{variant}")
}

/// Splits a typed key into `(kind, variant)`. Case-insensitive.
///
/// # Examples
///
/// ```
/// # use voxel_decor::engine_state::decor::variant::parse_typed_key;
/// assert_eq!(
///     parse_typed_key("Nightstand.type.second_left"),
///     Some(("nightstand".to_string(), "second_left".to_string()))
/// );
/// assert_eq!(parse_typed_key("nightstand"), None);
/// ```
pub fn parse_typed_key(text: &str) -> Option<(String, String)> {
    let lowered = text.to_ascii_lowercase();
    let captures = typed_key_regex().captures(&lowered)?;
    Some((captures[1].to_owned(), captures[2].to_owned()))
}

/// One alternate appearance of a decor kind. Equality is by key.
#[derive(Clone, Debug)]
pub struct Variant {
    key: String,
    name: String,
    item: Item,
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Variant {}

impl Variant {
    /// Creates the variant `name` of `kind`, tagging its item with the typed key.
    pub fn new(kind: &str, name: &str, item: Item) -> Self {
        let key = typed_key(kind, name);
        let item = item.with_tag(TYPE_TAG, &key);
        Self {
            key,
            name: name.to_owned(),
            item,
        }
    }

    /// The typed key, `"<kind>.type.<name>"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    /// A fresh copy of the variant item carrying the custom name and colour
    /// of `source`, so restyled decors keep their look across variants.
    pub fn item_styled_like(&self, source: &Item) -> Item {
        let mut item = self.item.clone();
        item.display_name = source.display_name.clone();
        if source.color.is_some() {
            item.color = source.color;
        }
        item.amount = 1;
        item
    }
}

/// The variants of one decor kind, in one of three shapes.
#[derive(Clone, Debug)]
pub enum VariantTable {
    /// Ordered list; slot 0 is the default variant.
    List(Vec<Variant>),
    /// Light level to variant, in declared level order.
    LightLevels(Vec<(u8, Variant)>),
    /// One variant per facing bucket, in floor, ceiling, wall order.
    Faces([Variant; 3]),
}

impl VariantTable {
    pub fn len(&self) -> usize {
        match self {
            VariantTable::List(variants) => variants.len(),
            VariantTable::LightLevels(entries) => entries.len(),
            VariantTable::Faces(variants) => variants.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The variant in slot `index`.
    pub fn get(&self, index: usize) -> Option<&Variant> {
        match self {
            VariantTable::List(variants) => variants.get(index),
            VariantTable::LightLevels(entries) => entries.get(index).map(|(_, variant)| variant),
            VariantTable::Faces(variants) => variants.get(index),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    /// The variant used when nothing more specific applies: slot 0.
    pub fn default_variant(&self) -> Option<&Variant> {
        self.get(0)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.iter().position(|variant| variant.key() == key)
    }

    pub fn find(&self, key: &str) -> Option<&Variant> {
        self.iter().find(|variant| variant.key() == key)
    }

    /// Classifies an item by its type tag.
    ///
    /// Items without a typed key (plain base items, foreign tags, no tag at
    /// all) classify as the default variant. Typed keys are looked up by a
    /// linear scan and yield `None` when the table has no such variant.
    pub fn classify(&self, item: &Item) -> Option<&Variant> {
        let typed = item
            .tag(TYPE_TAG)
            .and_then(parse_typed_key)
            .map(|(kind, variant)| typed_key(&kind, &variant));

        match typed {
            Some(key) => self.find(&key),
            None => self.default_variant(),
        }
    }

    /// The variant after `current`, wrapping at the end of the table.
    pub fn next(&self, current: &Variant) -> Option<&Variant> {
        let index = self.index_of(current.key())?;
        self.get((index + 1) % self.len())
    }

    /// The variant owned by `level`, for light-level tables.
    pub fn for_level(&self, level: u8) -> Option<&Variant> {
        match self {
            VariantTable::LightLevels(entries) => entries
                .iter()
                .find(|(entry_level, _)| *entry_level == level)
                .map(|(_, variant)| variant),
            _ => None,
        }
    }

    /// The light level owning `variant`, for light-level tables.
    pub fn level_of(&self, variant: &Variant) -> Option<u8> {
        match self {
            VariantTable::LightLevels(entries) => entries
                .iter()
                .find(|(_, entry)| entry == variant)
                .map(|(level, _)| *level),
            _ => None,
        }
    }

    /// The variant for a facing bucket, for face tables.
    pub fn for_facing(&self, facing: Facing) -> Option<&Variant> {
        match self {
            VariantTable::Faces(variants) => Some(&variants[facing as usize]),
            _ => None,
        }
    }
}

/// The level after `current` in `levels`, wrapping to the first.
///
/// A level not present in `levels` restarts at the first one.
pub fn next_light_level(levels: &[u8], current: u8) -> Option<u8> {
    let first = *levels.first()?;
    match levels.iter().position(|level| *level == current) {
        Some(index) => Some(levels[(index + 1) % levels.len()]),
        None => Some(first),
    }
}
