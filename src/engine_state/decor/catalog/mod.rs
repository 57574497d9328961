//! # Built-in Catalog
//!
//! Factory functions for the decor kinds shipped with the engine. Each
//! factory returns a validated
//! [`DecorDefinition`](super::definition::DecorDefinition); [`register_all`] puts
//! every one of them into a registry.
//!
//! Kinds that come in one flavour per wood type (armchairs, rocking chairs,
//! tables, nightstands) are generated from [`Wood`] and registered by key.
//! Single kinds have a marker type so callers can fetch them with
//! [`DecorRegistry::get_kind`].

pub mod christmas;
pub mod decoration;
pub mod furniture;

use super::registry::DecorRegistry;
use crate::error::Result;
use crate::host::Item;

/// Material every decor item is made of; the model is picked by custom model data.
pub const DECOR_MATERIAL: &str = "leather_horse_armor";

/// Wood types furniture is built in.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Wood {
    OAK,
    SPRUCE,
    BIRCH,
    JUNGLE,
    ACACIA,
    DARK_OAK,
}

impl Wood {
    pub fn all() -> [Wood; 6] {
        [
            Wood::OAK,
            Wood::SPRUCE,
            Wood::BIRCH,
            Wood::JUNGLE,
            Wood::ACACIA,
            Wood::DARK_OAK,
        ]
    }

    /// Prefix of the decor keys built from this wood.
    pub fn prefix(&self) -> &'static str {
        match self {
            Wood::OAK => "oak",
            Wood::SPRUCE => "spruce",
            Wood::BIRCH => "birch",
            Wood::JUNGLE => "jungle",
            Wood::ACACIA => "acacia",
            Wood::DARK_OAK => "dark_oak",
        }
    }

    /// The planks ingredient used in this wood's recipes.
    pub fn planks(&self) -> String {
        format!("{}_planks", self.prefix())
    }

    /// Index used to spread this wood's models over a block of custom model data.
    pub fn ordinal(&self) -> i32 {
        *self as i32
    }
}

/// A decor item with the given model and display name.
pub(crate) fn decor_item(custom_model_data: i32, name: &str) -> Item {
    Item::new(DECOR_MATERIAL, custom_model_data).with_name(name)
}

/// Registers every built-in kind.
///
/// # Errors
/// The first definition that fails to build or register.
pub fn register_all(registry: &mut DecorRegistry) -> Result<()> {
    for wood in Wood::all() {
        registry.register(furniture::armchair(wood)?)?;
        registry.register(furniture::rocking_chair(wood)?)?;
        registry.register(furniture::big_table(wood)?)?;
        registry.register(furniture::nightstand(wood)?)?;
    }

    registry.register_kind::<furniture::SmallLamp>()?;
    registry.register_kind::<decoration::Cell>()?;
    registry.register_kind::<decoration::CookingPot>()?;
    registry.register_kind::<decoration::Brazier>()?;
    registry.register_kind::<christmas::ChristmasBall>()?;
    Ok(())
}

/// Loads a registry holding the whole catalog.
pub fn load_registry() -> Result<DecorRegistry> {
    DecorRegistry::load(register_all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::decor::capability::Capability;

    #[test]
    fn whole_catalog_builds() {
        let registry = load_registry().unwrap();
        assert_eq!(registry.len(), Wood::all().len() * 4 + 5);
        assert!(registry.get("oak_armchair").is_some());
        assert!(registry.get("dark_oak_nightstand.type.third_right").is_some());
        assert!(registry.get_kind::<decoration::Brazier>().is_some());
    }

    #[test]
    fn every_recipe_is_complete() {
        let registry = load_registry().unwrap();
        for definition in registry.iter() {
            for recipe in definition.recipes() {
                assert!(recipe.is_complete(), "{} has an incomplete recipe", recipe.key);
                assert_eq!(recipe.result.tag("type"), Some(definition.key()));
            }
        }
    }

    #[test]
    fn capabilities_match_their_kinds() {
        let registry = load_registry().unwrap();
        let armchair = registry.get("spruce_armchair").unwrap();
        assert!(armchair.has(Capability::SITTABLE) && armchair.has(Capability::PAINTABLE));

        let ball = registry.get_kind::<christmas::ChristmasBall>().unwrap();
        assert!(ball.has(Capability::FACE_TYPED));
    }
}
