//! # Decor Registry
//!
//! Holds every decor definition for the life of the process, keyed by
//! string and, for kinds backed by a marker type, by that type's identity.
//!
//! Definitions are registered by explicit factory functions at startup.
//! Any factory failing to build is fatal: [`DecorRegistry::load`] returns
//! the first error and the host is expected not to start.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use web_time::Instant;

use super::definition::DecorDefinition;
use super::variant::{self, TYPE_TAG};
use crate::error::{DecorError, Result};
use crate::host::Item;

/// A decor kind with its own marker type, so callers can look its
/// definition up without spelling out the key.
pub trait DecorKind: 'static {
    fn definition() -> Result<DecorDefinition>;
}

/// All registered definitions.
#[derive(Default, Debug)]
pub struct DecorRegistry {
    by_key: HashMap<String, Arc<DecorDefinition>>,
    by_type: HashMap<TypeId, Arc<DecorDefinition>>,
    order: Vec<String>,
}

impl DecorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry by running `populate`, logging how long it took.
    ///
    /// # Errors
    /// The first definition or registration error encountered.
    pub fn load(populate: impl FnOnce(&mut DecorRegistry) -> Result<()>) -> Result<Self> {
        let start = Instant::now();
        let mut registry = Self::new();

        populate(&mut registry)?;

        info!(
            "Loaded {} decor definitions in {}ms",
            registry.len(),
            start.elapsed().as_millis()
        );
        Ok(registry)
    }

    /// Registers a definition under its key.
    ///
    /// # Errors
    /// [`DecorError::DuplicateKey`] if the key is taken.
    pub fn register(&mut self, definition: DecorDefinition) -> Result<Arc<DecorDefinition>> {
        let key = definition.key().to_owned();
        if self.by_key.contains_key(&key) {
            return Err(DecorError::DuplicateKey(key));
        }

        debug!("Registered decor `{}`", key);
        let definition = Arc::new(definition);
        self.by_key.insert(key.clone(), definition.clone());
        self.order.push(key);
        Ok(definition)
    }

    /// Builds and registers the definition of `K`, binding it to `K`'s identity.
    pub fn register_kind<K: DecorKind>(&mut self) -> Result<Arc<DecorDefinition>> {
        let definition = self.register(K::definition()?)?;
        self.by_type.insert(TypeId::of::<K>(), definition.clone());
        Ok(definition)
    }

    /// Looks a definition up by key. Case-insensitive; typed variant keys
    /// resolve to their kind.
    pub fn get(&self, key: &str) -> Option<Arc<DecorDefinition>> {
        let lowered = key.to_ascii_lowercase();
        if let Some(definition) = self.by_key.get(&lowered) {
            return Some(definition.clone());
        }

        let (kind, _) = variant::parse_typed_key(&lowered)?;
        self.by_key.get(&kind).cloned()
    }

    /// Looks a definition up by its marker type.
    pub fn get_kind<K: DecorKind>(&self) -> Option<Arc<DecorDefinition>> {
        self.by_type.get(&TypeId::of::<K>()).cloned()
    }

    /// The definition an item places, if any.
    pub fn from_item(&self, item: &Item) -> Option<Arc<DecorDefinition>> {
        item.tag(TYPE_TAG).and_then(|key| self.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<DecorDefinition>> + '_ {
        self.order.iter().filter_map(move |key| self.by_key.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::decor::capability::Capability;
    use crate::engine_state::decor::facing::Facing;
    use crate::engine_state::decor::geometry::{CollisionKind, HitBox};
    use crate::engine_state::decor::sound::SoundGroup;

    fn definition(key: &str) -> Result<DecorDefinition> {
        DecorDefinition::builder()
            .key(key)
            .hit_box(HitBox::new(1.0, 1.0, 1.0, CollisionKind::SOLID)?)
            .facings(&[Facing::FLOOR])
            .sound_group(SoundGroup::WOOD)
            .item(Item::new("leather_horse_armor", 1))
            .capabilities(&[Capability::WRENCHABLE])
            .variants(vec![("tall", Item::new("leather_horse_armor", 2))])
            .build()
    }

    struct Wardrobe;

    impl DecorKind for Wardrobe {
        fn definition() -> Result<DecorDefinition> {
            definition("wardrobe")
        }
    }

    #[test]
    fn key_lookup() {
        let registry = DecorRegistry::load(|registry| {
            registry.register(definition("shelf")?)?;
            registry.register_kind::<Wardrobe>()?;
            Ok(())
        })
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("SHELF").is_some());
        assert_eq!(registry.get("shelf.type.tall").unwrap().key(), "shelf");
        assert!(registry.get("shelf.type.anything").is_some());
        assert!(registry.get("bench").is_none());
        assert!(registry.get("bench.type.tall").is_none());
        assert_eq!(registry.get_kind::<Wardrobe>().unwrap().key(), "wardrobe");

        let keys: Vec<_> = registry.iter().map(|d| d.key().to_owned()).collect();
        assert_eq!(keys, ["shelf", "wardrobe"]);
    }

    #[test]
    fn items_resolve_to_their_kind() {
        let mut registry = DecorRegistry::new();
        let shelf = registry.register(definition("shelf").unwrap()).unwrap();

        assert_eq!(registry.from_item(shelf.item()).unwrap().key(), "shelf");
        let tall = &shelf.variants().unwrap()[1];
        assert_eq!(registry.from_item(tall.item()).unwrap().key(), "shelf");
        assert!(registry.from_item(&Item::new("stick", 0)).is_none());
    }

    #[test]
    fn duplicate_keys_are_fatal() {
        let result = DecorRegistry::load(|registry| {
            registry.register(definition("shelf")?)?;
            registry.register(definition("shelf")?)?;
            Ok(())
        });
        assert!(matches!(result, Err(DecorError::DuplicateKey(key)) if key == "shelf"));
    }

    #[test]
    fn kind_not_registered() {
        let registry = DecorRegistry::new();
        assert!(registry.get_kind::<Wardrobe>().is_none());
        assert!(registry.is_empty());
    }
}
