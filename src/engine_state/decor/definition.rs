//! # Decor Definitions
//!
//! A [`DecorDefinition`] is the immutable template of one placeable decor
//! kind: its geometry, the facings it accepts, its sounds, the item that
//! places it, its capabilities and any variant tables. Definitions are built
//! once at registry load and never change afterwards.
//!
//! ## Validation
//!
//! [`DecorDefinitionBuilder::build`] checks everything up front so that a
//! broken definition stops startup instead of surfacing mid-game:
//!
//! - key, hit box, facings, sound group and item are required
//! - the capability set must not contain an excluded pair
//! - each capability must come with its data (sit height, variant list,
//!   light levels, level or face variants) and data without its capability
//!   is rejected
//! - face-typed kinds must accept every facing
//! - lightable and light-typed kinds must use LIGHT collision

use std::collections::HashSet;
use std::fmt;

use super::action::{ClickAction, Hook};
use super::capability::{self, Capability, CapabilitySet};
use super::facing::{self, Facing, FacingMask};
use super::geometry::{CollisionKind, HitBox};
use super::recipe::RecipeTemplate;
use super::sound::SoundGroup;
use super::variant::{self, Variant, VariantTable, DEFAULT_VARIANT, TYPE_TAG};
use crate::error::{DecorError, Result};
use crate::host::Item;

/// Highest light level a cell can emit.
pub const MAX_LIGHT_LEVEL: u8 = 15;

/// Largest magnitude of a seat height above the proxy.
pub const MAX_SIT_HEIGHT: f64 = 9.0;

/// The immutable template of one decor kind.
#[derive(Clone)]
pub struct DecorDefinition {
    key: String,
    hit_box: HitBox,
    facings: FacingMask,
    sounds: SoundGroup,
    item: Item,
    capabilities: CapabilitySet,
    sit_height: Option<f64>,
    light_levels: Vec<u8>,
    base_variant: Variant,
    variants: Option<VariantTable>,
    drops_type: bool,
    click_action: ClickAction,
    on_place: Option<Hook>,
    on_break: Option<Hook>,
    recipes: Vec<RecipeTemplate>,
}

impl fmt::Debug for DecorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecorDefinition")
            .field("key", &self.key)
            .field("hit_box", &self.hit_box)
            .field("capabilities", &capability::members(&self.capabilities))
            .field("variants", &self.variants.as_ref().map(VariantTable::len))
            .field("click_action", &self.click_action)
            .finish()
    }
}

impl DecorDefinition {
    pub fn builder() -> DecorDefinitionBuilder {
        DecorDefinitionBuilder::default()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn hit_box(&self) -> &HitBox {
        &self.hit_box
    }

    pub fn facings(&self) -> &FacingMask {
        &self.facings
    }

    pub fn sounds(&self) -> SoundGroup {
        self.sounds
    }

    /// The base item, tagged with this kind's key.
    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.has(capability)
    }

    /// Whether breaking the decor drops the current variant's item rather than the base item.
    pub fn drops_type(&self) -> bool {
        self.drops_type
    }

    pub fn click_action(&self) -> &ClickAction {
        &self.click_action
    }

    pub fn on_place(&self) -> Option<&Hook> {
        self.on_place.as_ref()
    }

    pub fn on_break(&self) -> Option<&Hook> {
        self.on_break.as_ref()
    }

    pub fn recipes(&self) -> &[RecipeTemplate] {
        &self.recipes
    }

    /// The variant table, if this kind has one.
    pub fn table(&self) -> Option<&VariantTable> {
        self.variants.as_ref()
    }

    /// Slot 0 of the variant table, or the variant derived from the base
    /// item for kinds without a table.
    pub fn default_variant(&self) -> &Variant {
        self.variants
            .as_ref()
            .and_then(VariantTable::default_variant)
            .unwrap_or(&self.base_variant)
    }

    fn unsupported(&self, capability: Capability) -> DecorError {
        DecorError::Unsupported {
            key: self.key.clone(),
            capability,
        }
    }

    fn require_table(&self, capability: Capability) -> Result<&VariantTable> {
        self.variants
            .as_ref()
            .ok_or_else(|| self.unsupported(capability))
    }

    /// Seat height above the proxy.
    ///
    /// # Errors
    /// [`DecorError::Unsupported`] unless the kind is sittable.
    pub fn sit_height(&self) -> Result<f64> {
        self.sit_height
            .ok_or_else(|| self.unsupported(Capability::SITTABLE))
    }

    /// The ordered variant list of a wrenchable or typed kind.
    pub fn variants(&self) -> Result<&[Variant]> {
        match &self.variants {
            Some(VariantTable::List(variants)) => Ok(variants),
            _ => Err(self.unsupported(Capability::WRENCHABLE)),
        }
    }

    /// Classifies an item against this kind's variant table.
    ///
    /// # Errors
    /// [`DecorError::Unsupported`] if the kind has no variant table.
    pub fn classify(&self, item: &Item) -> Result<Option<&Variant>> {
        Ok(self.require_table(Capability::TYPED)?.classify(item))
    }

    /// The variant a wrench moves to from `current`.
    ///
    /// # Errors
    /// [`DecorError::Unsupported`] unless the kind is wrenchable.
    pub fn next_variant(&self, current: &Variant) -> Result<Option<&Variant>> {
        if !self.has(Capability::WRENCHABLE) {
            return Err(self.unsupported(Capability::WRENCHABLE));
        }
        Ok(self.require_table(Capability::WRENCHABLE)?.next(current))
    }

    /// Configured light levels, in declared order.
    pub fn light_levels(&self) -> Result<&[u8]> {
        if self.light_levels.is_empty() {
            return Err(self.unsupported(Capability::LIGHTABLE));
        }
        Ok(&self.light_levels)
    }

    /// The light level after `current`, wrapping; unknown levels restart at the first.
    pub fn next_light_level(&self, current: u8) -> Result<u8> {
        let levels = self.light_levels()?;
        variant::next_light_level(levels, current).ok_or_else(|| self.unsupported(Capability::LIGHTABLE))
    }

    /// The variant owned by a light level.
    pub fn light_variant(&self, level: u8) -> Result<Option<&Variant>> {
        if !self.has(Capability::LIGHT_TYPED) {
            return Err(self.unsupported(Capability::LIGHT_TYPED));
        }
        Ok(self.require_table(Capability::LIGHT_TYPED)?.for_level(level))
    }

    /// The light level of the variant `item` classifies as.
    pub fn light_level_of(&self, item: &Item) -> Result<Option<u8>> {
        if !self.has(Capability::LIGHT_TYPED) {
            return Err(self.unsupported(Capability::LIGHT_TYPED));
        }
        let table = self.require_table(Capability::LIGHT_TYPED)?;
        Ok(table.classify(item).and_then(|variant| table.level_of(variant)))
    }

    /// The variant placed against a facing bucket.
    pub fn face_variant(&self, facing: Facing) -> Result<&Variant> {
        self.require_table(Capability::FACE_TYPED)?
            .for_facing(facing)
            .ok_or_else(|| self.unsupported(Capability::FACE_TYPED))
    }

    /// The light level cells start at when this kind is placed with `item`.
    pub(crate) fn initial_light_level(&self, item: &Item) -> Option<u8> {
        if self.has(Capability::LIGHT_TYPED) {
            self.light_level_of(item)
                .ok()
                .flatten()
                .or_else(|| self.light_levels.first().copied())
        } else if self.has(Capability::LIGHTABLE) {
            self.light_levels.first().copied()
        } else {
            None
        }
    }
}

/// Incrementally collects a definition's parts; see the module docs for the
/// rules [`build`](DecorDefinitionBuilder::build) enforces.
///
/// # Examples
///
/// ```ignore
/// let chair = DecorDefinition::builder()
///     .key("oak_chair")
///     .hit_box(HitBox::new(1.0, 1.0, 1.0, CollisionKind::SOLID)?)
///     .facings(&[Facing::FLOOR])
///     .sound_group(SoundGroup::WOOD)
///     .item(Item::new("leather_horse_armor", 1001))
///     .capabilities(&[Capability::SITTABLE])
///     .sit_height(0.5)
///     .build()?;
/// ```
#[derive(Default)]
pub struct DecorDefinitionBuilder {
    key: Option<String>,
    hit_box: Option<HitBox>,
    facings: Option<FacingMask>,
    sounds: Option<SoundGroup>,
    item: Option<Item>,
    capabilities: CapabilitySet,
    sit_height: Option<f64>,
    variants: Option<Vec<(String, Item)>>,
    light_levels: Option<Vec<u8>>,
    light_variants: Option<Vec<(u8, String, Item)>>,
    face_variants: Vec<(Facing, String, Item)>,
    drops_type: bool,
    click_action: Option<ClickAction>,
    on_place: Option<Hook>,
    on_break: Option<Hook>,
    recipes: Vec<RecipeTemplate>,
}

impl DecorDefinitionBuilder {
    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_owned());
        self
    }

    pub fn hit_box(mut self, hit_box: HitBox) -> Self {
        self.hit_box = Some(hit_box);
        self
    }

    pub fn facings(mut self, facings: &[Facing]) -> Self {
        self.facings = Some(FacingMask::of(facings));
        self
    }

    pub fn sound_group(mut self, sounds: SoundGroup) -> Self {
        self.sounds = Some(sounds);
        self
    }

    pub fn item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn capabilities(mut self, capabilities: &[Capability]) -> Self {
        self.capabilities.add_many(capabilities);
        self
    }

    pub fn sit_height(mut self, height: f64) -> Self {
        self.sit_height = Some(height);
        self
    }

    /// Explicit variants of a wrenchable or typed kind, after the implicit default.
    pub fn variants(mut self, variants: Vec<(&str, Item)>) -> Self {
        self.variants = Some(
            variants
                .into_iter()
                .map(|(name, item)| (name.to_owned(), item))
                .collect(),
        );
        self
    }

    pub fn light_levels(mut self, levels: &[u8]) -> Self {
        self.light_levels = Some(levels.to_vec());
        self
    }

    /// The variant shown at each light level of a light-typed kind.
    pub fn light_variants(mut self, variants: Vec<(u8, &str, Item)>) -> Self {
        self.light_variants = Some(
            variants
                .into_iter()
                .map(|(level, name, item)| (level, name.to_owned(), item))
                .collect(),
        );
        self
    }

    /// The variant shown when a face-typed kind is placed with `facing`.
    pub fn face_variant(mut self, facing: Facing, name: &str, item: Item) -> Self {
        self.face_variants.push((facing, name.to_owned(), item));
        self
    }

    pub fn drops_type(mut self, drops_type: bool) -> Self {
        self.drops_type = drops_type;
        self
    }

    /// Overrides the click action derived from the capabilities.
    pub fn click_action(mut self, action: ClickAction) -> Self {
        self.click_action = Some(action);
        self
    }

    pub fn on_place(mut self, hook: Hook) -> Self {
        self.on_place = Some(hook);
        self
    }

    pub fn on_break(mut self, hook: Hook) -> Self {
        self.on_break = Some(hook);
        self
    }

    pub fn recipe(mut self, recipe: RecipeTemplate) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Validates the collected parts and produces the definition.
    ///
    /// # Errors
    /// [`DecorError::Configuration`] naming the first rule violated.
    pub fn build(self) -> Result<DecorDefinition> {
        let key = match self.key.as_deref() {
            Some(key) if is_valid_key(key) => key.to_owned(),
            Some(key) => {
                return Err(DecorError::configuration(
                    key,
                    "keys may only contain a-z, 0-9, '.', '/', '_' and '-'",
                ))
            }
            None => return Err(DecorError::configuration("<unnamed>", "key is required")),
        };
        let fail = |reason: String| DecorError::configuration(&key, reason);

        let hit_box = self.hit_box.ok_or_else(|| fail("hit box is required".into()))?;
        let facings = self
            .facings
            .filter(|mask| !mask.is_empty())
            .ok_or_else(|| fail("at least one facing is required".into()))?;
        let sounds = self
            .sounds
            .ok_or_else(|| fail("sound group is required".into()))?;
        let mut item = self.item.ok_or_else(|| fail("item is required".into()))?;
        item.amount = 1;
        item.tags.insert(TYPE_TAG.to_owned(), key.clone());

        let capabilities = self.capabilities;
        if let Some((first, second)) = capability::first_conflict(&capabilities) {
            return Err(fail(format!("{first} and {second} cannot be combined")));
        }

        if capabilities.has(Capability::FACE_TYPED) && !facing::is_any_face(&facings) {
            return Err(fail("face-typed decor must accept floor, ceiling and wall".into()));
        }

        let sit_height = match (capabilities.has(Capability::SITTABLE), self.sit_height) {
            (true, Some(height)) if (-MAX_SIT_HEIGHT..=MAX_SIT_HEIGHT).contains(&height) => {
                Some(height)
            }
            (true, Some(height)) => {
                return Err(fail(format!(
                    "sit height {height} is outside [-{MAX_SIT_HEIGHT}, {MAX_SIT_HEIGHT}]"
                )))
            }
            (true, None) => return Err(fail("sittable decor needs a sit height".into())),
            (false, Some(_)) => return Err(fail("sit height set on a decor that is not sittable".into())),
            (false, None) => None,
        };

        let lit = capabilities.has_any(&[Capability::LIGHTABLE, Capability::LIGHT_TYPED]);
        if lit && hit_box.kind() != CollisionKind::LIGHT {
            return Err(fail("lightable and light-typed decor need LIGHT collision".into()));
        }

        let light_levels = match (lit, self.light_levels) {
            (true, Some(levels)) => validate_levels(&levels).map_err(fail)?,
            (true, None) => return Err(fail("lit decor needs light levels".into())),
            (false, Some(_)) => return Err(fail("light levels set on a decor that is not lit".into())),
            (false, None) => Vec::new(),
        };

        if self.drops_type
            && !capabilities.has_any(&[
                Capability::WRENCHABLE,
                Capability::LIGHT_TYPED,
                Capability::FACE_TYPED,
            ])
        {
            return Err(fail(
                "drops type is only meaningful for wrenchable, light-typed or face-typed decor".into(),
            ));
        }

        if self.light_variants.is_some() && !capabilities.has(Capability::LIGHT_TYPED) {
            return Err(fail("light variants set on a decor that is not light-typed".into()));
        }
        if !self.face_variants.is_empty() && !capabilities.has(Capability::FACE_TYPED) {
            return Err(fail("face variants set on a decor that is not face-typed".into()));
        }

        let base_variant = Variant::new(&key, DEFAULT_VARIANT, item.clone());
        let listed = capabilities.has_any(&[Capability::WRENCHABLE, Capability::TYPED]);

        let variants = if listed {
            let declared = self
                .variants
                .ok_or_else(|| fail("wrenchable and typed decor need a variant list".into()))?;
            Some(VariantTable::List(build_list(&key, &base_variant, declared).map_err(fail)?))
        } else if self.variants.is_some() {
            return Err(fail("variants set on a decor that is neither wrenchable nor typed".into()));
        } else if capabilities.has(Capability::LIGHT_TYPED) {
            let declared = self
                .light_variants
                .ok_or_else(|| fail("light-typed decor needs a variant per light level".into()))?;
            Some(build_light_table(&key, &light_levels, declared).map_err(fail)?)
        } else if capabilities.has(Capability::FACE_TYPED) {
            Some(build_face_table(&key, self.face_variants).map_err(fail)?)
        } else {
            None
        };

        let click_action = self
            .click_action
            .unwrap_or_else(|| ClickAction::derive(&capabilities));

        let recipes = self
            .recipes
            .into_iter()
            .map(|mut recipe| {
                if recipe.result == Item::default() {
                    recipe.result = item.clone();
                }
                recipe
            })
            .collect();

        Ok(DecorDefinition {
            key,
            hit_box,
            facings,
            sounds,
            item,
            capabilities,
            sit_height,
            light_levels,
            base_variant,
            variants,
            drops_type: self.drops_type,
            click_action,
            on_place: self.on_place,
            on_break: self.on_break,
            recipes,
        })
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "./_-".contains(c))
        && variant::parse_typed_key(key).is_none()
}

fn validate_levels(levels: &[u8]) -> std::result::Result<Vec<u8>, String> {
    if levels.is_empty() {
        return Err("light levels must not be empty".into());
    }

    let mut seen = HashSet::new();
    for level in levels {
        if *level > MAX_LIGHT_LEVEL {
            return Err(format!("light level {level} is above {MAX_LIGHT_LEVEL}"));
        }
        if !seen.insert(*level) {
            return Err(format!("light level {level} is listed twice"));
        }
    }

    Ok(levels.to_vec())
}

/// Slot 0 is always the default variant; an explicit "default" is dropped.
fn build_list(
    key: &str,
    base: &Variant,
    declared: Vec<(String, Item)>,
) -> std::result::Result<Vec<Variant>, String> {
    let mut variants = vec![base.clone()];

    for (name, item) in declared {
        if name == DEFAULT_VARIANT {
            log::warn!("Decor `{}` declares an explicit default variant; using the base item", key);
            continue;
        }
        let variant = Variant::new(key, &name, item);
        if variants.contains(&variant) {
            return Err(format!("variant `{name}` is declared twice"));
        }
        variants.push(variant);
    }

    Ok(variants)
}

fn build_light_table(
    key: &str,
    levels: &[u8],
    declared: Vec<(u8, String, Item)>,
) -> std::result::Result<VariantTable, String> {
    if declared.len() != levels.len() {
        return Err(format!(
            "{} light variants for {} light levels",
            declared.len(),
            levels.len()
        ));
    }

    let mut entries = Vec::with_capacity(levels.len());
    for level in levels {
        let mut matching = declared.iter().filter(|(declared_level, _, _)| declared_level == level);
        let (_, name, item) = matching
            .next()
            .ok_or_else(|| format!("light level {level} has no variant"))?;
        if matching.next().is_some() {
            return Err(format!("light level {level} has two variants"));
        }
        entries.push((*level, Variant::new(key, name, item.clone())));
    }

    Ok(VariantTable::LightLevels(entries))
}

fn build_face_table(
    key: &str,
    declared: Vec<(Facing, String, Item)>,
) -> std::result::Result<VariantTable, String> {
    let lookup = |facing: Facing| -> std::result::Result<Variant, String> {
        let mut matching = declared.iter().filter(|(declared_facing, _, _)| *declared_facing == facing);
        let (_, name, item) = matching
            .next()
            .ok_or_else(|| format!("no variant for facing {}", facing.name()))?;
        if matching.next().is_some() {
            return Err(format!("two variants for facing {}", facing.name()));
        }
        Ok(Variant::new(key, name, item.clone()))
    };

    Ok(VariantTable::Faces([
        lookup(Facing::FLOOR)?,
        lookup(Facing::CEILING)?,
        lookup(Facing::WALL)?,
    ]))
}
