//! Chairs, tables, nightstands and lamps.

use super::{decor_item, Wood};
use crate::engine_state::decor::capability::Capability;
use crate::engine_state::decor::definition::DecorDefinition;
use crate::engine_state::decor::facing::Facing;
use crate::engine_state::decor::geometry::{CollisionKind, HitBox};
use crate::engine_state::decor::recipe::RecipeTemplate;
use crate::engine_state::decor::registry::DecorKind;
use crate::engine_state::decor::sound::SoundGroup;
use crate::error::Result;

const ARMCHAIR_MODEL: i32 = 1000;
const ROCKING_CHAIR_MODEL: i32 = 1040;
const BIG_TABLE_MODEL: i32 = 1060;
const NIGHTSTAND_MODEL: i32 = 1086;
const NIGHTSTAND_VARIANTS: [&str; 6] = [
    "second_left",
    "second_middle",
    "second_right",
    "third_left",
    "third_middle",
    "third_right",
];

fn solid_cube() -> Result<HitBox> {
    HitBox::new(1.0, 1.0, 1.0, CollisionKind::SOLID)
}

pub fn armchair(wood: Wood) -> Result<DecorDefinition> {
    let key = format!("{}_armchair", wood.prefix());
    DecorDefinition::builder()
        .key(&key)
        .hit_box(solid_cube()?)
        .facings(&[Facing::FLOOR])
        .sound_group(SoundGroup::WOOD)
        .item(decor_item(ARMCHAIR_MODEL + wood.ordinal(), "Armchair"))
        .capabilities(&[Capability::SITTABLE, Capability::PAINTABLE])
        .sit_height(0.6)
        .recipe(RecipeTemplate::shaped(
            &key,
            &["P  ", "PLP", "PPP"],
            &[('P', wood.planks().as_str()), ('L', "leather")],
        ))
        .build()
}

pub fn rocking_chair(wood: Wood) -> Result<DecorDefinition> {
    let key = format!("{}_rocking_chair", wood.prefix());
    DecorDefinition::builder()
        .key(&key)
        .hit_box(solid_cube()?)
        .facings(&[Facing::FLOOR])
        .sound_group(SoundGroup::WOOD)
        .item(decor_item(ROCKING_CHAIR_MODEL + wood.ordinal(), "Rocking chair"))
        .capabilities(&[Capability::SITTABLE])
        .sit_height(0.5)
        .recipe(RecipeTemplate::shaped(
            &key,
            &["P  ", "PPP", "P P"],
            &[('P', wood.planks().as_str())],
        ))
        .build()
}

/// Two by two cells, so it only turns in right angles.
pub fn big_table(wood: Wood) -> Result<DecorDefinition> {
    let key = format!("{}_big_table", wood.prefix());
    DecorDefinition::builder()
        .key(&key)
        .hit_box(HitBox::new(2.0, 1.0, 2.0, CollisionKind::SOLID)?)
        .facings(&[Facing::FLOOR])
        .sound_group(SoundGroup::WOOD)
        .item(decor_item(BIG_TABLE_MODEL + wood.ordinal(), "Big table"))
        .recipe(RecipeTemplate::shaped(
            &key,
            &["PPP", "P P", "P P"],
            &[('P', wood.planks().as_str())],
        ))
        .build()
}

pub fn nightstand(wood: Wood) -> Result<DecorDefinition> {
    let key = format!("{}_nightstand", wood.prefix());
    let first_model = NIGHTSTAND_MODEL + wood.ordinal() * 7;

    let variants = NIGHTSTAND_VARIANTS
        .iter()
        .zip(1..)
        .map(|(name, offset)| (*name, decor_item(first_model + offset, "Nightstand")))
        .collect();

    DecorDefinition::builder()
        .key(&key)
        .hit_box(solid_cube()?)
        .facings(&[Facing::FLOOR])
        .sound_group(SoundGroup::WOOD)
        .item(decor_item(first_model, "Nightstand"))
        .capabilities(&[Capability::WRENCHABLE])
        .variants(variants)
        .recipe(RecipeTemplate::shaped(
            &key,
            &["PPP", "PPP", "P P"],
            &[('P', wood.planks().as_str())],
        ))
        .build()
}

/// A bedside lamp that switches between lit and dark on click.
pub struct SmallLamp;

impl DecorKind for SmallLamp {
    fn definition() -> Result<DecorDefinition> {
        DecorDefinition::builder()
            .key("small_lamp")
            .hit_box(HitBox::new(0.5, 0.75, 0.5, CollisionKind::LIGHT)?)
            .facings(&[Facing::FLOOR])
            .sound_group(SoundGroup::WOOD)
            .item(decor_item(1144, "Small lamp"))
            .capabilities(&[Capability::LIGHTABLE])
            .light_levels(&[15, 0])
            .recipe(RecipeTemplate::shaped(
                "small_lamp",
                &["L", "S"],
                &[('L', "leather"), ('S', "stick")],
            ))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::decor::action::ClickAction;

    #[test]
    fn nightstand_cycles_through_all_drawers() {
        let nightstand = nightstand(Wood::BIRCH).unwrap();
        let variants = nightstand.variants().unwrap();
        assert_eq!(variants.len(), 7);
        assert_eq!(variants[0].item().custom_model_data, Some(1086 + 14));
        assert_eq!(variants[6].key(), "birch_nightstand.type.third_right");

        let mut current = variants[0].clone();
        for _ in 0..variants.len() {
            current = nightstand.next_variant(&current).unwrap().unwrap().clone();
        }
        assert_eq!(current, variants[0]);
    }

    #[test]
    fn lamp_starts_lit() {
        let lamp = SmallLamp::definition().unwrap();
        assert_eq!(lamp.initial_light_level(lamp.item()), Some(15));
        assert!(matches!(lamp.click_action(), ClickAction::LIGHT));
    }

    #[test]
    fn big_table_is_wide() {
        assert!(big_table(Wood::OAK).unwrap().hit_box().is_wide());
    }
}
