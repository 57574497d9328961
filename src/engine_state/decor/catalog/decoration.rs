//! Household and street decorations.

use super::decor_item;
use crate::engine_state::decor::capability::Capability;
use crate::engine_state::decor::definition::DecorDefinition;
use crate::engine_state::decor::facing::Facing;
use crate::engine_state::decor::geometry::{CollisionKind, HitBox};
use crate::engine_state::decor::recipe::RecipeTemplate;
use crate::engine_state::decor::registry::DecorKind;
use crate::engine_state::decor::sound::SoundGroup;
use crate::error::Result;

const CELL_VARIANTS: [(&str, i32); 8] = [
    ("bee", 1175),
    ("chicken", 1176),
    ("parrot_blue", 1177),
    ("parrot_green", 1178),
    ("parrot_gray", 1179),
    ("parrot_red_blue", 1180),
    ("parrot_yellow_blue", 1181),
    ("slime", 1182),
];

const COOKING_POT_VARIANTS: [(&str, i32); 3] = [("soup", 1165), ("stew", 1166), ("porridge", 1167)];

/// A birdcage. Its occupant is fixed by the item it was placed with.
pub struct Cell;

impl DecorKind for Cell {
    fn definition() -> Result<DecorDefinition> {
        DecorDefinition::builder()
            .key("cell")
            .hit_box(HitBox::new(1.0, 1.0, 1.0, CollisionKind::SOLID)?)
            .facings(&Facing::all())
            .sound_group(SoundGroup::CHAIN)
            .item(decor_item(1174, "Cell"))
            .capabilities(&[Capability::TYPED])
            .variants(
                CELL_VARIANTS
                    .iter()
                    .map(|(name, model)| (*name, decor_item(*model, "Cell")))
                    .collect(),
            )
            .recipe(RecipeTemplate::shaped(
                "cell",
                &[" C ", "BBB", "BBB"],
                &[('B', "iron_bars"), ('C', "chain")],
            ))
            .build()
    }
}

/// A small pot. Several can share one cell with other small decorations.
pub struct CookingPot;

impl DecorKind for CookingPot {
    fn definition() -> Result<DecorDefinition> {
        DecorDefinition::builder()
            .key("cooking_pot")
            .hit_box(HitBox::new(0.6, 0.5, 0.6, CollisionKind::NONE)?)
            .facings(&[Facing::FLOOR])
            .sound_group(SoundGroup::ANVIL)
            .item(decor_item(1164, "Cooking pot"))
            .capabilities(&[Capability::TYPED])
            .variants(
                COOKING_POT_VARIANTS
                    .iter()
                    .map(|(name, model)| (*name, decor_item(*model, "Cooking pot")))
                    .collect(),
            )
            .recipe(RecipeTemplate::shaped(
                "cooking_pot",
                &["I I", "I I", "III"],
                &[('I', "iron_ingot")],
            ))
            .build()
    }
}

/// A fire bowl: dark at level 0, burning at level 15. Breaking it drops
/// whichever state it is in.
pub struct Brazier;

impl DecorKind for Brazier {
    fn definition() -> Result<DecorDefinition> {
        let cold = decor_item(1183, "Brazier");
        let fired = decor_item(1184, "Brazier");

        DecorDefinition::builder()
            .key("brazier")
            .hit_box(HitBox::new(0.875, 1.0, 0.875, CollisionKind::LIGHT)?)
            .facings(&[Facing::FLOOR])
            .sound_group(SoundGroup::CHAIN)
            .item(cold.clone())
            .capabilities(&[Capability::LIGHT_TYPED])
            .light_levels(&[0, 15])
            .light_variants(vec![(0, "default", cold), (15, "fired", fired)])
            .drops_type(true)
            .recipe(RecipeTemplate::shaped(
                "brazier",
                &["B B", "BBB", " I "],
                &[('B', "iron_bars"), ('I', "iron_ingot")],
            ))
            .build()
    }
}
