//! Seasonal decorations.

use super::decor_item;
use crate::engine_state::decor::capability::Capability;
use crate::engine_state::decor::definition::DecorDefinition;
use crate::engine_state::decor::facing::Facing;
use crate::engine_state::decor::geometry::{CollisionKind, HitBox};
use crate::engine_state::decor::recipe::RecipeTemplate;
use crate::engine_state::decor::registry::DecorKind;
use crate::engine_state::decor::sound::SoundGroup;
use crate::error::Result;

/// A glass bauble. It stands on floors, hangs from ceilings on a string and
/// sits on a hook against walls, with a different model for each.
pub struct ChristmasBall;

impl DecorKind for ChristmasBall {
    fn definition() -> Result<DecorDefinition> {
        let hanging = decor_item(1185, "Christmas ball");

        DecorDefinition::builder()
            .key("christmas_ball")
            .hit_box(HitBox::new(0.4125, 0.64375, 0.4125, CollisionKind::NONE)?)
            .facings(&Facing::all())
            .sound_group(SoundGroup::GLASS)
            .item(hanging.clone())
            .capabilities(&[Capability::FACE_TYPED])
            .face_variant(Facing::FLOOR, "standing", decor_item(1401, "Christmas ball"))
            .face_variant(Facing::CEILING, "hanging", hanging)
            .face_variant(Facing::WALL, "wall", decor_item(1400, "Christmas ball"))
            .recipe(RecipeTemplate::shaped(
                "christmas_ball",
                &[" S ", "CCC", "CCC"],
                &[('S', "string"), ('C', "clay_ball")],
            ))
            .build()
    }
}
