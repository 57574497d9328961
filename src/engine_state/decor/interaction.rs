//! # Interaction
//!
//! Right-click behaviour of placed decors: sitting, wrenching through
//! variants and cycling light levels. Left clicks never reach a click
//! action; breaking goes through [`CompositeObject::destroy`].

use cgmath::Point3;
use log::debug;

use super::action::ClickAction;
use super::capability::Capability;
use super::composite::CompositeObject;
use super::geometry::Aabb;
use super::sound::{SIT_SOUND, WRENCH_SOUND};
use crate::error::Result;
use crate::host::{
    Actor, CellState, DecorEvent, EntityKind, EntityRecord, EntitySpawn, EventKind, EventOutcome,
    GameMode, HandSlot, Host,
};

/// Item type tag carried by wrenches.
pub const WRENCH_TYPE: &str = "wrench";

/// How close another seat may be before a sit is refused.
const SEAT_CLEARANCE: f64 = 0.5;

/// Whether `actor` holds a wrench in `slot`.
pub fn holds_wrench(actor: &dyn Actor, slot: HandSlot) -> bool {
    actor
        .held_item(slot)
        .and_then(|item| item.tag(super::variant::TYPE_TAG))
        .is_some_and(|kind| kind == WRENCH_TYPE)
}

/// Runs the decor's click action for a click on `clicked`.
///
/// # Returns
/// `true` if the click did something.
///
/// # Errors
/// [`DecorError::Unsupported`](crate::error::DecorError::Unsupported) if the
/// configured action needs a capability the kind lacks, for example a custom
/// action set to [`ClickAction::LIGHT`] on a kind without light levels.
pub fn handle_click(
    host: &mut dyn Host,
    actor: &mut dyn Actor,
    decor: &CompositeObject,
    clicked: &EntityRecord,
    slot: HandSlot,
    right_click: bool,
) -> Result<bool> {
    if !right_click {
        return Ok(false);
    }

    let action = decor.definition().click_action().clone();
    if matches!(action, ClickAction::NONE) {
        return Ok(false);
    }

    let event = DecorEvent {
        kind: EventKind::CLICK,
        decor_key: decor.key().to_owned(),
        actor: actor.name().to_owned(),
        proxy: decor.canonical(),
        position: clicked.position,
        slot: Some(slot),
    };
    if host.notify(&event) == EventOutcome::Cancelled {
        debug!("Click on `{}` was cancelled", decor.key());
        return Ok(false);
    }

    match action {
        ClickAction::NONE => Ok(false),
        ClickAction::SIT => sit(host, actor, decor, clicked, slot),
        ClickAction::WRENCH => wrench(host, actor, decor, slot),
        ClickAction::LIGHT => cycle_light(host, actor, decor, slot, false),
        ClickAction::LIGHT_TYPED => cycle_light(host, actor, decor, slot, true),
        ClickAction::WRENCH_OR_SIT if holds_wrench(actor, slot) => wrench(host, actor, decor, slot),
        ClickAction::WRENCH_OR_SIT => sit(host, actor, decor, clicked, slot),
        ClickAction::WRENCH_OR_LIGHT if holds_wrench(actor, slot) => {
            wrench(host, actor, decor, slot)
        }
        ClickAction::WRENCH_OR_LIGHT => cycle_light(host, actor, decor, slot, false),
        ClickAction::CUSTOM(hook) => {
            hook.call(host, actor, decor, Some(slot));
            Ok(true)
        }
    }
}

/// Seats the actor above the clicked proxy.
///
/// Refused when another seat is already within half a block, so two
/// actors never share one spot.
pub fn sit(
    host: &mut dyn Host,
    actor: &mut dyn Actor,
    decor: &CompositeObject,
    clicked: &EntityRecord,
    slot: HandSlot,
) -> Result<bool> {
    let height = decor.definition().sit_height()?;
    let seat = Point3::new(
        clicked.position.x,
        clicked.position.y + height,
        clicked.position.z,
    );

    let taken = !host
        .entities_in(&Aabb::around(seat, SEAT_CLEARANCE), &|record| {
            record.kind == EntityKind::SEAT
        })
        .is_empty();
    if taken {
        debug!("Seat on `{}` is taken", decor.key());
        return Ok(false);
    }

    let seat_id = host.spawn(EntitySpawn {
        kind: EntityKind::SEAT,
        position: seat,
        yaw: actor.yaw(),
        width: 0.0,
        height: 0.0,
        item: None,
    });
    actor.mount(seat_id);
    host.play(SIT_SOUND, seat);
    actor.swing(slot);
    Ok(true)
}

/// Advances the decor to its next variant. Needs a wrench in `slot`.
pub fn wrench(
    host: &mut dyn Host,
    actor: &mut dyn Actor,
    decor: &CompositeObject,
    slot: HandSlot,
) -> Result<bool> {
    if !holds_wrench(actor, slot) {
        return Ok(false);
    }

    let definition = decor.definition();
    let current = decor
        .current_variant(host)
        .unwrap_or_else(|| definition.default_variant().clone());
    let Some(next) = definition.next_variant(&current)?.cloned() else {
        debug!("`{}` shows an unknown variant {}", decor.key(), current.key());
        return Ok(false);
    };

    decor.show_variant(host, &next);

    if actor.game_mode() == GameMode::SURVIVAL {
        actor.damage_held(slot);
    }
    host.play(WRENCH_SOUND, decor.center());
    actor.swing(slot);
    Ok(true)
}

/// Moves every light cell of the decor to the next configured level and,
/// for light-typed kinds, shows the variant owned by the new level.
pub fn cycle_light(
    host: &mut dyn Host,
    actor: &mut dyn Actor,
    decor: &CompositeObject,
    slot: HandSlot,
    typed: bool,
) -> Result<bool> {
    let definition = decor.definition();
    let cells: Vec<_> = decor
        .block_box()
        .positions()
        .map(|pos| (pos, host.cell(pos)))
        .filter(|(_, state)| state.is_light())
        .collect();

    let Some((_, first)) = cells.first() else {
        debug!("`{}` has no light cells left", decor.key());
        return Ok(false);
    };
    let level = definition.next_light_level(first.level)?;

    for (pos, state) in &cells {
        let placed = CellState::light(level, state.waterlogged);
        host.log_removal(actor.name(), *pos, state);
        host.set_cell(*pos, placed.clone());
        host.log_placement(actor.name(), *pos, &placed);
    }

    if typed && definition.has(Capability::LIGHT_TYPED) {
        if let Some(variant) = definition.light_variant(level)? {
            decor.show_variant(host, variant);
        }
    }

    actor.swing(slot);
    Ok(true)
}
