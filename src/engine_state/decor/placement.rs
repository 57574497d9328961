//! # Placement
//!
//! Turns a definition plus an anchor cell into a live composite decor.
//!
//! ## Order of operations
//!
//! 1. The face must be one the kind accepts.
//! 2. The footprint is computed from the hit box and the actor's yaw.
//! 3. Every footprint cell must be replaceable.
//! 4. The footprint must not be occupied, by rules that depend on the
//!    collision kind (see [`is_occupied`]).
//! 5. Footprint cells are filled, with every change audited.
//! 6. The visual entity and the proxies are spawned and tagged.
//! 7. A cancellable place notification fires. Cancelling rolls back
//!    exactly the entities and cells this placement created.
//!
//! Steps 1 to 4 reject silently with `None`; nothing in the world changes.

use std::sync::Arc;

use cgmath::Point3;
use log::debug;

use super::capability::Capability;
use super::composite::CompositeObject;
use super::definition::{DecorDefinition, MAX_LIGHT_LEVEL};
use super::facing::{self, BlockFace, Facing};
use super::geometry::{BlockBox, CollisionKind};
use super::tags::TagBundle;
use super::variant::TYPE_TAG;
use crate::config::EngineConfig;
use crate::host::{
    Actor, BlockPos, CellState, DecorEvent, EntityId, EntityKind, EntitySpawn, EventKind,
    EventOutcome, GameMode, HandSlot, Host, Item,
};

/// Where and how a decor is being placed.
#[derive(Copy, Clone, Debug)]
pub struct PlaceRequest<'a> {
    /// The cell the decor is anchored to.
    pub anchor: BlockPos,
    /// The face of the neighbouring block that was clicked.
    pub face: BlockFace,
    /// The hand holding the decor item. `None` places the base item without
    /// consuming anything, as automation does.
    pub slot: Option<HandSlot>,
    /// Custom name given to the placed item.
    pub name_override: Option<&'a str>,
}

impl<'a> PlaceRequest<'a> {
    pub fn at(anchor: BlockPos, face: BlockFace) -> Self {
        Self {
            anchor,
            face,
            slot: None,
            name_override: None,
        }
    }

    pub fn from_hand(mut self, slot: HandSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn named(mut self, name: &'a str) -> Self {
        self.name_override = Some(name);
        self
    }
}

/// A cell this placement changed, with what was there before.
struct FilledCell {
    pos: BlockPos,
    previous: CellState,
    placed: CellState,
}

/// Places `definition` on `actor`'s behalf.
///
/// # Returns
/// The new composite, or `None` if the placement was rejected or cancelled.
pub fn place(
    host: &mut dyn Host,
    actor: &mut dyn Actor,
    config: &EngineConfig,
    definition: &Arc<DecorDefinition>,
    request: PlaceRequest<'_>,
) -> Option<CompositeObject> {
    let hit_box = definition.hit_box();
    let facings = definition.facings();
    let face = request.face;

    if !facing::accepts(facings, face) {
        debug!("`{}` cannot be placed against {:?}", definition.key(), face);
        return None;
    }

    let yaw = actor.yaw();
    let block_box = hit_box.block_box(request.anchor, facings, face, yaw);

    if let Some(pos) = block_box.positions().find(|pos| !host.is_replaceable(*pos)) {
        debug!("`{}` blocked by a solid cell at {:?}", definition.key(), pos);
        return None;
    }

    if is_occupied(host, config, hit_box.kind(), &block_box) {
        debug!("`{}` blocked by entities in {:?}", definition.key(), block_box);
        return None;
    }

    let item = placed_item(actor, definition, request);
    let filled = fill_cells(host, actor.name(), definition, &item, &block_box);

    let display_item = initial_display_item(definition, &item, Facing::of(face));
    let display = host.spawn(EntitySpawn {
        kind: EntityKind::DISPLAY,
        position: hit_box.display_position(request.anchor),
        yaw: hit_box.display_yaw(yaw),
        width: 0.0,
        height: 0.0,
        item: Some(display_item),
    });

    let offset = hit_box.offset_in_block(facings, face, yaw);
    let width = hit_box.interaction_width();
    let height = hit_box.interaction_height(facings, face);
    let proxies: Vec<EntityId> = hit_box
        .proxy_cells(&block_box, facings, face)
        .into_iter()
        .map(|cell| {
            host.spawn(EntitySpawn {
                kind: EntityKind::PROXY,
                position: Point3::new(
                    cell.x as f64 + offset.x,
                    cell.y as f64 + offset.y,
                    cell.z as f64 + offset.z,
                ),
                yaw: 0.0,
                width,
                height,
                item: None,
            })
        })
        .collect();

    TagBundle {
        key: definition.key().to_owned(),
        display,
        children: proxies[1..].to_vec(),
        block_box,
    }
    .write(host, proxies[0]);

    let decor = CompositeObject::new(definition.clone(), display, proxies, block_box);

    let event = DecorEvent {
        kind: EventKind::PLACE,
        decor_key: definition.key().to_owned(),
        actor: actor.name().to_owned(),
        proxy: decor.canonical(),
        position: decor.center(),
        slot: request.slot,
    };
    if host.notify(&event) == EventOutcome::Cancelled {
        debug!("Placement of `{}` was cancelled, rolling back", definition.key());
        roll_back(host, actor.name(), &decor, filled);
        return None;
    }

    host.play(definition.sounds().place, decor.center());

    if let Some(slot) = request.slot {
        if actor.game_mode() == GameMode::SURVIVAL {
            actor.consume_one(slot);
        }
        actor.swing(slot);
    }

    if let Some(hook) = definition.on_place() {
        hook.call(host, actor, &decor, request.slot);
    }

    Some(decor)
}

/// Whether entities already in the footprint forbid placing a decor of
/// `kind` there.
///
/// - SOLID: any entity that is not ignorable.
/// - LIGHT: any proxy.
/// - NONE: `max_decorations_in_block` proxies or more.
pub fn is_occupied(
    host: &dyn Host,
    config: &EngineConfig,
    kind: CollisionKind,
    block_box: &BlockBox,
) -> bool {
    let area = block_box.volume();

    match kind {
        CollisionKind::SOLID => !host
            .entities_in(&area, &|record| !record.kind.is_ignorable())
            .is_empty(),
        CollisionKind::LIGHT => !host
            .entities_in(&area, &|record| record.kind == EntityKind::PROXY)
            .is_empty(),
        CollisionKind::NONE => {
            host.entities_in(&area, &|record| record.kind == EntityKind::PROXY)
                .len()
                >= config.max_decorations_in_block
        }
    }
}

/// The item the decor is placed with: the held stack when it places this
/// kind, otherwise the base item.
fn placed_item(actor: &dyn Actor, definition: &DecorDefinition, request: PlaceRequest<'_>) -> Item {
    let held = request
        .slot
        .and_then(|slot| actor.held_item(slot))
        .filter(|item| {
            item.tag(TYPE_TAG)
                .and_then(|tag| tag.split(".type.").next())
                .is_some_and(|kind| kind.eq_ignore_ascii_case(definition.key()))
        });

    let mut item = held.cloned().unwrap_or_else(|| definition.item().clone());
    item.amount = 1;
    if let Some(name) = request.name_override {
        item.display_name = Some(name.to_owned());
    }
    item
}

fn fill_cells(
    host: &mut dyn Host,
    actor: &str,
    definition: &DecorDefinition,
    item: &Item,
    block_box: &BlockBox,
) -> Vec<FilledCell> {
    let level = match definition.hit_box().kind() {
        CollisionKind::NONE => return Vec::new(),
        CollisionKind::SOLID => None,
        CollisionKind::LIGHT => Some(definition.initial_light_level(item).unwrap_or(MAX_LIGHT_LEVEL)),
    };

    block_box
        .positions()
        .map(|pos| {
            let previous = host.cell(pos);
            let placed = match level {
                Some(level) => CellState::light(level, previous.is_source_water()),
                None => CellState::barrier(),
            };

            host.log_removal(actor, pos, &previous);
            host.set_cell(pos, placed.clone());
            host.log_placement(actor, pos, &placed);

            FilledCell {
                pos,
                previous,
                placed,
            }
        })
        .collect()
}

/// The item the visual entity starts with.
fn initial_display_item(definition: &DecorDefinition, placed: &Item, facing: Facing) -> Item {
    let variant = if definition.has(Capability::FACE_TYPED) {
        definition.face_variant(facing).ok()
    } else {
        definition.table().and_then(|table| table.classify(placed))
    };

    match variant {
        Some(variant) => variant.item_styled_like(placed),
        None => placed.clone(),
    }
}

fn roll_back(host: &mut dyn Host, actor: &str, decor: &CompositeObject, filled: Vec<FilledCell>) {
    for proxy in decor.proxies() {
        host.remove(*proxy);
    }
    host.remove(decor.display());

    for cell in filled {
        host.log_removal(actor, cell.pos, &cell.placed);
        host.set_cell(cell.pos, cell.previous.clone());
        host.log_placement(actor, cell.pos, &cell.previous);
    }
}
