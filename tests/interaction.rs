mod common;

use cgmath::Point3;

use common::{anchor, creative, engine, survival, world, wrench};
use voxel_decor::config::EngineConfig;
use voxel_decor::engine_state::decor::action::{ClickAction, Hook};
use voxel_decor::engine_state::decor::capability::Capability;
use voxel_decor::engine_state::decor::facing::{BlockFace, Facing};
use voxel_decor::engine_state::decor::geometry::{CollisionKind, HitBox};
use voxel_decor::engine_state::decor::sound::{SoundGroup, SIT_SOUND, WRENCH_SOUND};
use voxel_decor::engine_state::decor::{DecorDefinition, DecorRegistry, PlaceRequest};
use voxel_decor::engine_state::DecorEngine;
use voxel_decor::error::DecorError;
use voxel_decor::host::{
    Actor, CellState, Entities, EntityId, EntityKind, EntityRecord, EntitySpawn, EventKind,
    HandSlot, Item, Sounds, Voxels,
};

fn canonical_record(host: &dyn Entities, canonical: EntityId) -> EntityRecord {
    host.entity(canonical).unwrap()
}

#[test]
fn armchair_seats_one_actor() {
    let engine = engine();
    let mut host = world();
    let mut steve = survival("steve");
    let mut alex = survival("alex");
    let chair = engine.definition("oak_armchair").unwrap();
    let placed = engine
        .place(&mut host, &mut steve, &chair, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let clicked = canonical_record(&host, placed.canonical());

    assert!(!engine
        .handle_click(&mut host, &mut steve, &clicked, HandSlot::MAIN_HAND, false)
        .unwrap());
    assert!(steve.mounted_on.is_none());

    assert!(engine
        .handle_click(&mut host, &mut steve, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap());
    let seat = host.entity(steve.mounted_on.unwrap()).unwrap();
    assert_eq!(seat.kind, EntityKind::SEAT);
    assert_eq!((seat.position.x, seat.position.z), (0.5, 0.5));
    assert!((seat.position.y - 64.6).abs() < 1e-9);
    assert_eq!(host.sounds.last().map(|(sound, _)| sound.as_str()), Some(SIT_SOUND));

    assert!(!engine
        .handle_click(&mut host, &mut alex, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap());
    assert!(alex.mounted_on.is_none());
    assert_eq!(host.entities_of(EntityKind::SEAT).len(), 1);
}

#[test]
fn wrench_cycles_every_variant_and_wears_the_tool() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve").holding(wrench());
    let nightstand = engine.definition("oak_nightstand").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &nightstand, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let clicked = canonical_record(&host, placed.canonical());

    let mut seen = vec![placed.current_variant(&host).unwrap().name().to_owned()];
    for _ in 0..7 {
        assert!(engine
            .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
            .unwrap());
        seen.push(placed.current_variant(&host).unwrap().name().to_owned());
    }

    assert_eq!(seen.first(), seen.last());
    assert_eq!(seen[0], "default");
    let mut distinct = seen[..7].to_vec();
    distinct.sort();
    distinct.dedup();
    assert_eq!(distinct.len(), 7);

    assert_eq!(player.main_hand.as_ref().map(|item| item.damage), Some(7));
    assert_eq!(
        host.sounds.iter().filter(|(sound, _)| sound == WRENCH_SOUND).count(),
        7
    );
}

#[test]
fn wrench_needs_a_wrench_and_spares_creative_tools() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let nightstand = engine.definition("oak_nightstand").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &nightstand, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let clicked = canonical_record(&host, placed.canonical());

    assert!(!engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap());
    assert_eq!(placed.current_variant(&host).unwrap().name(), "default");

    let mut builder = creative("alex");
    builder.off_hand = Some(wrench());
    assert!(engine
        .handle_click(&mut host, &mut builder, &clicked, HandSlot::OFF_HAND, true)
        .unwrap());
    assert_eq!(builder.off_hand.as_ref().map(|item| item.damage), Some(0));
    assert_eq!(builder.swings, vec![HandSlot::OFF_HAND]);
}

#[test]
fn brazier_switches_variant_with_its_light() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let brazier = engine.definition("brazier").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &brazier, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let clicked = canonical_record(&host, placed.canonical());

    assert_eq!(host.cell(anchor()), CellState::light(0, false));
    assert_eq!(placed.current_variant(&host).unwrap().name(), "default");

    engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap();
    assert_eq!(host.cell(anchor()).level, 15);
    assert_eq!(placed.current_variant(&host).unwrap().name(), "fired");

    engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap();
    assert_eq!(host.cell(anchor()).level, 0);
    assert_eq!(placed.current_variant(&host).unwrap().name(), "default");
}

#[test]
fn lamp_toggles_and_keeps_water() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let lamp = engine.definition("small_lamp").unwrap();
    host.set_cell(anchor(), CellState::water_source());
    let placed = engine
        .place(&mut host, &mut player, &lamp, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let clicked = canonical_record(&host, placed.canonical());

    engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap();
    assert_eq!(host.cell(anchor()), CellState::light(0, true));

    engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap();
    assert_eq!(host.cell(anchor()), CellState::light(15, true));
}

#[test]
fn cancelled_clicks_do_nothing() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let chair = engine.definition("oak_armchair").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &chair, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let clicked = canonical_record(&host, placed.canonical());
    host.cancel(EventKind::CLICK);

    assert!(!engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap());
    assert!(player.mounted_on.is_none());
    assert_eq!(host.events.last().map(|event| event.kind), Some(EventKind::CLICK));
}

#[test]
fn clicks_on_foreign_entities_are_ignored() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let mob = host.spawn(EntitySpawn {
        kind: EntityKind::MOB,
        position: Point3::new(0.5, 64.0, 0.5),
        yaw: 0.0,
        width: 0.6,
        height: 1.8,
        item: None,
    });
    let clicked = canonical_record(&host, mob);

    assert!(!engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap());
    assert!(host.events.is_empty());
}

fn stool(click_action: ClickAction) -> DecorDefinition {
    DecorDefinition::builder()
        .key("stool")
        .hit_box(HitBox::new(1.0, 1.0, 1.0, CollisionKind::SOLID).unwrap())
        .facings(&[Facing::FLOOR])
        .sound_group(SoundGroup::WOOD)
        .item(Item::new("leather_horse_armor", 9000))
        .capabilities(&[])
        .click_action(click_action)
        .on_place(Hook::new(|host, _, decor, _| host.play("stool.placed", decor.center())))
        .on_break(Hook::new(|host, _, decor, _| host.play("stool.broken", decor.center())))
        .build()
        .unwrap()
}

fn engine_with_stool(click_action: ClickAction) -> DecorEngine {
    let mut registry = DecorRegistry::new();
    registry.register(stool(click_action)).unwrap();
    DecorEngine::new(registry, EngineConfig::default())
}

#[test]
fn custom_actions_and_lifecycle_hooks_run() {
    let engine = engine_with_stool(ClickAction::CUSTOM(Hook::new(|host, actor, decor, slot| {
        if let Some(slot) = slot {
            actor.swing(slot);
        }
        host.play("stool.clicked", decor.center());
    })));
    let mut host = world();
    let mut player = survival("steve");
    let stool = engine.definition("stool").unwrap();

    let placed = engine
        .place(&mut host, &mut player, &stool, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let clicked = canonical_record(&host, placed.canonical());
    assert!(engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::OFF_HAND, true)
        .unwrap());
    assert!(engine.destroy(&mut host, &mut player, &placed, false));

    let played: Vec<&str> = host.sounds.iter().map(|(sound, _)| sound.as_str()).collect();
    assert_eq!(
        played,
        [
            "block.wood.place",
            "stool.placed",
            "stool.clicked",
            "block.wood.break",
            "stool.broken"
        ]
    );
    assert_eq!(player.swings, vec![HandSlot::OFF_HAND]);
}

#[test]
fn sitting_on_a_kind_without_a_seat_is_an_error() {
    let engine = engine_with_stool(ClickAction::SIT);
    let mut host = world();
    let mut player = survival("steve");
    let stool = engine.definition("stool").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &stool, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let clicked = canonical_record(&host, placed.canonical());

    let err = engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap_err();
    assert!(matches!(
        err,
        DecorError::Unsupported { capability: Capability::SITTABLE, .. }
    ));
    assert!(player.mounted_on.is_none());
}
