mod common;

use cgmath::Point3;

use common::{anchor, engine, survival, world, wrench};
use voxel_decor::engine_state::decor::facing::BlockFace;
use voxel_decor::engine_state::decor::geometry::Aabb;
use voxel_decor::engine_state::decor::tags::{CANONICAL_TAGS, TAG_BOUNDING_BOX, TAG_DISPLAY, TAG_TYPE};
use voxel_decor::engine_state::decor::variant::TYPE_TAG;
use voxel_decor::engine_state::decor::PlaceRequest;
use voxel_decor::host::memory::MemoryHost;
use voxel_decor::host::{
    BlockPos, CellState, Entities, EntityId, EntityKind, EntitySpawn, EventKind, HandSlot, Tags,
    Voxels,
};

fn sweep_area() -> Aabb {
    Aabb::around(Point3::new(0.0, 64.0, 0.0), 8.0)
}

fn cell_of(host: &MemoryHost, entity: EntityId) -> BlockPos {
    let position = host.entity(entity).unwrap().position;
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

#[test]
fn every_missing_canonical_tag_breaks_reconstruction() {
    let engine = engine();

    for tag in CANONICAL_TAGS {
        let mut host = world();
        let mut player = survival("steve");
        let chair = engine.definition("oak_armchair").unwrap();
        let placed = engine
            .place(&mut host, &mut player, &chair, PlaceRequest::at(anchor(), BlockFace::UP))
            .unwrap();

        host.remove_tag(placed.canonical(), tag);
        assert!(engine.from_block(&host, anchor()).is_none(), "missing `{tag}`");
        assert!(engine.from_entity(&host, placed.display()).is_none());
    }
}

#[test]
fn malformed_tags_resolve_to_none() {
    let engine = engine();
    let corruptions = [
        (TAG_TYPE, "no_such_decor"),
        (TAG_DISPLAY, "not-an-id"),
        (TAG_BOUNDING_BOX, "1,2,3"),
    ];

    for (tag, value) in corruptions {
        let mut host = world();
        let mut player = survival("steve");
        let chair = engine.definition("oak_armchair").unwrap();
        let placed = engine
            .place(&mut host, &mut player, &chair, PlaceRequest::at(anchor(), BlockFace::UP))
            .unwrap();

        host.set_tag(placed.canonical(), tag, value);
        assert!(engine.from_block(&host, anchor()).is_none(), "corrupt `{tag}`");
    }
}

#[test]
fn children_and_display_resolve_to_the_canonical_proxy() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let table = engine.definition("birch_big_table").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &table, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();

    for proxy in placed.proxies() {
        let found = engine.from_proxy(&host, *proxy).unwrap();
        assert_eq!(found.canonical(), placed.canonical());
        assert_eq!(found.display(), placed.display());
    }

    let found = engine.from_entity(&host, placed.display()).unwrap();
    assert_eq!(found.canonical(), placed.canonical());
    assert_eq!(found.proxies(), placed.proxies());
}

#[test]
fn children_of_an_incomplete_canonical_resolve_to_none() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let table = engine.definition("oak_big_table").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &table, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let children = &placed.proxies()[1..];
    assert_eq!(children.len(), 3);
    for child in children {
        assert!(engine.from_block(&host, cell_of(&host, *child)).is_some());
    }

    host.remove_tag(placed.canonical(), TAG_BOUNDING_BOX);
    assert!(host.entity(placed.canonical()).is_some());
    for child in children {
        assert!(engine.from_proxy(&host, *child).is_none());
        assert!(engine.from_block(&host, cell_of(&host, *child)).is_none());
    }
}

#[test]
fn tags_on_a_non_proxy_are_not_a_decor() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let chair = engine.definition("oak_armchair").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &chair, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();

    let mob = host.spawn(EntitySpawn {
        kind: EntityKind::MOB,
        position: Point3::new(2.5, 64.0, 2.5),
        yaw: 0.0,
        width: 0.6,
        height: 1.8,
        item: None,
    });
    for tag in CANONICAL_TAGS {
        let value = host.tag(placed.canonical(), tag).unwrap();
        host.set_tag(mob, tag, &value);
    }

    assert!(engine.from_proxy(&host, placed.canonical()).is_some());
    assert!(engine.from_proxy(&host, mob).is_none());
    assert!(engine.from_entity(&host, mob).is_none());
}

#[test]
fn dead_children_are_dropped_and_a_dead_canonical_fails() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let table = engine.definition("oak_big_table").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &table, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();

    let dead = placed.proxies()[3];
    host.remove(dead);
    let found = engine.from_proxy(&host, placed.canonical()).unwrap();
    assert_eq!(found.proxies().len(), 3);
    assert!(!found.proxies().contains(&dead));
    assert_eq!(found.block_box(), placed.block_box());

    host.remove(placed.canonical());
    assert!(engine.from_proxy(&host, placed.proxies()[1]).is_none());
    assert!(engine.from_block(&host, anchor()).is_none());
}

#[test]
fn destroy_restores_cells_and_is_idempotent() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let table = engine.definition("oak_big_table").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &table, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();

    assert!(engine.destroy(&mut host, &mut player, &placed, true));
    assert!(placed.block_box().positions().all(|pos| host.cell(pos).is_air()));
    assert_eq!(host.entities_of(EntityKind::DROPPED_ITEM).len(), 1);
    assert_eq!(host.entity_count(), 1);
    assert_eq!(host.events.last().map(|event| event.kind), Some(EventKind::BREAK));
    assert_eq!(host.sounds.last().map(|(sound, _)| sound.as_str()), Some("block.wood.break"));

    assert!(engine.from_block(&host, anchor()).is_none());
    assert!(engine.from_entity(&host, placed.display()).is_none());
    assert!(!engine.destroy(&mut host, &mut player, &placed, true));
    assert_eq!(host.entities_of(EntityKind::DROPPED_ITEM).len(), 1);
}

#[test]
fn cancelled_break_changes_nothing() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let chair = engine.definition("oak_armchair").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &chair, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    host.cancel(EventKind::BREAK);

    assert!(!engine.destroy(&mut host, &mut player, &placed, true));
    assert_eq!(host.cell(anchor()), CellState::barrier());
    assert_eq!(host.entity_count(), 2);
    assert!(engine.from_block(&host, anchor()).is_some());

    host.allow(EventKind::BREAK);
    assert!(engine.destroy(&mut host, &mut player, &placed, false));
    assert_eq!(host.entity_count(), 0);
}

#[test]
fn wrenched_nightstand_drops_its_base_item() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve").holding(wrench());
    let nightstand = engine.definition("spruce_nightstand").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &nightstand, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();

    let clicked = host.entity(placed.canonical()).unwrap();
    assert!(engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap());
    assert_ne!(placed.current_variant(&host).unwrap().name(), "default");

    assert!(engine.destroy(&mut host, &mut player, &placed, true));
    let dropped = host.entities_of(EntityKind::DROPPED_ITEM);
    assert_eq!(dropped.len(), 1);
    let item = dropped[0].item.as_ref().unwrap();
    assert_eq!(item.tag(TYPE_TAG), Some("spruce_nightstand"));
    assert_eq!(item.amount, 1);
}

#[test]
fn lit_brazier_drops_the_fired_variant() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let brazier = engine.definition("brazier").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &brazier, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();

    let clicked = host.entity(placed.canonical()).unwrap();
    engine
        .handle_click(&mut host, &mut player, &clicked, HandSlot::MAIN_HAND, true)
        .unwrap();

    assert!(engine.destroy(&mut host, &mut player, &placed, true));
    let dropped = host.entities_of(EntityKind::DROPPED_ITEM);
    let item = dropped[0].item.as_ref().unwrap();
    assert_eq!(item.tag(TYPE_TAG), Some("brazier.type.fired"));
    assert!(host.cell(anchor()).is_air());
}

#[test]
fn destroying_a_cell_breaks_every_decor_in_it() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let pot = engine.definition("cooking_pot").unwrap();
    let request = PlaceRequest::at(anchor(), BlockFace::UP);
    engine.place(&mut host, &mut player, &pot, request).unwrap();
    engine.place(&mut host, &mut player, &pot, request).unwrap();

    assert_eq!(engine.destroy_in_block(&mut host, &mut player, anchor(), true), 2);
    assert_eq!(host.entities_of(EntityKind::PROXY).len(), 0);
    assert_eq!(host.entities_of(EntityKind::DROPPED_ITEM).len(), 2);
    assert_eq!(engine.destroy_in_block(&mut host, &mut player, anchor(), true), 0);
}

#[test]
fn sweep_removes_children_of_a_vanished_canonical() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let table = engine.definition("oak_big_table").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &table, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();

    host.remove(placed.canonical());
    assert_eq!(engine.sweep_orphans(&mut host, &sweep_area()), 3);
    assert_eq!(host.entities_of(EntityKind::PROXY).len(), 0);
    assert_eq!(host.entities_of(EntityKind::DISPLAY).len(), 1);
}

#[test]
fn sweep_removes_a_broken_canonical_with_its_display() {
    let engine = engine();
    let mut host = world();
    let mut player = survival("steve");
    let table = engine.definition("oak_big_table").unwrap();
    let chair = engine.definition("oak_armchair").unwrap();
    let placed = engine
        .place(&mut host, &mut player, &table, PlaceRequest::at(anchor(), BlockFace::UP))
        .unwrap();
    let healthy = engine
        .place(
            &mut host,
            &mut player,
            &chair,
            PlaceRequest::at(Point3::new(3, 64, 3), BlockFace::UP),
        )
        .unwrap();

    let stranger = host.spawn(EntitySpawn {
        kind: EntityKind::PROXY,
        position: Point3::new(-3.5, 64.0, -3.5),
        yaw: 0.0,
        width: 1.0,
        height: 1.0,
        item: None,
    });

    host.remove_tag(placed.canonical(), TAG_TYPE);
    assert_eq!(engine.sweep_orphans(&mut host, &sweep_area()), 5);

    assert!(host.entity(stranger).is_some());
    assert!(engine.from_block(&host, Point3::new(3, 64, 3)).is_some());
    assert!(host.entity(healthy.display()).is_some());
    assert_eq!(engine.sweep_orphans(&mut host, &sweep_area()), 0);
}
