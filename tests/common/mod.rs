#![allow(dead_code)]

use cgmath::Point3;

use voxel_decor::config::EngineConfig;
use voxel_decor::engine_state::decor::catalog;
use voxel_decor::engine_state::decor::interaction::WRENCH_TYPE;
use voxel_decor::engine_state::decor::variant::TYPE_TAG;
use voxel_decor::engine_state::DecorEngine;
use voxel_decor::host::actor::Player;
use voxel_decor::host::memory::MemoryHost;
use voxel_decor::host::{BlockPos, CellState, GameMode, Item};

pub const FLOOR_Y: i32 = 63;

/// The cell directly above the floor at the origin.
pub fn anchor() -> BlockPos {
    Point3::new(0, FLOOR_Y + 1, 0)
}

pub fn engine() -> DecorEngine {
    engine_with(EngineConfig::default())
}

pub fn engine_with(config: EngineConfig) -> DecorEngine {
    DecorEngine::new(catalog::load_registry().unwrap(), config)
}

/// An empty world with a stone floor around the origin.
pub fn world() -> MemoryHost {
    let mut host = MemoryHost::new();
    host.fill_layer(Point3::new(0, FLOOR_Y, 0), 8, CellState::block("stone"));
    host
}

pub fn survival(name: &str) -> Player {
    Player::new(name, 0.0, GameMode::SURVIVAL)
}

pub fn creative(name: &str) -> Player {
    Player::new(name, 0.0, GameMode::CREATIVE)
}

pub fn wrench() -> Item {
    Item::new("iron_hoe", 0).with_tag(TYPE_TAG, WRENCH_TYPE)
}
