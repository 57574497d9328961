//! # Host World Interface
//!
//! The decor engine never owns the world it decorates. Everything it needs
//! from the host (cell reads and writes, entity spawning and queries,
//! per-entity tag storage, audit logging, sounds and cancellable
//! notifications) goes through the traits in this module.
//!
//! ## Architecture
//!
//! Each concern is a separate trait so hosts can implement them on whatever
//! structures they already have. [`Host`] bundles them and is blanket
//! implemented, so engine entry points only ever take `&mut dyn Host`.
//!
//! [`memory::MemoryHost`] is a complete in-memory implementation used by the
//! demo runner and the test suite.

pub mod actor;
pub mod memory;

use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::engine_state::decor::geometry::bounding_box::Aabb;

pub use actor::{Actor, GameMode, HandSlot};

/// Integer coordinates of a voxel cell.
pub type BlockPos = Point3<i32>;

/// Continuous world coordinates.
pub type WorldPos = Point3<f64>;

/// Opaque, stable identifier of a live entity.
///
/// Rendered as 16 lowercase hex digits when written into tags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s.trim(), 16).map(EntityId)
    }
}

/// What a voxel cell is made of.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    AIR,
    WATER,
    /// Invisible full-collision cell.
    BARRIER,
    /// Invisible, non-colliding cell that emits light.
    LIGHT,
    /// Any other named block.
    BLOCK(String),
}

/// The full state of one voxel cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellState {
    pub material: Material,
    /// Fluid level for water (0 is a source), emitted light for light cells.
    pub level: u8,
    pub waterlogged: bool,
}

impl CellState {
    pub fn air() -> Self {
        Self::of(Material::AIR)
    }

    pub fn barrier() -> Self {
        Self::of(Material::BARRIER)
    }

    pub fn water_source() -> Self {
        Self::of(Material::WATER)
    }

    pub fn light(level: u8, waterlogged: bool) -> Self {
        Self {
            material: Material::LIGHT,
            level,
            waterlogged,
        }
    }

    pub fn block(name: &str) -> Self {
        Self::of(Material::BLOCK(name.to_owned()))
    }

    fn of(material: Material) -> Self {
        Self {
            material,
            level: 0,
            waterlogged: false,
        }
    }

    pub fn is_air(&self) -> bool {
        self.material == Material::AIR
    }

    pub fn is_light(&self) -> bool {
        self.material == Material::LIGHT
    }

    pub fn is_source_water(&self) -> bool {
        self.material == Material::WATER && self.level == 0
    }
}

/// Entity categories the engine distinguishes.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Renders a decor's item.
    DISPLAY,
    /// Invisible interaction and collision volume.
    PROXY,
    /// Mount point a seated actor rides.
    SEAT,
    PLAYER,
    MOB,
    DROPPED_ITEM,
    ITEM_FRAME,
    PROJECTILE,
    EXPERIENCE_ORB,
}

impl EntityKind {
    /// Entities that never prevent a solid decor from being placed over them.
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            EntityKind::DROPPED_ITEM
                | EntityKind::ITEM_FRAME
                | EntityKind::PROJECTILE
                | EntityKind::EXPERIENCE_ORB
        )
    }
}

/// RGB colour applied to dyeable items.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// An item stack as the engine sees it.
///
/// `tags` is the item's own persisted string store; the `type` entry
/// identifies which decor (and which variant) the item places.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    pub material: String,
    pub amount: u32,
    pub custom_model_data: Option<i32>,
    pub display_name: Option<String>,
    pub color: Option<Color>,
    /// Accumulated durability damage.
    pub damage: u32,
    pub tags: BTreeMap<String, String>,
}

impl Item {
    pub fn new(material: &str, custom_model_data: i32) -> Self {
        Self {
            material: material.to_owned(),
            amount: 1,
            custom_model_data: Some(custom_model_data),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_owned());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Parameters for spawning an entity.
#[derive(Clone, Debug)]
pub struct EntitySpawn {
    pub kind: EntityKind,
    pub position: WorldPos,
    pub yaw: f32,
    pub width: f32,
    /// Negative heights extend downwards from `position`.
    pub height: f32,
    pub item: Option<Item>,
}

/// A snapshot of a live entity.
#[derive(Clone, Debug)]
pub struct EntityRecord {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: WorldPos,
    pub yaw: f32,
    pub width: f32,
    pub height: f32,
    pub item: Option<Item>,
}

impl EntityRecord {
    /// The volume the entity occupies: `width` wide on both horizontal axes
    /// around its position, `height` tall from its feet.
    pub fn bounds(&self) -> Aabb {
        let half = self.width as f64 / 2.0;
        let p = self.position;
        Aabb::of(
            Point3::new(p.x - half, p.y, p.z - half),
            Point3::new(p.x + half, p.y + self.height as f64, p.z + half),
        )
    }
}

/// Which kind of occurrence a notification describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PLACE,
    BREAK,
    CLICK,
}

/// A cancellable occurrence involving a composite decor.
#[derive(Clone, Debug)]
pub struct DecorEvent {
    pub kind: EventKind,
    pub decor_key: String,
    pub actor: String,
    /// Canonical proxy of the composite the event concerns.
    pub proxy: EntityId,
    pub position: WorldPos,
    pub slot: Option<HandSlot>,
}

/// Listener verdict on a [`DecorEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Proceed,
    Cancelled,
}

/// Voxel cell access.
pub trait Voxels {
    fn cell(&self, pos: BlockPos) -> CellState;

    fn set_cell(&mut self, pos: BlockPos, state: CellState);

    /// Whether placing something into `pos` may overwrite what is there.
    fn is_replaceable(&self, pos: BlockPos) -> bool;
}

/// Entity spawning, lookup and removal.
pub trait Entities {
    fn spawn(&mut self, spawn: EntitySpawn) -> EntityId;

    fn entity(&self, id: EntityId) -> Option<EntityRecord>;

    /// All live entities whose bounds overlap `area` and pass `filter`.
    fn entities_in(&self, area: &Aabb, filter: &dyn Fn(&EntityRecord) -> bool)
        -> Vec<EntityRecord>;

    /// Removes the entity and its tags. Removing a missing entity is a no-op.
    fn remove(&mut self, id: EntityId);

    /// Replaces the item carried by a display entity.
    fn set_item(&mut self, id: EntityId, item: Item);

    fn drop_item(&mut self, at: WorldPos, item: Item);
}

/// Per-entity persisted string tags.
pub trait Tags {
    fn tag(&self, id: EntityId, key: &str) -> Option<String>;

    fn set_tag(&mut self, id: EntityId, key: &str, value: &str);

    fn remove_tag(&mut self, id: EntityId, key: &str);

    fn has_tag(&self, id: EntityId, key: &str) -> bool {
        self.tag(id, key).is_some()
    }
}

/// Records material changes made on an actor's behalf.
pub trait Audit {
    fn log_removal(&mut self, actor: &str, pos: BlockPos, previous: &CellState);

    fn log_placement(&mut self, actor: &str, pos: BlockPos, placed: &CellState);
}

pub trait Sounds {
    fn play(&mut self, sound: &str, at: WorldPos);
}

/// The cancellable event bus.
pub trait Notifications {
    fn notify(&mut self, event: &DecorEvent) -> EventOutcome;
}

/// Everything the engine needs from the host world.
pub trait Host: Voxels + Entities + Tags + Audit + Sounds + Notifications {}

impl<T: Voxels + Entities + Tags + Audit + Sounds + Notifications> Host for T {}
