//! # In-Memory Host
//!
//! A complete host world kept in plain collections: a sparse cell map, an
//! entity table, a per-entity tag store and recorders for audit entries,
//! sounds and notifications.
//!
//! ## Architecture
//!
//! Cells that were never written read as air, so the world is effectively
//! unbounded while only touched cells take memory. Entity ids are drawn
//! from a seeded [`fastrand::Rng`], which keeps test runs reproducible.
//!
//! Notifications are recorded and then answered from a set of cancelled
//! event kinds, which lets tests exercise the rollback paths.

use std::collections::{BTreeMap, HashMap, HashSet};

use phf::phf_set;

use super::{
    Audit, BlockPos, CellState, DecorEvent, Entities, EntityId, EntityKind, EntityRecord,
    EntitySpawn, EventKind, EventOutcome, Item, Material, Notifications, Sounds, Tags, Voxels,
    WorldPos,
};
use crate::engine_state::decor::geometry::Aabb;

/// Named blocks that any placement may overwrite.
static REPLACEABLE_BLOCKS: phf::Set<&'static str> = phf_set! {
    "short_grass",
    "tall_grass",
    "fern",
    "large_fern",
    "dead_bush",
    "snow",
    "vine",
    "seagrass",
};

/// Seed used by [`MemoryHost::new`].
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Whether an audit entry records a cell being cleared or filled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AuditAction {
    REMOVAL,
    PLACEMENT,
}

/// One recorded material change.
#[derive(Clone, Debug, PartialEq)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub actor: String,
    pub pos: BlockPos,
    pub state: CellState,
}

/// A host world held entirely in memory.
///
/// # Examples
///
/// ```
/// # use cgmath::Point3;
/// # use voxel_decor::host::memory::MemoryHost;
/// # use voxel_decor::host::{CellState, Voxels};
/// let mut host = MemoryHost::new();
/// host.set_cell(Point3::new(0, 63, 0), CellState::block("stone"));
/// assert!(!host.is_replaceable(Point3::new(0, 63, 0)));
/// assert!(host.cell(Point3::new(0, 64, 0)).is_air());
/// ```
pub struct MemoryHost {
    cells: HashMap<BlockPos, CellState>,
    entities: BTreeMap<EntityId, EntityRecord>,
    tags: HashMap<EntityId, BTreeMap<String, String>>,
    rng: fastrand::Rng,
    cancelled: HashSet<EventKind>,
    /// Every audited material change, in order.
    pub audit: Vec<AuditEntry>,
    /// Every sound played, in order.
    pub sounds: Vec<(String, WorldPos)>,
    /// Every notification fired, in order, including cancelled ones.
    pub events: Vec<DecorEvent>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Creates an empty world seeded with [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates an empty world whose entity ids come from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cells: HashMap::new(),
            entities: BTreeMap::new(),
            tags: HashMap::new(),
            rng: fastrand::Rng::with_seed(seed),
            cancelled: HashSet::new(),
            audit: Vec::new(),
            sounds: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Makes every future notification of `kind` come back cancelled.
    pub fn cancel(&mut self, kind: EventKind) {
        self.cancelled.insert(kind);
    }

    /// Lets notifications of `kind` proceed again.
    pub fn allow(&mut self, kind: EventKind) {
        self.cancelled.remove(&kind);
    }

    /// Fills the horizontal square of side `2 * radius + 1` centred on
    /// `center` with `state`. Used to lay floors and ceilings.
    pub fn fill_layer(&mut self, center: BlockPos, radius: i32, state: CellState) {
        for x in -radius..=radius {
            for z in -radius..=radius {
                let pos = BlockPos::new(center.x + x, center.y, center.z + z);
                self.cells.insert(pos, state.clone());
            }
        }
    }

    /// Live entities of one kind.
    pub fn entities_of(&self, kind: EntityKind) -> Vec<EntityRecord> {
        self.entities
            .values()
            .filter(|record| record.kind == kind)
            .cloned()
            .collect()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Every tag stored on an entity.
    pub fn tags_of(&self, id: EntityId) -> BTreeMap<String, String> {
        self.tags.get(&id).cloned().unwrap_or_default()
    }

    fn next_id(&mut self) -> EntityId {
        loop {
            let id = EntityId(self.rng.u64(1..));
            if !self.entities.contains_key(&id) {
                return id;
            }
        }
    }
}

impl Voxels for MemoryHost {
    fn cell(&self, pos: BlockPos) -> CellState {
        self.cells.get(&pos).cloned().unwrap_or_else(CellState::air)
    }

    fn set_cell(&mut self, pos: BlockPos, state: CellState) {
        if state.is_air() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, state);
        }
    }

    fn is_replaceable(&self, pos: BlockPos) -> bool {
        match self.cell(pos).material {
            Material::AIR | Material::WATER | Material::LIGHT => true,
            Material::BARRIER => false,
            Material::BLOCK(name) => REPLACEABLE_BLOCKS.contains(name.as_str()),
        }
    }
}

impl Entities for MemoryHost {
    fn spawn(&mut self, spawn: EntitySpawn) -> EntityId {
        let id = self.next_id();
        self.entities.insert(
            id,
            EntityRecord {
                id,
                kind: spawn.kind,
                position: spawn.position,
                yaw: spawn.yaw,
                width: spawn.width,
                height: spawn.height,
                item: spawn.item,
            },
        );
        id
    }

    fn entity(&self, id: EntityId) -> Option<EntityRecord> {
        self.entities.get(&id).cloned()
    }

    fn entities_in(
        &self,
        area: &Aabb,
        filter: &dyn Fn(&EntityRecord) -> bool,
    ) -> Vec<EntityRecord> {
        self.entities
            .values()
            .filter(|record| {
                let bounds = record.bounds();
                let hit = if record.width == 0.0 || record.height == 0.0 {
                    area.contains(record.position)
                } else {
                    bounds.overlaps(area)
                };
                hit && filter(*record)
            })
            .cloned()
            .collect()
    }

    fn remove(&mut self, id: EntityId) {
        self.entities.remove(&id);
        self.tags.remove(&id);
    }

    fn set_item(&mut self, id: EntityId, item: Item) {
        if let Some(record) = self.entities.get_mut(&id) {
            record.item = Some(item);
        }
    }

    fn drop_item(&mut self, at: WorldPos, item: Item) {
        self.spawn(EntitySpawn {
            kind: EntityKind::DROPPED_ITEM,
            position: at,
            yaw: 0.0,
            width: 0.25,
            height: 0.25,
            item: Some(item),
        });
    }
}

impl Tags for MemoryHost {
    fn tag(&self, id: EntityId, key: &str) -> Option<String> {
        self.tags.get(&id).and_then(|tags| tags.get(key)).cloned()
    }

    fn set_tag(&mut self, id: EntityId, key: &str, value: &str) {
        if self.entities.contains_key(&id) {
            self.tags
                .entry(id)
                .or_default()
                .insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove_tag(&mut self, id: EntityId, key: &str) {
        if let Some(tags) = self.tags.get_mut(&id) {
            tags.remove(key);
        }
    }
}

impl Audit for MemoryHost {
    fn log_removal(&mut self, actor: &str, pos: BlockPos, previous: &CellState) {
        self.audit.push(AuditEntry {
            action: AuditAction::REMOVAL,
            actor: actor.to_owned(),
            pos,
            state: previous.clone(),
        });
    }

    fn log_placement(&mut self, actor: &str, pos: BlockPos, placed: &CellState) {
        self.audit.push(AuditEntry {
            action: AuditAction::PLACEMENT,
            actor: actor.to_owned(),
            pos,
            state: placed.clone(),
        });
    }
}

impl Sounds for MemoryHost {
    fn play(&mut self, sound: &str, at: WorldPos) {
        self.sounds.push((sound.to_owned(), at));
    }
}

impl Notifications for MemoryHost {
    fn notify(&mut self, event: &DecorEvent) -> EventOutcome {
        self.events.push(event.clone());
        if self.cancelled.contains(&event.kind) {
            EventOutcome::Cancelled
        } else {
            EventOutcome::Proceed
        }
    }
}
