//! # Engine State Module
//!
//! The decor engine: definitions, placement, reconstruction, interaction
//! and deferred recipe registration, coordinated by [`DecorEngine`].
//!
//! ## Key Components
//!
//! * `DecorEngine` - The entry point hosts call from their logic thread
//! * `decor` - Composite decor definitions and the operations on them
//! * `task_management` - Tick-driven deferred tasks
//!
//! ## Architecture
//!
//! The engine owns no world state. Every operation receives the host world
//! as `&mut dyn Host` and rebuilds what it needs from entity tags, so the
//! engine itself only holds immutable definitions, configuration and the
//! pending task queue. Every entry point first checks it is running on the
//! thread that created the engine.

pub mod decor;
pub mod task_management;

use std::sync::Arc;

use log::{debug, info};

use decor::geometry::Aabb;
use decor::recipe::{RecipeRegistrar, RecipeTemplate};
use decor::tasks::recipe_registration_task::RecipeRegistrationTask;
use decor::{interaction, orphan, placement};
use decor::{CompositeObject, DecorDefinition, DecorKind, DecorRegistry, PlaceRequest};
use task_management::TaskManager;

use crate::config::EngineConfig;
use crate::core::LogicThreadGuard;
use crate::error::Result;
use crate::host::{Actor, BlockPos, Color, EntityId, EntityRecord, HandSlot, Host};

/// The decor engine's state and entry points.
///
/// # Examples
///
/// ```ignore
/// let registry = catalog::load_registry()?;
/// let mut engine = DecorEngine::new(registry, EngineConfig::default());
///
/// let chair = engine.definition("oak_armchair").unwrap();
/// let placed = engine.place(&mut host, &mut player, &chair, PlaceRequest::at(anchor, BlockFace::UP));
///
/// // In the host's tick handler:
/// engine.tick();
/// ```
pub struct DecorEngine {
    registry: DecorRegistry,
    config: EngineConfig,
    guard: LogicThreadGuard,
    tasks: TaskManager,
}

impl DecorEngine {
    /// Creates an engine bound to the calling thread.
    ///
    /// # Arguments
    ///
    /// * `registry` - Every decor definition the engine knows
    /// * `config` - Runtime tunables
    pub fn new(registry: DecorRegistry, config: EngineConfig) -> Self {
        info!("Decor engine started with {} definitions", registry.len());
        Self {
            registry,
            config,
            guard: LogicThreadGuard::current(),
            tasks: TaskManager::new(),
        }
    }

    pub fn registry(&self) -> &DecorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Looks a definition up by key.
    pub fn definition(&self, key: &str) -> Option<Arc<DecorDefinition>> {
        self.registry.get(key)
    }

    /// Looks a definition up by its marker type.
    pub fn definition_of<K: DecorKind>(&self) -> Option<Arc<DecorDefinition>> {
        self.registry.get_kind::<K>()
    }

    /// Places `definition` on `actor`'s behalf.
    ///
    /// # Returns
    ///
    /// The new composite, or `None` if the spot was unsuitable or a listener
    /// cancelled the placement.
    pub fn place(
        &self,
        host: &mut dyn Host,
        actor: &mut dyn Actor,
        definition: &Arc<DecorDefinition>,
        request: PlaceRequest<'_>,
    ) -> Option<CompositeObject> {
        self.guard.assert_owned("place");
        placement::place(host, actor, &self.config, definition, request)
    }

    /// Places whatever decor the actor holds in `slot`.
    ///
    /// # Returns
    ///
    /// `None` if the held item is not a decor item or the placement failed.
    pub fn place_held(
        &self,
        host: &mut dyn Host,
        actor: &mut dyn Actor,
        request: PlaceRequest<'_>,
        slot: HandSlot,
    ) -> Option<CompositeObject> {
        self.guard.assert_owned("place_held");
        let definition = actor
            .held_item(slot)
            .and_then(|item| self.registry.from_item(item))?;
        placement::place(
            host,
            actor,
            &self.config,
            &definition,
            request.from_hand(slot),
        )
    }

    /// Breaks a decor.
    ///
    /// # Returns
    ///
    /// `true` if it was removed, `false` if a listener cancelled the break.
    pub fn destroy(
        &self,
        host: &mut dyn Host,
        actor: &mut dyn Actor,
        decor: &CompositeObject,
        drop_item: bool,
    ) -> bool {
        self.guard.assert_owned("destroy");
        decor.destroy(host, actor, drop_item)
    }

    /// Breaks every decor with a proxy in the cell at `pos`.
    pub fn destroy_in_block(
        &self,
        host: &mut dyn Host,
        actor: &mut dyn Actor,
        pos: BlockPos,
        drop_item: bool,
    ) -> usize {
        self.guard.assert_owned("destroy_in_block");
        CompositeObject::destroy_in_block(
            host,
            &self.registry,
            actor,
            pos,
            self.config.search_radius,
            drop_item,
        )
    }

    /// The decor occupying the cell at `pos`, if any.
    pub fn from_block(&self, host: &dyn Host, pos: BlockPos) -> Option<CompositeObject> {
        self.guard.assert_owned("from_block");
        CompositeObject::from_block(host, &self.registry, pos, self.config.search_radius)
    }

    /// The decor a proxy belongs to.
    pub fn from_proxy(&self, host: &dyn Host, proxy: EntityId) -> Option<CompositeObject> {
        self.guard.assert_owned("from_proxy");
        CompositeObject::from_proxy(host, &self.registry, proxy)
    }

    /// The decor owning a proxy or visual entity.
    pub fn from_entity(&self, host: &dyn Host, entity: EntityId) -> Option<CompositeObject> {
        self.guard.assert_owned("from_entity");
        CompositeObject::from_entity(host, &self.registry, entity)
    }

    /// Routes a click on `clicked` to the decor it belongs to.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if the entity is not part of a decor or the click did nothing.
    pub fn handle_click(
        &self,
        host: &mut dyn Host,
        actor: &mut dyn Actor,
        clicked: &EntityRecord,
        slot: HandSlot,
        right_click: bool,
    ) -> Result<bool> {
        self.guard.assert_owned("handle_click");
        let Some(decor) = CompositeObject::from_entity(host, &self.registry, clicked.id) else {
            debug!("Click on {} does not belong to a decor", clicked.id);
            return Ok(false);
        };
        interaction::handle_click(host, actor, &decor, clicked, slot, right_click)
    }

    /// Dyes a paintable decor.
    pub fn paint(&self, host: &mut dyn Host, decor: &CompositeObject, color: Color) -> Result<()> {
        self.guard.assert_owned("paint");
        decor.paint(host, color)
    }

    /// Removes decor-tagged proxies in `area` that no longer reconstruct.
    pub fn sweep_orphans(&self, host: &mut dyn Host, area: &Aabb) -> usize {
        self.guard.assert_owned("sweep_orphans");
        orphan::sweep_orphans(host, &self.registry, area)
    }

    /// Queues every definition's recipes for registration once `ready`
    /// reports true, checked every `recipe_poll_interval_ticks` ticks.
    pub fn schedule_recipe_registration(
        &mut self,
        ready: Box<dyn Fn() -> bool>,
        registrar: Box<dyn RecipeRegistrar>,
    ) {
        self.guard.assert_owned("schedule_recipe_registration");
        let recipes: Vec<RecipeTemplate> = self
            .registry
            .iter()
            .flat_map(|definition| definition.recipes().iter().cloned())
            .collect();

        self.tasks.schedule(
            Box::new(RecipeRegistrationTask::new(recipes, ready, registrar)),
            self.config.recipe_poll_interval_ticks,
        );
    }

    /// Advances deferred tasks by one host tick.
    ///
    /// # Returns
    ///
    /// How many tasks finished.
    pub fn tick(&mut self) -> usize {
        self.guard.assert_owned("tick");
        self.tasks.tick()
    }

    /// Number of deferred tasks still waiting.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending()
    }
}
