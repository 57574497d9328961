//! # Application State Management
//!
//! The demo runner: a scripted scene played against an in-memory world.
//! It places one of each interactive decor family, clicks them the way a
//! player would, registers recipes through the deferred task and breaks
//! what it built, logging every step.

use cgmath::Point3;
use log::{info, warn};
use web_time::Instant;

use crate::core::StResource;
use crate::engine_state::decor::facing::BlockFace;
use crate::engine_state::decor::geometry::Aabb;
use crate::engine_state::decor::interaction::WRENCH_TYPE;
use crate::engine_state::decor::recipe::RecipeTemplate;
use crate::engine_state::decor::variant::TYPE_TAG;
use crate::engine_state::decor::{CompositeObject, PlaceRequest};
use crate::engine_state::DecorEngine;
use crate::error::Result;
use crate::host::actor::Player;
use crate::host::memory::MemoryHost;
use crate::host::{BlockPos, CellState, Color, Entities, GameMode, HandSlot, Item, Voxels};

/// Height of the demo floor; decors stand one cell above it.
const FLOOR_Y: i32 = 63;

/// Half-width of the demo floor in cells.
const FLOOR_RADIUS: i32 = 12;

/// Upper bound on ticks spent waiting for deferred tasks.
const MAX_SCENE_TICKS: u32 = 200;

/// Everything the demo scene runs against.
pub struct ApplicationState {
    /// The decor engine under demonstration
    pub engine: DecorEngine,

    /// The world the scene is built in
    pub host: MemoryHost,

    /// The acting player
    pub player: Player,
}

impl ApplicationState {
    /// Creates a scene with a stone floor and a creative-mode player facing south.
    pub fn new(engine: DecorEngine) -> Self {
        let mut host = MemoryHost::new();
        host.fill_layer(Point3::new(0, FLOOR_Y, 0), FLOOR_RADIUS, CellState::block("stone"));

        Self {
            engine,
            host,
            player: Player::new("demo", 0.0, GameMode::CREATIVE),
        }
    }

    /// Plays the whole scene.
    ///
    /// # Errors
    ///
    /// Any capability error raised by a click handler.
    pub fn run_scene(&mut self) -> Result<()> {
        let start = Instant::now();

        self.armchair_scene()?;
        self.nightstand_scene()?;
        self.brazier_scene()?;
        self.ornament_scene();
        self.recipe_scene();

        if self.engine.config().orphan_sweep {
            let area = Aabb::around(Point3::new(0.0, FLOOR_Y as f64, 0.0), FLOOR_RADIUS as f64);
            let removed = self.engine.sweep_orphans(&mut self.host, &area);
            info!("Orphan sweep removed {} entities", removed);
        }

        let broken = (0..8)
            .map(|x| {
                let pos = Point3::new(x, FLOOR_Y + 1, 0);
                self.engine
                    .destroy_in_block(&mut self.host, &mut self.player, pos, true)
            })
            .sum::<usize>();

        info!(
            "Scene finished in {}ms: broke {} decors, {} entities remain",
            start.elapsed().as_millis(),
            broken,
            self.host.entity_count()
        );
        Ok(())
    }

    fn place(&mut self, key: &str, anchor: BlockPos, face: BlockFace) -> Option<CompositeObject> {
        let Some(definition) = self.engine.definition(key) else {
            warn!("Demo decor `{}` is not registered", key);
            return None;
        };

        let placed = self.engine.place(
            &mut self.host,
            &mut self.player,
            &definition,
            PlaceRequest::at(anchor, face),
        );
        match &placed {
            Some(decor) => info!("Placed `{}` over {:?}", key, decor.block_box()),
            None => warn!("Could not place `{}` at {:?}", key, anchor),
        }
        placed
    }

    /// Right-clicks the canonical proxy of `decor` with the main hand.
    fn click(&mut self, decor: &CompositeObject) -> Result<bool> {
        let Some(clicked) = self.host.entity(decor.canonical()) else {
            return Ok(false);
        };
        self.engine.handle_click(
            &mut self.host,
            &mut self.player,
            &clicked,
            HandSlot::MAIN_HAND,
            true,
        )
    }

    fn armchair_scene(&mut self) -> Result<()> {
        let Some(chair) = self.place("oak_armchair", Point3::new(0, FLOOR_Y + 1, 0), BlockFace::UP)
        else {
            return Ok(());
        };

        self.engine
            .paint(&mut self.host, &chair, Color::rgb(160, 40, 40))?;
        let seated = self.click(&chair)?;
        info!("Sat on the armchair: {}, mounted on {:?}", seated, self.player.mounted_on);
        Ok(())
    }

    fn nightstand_scene(&mut self) -> Result<()> {
        let Some(nightstand) =
            self.place("spruce_nightstand", Point3::new(2, FLOOR_Y + 1, 0), BlockFace::UP)
        else {
            return Ok(());
        };

        self.player.main_hand = Some(Item::new("iron_hoe", 0).with_tag(TYPE_TAG, WRENCH_TYPE));
        for _ in 0..3 {
            self.click(&nightstand)?;
        }
        self.player.main_hand = None;

        let shown = nightstand
            .current_variant(&self.host)
            .map(|variant| variant.name().to_owned());
        info!("Nightstand now shows {:?}", shown);
        Ok(())
    }

    fn brazier_scene(&mut self) -> Result<()> {
        let anchor = Point3::new(4, FLOOR_Y + 1, 0);
        let Some(brazier) = self.place("brazier", anchor, BlockFace::UP) else {
            return Ok(());
        };

        self.click(&brazier)?;
        let level = self.host.cell(anchor).level;
        let shown = brazier
            .current_variant(&self.host)
            .map(|variant| variant.name().to_owned());
        info!("Brazier burns at light level {} showing {:?}", level, shown);
        Ok(())
    }

    fn ornament_scene(&mut self) {
        let wall = Point3::new(6, FLOOR_Y + 1, 0);
        if let Some(ball) = self.place("christmas_ball", wall, BlockFace::NORTH) {
            let shown = ball
                .current_variant(&self.host)
                .map(|variant| variant.name().to_owned());
            info!("Christmas ball on the wall shows {:?}", shown);
        }
    }

    fn recipe_scene(&mut self) {
        let ready = StResource::new(false);
        let registered = StResource::new(Vec::<RecipeTemplate>::new());

        let flag = ready.clone();
        self.engine.schedule_recipe_registration(
            Box::new(move || *flag.get()),
            Box::new(registered.clone()),
        );

        let mut ticks = 0;
        while self.engine.pending_tasks() > 0 && ticks < MAX_SCENE_TICKS {
            if ticks == MAX_SCENE_TICKS / 4 {
                *ready.get_mut() = true;
            }
            self.engine.tick();
            ticks += 1;
        }

        info!(
            "{} recipes registered after {} ticks",
            registered.get().len(),
            ticks
        );
    }
}
