//! # Recipe Registration Task
//!
//! Recipes may reference items that another subsystem registers late, so
//! they cannot be handed to the host at startup. This task waits for a
//! readiness predicate, registers every recipe exactly once and stops.

use log::info;

use crate::core::StResource;
use crate::engine_state::decor::recipe::{RecipeRegistrar, RecipeTemplate};
use crate::engine_state::task_management::task::{Task, TaskStatus};

/// Registers a fixed batch of recipes once `ready` returns true.
pub struct RecipeRegistrationTask {
    recipes: Vec<RecipeTemplate>,
    ready: Box<dyn Fn() -> bool>,
    registrar: Box<dyn RecipeRegistrar>,
}

impl RecipeRegistrationTask {
    /// # Arguments
    /// * `recipes` - The recipes to register, in order
    /// * `ready` - Readiness precondition checked on every poll
    /// * `registrar` - The host-side recipe sink
    pub fn new(
        recipes: Vec<RecipeTemplate>,
        ready: Box<dyn Fn() -> bool>,
        registrar: Box<dyn RecipeRegistrar>,
    ) -> Self {
        Self {
            recipes,
            ready,
            registrar,
        }
    }
}

impl Task for RecipeRegistrationTask {
    fn name(&self) -> &str {
        "recipe registration"
    }

    fn poll(&mut self, tick: u64) -> TaskStatus {
        if !(self.ready)() {
            return TaskStatus::Pending;
        }

        for recipe in &self.recipes {
            self.registrar.register(recipe);
        }
        info!("Registered {} decor recipes at tick {}", self.recipes.len(), tick);
        TaskStatus::Done
    }
}

/// Shared registrars let the caller inspect what was registered.
impl<T: RecipeRegistrar> RecipeRegistrar for StResource<T> {
    fn register(&mut self, recipe: &RecipeTemplate) {
        self.get_mut().register(recipe);
    }
}

impl RecipeRegistrar for Vec<RecipeTemplate> {
    fn register(&mut self, recipe: &RecipeTemplate) {
        self.push(recipe.clone());
    }
}
