//! # Actions
//!
//! What happens when an actor right-clicks a decor, plus optional
//! per-kind callbacks run after a successful place or break.

use std::fmt;
use std::sync::Arc;

use super::capability::{Capability, CapabilitySet};
use super::composite::CompositeObject;
use crate::host::{Actor, HandSlot, Host};

/// Callback signature shared by custom click actions and lifecycle hooks.
pub type HookFn =
    dyn Fn(&mut dyn Host, &mut dyn Actor, &CompositeObject, Option<HandSlot>) + Send + Sync;

/// A shareable callback.
#[derive(Clone)]
pub struct Hook(Arc<HookFn>);

impl Hook {
    pub fn new(
        f: impl Fn(&mut dyn Host, &mut dyn Actor, &CompositeObject, Option<HandSlot>)
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Hook(Arc::new(f))
    }

    pub fn call(
        &self,
        host: &mut dyn Host,
        actor: &mut dyn Actor,
        decor: &CompositeObject,
        slot: Option<HandSlot>,
    ) {
        (self.0)(host, actor, decor, slot)
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

/// The right-click behaviour of a decor kind.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub enum ClickAction {
    /// Clicks do nothing.
    NONE,
    /// Seat the actor on the decor.
    SIT,
    /// Cycle the variant with a wrench.
    WRENCH,
    /// Cycle the light level of the decor's cells.
    LIGHT,
    /// Cycle the light level and swap to that level's variant.
    LIGHT_TYPED,
    /// Wrench when holding a wrench, otherwise sit.
    WRENCH_OR_SIT,
    /// Wrench when holding a wrench, otherwise cycle the light.
    WRENCH_OR_LIGHT,
    /// Kind-specific behaviour.
    CUSTOM(Hook),
}

impl ClickAction {
    /// The action implied by a capability set when none is configured.
    ///
    /// Wrenchable kinds that can also be sat on or lit decide per click based
    /// on the held item. Otherwise the first of sittable, wrenchable,
    /// lightable and light-typed wins.
    pub fn derive(capabilities: &CapabilitySet) -> ClickAction {
        let wrenchable = capabilities.has(Capability::WRENCHABLE);

        if wrenchable && capabilities.has(Capability::SITTABLE) {
            return ClickAction::WRENCH_OR_SIT;
        }
        if wrenchable && capabilities.has(Capability::LIGHTABLE) {
            return ClickAction::WRENCH_OR_LIGHT;
        }

        if capabilities.has(Capability::SITTABLE) {
            ClickAction::SIT
        } else if wrenchable {
            ClickAction::WRENCH
        } else if capabilities.has(Capability::LIGHTABLE) {
            ClickAction::LIGHT
        } else if capabilities.has(Capability::LIGHT_TYPED) {
            ClickAction::LIGHT_TYPED
        } else {
            ClickAction::NONE
        }
    }
}
