//! # Composite Objects
//!
//! A placed decor is one visual entity plus one or more proxies. A
//! [`CompositeObject`] binds them to their definition and footprint for the
//! duration of one operation. It is never cached: every lookup rebuilds it
//! from the tags currently in the world, so a handle is only as fresh as
//! the call that produced it.
//!
//! ## Reconstruction
//!
//! Lookups never fail loudly. Missing or corrupt tags, unknown keys, dead
//! entity references and malformed boxes all resolve to `None`, with the
//! reason logged at debug level. Child proxies that no longer exist are
//! dropped from the result instead of failing it.

use std::sync::Arc;

use cgmath::Point3;
use log::{debug, warn};

use super::capability::Capability;
use super::definition::DecorDefinition;
use super::geometry::{Aabb, BlockBox, CollisionKind, MAX_EXTENT};
use super::registry::DecorRegistry;
use super::tags::{self, ProxyRole, TagBundle};
use super::variant::Variant;
use crate::error::{DecorError, Result};
use crate::host::{
    Actor, BlockPos, CellState, Color, DecorEvent, EntityId, EntityKind, EventKind, EventOutcome,
    Host, Item, Material, WorldPos,
};

/// Runtime handle of a placed decor.
#[derive(Clone, Debug)]
pub struct CompositeObject {
    definition: Arc<DecorDefinition>,
    display: EntityId,
    /// The canonical proxy first, then its children.
    proxies: Vec<EntityId>,
    block_box: BlockBox,
}

impl CompositeObject {
    pub(crate) fn new(
        definition: Arc<DecorDefinition>,
        display: EntityId,
        proxies: Vec<EntityId>,
        block_box: BlockBox,
    ) -> Self {
        Self {
            definition,
            display,
            proxies,
            block_box,
        }
    }

    pub fn definition(&self) -> &Arc<DecorDefinition> {
        &self.definition
    }

    pub fn key(&self) -> &str {
        self.definition.key()
    }

    pub fn display(&self) -> EntityId {
        self.display
    }

    pub fn proxies(&self) -> &[EntityId] {
        &self.proxies
    }

    /// The proxy holding the tag bundle.
    pub fn canonical(&self) -> EntityId {
        self.proxies[0]
    }

    pub fn block_box(&self) -> BlockBox {
        self.block_box
    }

    /// Centre of the footprint volume.
    pub fn center(&self) -> WorldPos {
        let volume = self.block_box.volume();
        Point3::new(
            (volume.min.x + volume.max.x) / 2.0,
            (volume.min.y + volume.max.y) / 2.0,
            (volume.min.z + volume.max.z) / 2.0,
        )
    }

    /// Rebuilds the composite a proxy belongs to.
    pub fn from_proxy(host: &dyn Host, registry: &DecorRegistry, proxy: EntityId) -> Option<Self> {
        let kind = host.entity(proxy)?.kind;
        if kind != EntityKind::PROXY {
            debug!("Entity {} is a {:?}, not a proxy", proxy, kind);
            return None;
        }

        match tags::role_of(host, proxy) {
            ProxyRole::Canonical => Self::from_canonical(host, registry, proxy),
            ProxyRole::Child(parent) => {
                let is_live_proxy = host
                    .entity(parent)
                    .is_some_and(|record| record.kind == EntityKind::PROXY);
                if !is_live_proxy || !tags::is_canonical(host, parent) {
                    debug!("Proxy {} points at {}, which is not a canonical proxy", proxy, parent);
                    return None;
                }
                Self::from_canonical(host, registry, parent)
            }
            ProxyRole::BrokenChild(text) => {
                debug!("Proxy {} has a malformed parent reference `{}`", proxy, text);
                None
            }
            ProxyRole::Unrecognized => None,
        }
    }

    /// Rebuilds a composite from its canonical proxy.
    pub fn from_canonical(
        host: &dyn Host,
        registry: &DecorRegistry,
        canonical: EntityId,
    ) -> Option<Self> {
        let bundle = match TagBundle::read(host, canonical) {
            Ok(bundle) => bundle,
            Err(err) => {
                debug!("Cannot read decor tags of {}: {}", canonical, err);
                return None;
            }
        };

        let Some(definition) = registry.get(&bundle.key) else {
            debug!("Proxy {} names unknown decor `{}`", canonical, bundle.key);
            return None;
        };

        let display_alive = host
            .entity(bundle.display)
            .is_some_and(|record| record.kind == EntityKind::DISPLAY);
        if !display_alive {
            debug!("Display {} of decor at {} is gone", bundle.display, canonical);
            return None;
        }

        let mut proxies = vec![canonical];
        proxies.extend(
            bundle
                .children
                .iter()
                .copied()
                .filter(|child| host.entity(*child).is_some()),
        );

        Some(Self::new(definition, bundle.display, proxies, bundle.block_box))
    }

    /// Rebuilds the composite owning a visual entity or proxy.
    pub fn from_entity(host: &dyn Host, registry: &DecorRegistry, entity: EntityId) -> Option<Self> {
        let record = host.entity(entity)?;

        match record.kind {
            EntityKind::PROXY => Self::from_proxy(host, registry, entity),
            EntityKind::DISPLAY => {
                let wanted = entity.to_string();
                let area = Aabb::around(record.position, MAX_EXTENT + 1.0);
                let owners = host.entities_in(&area, &|candidate| {
                    candidate.kind == EntityKind::PROXY
                        && host.tag(candidate.id, tags::TAG_DISPLAY).as_deref() == Some(wanted.as_str())
                });
                owners
                    .first()
                    .and_then(|owner| Self::from_canonical(host, registry, owner.id))
            }
            _ => None,
        }
    }

    /// Rebuilds the first composite with a proxy inside the cell at `pos`.
    pub fn from_block(
        host: &dyn Host,
        registry: &DecorRegistry,
        pos: BlockPos,
        radius: f64,
    ) -> Option<Self> {
        Self::proxies_in_block(host, pos, radius)
            .into_iter()
            .find_map(|proxy| Self::from_proxy(host, registry, proxy))
    }

    pub(crate) fn proxies_in_block(host: &dyn Host, pos: BlockPos, radius: f64) -> Vec<EntityId> {
        let center = Point3::new(pos.x as f64 + 0.5, pos.y as f64 + 0.5, pos.z as f64 + 0.5);
        host.entities_in(&Aabb::around(center, radius), &|record| {
            record.kind == EntityKind::PROXY
        })
        .into_iter()
        .map(|record| record.id)
        .collect()
    }

    /// The item the visual entity currently shows.
    pub fn display_item(&self, host: &dyn Host) -> Option<Item> {
        host.entity(self.display).and_then(|record| record.item)
    }

    /// The variant the visual entity currently shows.
    pub fn current_variant(&self, host: &dyn Host) -> Option<Variant> {
        let table = self.definition.table()?;
        let item = self.display_item(host)?;
        table.classify(&item).cloned()
    }

    /// Swaps the visual entity to `variant`, keeping its custom name and colour.
    pub fn show_variant(&self, host: &mut dyn Host, variant: &Variant) {
        let styled = match self.display_item(host) {
            Some(current) => variant.item_styled_like(&current),
            None => variant.item().clone(),
        };
        host.set_item(self.display, styled);
    }

    /// Dyes the visual entity's item.
    ///
    /// # Errors
    /// [`DecorError::Unsupported`] unless the kind is paintable.
    pub fn paint(&self, host: &mut dyn Host, color: Color) -> Result<()> {
        if !self.definition.has(Capability::PAINTABLE) {
            return Err(DecorError::Unsupported {
                key: self.key().to_owned(),
                capability: Capability::PAINTABLE,
            });
        }

        let mut item = self
            .display_item(host)
            .unwrap_or_else(|| self.definition.item().clone());
        item.color = Some(color);
        host.set_item(self.display, item);
        Ok(())
    }

    /// Breaks the decor on `actor`'s behalf.
    ///
    /// Fires a cancellable break notification first; a cancelled break
    /// changes nothing. Otherwise optionally drops the decor's item, restores
    /// its cells, removes every proxy and then the visual entity, and plays
    /// the break sound. A handle whose canonical proxy is already gone is
    /// stale and destroys nothing.
    ///
    /// # Returns
    /// `true` if the decor was removed.
    pub fn destroy(&self, host: &mut dyn Host, actor: &mut dyn Actor, drop_item: bool) -> bool {
        if host.entity(self.canonical()).is_none() {
            debug!("`{}` at {} is already gone", self.key(), self.canonical());
            return false;
        }

        let event = DecorEvent {
            kind: EventKind::BREAK,
            decor_key: self.key().to_owned(),
            actor: actor.name().to_owned(),
            proxy: self.canonical(),
            position: self.center(),
            slot: None,
        };
        if host.notify(&event) == EventOutcome::Cancelled {
            debug!("Break of `{}` at {} was cancelled", self.key(), self.canonical());
            return false;
        }

        if drop_item {
            let item = self.drop_stack(host);
            host.drop_item(self.center(), item);
        }

        if self.definition.hit_box().kind() != CollisionKind::NONE {
            self.clear_cells(host, actor.name());
        }

        for proxy in &self.proxies {
            host.remove(*proxy);
        }
        host.remove(self.display);

        host.play(self.definition.sounds().breaking, self.center());

        if let Some(hook) = self.definition.on_break() {
            hook.call(host, actor, self, None);
        }
        true
    }

    /// The stack a broken decor drops.
    ///
    /// Variant kinds drop their base item (restyled like the display) unless
    /// they are configured to drop the current variant.
    fn drop_stack(&self, host: &dyn Host) -> Item {
        let Some(shown) = self.display_item(host) else {
            warn!(
                "Display {} of `{}` carries no item, dropping the base item",
                self.display,
                self.key()
            );
            return self.definition.item().clone();
        };

        let mut item = if self.definition.table().is_some() && !self.definition.drops_type() {
            let mut base = self.definition.item().clone();
            base.display_name = shown.display_name.clone();
            base.color = shown.color;
            base
        } else {
            shown
        };
        item.amount = 1;
        item
    }

    /// Returns the footprint cells this decor filled to air, or to water
    /// where a light cell had been waterlogged.
    fn clear_cells(&self, host: &mut dyn Host, actor: &str) {
        let fill = match self.definition.hit_box().kind() {
            CollisionKind::SOLID => Material::BARRIER,
            CollisionKind::LIGHT => Material::LIGHT,
            CollisionKind::NONE => return,
        };

        for pos in self.block_box.positions() {
            let previous = host.cell(pos);
            if previous.material != fill {
                continue;
            }

            let restored = if previous.is_light() && previous.waterlogged {
                CellState::water_source()
            } else {
                CellState::air()
            };

            host.log_removal(actor, pos, &previous);
            host.set_cell(pos, restored);
        }
    }

    /// Destroys every decor with a proxy in the cell at `pos`.
    ///
    /// # Returns
    /// How many decors were removed.
    pub fn destroy_in_block(
        host: &mut dyn Host,
        registry: &DecorRegistry,
        actor: &mut dyn Actor,
        pos: BlockPos,
        radius: f64,
        drop_item: bool,
    ) -> usize {
        let mut destroyed = 0;
        let mut seen = Vec::new();

        for proxy in Self::proxies_in_block(host, pos, radius) {
            let Some(decor) = Self::from_proxy(host, registry, proxy) else {
                continue;
            };
            if seen.contains(&decor.canonical()) {
                continue;
            }
            seen.push(decor.canonical());

            if decor.destroy(host, actor, drop_item) {
                destroyed += 1;
            }
        }
        destroyed
    }
}
