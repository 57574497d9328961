//! # Orphan Sweep
//!
//! A crash between spawning a decor's entities and finishing its tags, or
//! a hand-edited tag, leaves proxies that no longer reconstruct into a
//! composite. They still collide and swallow clicks, so the sweep finds and
//! removes them.
//!
//! Only proxies carrying at least one decor tag are considered. Proxies
//! with no decor tags at all may belong to someone else and are never
//! touched.

use log::{debug, info};

use super::composite::CompositeObject;
use super::geometry::Aabb;
use super::registry::DecorRegistry;
use super::tags::{self, ProxyRole};
use crate::host::{EntityId, EntityKind, Host};

/// Removes every decor-tagged proxy in `area` that fails reconstruction,
/// along with the visual entity a broken canonical proxy still names.
///
/// # Returns
/// How many entities were removed.
pub fn sweep_orphans(host: &mut dyn Host, registry: &DecorRegistry, area: &Aabb) -> usize {
    let proxies = host.entities_in(area, &|record| record.kind == EntityKind::PROXY);

    let mut doomed: Vec<EntityId> = Vec::new();
    for proxy in proxies {
        let role = tags::role_of(host, proxy.id);
        if role == ProxyRole::Unrecognized {
            continue;
        }
        if CompositeObject::from_proxy(host, registry, proxy.id).is_some() {
            continue;
        }

        debug!("Proxy {} is orphaned ({:?})", proxy.id, role);
        doomed.push(proxy.id);

        if role == ProxyRole::Canonical {
            let display = host
                .tag(proxy.id, tags::TAG_DISPLAY)
                .and_then(|text| text.parse::<EntityId>().ok())
                .filter(|id| {
                    host.entity(*id)
                        .is_some_and(|record| record.kind == EntityKind::DISPLAY)
                });
            doomed.extend(display);
        }
    }

    doomed.sort();
    doomed.dedup();
    for id in &doomed {
        host.remove(*id);
    }

    if !doomed.is_empty() {
        info!("Orphan sweep removed {} entities", doomed.len());
    }
    doomed.len()
}
