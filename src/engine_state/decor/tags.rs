//! # Tag Bundle
//!
//! A composite decor persists nothing outside the world: its identity lives
//! in string tags on its proxies.
//!
//! | tag | on | contents |
//! |---|---|---|
//! | `type` | canonical proxy | definition key |
//! | `hitbox_display` | canonical proxy | visual entity id |
//! | `hitbox_interactions` | canonical proxy | comma-joined ids of the other proxies |
//! | `hitbox_bounding_box` | canonical proxy | `minX,minY,minZ,maxX,maxY,maxZ` |
//! | `hitbox_child` | every other proxy | canonical proxy id |
//!
//! Tags can be hand-edited or left stale by a crash, so reading never
//! panics and every defect comes back as a [`BundleError`].

use std::fmt;

use super::geometry::BlockBox;
use crate::host::{EntityId, Tags};

pub const TAG_TYPE: &str = "type";
pub const TAG_DISPLAY: &str = "hitbox_display";
pub const TAG_INTERACTIONS: &str = "hitbox_interactions";
pub const TAG_BOUNDING_BOX: &str = "hitbox_bounding_box";
pub const TAG_CHILD: &str = "hitbox_child";

/// The tags of the canonical proxy.
pub const CANONICAL_TAGS: [&str; 4] = [TAG_TYPE, TAG_DISPLAY, TAG_INTERACTIONS, TAG_BOUNDING_BOX];

/// Why a proxy's tags could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BundleError {
    MissingTag(&'static str),
    BadEntityId(String),
    BadBoundingBox(String),
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::MissingTag(tag) => write!(f, "missing tag `{tag}`"),
            BundleError::BadEntityId(text) => write!(f, "malformed entity id `{text}`"),
            BundleError::BadBoundingBox(text) => write!(f, "malformed bounding box `{text}`"),
        }
    }
}

/// What a proxy's tags say about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProxyRole {
    /// Carries (at least part of) the full bundle.
    Canonical,
    /// Points at its canonical proxy.
    Child(EntityId),
    /// Carries a child tag that is not an entity id.
    BrokenChild(String),
    /// Carries no decor tags.
    Unrecognized,
}

/// Determines a proxy's role from its tags.
pub fn role_of<T: Tags + ?Sized>(tags: &T, proxy: EntityId) -> ProxyRole {
    if let Some(parent) = tags.tag(proxy, TAG_CHILD) {
        return match parent.parse() {
            Ok(id) => ProxyRole::Child(id),
            Err(_) => ProxyRole::BrokenChild(parent),
        };
    }

    if CANONICAL_TAGS.iter().any(|tag| tags.has_tag(proxy, tag)) {
        ProxyRole::Canonical
    } else {
        ProxyRole::Unrecognized
    }
}

/// True when the proxy carries all four canonical tags.
pub fn is_canonical<T: Tags + ?Sized>(tags: &T, proxy: EntityId) -> bool {
    CANONICAL_TAGS.iter().all(|tag| tags.has_tag(proxy, tag))
}

/// The decoded canonical bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagBundle {
    pub key: String,
    pub display: EntityId,
    /// Every proxy except the canonical one.
    pub children: Vec<EntityId>,
    pub block_box: BlockBox,
}

impl TagBundle {
    /// Writes the bundle onto `canonical` and a back-reference onto each child.
    pub fn write<T: Tags + ?Sized>(&self, tags: &mut T, canonical: EntityId) {
        let canonical_id = canonical.to_string();
        for child in &self.children {
            tags.set_tag(*child, TAG_CHILD, &canonical_id);
        }

        let children = self
            .children
            .iter()
            .map(EntityId::to_string)
            .collect::<Vec<_>>()
            .join(",");

        tags.set_tag(canonical, TAG_TYPE, &self.key);
        tags.set_tag(canonical, TAG_DISPLAY, &self.display.to_string());
        tags.set_tag(canonical, TAG_INTERACTIONS, &children);
        tags.set_tag(canonical, TAG_BOUNDING_BOX, &self.block_box.to_tag_value());
    }

    /// Reads the bundle from a canonical proxy.
    pub fn read<T: Tags + ?Sized>(tags: &T, canonical: EntityId) -> Result<TagBundle, BundleError> {
        let get = |tag: &'static str| tags.tag(canonical, tag).ok_or(BundleError::MissingTag(tag));

        let key = get(TAG_TYPE)?;
        let display_text = get(TAG_DISPLAY)?;
        let children_text = get(TAG_INTERACTIONS)?;
        let box_text = get(TAG_BOUNDING_BOX)?;

        let display = display_text
            .parse()
            .map_err(|_| BundleError::BadEntityId(display_text.clone()))?;

        let children = children_text
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| id.parse().map_err(|_| BundleError::BadEntityId(id.to_owned())))
            .collect::<Result<Vec<EntityId>, _>>()?;

        let block_box =
            BlockBox::from_tag_value(&box_text).ok_or(BundleError::BadBoundingBox(box_text))?;

        Ok(TagBundle {
            key,
            display,
            children,
            block_box,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cgmath::Point3;

    use super::*;

    #[derive(Default)]
    struct MapTags(HashMap<(EntityId, String), String>);

    impl Tags for MapTags {
        fn tag(&self, id: EntityId, key: &str) -> Option<String> {
            self.0.get(&(id, key.to_owned())).cloned()
        }

        fn set_tag(&mut self, id: EntityId, key: &str, value: &str) {
            self.0.insert((id, key.to_owned()), value.to_owned());
        }

        fn remove_tag(&mut self, id: EntityId, key: &str) {
            self.0.remove(&(id, key.to_owned()));
        }
    }

    fn bundle() -> TagBundle {
        TagBundle {
            key: "big_table".to_owned(),
            display: EntityId(10),
            children: vec![EntityId(12), EntityId(13)],
            block_box: BlockBox::of(Point3::new(0, 64, 0), Point3::new(2, 64, 0)),
        }
    }

    #[test]
    fn write_then_read() {
        let mut tags = MapTags::default();
        bundle().write(&mut tags, EntityId(11));

        assert_eq!(role_of(&tags, EntityId(11)), ProxyRole::Canonical);
        assert!(is_canonical(&tags, EntityId(11)));
        assert_eq!(role_of(&tags, EntityId(12)), ProxyRole::Child(EntityId(11)));
        assert_eq!(role_of(&tags, EntityId(99)), ProxyRole::Unrecognized);
        assert_eq!(TagBundle::read(&tags, EntityId(11)), Ok(bundle()));
    }

    #[test]
    fn single_proxy_has_empty_child_list() {
        let mut tags = MapTags::default();
        let single = TagBundle {
            children: Vec::new(),
            ..bundle()
        };
        single.write(&mut tags, EntityId(11));
        assert_eq!(tags.tag(EntityId(11), TAG_INTERACTIONS).as_deref(), Some(""));
        assert_eq!(TagBundle::read(&tags, EntityId(11)).unwrap().children, vec![]);
    }

    #[test]
    fn each_missing_tag_is_reported() {
        for tag in CANONICAL_TAGS {
            let mut tags = MapTags::default();
            bundle().write(&mut tags, EntityId(11));
            tags.remove_tag(EntityId(11), tag);

            assert!(!is_canonical(&tags, EntityId(11)));
            assert_eq!(TagBundle::read(&tags, EntityId(11)), Err(BundleError::MissingTag(tag)));
        }
    }

    #[test]
    fn malformed_values() {
        let mut tags = MapTags::default();
        bundle().write(&mut tags, EntityId(11));

        tags.set_tag(EntityId(11), TAG_BOUNDING_BOX, "0,64,0");
        assert!(matches!(
            TagBundle::read(&tags, EntityId(11)),
            Err(BundleError::BadBoundingBox(_))
        ));

        bundle().write(&mut tags, EntityId(11));
        tags.set_tag(EntityId(11), TAG_INTERACTIONS, "000000000000000c,zz");
        assert_eq!(
            TagBundle::read(&tags, EntityId(11)),
            Err(BundleError::BadEntityId("zz".to_owned()))
        );

        tags.set_tag(EntityId(12), TAG_CHILD, "nope");
        assert_eq!(role_of(&tags, EntityId(12)), ProxyRole::BrokenChild("nope".to_owned()));
    }
}
