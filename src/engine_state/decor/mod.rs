//! # Decor
//!
//! Composite decorations: objects built from one visual entity and a group
//! of invisible proxy entities, identified purely by tags on those proxies.
//!
//! ## Layout
//!
//! * `geometry` / `facing` - hit-box math and placement-face classification
//! * `capability` / `variant` - the capability lattice and variant tables
//! * `definition` / `registry` / `catalog` - immutable kind templates and
//!   where they live
//! * `placement` / `composite` / `tags` - turning a definition into live
//!   entities and reading them back
//! * `interaction` / `action` - click behaviour and lifecycle hooks
//! * `orphan` - cleanup of proxies that no longer reconstruct
//! * `tasks` - deferred recipe registration
//! * `recipe` / `sound` - data handed to host collaborators

pub mod action;
pub mod capability;
pub mod catalog;
pub mod composite;
pub mod definition;
pub mod facing;
pub mod geometry;
pub mod interaction;
pub mod orphan;
pub mod placement;
pub mod recipe;
pub mod registry;
pub mod sound;
pub mod tags;
pub mod tasks;
pub mod variant;

pub use composite::CompositeObject;
pub use definition::{DecorDefinition, DecorDefinitionBuilder};
pub use placement::PlaceRequest;
pub use registry::{DecorKind, DecorRegistry};
