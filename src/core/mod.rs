//! # Core Module
//!
//! Small building blocks shared by the rest of the crate.
//!
//! ## Key Components
//! - `FlagSet`: packed bitmask set over a flag enum
//! - `LogicThreadGuard`: asserts single-thread ownership of the world
//! - `StResource`: shared single-threaded state for deferred tasks

pub mod flags;
pub mod st_resource;
pub mod thread_guard;

pub use flags::{Flag, FlagSet};
pub use st_resource::StResource;
pub use thread_guard::LogicThreadGuard;
