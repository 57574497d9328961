//! # Logic Thread Guard
//!
//! Placement, destruction and reconstruction all mutate or read live world
//! state without any locking. The host world runs its simulation on one
//! thread, and this guard pins the decor engine to whichever thread created it.

use std::thread::{self, ThreadId};

/// Records the owning logic thread and asserts every entry point runs on it.
///
/// # Examples
///
/// ```
/// # use voxel_decor::core::LogicThreadGuard;
/// let guard = LogicThreadGuard::current();
/// guard.assert_owned("place");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogicThreadGuard {
    owner: ThreadId,
}

impl LogicThreadGuard {
    /// Binds the guard to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    /// Returns true if the calling thread owns the world.
    pub fn is_owned(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Aborts the operation if called off the logic thread.
    ///
    /// # Panics
    /// Panics when the calling thread is not the owning thread.
    pub fn assert_owned(&self, operation: &str) {
        if !self.is_owned() {
            panic!(
                "decor operation `{}` called from {:?}, but the world is owned by {:?}",
                operation,
                thread::current().id(),
                self.owner
            );
        }
    }
}
