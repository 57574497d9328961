//! # Task Core Traits
//!
//! A [`Task`] is a unit of deferred work polled on the logic thread at a
//! fixed tick interval until it reports [`TaskStatus::Done`].
//!
//! ## Task Lifecycle
//! 1. A task is scheduled with `TaskManager::schedule()` and an interval
//! 2. Every `interval` ticks its `poll()` runs on the logic thread
//! 3. `Pending` keeps it scheduled; `Done` drops it for good

/// What a poll concluded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// Not ready yet; poll again next interval.
    Pending,
    /// Finished; never poll again.
    Done,
}

/// A unit of deferred work.
///
/// Tasks run on the logic thread, so they may hold single-threaded handles
/// such as [`StResource`](crate::core::StResource).
pub trait Task {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Checks the task's precondition and does its work once it holds.
    ///
    /// # Arguments
    /// * `tick` - The manager's tick counter at the time of the poll
    fn poll(&mut self, tick: u64) -> TaskStatus;
}
