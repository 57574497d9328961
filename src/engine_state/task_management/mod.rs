//! # Task Management System
//!
//! Deferred work for the decor engine, driven by the host's simulation
//! ticks. There are no worker threads: every task is polled on the logic
//! thread, in scheduling order, at its own fixed interval.
//!
//! ## Architecture Overview
//! - `TaskManager`: owns the scheduled tasks and the tick counter
//! - `Task`: a pollable unit of work (see [`task`])
//!
//! ## Example Usage
//! ```ignore
//! let mut task_manager = TaskManager::new();
//! task_manager.schedule(Box::new(MyTask::new(...)), 10);
//!
//! // In the host's tick handler:
//! task_manager.tick();
//! ```

pub mod task;

use std::collections::VecDeque;

use log::{debug, info};
use task::{Task, TaskStatus};

/// A scheduled task with its polling interval.
struct ScheduledTask {
    task: Box<dyn Task>,
    interval: u64,
    next_poll: u64,
}

/// Polls scheduled tasks on the logic thread.
///
/// # Fields
/// - `scheduled`: tasks still pending, in scheduling order
/// - `current_tick`: ticks elapsed since creation
#[derive(Default)]
pub struct TaskManager {
    scheduled: VecDeque<ScheduledTask>,
    current_tick: u64,
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to be polled every `interval_ticks` ticks, starting
    /// on the next tick. An interval of zero is treated as one.
    pub fn schedule(&mut self, task: Box<dyn Task>, interval_ticks: u64) {
        let interval = interval_ticks.max(1);
        debug!("Scheduled task `{}` every {} ticks", task.name(), interval);
        self.scheduled.push_back(ScheduledTask {
            task,
            interval,
            next_poll: self.current_tick + 1,
        });
    }

    /// Advances one tick and polls every task that is due.
    ///
    /// # Returns
    /// How many tasks finished during this tick.
    pub fn tick(&mut self) -> usize {
        self.current_tick += 1;
        let tick = self.current_tick;
        let mut finished = 0;

        self.scheduled.retain_mut(|scheduled| {
            if scheduled.next_poll > tick {
                return true;
            }

            match scheduled.task.poll(tick) {
                TaskStatus::Pending => {
                    scheduled.next_poll = tick + scheduled.interval;
                    true
                }
                TaskStatus::Done => {
                    info!("Task `{}` finished at tick {}", scheduled.task.name(), tick);
                    finished += 1;
                    false
                }
            }
        });

        finished
    }

    /// Number of tasks still scheduled.
    pub fn pending(&self) -> usize {
        self.scheduled.len()
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }
}
