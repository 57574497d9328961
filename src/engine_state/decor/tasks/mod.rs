//! # Decor Tasks
//!
//! Deferred work owned by the decor engine, polled by the
//! [`TaskManager`](crate::engine_state::task_management::TaskManager).

pub mod recipe_registration_task;
