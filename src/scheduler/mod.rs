//! Background task scheduler.
//!
//! Polls a list of interval tasks once per tick (60 seconds by default) and
//! runs the ones that are due. The client registers a single built-in task
//! that refreshes the displayed content every hour.

pub mod runner;
pub mod tasks;

pub use runner::{Scheduler, TaskExecutor};
pub use tasks::{ScheduledTask, TASK_REFRESH_CONTENT, TaskResult};
