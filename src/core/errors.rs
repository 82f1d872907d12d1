/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler operation result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduler errors
///
/// An empty queue is not an error: dispatch reports it as `Dispatch::Empty`.
/// Everything here is fatal to the host.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Ready queue {queue} is full (capacity {capacity})")]
    #[diagnostic(
        code(scheduler::queue_full),
        help("The bounded ready queue rejected a task. Raise the queue capacity or use the unbounded queue.")
    )]
    QueueFull { queue: u64, capacity: usize },

    #[error("Invalid scheduler configuration: {0}")]
    #[diagnostic(
        code(scheduler::invalid_config),
        help("Check SCHED_* environment variables and the scheduler configuration.")
    )]
    InvalidConfig(String),

    #[error("Scheduler already initialized: {0}")]
    #[diagnostic(
        code(scheduler::already_initialized),
        help("The init hook runs exactly once per scheduler instance.")
    )]
    AlreadyInitialized(String),

    #[error("Host already has a scheduler registered: {0}")]
    #[diagnostic(
        code(scheduler::host_busy),
        help("Drop the existing registration before registering another scheduler.")
    )]
    HostBusy(String),
}
