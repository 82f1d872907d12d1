/*!
 * Minimal Scheduler Library
 * Shared-queue CPU scheduling policy and the host harness that drives it
 */

pub mod core;
pub mod host;
pub mod monitoring;
pub mod scheduler;

// Re-exports
pub use crate::core::errors::{SchedulerError, SchedulerResult};
pub use crate::core::types::{CpuId, EnqueueFlags, QueueId, QueuedTask, TaskHandle, TimeSlice};
pub use host::{Host, Registration, SliceExpiry};
pub use monitoring::init_tracing;
pub use scheduler::{
    BoundedQueue, Dispatch, DispatchedTask, OpsFlags, ReadyQueue, SchedulerConfig,
    SchedulerOps, SchedulerStats, SharedQueue, SharedQueueScheduler,
};
