/*!
 * Core Module
 * Types, errors, and constants shared across the scheduler
 */

pub mod errors;
pub mod limits;
pub mod types;

pub use errors::{SchedulerError, SchedulerResult};
pub use types::{CpuId, EnqueueFlags, QueueId, QueuedTask, TaskHandle, TimeSlice};
