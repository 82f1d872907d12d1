/*!
 * Scheduler Traits
 * Interface a host runtime calls into
 */

use super::flags::OpsFlags;
use super::types::Dispatch;
use crate::core::errors::SchedulerResult;
use crate::core::types::{CpuId, EnqueueFlags, TaskHandle, TimeSlice};

/// Scheduling policy entry points
///
/// The host calls `init` once after reading `name` and `flags`, then
/// `enqueue` on every task wakeup and `dispatch` whenever a CPU runs out of
/// work, concurrently from any number of CPUs. Neither hot path may block.
pub trait SchedulerOps: Send + Sync {
    /// Name registered with the host
    fn name(&self) -> &str;

    /// Behavioral flags the host enforces
    fn flags(&self) -> OpsFlags;

    /// One-time initialization before any enqueue/dispatch
    fn init(&self) -> SchedulerResult<()>;

    /// Admit a runnable task and return its slice
    fn enqueue(&self, task: TaskHandle, flags: EnqueueFlags) -> SchedulerResult<TimeSlice>;

    /// Hand the next task to `cpu`, or report that there is none
    fn dispatch(&self, cpu: CpuId, prev: Option<TaskHandle>) -> Dispatch;

    /// Number of tasks currently waiting
    fn depth(&self) -> usize;
}
