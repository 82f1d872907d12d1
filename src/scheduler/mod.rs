/*!
 * Scheduler Module
 * Shared-queue scheduling policy: one FIFO ready queue for every CPU and a
 * slice that shrinks with queue depth
 */

pub mod config;
pub mod flags;
pub mod policy;
pub mod quantum;
pub mod queue;
pub mod stats;
pub mod traits;
pub mod types;

// Re-export public API
pub use config::SchedulerConfig;
pub use flags::OpsFlags;
pub use policy::SharedQueueScheduler;
pub use quantum::{slice_for_depth, QuantumPolicy};
pub use queue::{BoundedQueue, ReadyQueue, SharedQueue};
pub use stats::SchedulerStats;
pub use traits::SchedulerOps;
pub use types::{Dispatch, DispatchedTask};
