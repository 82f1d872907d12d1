/*!
 * Shared-Queue Scheduler
 * Admission and dispatch over a single FIFO ready queue
 */

use super::config::SchedulerConfig;
use super::flags::OpsFlags;
use super::quantum::QuantumPolicy;
use super::queue::{BoundedQueue, ReadyQueue, SharedQueue};
use super::stats::{AtomicSchedulerStats, SchedulerStats};
use super::traits::SchedulerOps;
use super::types::{Dispatch, DispatchedTask};
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{CpuId, EnqueueFlags, QueueId, QueuedTask, TaskHandle, TimeSlice};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, trace};

/// Shared-queue scheduling policy
///
/// Holds no per-task state: a task exists here only while it sits in the
/// queue. Share it between CPUs with `Arc`.
///
/// # Performance
/// - Cache-line aligned for high-frequency admission/dispatch
/// - Depth read and push are not made atomic together; a stale depth only
///   skews the slice estimate
#[repr(C, align(64))]
pub struct SharedQueueScheduler<Q: ReadyQueue = SharedQueue> {
    queue: Q,
    quantum: QuantumPolicy,
    stats: AtomicSchedulerStats,
    initialized: AtomicBool,
    config: SchedulerConfig,
}

impl SharedQueueScheduler<SharedQueue> {
    /// Scheduler over an unbounded queue
    ///
    /// `config.queue_capacity` must be unset or `init` fails; use
    /// `from_config` to get a bounded queue.
    pub fn new(config: SchedulerConfig) -> Self {
        let queue = SharedQueue::new(QueueId(config.queue_id));
        Self::with_queue(config, queue)
    }
}

impl Default for SharedQueueScheduler<SharedQueue> {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl SharedQueueScheduler<Box<dyn ReadyQueue>> {
    /// Scheduler whose queue kind is picked by `config.queue_capacity`
    pub fn from_config(config: SchedulerConfig) -> SchedulerResult<Self> {
        config.validate()?;
        let id = QueueId(config.queue_id);
        let queue: Box<dyn ReadyQueue> = match config.queue_capacity {
            Some(capacity) => Box::new(BoundedQueue::new(id, capacity)?),
            None => Box::new(SharedQueue::new(id)),
        };
        Ok(Self::with_queue(config, queue))
    }
}

impl<Q: ReadyQueue> SharedQueueScheduler<Q> {
    /// Scheduler over a caller-supplied queue
    pub fn with_queue(config: SchedulerConfig, queue: Q) -> Self {
        debug!(
            name = %config.name,
            queue = %queue.id(),
            base_slice_ns = config.base_slice_ns,
            slice_floor_ns = ?config.slice_floor_ns,
            "Shared-queue scheduler created"
        );

        Self {
            quantum: config.quantum(),
            queue,
            stats: AtomicSchedulerStats::new(),
            initialized: AtomicBool::new(false),
            config,
        }
    }

    /// Admit a newly runnable task
    ///
    /// Grants `base` on an empty queue and `base / depth` otherwise, then
    /// appends the task. Fails only if the queue rejects the push.
    pub fn admit(&self, task: TaskHandle, flags: EnqueueFlags) -> SchedulerResult<TimeSlice> {
        let depth = self.queue.depth();
        let slice = self.quantum.slice_for(depth);

        if let Err(e) = self.queue.push_back(QueuedTask::new(task, slice, flags)) {
            error!(%task, depth, error = %e, "Ready queue rejected task");
            return Err(e);
        }

        self.stats.record_admit(slice);
        if slice.is_zero() {
            debug!(%task, depth, "Task admitted with a zero-length slice");
        }
        trace!(%task, depth, slice_ns = slice.as_nanos(), "Task admitted");
        Ok(slice)
    }

    /// Hand the head of the queue to `cpu`
    ///
    /// `prev` is accepted for the host's benefit and ignored.
    pub fn dispatch(&self, cpu: CpuId, _prev: Option<TaskHandle>) -> Dispatch {
        match self.queue.pop_front() {
            Some(entry) => {
                self.stats.record_dispatch();
                trace!(%cpu, task = %entry.task, slice_ns = entry.slice.as_nanos(), "Task dispatched");
                Dispatch::Task(DispatchedTask {
                    cpu,
                    task: entry.task,
                    slice: entry.slice,
                    flags: entry.flags,
                })
            }
            None => {
                self.stats.record_empty();
                Dispatch::Empty
            }
        }
    }

    /// Validate the configuration and mark the scheduler ready
    ///
    /// The held queue must match the configured id and capacity, so a
    /// capacity handed to an unbounded queue fails here instead of being
    /// silently ignored.
    pub fn init(&self) -> SchedulerResult<()> {
        self.config.validate()?;
        self.check_queue()?;

        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SchedulerError::AlreadyInitialized(self.config.name.clone()));
        }

        info!(
            name = %self.config.name,
            queue = %self.queue.id(),
            base_slice_ns = self.quantum.base_ns(),
            "Scheduler initialized"
        );
        Ok(())
    }

    fn check_queue(&self) -> SchedulerResult<()> {
        let id = self.queue.id();
        if id.0 != self.config.queue_id {
            return Err(SchedulerError::InvalidConfig(format!(
                "configured queue id {} but scheduler holds {}",
                self.config.queue_id, id
            )));
        }

        let capacity = self.queue.capacity();
        if capacity != self.config.queue_capacity {
            return Err(SchedulerError::InvalidConfig(format!(
                "configured queue capacity {:?} but {} has {:?}",
                self.config.queue_capacity, id, capacity
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.queue.depth()
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Lock-free statistics snapshot
    pub fn stats(&self) -> SchedulerStats {
        self.stats.snapshot(self.queue.depth(), self.quantum.base_ns())
    }
}

impl<Q: ReadyQueue> SchedulerOps for SharedQueueScheduler<Q> {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn flags(&self) -> OpsFlags {
        self.config.flags
    }

    fn init(&self) -> SchedulerResult<()> {
        SharedQueueScheduler::init(self)
    }

    #[inline]
    fn enqueue(&self, task: TaskHandle, flags: EnqueueFlags) -> SchedulerResult<TimeSlice> {
        self.admit(task, flags)
    }

    #[inline]
    fn dispatch(&self, cpu: CpuId, prev: Option<TaskHandle>) -> Dispatch {
        SharedQueueScheduler::dispatch(self, cpu, prev)
    }

    fn depth(&self) -> usize {
        SharedQueueScheduler::depth(self)
    }
}
