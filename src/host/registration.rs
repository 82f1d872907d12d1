/*!
 * Scheduler Registration
 * Event delivery from the host into a registered policy
 */

use crate::core::errors::SchedulerResult;
use crate::core::types::{CpuId, EnqueueFlags, TaskHandle, TimeSlice};
use crate::scheduler::flags::OpsFlags;
use crate::scheduler::traits::SchedulerOps;
use crate::scheduler::types::{Dispatch, DispatchedTask};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// What the host did with a task whose slice ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceExpiry {
    /// Last runnable task and no `ENQ_LAST`: kept on the CPU, policy not consulted
    Continued,
    /// Re-admitted through the policy with a fresh slice
    Requeued(TimeSlice),
}

/// A registered scheduler
///
/// The only handle through which the host delivers events.
pub struct Registration<S: SchedulerOps> {
    slot: Arc<Mutex<Option<String>>>,
    ops: Arc<S>,
    name: String,
    flags: OpsFlags,
}

impl<S: SchedulerOps> Registration<S> {
    pub(super) fn new(
        slot: Arc<Mutex<Option<String>>>,
        ops: Arc<S>,
        name: String,
        flags: OpsFlags,
    ) -> Self {
        Self {
            slot,
            ops,
            name,
            flags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> OpsFlags {
        self.flags
    }

    pub fn scheduler(&self) -> &Arc<S> {
        &self.ops
    }

    /// Task became runnable
    #[inline]
    pub fn wake(&self, task: TaskHandle, flags: EnqueueFlags) -> SchedulerResult<TimeSlice> {
        self.ops.enqueue(task, flags)
    }

    /// `cpu` has nothing to run
    #[inline]
    pub fn cpu_idle(&self, cpu: CpuId, prev: Option<TaskHandle>) -> Dispatch {
        self.ops.dispatch(cpu, prev)
    }

    /// `task` used up its slice on `cpu`
    ///
    /// Without `ENQ_LAST` the host keeps the last runnable task running
    /// instead of sending it back through admission.
    pub fn slice_expired(
        &self,
        cpu: CpuId,
        task: TaskHandle,
        flags: EnqueueFlags,
    ) -> SchedulerResult<SliceExpiry> {
        if self.ops.depth() == 0 && !self.flags.contains(OpsFlags::ENQ_LAST) {
            debug!(%cpu, %task, "Last runnable task keeps its CPU");
            return Ok(SliceExpiry::Continued);
        }

        let slice = self.ops.enqueue(task, flags)?;
        Ok(SliceExpiry::Requeued(slice))
    }

    /// Let `nr_cpus` idle CPUs take turns dispatching until the queue is empty
    ///
    /// Returns every dispatch in the order it happened.
    pub fn drain(&self, nr_cpus: u32) -> Vec<DispatchedTask> {
        let nr_cpus = nr_cpus.max(1);
        let mut prev: Vec<Option<TaskHandle>> = vec![None; nr_cpus as usize];
        let mut trace = Vec::new();

        for cpu in (0..nr_cpus).cycle() {
            let idx = cpu as usize;
            match self.cpu_idle(CpuId(cpu), prev[idx]) {
                Dispatch::Task(dispatched) => {
                    prev[idx] = Some(dispatched.task);
                    trace.push(dispatched);
                }
                Dispatch::Empty => break,
            }
        }

        debug!(dispatched = trace.len(), nr_cpus, "Drain complete");
        trace
    }
}

impl<S: SchedulerOps> Drop for Registration<S> {
    fn drop(&mut self) {
        *self.slot.lock() = None;
        info!(name = %self.name, "Scheduler unregistered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SchedulerError;
    use crate::host::Host;
    use crate::scheduler::{SchedulerConfig, SharedQueueScheduler};

    fn register(config: SchedulerConfig) -> (Host, Registration<SharedQueueScheduler>) {
        let host = Host::new();
        let registration = host
            .register(Arc::new(SharedQueueScheduler::new(config)))
            .unwrap();
        (host, registration)
    }

    #[test]
    fn test_register_runs_init() {
        let (host, registration) = register(SchedulerConfig::default());
        assert!(registration.scheduler().is_initialized());
        assert_eq!(registration.name(), "minimal_scheduler");
        assert_eq!(host.active().as_deref(), Some("minimal_scheduler"));
    }

    #[test]
    fn test_host_accepts_one_scheduler() {
        let (host, registration) = register(SchedulerConfig::default());
        let second = host.register(Arc::new(SharedQueueScheduler::default()));
        assert!(matches!(second, Err(SchedulerError::HostBusy(_))));

        drop(registration);
        assert_eq!(host.active(), None);
        assert!(host.register(Arc::new(SharedQueueScheduler::default())).is_ok());
    }

    #[test]
    fn test_failed_init_is_not_registered() {
        let host = Host::new();
        let scheduler = Arc::new(SharedQueueScheduler::new(
            SchedulerConfig::default().with_base_slice(0),
        ));
        assert!(matches!(
            host.register(scheduler),
            Err(SchedulerError::InvalidConfig(_))
        ));
        assert_eq!(host.active(), None);
    }

    #[test]
    fn test_reregistering_same_instance_fails_init() {
        let host = Host::new();
        let scheduler = Arc::new(SharedQueueScheduler::default());
        let registration = host.register(Arc::clone(&scheduler)).unwrap();
        drop(registration);

        assert!(matches!(
            host.register(scheduler),
            Err(SchedulerError::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn test_slice_expiry_with_enq_last_requeues() {
        let (_host, registration) = register(SchedulerConfig::default());
        let outcome = registration
            .slice_expired(CpuId(0), TaskHandle(1), EnqueueFlags::NONE)
            .unwrap();
        assert_eq!(outcome, SliceExpiry::Requeued(TimeSlice::from_nanos(5_000_000)));
        assert_eq!(registration.scheduler().depth(), 1);
    }

    #[test]
    fn test_slice_expiry_without_enq_last_keeps_last_task() {
        let (_host, registration) =
            register(SchedulerConfig::default().with_flags(OpsFlags::KEEP_BUILTIN_IDLE));

        let outcome = registration
            .slice_expired(CpuId(0), TaskHandle(1), EnqueueFlags::NONE)
            .unwrap();
        assert_eq!(outcome, SliceExpiry::Continued);
        assert_eq!(registration.scheduler().depth(), 0);

        // Another task is waiting, so the expiring one goes back through admission
        registration.wake(TaskHandle(2), EnqueueFlags::NONE).unwrap();
        let outcome = registration
            .slice_expired(CpuId(0), TaskHandle(1), EnqueueFlags::NONE)
            .unwrap();
        assert_eq!(outcome, SliceExpiry::Requeued(TimeSlice::from_nanos(5_000_000)));
        assert_eq!(registration.scheduler().depth(), 2);
    }

    #[test]
    fn test_drain_round_robins_cpus() {
        let (_host, registration) = register(SchedulerConfig::default());
        for id in 1..=5 {
            registration.wake(TaskHandle(id), EnqueueFlags::NONE).unwrap();
        }

        let trace = registration.drain(2);
        let order: Vec<(u32, u64)> = trace.iter().map(|d| (d.cpu.0, d.task.0)).collect();
        assert_eq!(order, vec![(0, 1), (1, 2), (0, 3), (1, 4), (0, 5)]);
        assert!(registration.cpu_idle(CpuId(0), None).is_empty());
    }
}
