/*!
 * Host Harness
 * In-process stand-in for the runtime that drives a scheduling policy
 *
 * The host owns registration, delivers wakeup and CPU-idle events, and
 * enforces the registration flags the policy declares.
 */

mod registration;

pub use registration::{Registration, SliceExpiry};

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::scheduler::traits::SchedulerOps;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

/// Host runtime accepting one scheduler at a time
#[derive(Clone, Default)]
pub struct Host {
    active: Arc<Mutex<Option<String>>>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a policy: read its name and flags, then run `init` once
    ///
    /// Events can only be delivered through the returned registration, so
    /// no enqueue/dispatch ever precedes a successful init. Dropping the
    /// registration frees the host for another scheduler.
    pub fn register<S: SchedulerOps>(&self, ops: Arc<S>) -> SchedulerResult<Registration<S>> {
        let name = ops.name().to_string();
        let flags = ops.flags();

        let mut active = self.active.lock();
        if let Some(current) = active.as_ref() {
            warn!(requested = %name, current = %current, "Registration refused, host busy");
            return Err(SchedulerError::HostBusy(current.clone()));
        }

        if let Err(e) = ops.init() {
            warn!(name = %name, error = %e, "Scheduler init failed, not registered");
            return Err(e);
        }

        *active = Some(name.clone());
        drop(active);

        info!(name = %name, flags = ?flags, "Scheduler registered");
        Ok(Registration::new(Arc::clone(&self.active), ops, name, flags))
    }

    /// Name of the registered scheduler, if any
    pub fn active(&self) -> Option<String> {
        self.active.lock().clone()
    }
}
