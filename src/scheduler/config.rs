/*!
 * Scheduler Configuration
 *
 * Defaults come from `core::limits`; `from_env` overlays SCHED_* variables.
 */

use super::flags::OpsFlags;
use super::quantum::QuantumPolicy;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{
    BASE_TIME_SLICE_NS, ENV_BASE_SLICE_NS, ENV_QUEUE_CAPACITY, ENV_SLICE_FLOOR_NS,
    SCHEDULER_NAME, SHARED_QUEUE_ID,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Name registered with the host
    pub name: String,
    /// Slice granted on an empty queue
    pub base_slice_ns: u64,
    /// Optional lower bound on computed slices. Off by default: slices may reach zero.
    pub slice_floor_ns: Option<u64>,
    pub queue_id: u64,
    /// `Some` selects a bounded queue that rejects pushes when full
    pub queue_capacity: Option<usize>,
    pub flags: OpsFlags,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            name: SCHEDULER_NAME.to_string(),
            base_slice_ns: BASE_TIME_SLICE_NS,
            slice_floor_ns: None,
            queue_id: SHARED_QUEUE_ID,
            queue_capacity: None,
            flags: OpsFlags::default(),
        }
    }
}

impl SchedulerConfig {
    /// Defaults with SCHED_* environment overrides applied, validated
    pub fn from_env() -> SchedulerResult<Self> {
        let mut config = Self::default();

        if let Some(base) = env_var::<u64>(ENV_BASE_SLICE_NS)? {
            config.base_slice_ns = base;
        }
        if let Some(floor) = env_var::<u64>(ENV_SLICE_FLOOR_NS)? {
            config.slice_floor_ns = Some(floor);
        }
        if let Some(capacity) = env_var::<usize>(ENV_QUEUE_CAPACITY)? {
            config.queue_capacity = Some(capacity);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_slice(mut self, base_slice_ns: u64) -> Self {
        self.base_slice_ns = base_slice_ns;
        self
    }

    pub fn with_slice_floor(mut self, floor_ns: u64) -> Self {
        self.slice_floor_ns = Some(floor_ns);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    pub fn with_flags(mut self, flags: OpsFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Reject configurations the policy cannot run with
    pub fn validate(&self) -> SchedulerResult<()> {
        if self.name.is_empty() {
            return Err(SchedulerError::InvalidConfig(
                "scheduler name must not be empty".into(),
            ));
        }
        if self.base_slice_ns == 0 {
            return Err(SchedulerError::InvalidConfig(
                "base time slice must be non-zero".into(),
            ));
        }
        if let Some(floor) = self.slice_floor_ns {
            if floor > self.base_slice_ns {
                return Err(SchedulerError::InvalidConfig(format!(
                    "slice floor {}ns exceeds base slice {}ns",
                    floor, self.base_slice_ns
                )));
            }
        }
        if self.queue_capacity == Some(0) {
            return Err(SchedulerError::InvalidConfig(
                "queue capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn quantum(&self) -> QuantumPolicy {
        QuantumPolicy::new(self.base_slice_ns).with_floor(self.slice_floor_ns)
    }
}

fn env_var<T: FromStr>(key: &str) -> SchedulerResult<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| SchedulerError::InvalidConfig(format!("{}={:?} is not a valid number", key, raw))),
        Err(_) => Ok(None),
    }
}
