/*!
 * Core Types
 * Opaque handles and value types shared by the policy and its host
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque reference to a runnable unit of work
///
/// Owned by the host runtime. The scheduler only carries it between
/// admission and dispatch and never interprets the value.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHandle(pub u64);

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Identifier of a CPU asking for work
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CpuId(pub u32);

impl fmt::Display for CpuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cpu{}", self.0)
    }
}

/// Admission flags passed through from the host untouched
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnqueueFlags(pub u64);

impl EnqueueFlags {
    pub const NONE: Self = Self(0);

    #[inline(always)]
    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.0
    }
}

/// Identifier of a ready queue
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueId(pub u64);

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue{}", self.0)
    }
}

/// Time slice granted to a task at admission, in nanoseconds
///
/// # Performance
/// - Plain `u64` so it can travel inside lock-free queue entries
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlice(u64);

impl TimeSlice {
    #[inline(always)]
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    #[inline(always)]
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// A zero slice means the task is preempted as soon as it runs
    #[inline(always)]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_nanos(self.0)
    }
}

impl From<TimeSlice> for Duration {
    fn from(slice: TimeSlice) -> Self {
        slice.as_duration()
    }
}

impl fmt::Display for TimeSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

/// Ready queue entry: the task plus everything decided at admission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedTask {
    pub task: TaskHandle,
    pub slice: TimeSlice,
    pub flags: EnqueueFlags,
}

impl QueuedTask {
    #[inline]
    #[must_use]
    pub const fn new(task: TaskHandle, slice: TimeSlice, flags: EnqueueFlags) -> Self {
        Self { task, slice, flags }
    }
}
