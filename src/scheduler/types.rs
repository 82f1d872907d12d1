/*!
 * Scheduler Types
 * Results handed back to the host
 */

use crate::core::types::{CpuId, EnqueueFlags, TaskHandle, TimeSlice};
use serde::{Deserialize, Serialize};

/// Task handed to a CPU by dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchedTask {
    pub cpu: CpuId,
    pub task: TaskHandle,
    /// Slice assigned when the task was admitted
    pub slice: TimeSlice,
    pub flags: EnqueueFlags,
}

/// Outcome of a dispatch request
///
/// `Empty` is the normal "no work" signal, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Dispatch {
    Task(DispatchedTask),
    Empty,
}

impl Dispatch {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[inline]
    pub fn task(&self) -> Option<TaskHandle> {
        match self {
            Self::Task(dispatched) => Some(dispatched.task),
            Self::Empty => None,
        }
    }

    #[inline]
    pub fn into_dispatched(self) -> Option<DispatchedTask> {
        match self {
            Self::Task(dispatched) => Some(dispatched),
            Self::Empty => None,
        }
    }
}
