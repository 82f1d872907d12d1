/*!
 * Lock-Free Scheduler Statistics
 * Uses atomic counters for zero-contention stats tracking in hot scheduling paths
 */

use crate::core::types::TimeSlice;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Scheduler statistics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub admitted: u64,
    pub dispatched: u64,
    #[serde(skip_serializing_if = "is_zero_u64", default)]
    pub empty_dispatches: u64,
    /// Admissions that were handed a zero-length slice
    #[serde(skip_serializing_if = "is_zero_u64", default)]
    pub zero_slice_admissions: u64,
    pub last_slice_ns: u64,
    pub depth: usize,
    pub base_slice_ns: u64,
}

fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

/// Atomic scheduler counters
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - All operations use relaxed ordering
#[repr(C, align(64))]
pub struct AtomicSchedulerStats {
    admitted: AtomicU64,
    dispatched: AtomicU64,
    empty_dispatches: AtomicU64,
    zero_slice_admissions: AtomicU64,
    last_slice_ns: AtomicU64,
}

impl AtomicSchedulerStats {
    #[inline]
    pub fn new() -> Self {
        Self {
            admitted: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            empty_dispatches: AtomicU64::new(0),
            zero_slice_admissions: AtomicU64::new(0),
            last_slice_ns: AtomicU64::new(0),
        }
    }

    /// Count an admitted task and remember its slice
    ///
    /// # Performance
    /// Hot path - called on every admission
    #[inline(always)]
    pub fn record_admit(&self, slice: TimeSlice) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
        self.last_slice_ns.store(slice.as_nanos(), Ordering::Relaxed);
        if slice.is_zero() {
            self.zero_slice_admissions.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Count a task handed to a CPU
    ///
    /// # Performance
    /// Hot path - called on every successful dispatch
    #[inline(always)]
    pub fn record_dispatch(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a dispatch that found the queue empty
    ///
    /// # Performance
    /// Hot path - idle CPUs poll through here
    #[inline(always)]
    pub fn record_empty(&self) {
        self.empty_dispatches.fetch_add(1, Ordering::Relaxed);
    }

    /// Counter values may be mutually inconsistent under concurrent
    /// updates; each one is individually accurate.
    #[inline]
    pub fn snapshot(&self, depth: usize, base_slice_ns: u64) -> SchedulerStats {
        SchedulerStats {
            admitted: self.admitted.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            empty_dispatches: self.empty_dispatches.load(Ordering::Relaxed),
            zero_slice_admissions: self.zero_slice_admissions.load(Ordering::Relaxed),
            last_slice_ns: self.last_slice_ns.load(Ordering::Relaxed),
            depth,
            base_slice_ns,
        }
    }
}

impl Default for AtomicSchedulerStats {
    fn default() -> Self {
        Self::new()
    }
}
