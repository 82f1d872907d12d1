/*!
 * Scheduler Limits and Constants
 *
 * Centralized location for the policy's named constants.
 * Performance-critical constants are marked with [PERF].
 */

// =============================================================================
// SCHEDULER IDENTITY
// =============================================================================

/// Name the policy registers under
pub const SCHEDULER_NAME: &str = "minimal_scheduler";

/// The single shared ready queue
/// There is exactly one queue, so no multi-queue addressing exists
pub const SHARED_QUEUE_ID: u64 = 0;

// =============================================================================
// TIME SLICES
// =============================================================================

/// Base time slice (5ms)
/// Granted as-is when the queue is empty, divided by depth otherwise
/// [PERF] Bounds total drain latency of the queue to roughly this value
pub const BASE_TIME_SLICE_NS: u64 = 5_000_000;

// =============================================================================
// ENVIRONMENT OVERRIDES
// =============================================================================

pub const ENV_BASE_SLICE_NS: &str = "SCHED_BASE_SLICE_NS";
pub const ENV_SLICE_FLOOR_NS: &str = "SCHED_SLICE_FLOOR_NS";
pub const ENV_QUEUE_CAPACITY: &str = "SCHED_QUEUE_CAPACITY";
pub const ENV_TRACE_JSON: &str = "SCHED_TRACE_JSON";
