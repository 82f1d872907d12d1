/*!
 * Scheduler Tests
 * Admission, dispatch, and slice computation through the public API
 */

use minimal_scheduler::{
    CpuId, Dispatch, EnqueueFlags, SchedulerConfig, SharedQueueScheduler, TaskHandle, TimeSlice,
};
use pretty_assertions::assert_eq;

const BASE: u64 = 5_000_000;

fn admit(scheduler: &SharedQueueScheduler, id: u64) -> TimeSlice {
    scheduler.admit(TaskHandle(id), EnqueueFlags::NONE).unwrap()
}

#[test]
fn test_abc_scenario() {
    let scheduler = SharedQueueScheduler::default();
    scheduler.init().unwrap();

    let a = admit(&scheduler, 0xA);
    assert_eq!(scheduler.depth(), 1);
    let b = admit(&scheduler, 0xB);
    assert_eq!(scheduler.depth(), 2);
    let c = admit(&scheduler, 0xC);
    assert_eq!(scheduler.depth(), 3);

    assert_eq!(a.as_nanos(), BASE);
    assert_eq!(b.as_nanos(), BASE);
    assert_eq!(c.as_nanos(), BASE / 2);

    assert_eq!(scheduler.dispatch(CpuId(0), None).task(), Some(TaskHandle(0xA)));
    assert_eq!(
        scheduler.dispatch(CpuId(1), None).task(),
        Some(TaskHandle(0xB))
    );
    assert_eq!(
        scheduler.dispatch(CpuId(0), Some(TaskHandle(0xA))).task(),
        Some(TaskHandle(0xC))
    );
    assert_eq!(scheduler.dispatch(CpuId(1), None), Dispatch::Empty);
}

#[test]
fn test_dispatched_task_carries_admission_slice() {
    let scheduler = SharedQueueScheduler::default();
    admit(&scheduler, 1);
    admit(&scheduler, 2);
    admit(&scheduler, 3);
    admit(&scheduler, 4); // depth 3 at admission

    let slices: Vec<u64> = (0..4)
        .filter_map(|_| scheduler.dispatch(CpuId(0), None).into_dispatched())
        .map(|d| d.slice.as_nanos())
        .collect();
    assert_eq!(slices, vec![BASE, BASE, BASE / 2, 1_666_666]);
}

#[test]
fn test_depth_tracks_admissions_and_dispatches() {
    let scheduler = SharedQueueScheduler::default();
    const N: u64 = 25;

    for id in 0..N {
        admit(&scheduler, id);
    }
    assert_eq!(scheduler.depth(), N as usize);

    for k in 1..=10 {
        assert!(!scheduler.dispatch(CpuId(0), None).is_empty());
        assert_eq!(scheduler.depth(), (N - k) as usize);
    }
}

#[test]
fn test_empty_dispatch_is_idempotent() {
    let scheduler = SharedQueueScheduler::default();

    for _ in 0..5 {
        assert_eq!(scheduler.dispatch(CpuId(3), None), Dispatch::Empty);
        assert_eq!(scheduler.depth(), 0);
    }
    assert_eq!(scheduler.stats().empty_dispatches, 5);
    assert_eq!(scheduler.stats().dispatched, 0);
}

#[test]
fn test_flags_pass_through() {
    let scheduler = SharedQueueScheduler::default();
    scheduler.admit(TaskHandle(1), EnqueueFlags(0xdead)).unwrap();

    let dispatched = scheduler.dispatch(CpuId(0), None).into_dispatched().unwrap();
    assert_eq!(dispatched.flags, EnqueueFlags(0xdead));
}

#[test]
fn test_custom_base_slice() {
    let scheduler = SharedQueueScheduler::new(SchedulerConfig::default().with_base_slice(1_000));
    assert_eq!(admit(&scheduler, 1).as_nanos(), 1_000);
    assert_eq!(admit(&scheduler, 2).as_nanos(), 1_000);
    assert_eq!(admit(&scheduler, 3).as_nanos(), 500);
    assert_eq!(admit(&scheduler, 4).as_nanos(), 333);
}

// Known degenerate case: without a floor, a queue deeper than the base
// slice hands out zero-length slices
#[test]
fn test_deep_queue_gets_zero_slice_without_floor() {
    let scheduler = SharedQueueScheduler::new(SchedulerConfig::default().with_base_slice(10));

    let slices: Vec<u64> = (0..13).map(|id| admit(&scheduler, id).as_nanos()).collect();
    assert_eq!(slices, vec![10, 10, 5, 3, 2, 2, 1, 1, 1, 1, 1, 0, 0]);
    assert_eq!(scheduler.stats().zero_slice_admissions, 2);
}

#[test]
fn test_slice_floor_is_opt_in() {
    let scheduler = SharedQueueScheduler::new(
        SchedulerConfig::default()
            .with_base_slice(10)
            .with_slice_floor(2),
    );

    let slices: Vec<u64> = (0..8).map(|id| admit(&scheduler, id).as_nanos()).collect();
    assert_eq!(slices, vec![10, 10, 5, 3, 2, 2, 2, 2]);
    assert_eq!(scheduler.stats().zero_slice_admissions, 0);
}

#[test]
fn test_stats_snapshot_serializes() {
    let scheduler = SharedQueueScheduler::default();
    admit(&scheduler, 1);
    admit(&scheduler, 2);
    scheduler.dispatch(CpuId(0), None);

    let json = serde_json::to_value(scheduler.stats()).unwrap();
    assert_eq!(json["admitted"], 2);
    assert_eq!(json["dispatched"], 1);
    assert_eq!(json["depth"], 1);
    assert_eq!(json["last_slice_ns"], BASE);
}
