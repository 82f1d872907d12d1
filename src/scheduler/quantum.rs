/*!
 * Time Slice Computation
 * Depth-proportional quantum: the more tasks already waiting, the smaller
 * the slice each new arrival gets
 */

use crate::core::types::TimeSlice;

/// Quantum computation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantumPolicy {
    base_ns: u64,
    floor_ns: Option<u64>,
}

impl QuantumPolicy {
    /// Floorless policy: slices shrink toward zero as depth grows
    pub const fn new(base_ns: u64) -> Self {
        Self {
            base_ns,
            floor_ns: None,
        }
    }

    /// Clamp computed slices from below
    pub const fn with_floor(mut self, floor_ns: Option<u64>) -> Self {
        self.floor_ns = floor_ns;
        self
    }

    /// Slice granted when the queue is empty
    #[inline(always)]
    pub const fn base_ns(&self) -> u64 {
        self.base_ns
    }

    /// Lower bound on computed slices, `None` when floorless
    #[inline(always)]
    pub const fn floor_ns(&self) -> Option<u64> {
        self.floor_ns
    }

    /// Slice for a task admitted when `depth` tasks are already queued
    ///
    /// # Performance
    /// Hot path - called on every admission
    #[inline]
    pub fn slice_for(&self, depth: usize) -> TimeSlice {
        let nanos = slice_for_depth(self.base_ns, depth).as_nanos();
        match self.floor_ns {
            Some(floor) => TimeSlice::from_nanos(nanos.max(floor)),
            None => TimeSlice::from_nanos(nanos),
        }
    }
}

/// `base` on an empty queue, `base / depth` (floor division) otherwise
///
/// Reaches zero once `depth > base`.
#[inline]
pub fn slice_for_depth(base_ns: u64, depth: usize) -> TimeSlice {
    match u64::try_from(depth) {
        Ok(0) => TimeSlice::from_nanos(base_ns),
        Ok(d) => TimeSlice::from_nanos(base_ns / d),
        Err(_) => TimeSlice::from_nanos(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::limits::BASE_TIME_SLICE_NS;

    #[test]
    fn test_empty_queue_gets_base() {
        assert_eq!(slice_for_depth(BASE_TIME_SLICE_NS, 0).as_nanos(), 5_000_000);
    }

    #[test]
    fn test_depth_one_gets_base() {
        assert_eq!(slice_for_depth(BASE_TIME_SLICE_NS, 1).as_nanos(), 5_000_000);
    }

    #[test]
    fn test_floor_division() {
        assert_eq!(slice_for_depth(BASE_TIME_SLICE_NS, 2).as_nanos(), 2_500_000);
        assert_eq!(slice_for_depth(BASE_TIME_SLICE_NS, 3).as_nanos(), 1_666_666);
        assert_eq!(slice_for_depth(BASE_TIME_SLICE_NS, 7).as_nanos(), 714_285);
    }

    #[test]
    fn test_never_increases_with_depth() {
        let policy = QuantumPolicy::new(BASE_TIME_SLICE_NS);
        let mut last = policy.slice_for(0);
        for depth in 1..2_000 {
            let slice = policy.slice_for(depth);
            assert!(slice <= last, "depth {} grew the slice", depth);
            last = slice;
        }
    }

    // Without a floor, deep queues hand out zero-length slices
    #[test]
    fn test_floorless_degenerates_to_zero() {
        let policy = QuantumPolicy::new(1_000);
        assert_eq!(policy.floor_ns(), None);
        assert_eq!(policy.slice_for(1_000).as_nanos(), 1);
        assert!(policy.slice_for(1_001).is_zero());
        assert!(slice_for_depth(BASE_TIME_SLICE_NS, 5_000_001).is_zero());
    }

    #[test]
    fn test_floor_clamps() {
        let policy = QuantumPolicy::new(1_000).with_floor(Some(50));
        assert_eq!(policy.base_ns(), 1_000);
        assert_eq!(policy.floor_ns(), Some(50));
        assert_eq!(policy.slice_for(0).as_nanos(), 1_000);
        assert_eq!(policy.slice_for(10).as_nanos(), 100);
        assert_eq!(policy.slice_for(100).as_nanos(), 50);
        assert_eq!(policy.slice_for(1_000_000).as_nanos(), 50);
    }
}
