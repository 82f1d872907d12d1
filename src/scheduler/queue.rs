/*!
 * Shared Ready Queue
 * FIFO queue of admitted tasks shared by every CPU
 *
 * Both implementations are lock-free (crossbeam) so admission and dispatch
 * never block and push/pop stay linearizable under contention.
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{QueueId, QueuedTask};
use crossbeam_queue::{ArrayQueue, SegQueue};

/// Ready queue operations used by the policy
///
/// `depth` may be stale by the time the caller acts on it; the policy only
/// uses it as a contention estimate.
#[cfg_attr(test, mockall::automock)]
pub trait ReadyQueue: Send + Sync {
    /// Identifier the queue was created with
    fn id(&self) -> QueueId;

    /// Number of queued tasks
    fn depth(&self) -> usize;

    /// Maximum number of queued tasks, `None` for an unbounded queue
    fn capacity(&self) -> Option<usize>;

    /// Append to the tail
    fn push_back(&self, entry: QueuedTask) -> SchedulerResult<()>;

    /// Remove the head, `None` when empty
    fn pop_front(&self) -> Option<QueuedTask>;
}

impl<Q: ReadyQueue + ?Sized> ReadyQueue for Box<Q> {
    #[inline]
    fn id(&self) -> QueueId {
        (**self).id()
    }

    #[inline]
    fn depth(&self) -> usize {
        (**self).depth()
    }

    #[inline]
    fn capacity(&self) -> Option<usize> {
        (**self).capacity()
    }

    #[inline]
    fn push_back(&self, entry: QueuedTask) -> SchedulerResult<()> {
        (**self).push_back(entry)
    }

    #[inline]
    fn pop_front(&self) -> Option<QueuedTask> {
        (**self).pop_front()
    }
}

/// Unbounded lock-free ready queue
///
/// # Performance
/// - Segmented MPMC queue, push never fails
pub struct SharedQueue {
    id: QueueId,
    inner: SegQueue<QueuedTask>,
}

impl SharedQueue {
    pub fn new(id: QueueId) -> Self {
        Self {
            id,
            inner: SegQueue::new(),
        }
    }
}

impl Default for SharedQueue {
    fn default() -> Self {
        Self::new(QueueId(crate::core::limits::SHARED_QUEUE_ID))
    }
}

impl ReadyQueue for SharedQueue {
    #[inline(always)]
    fn id(&self) -> QueueId {
        self.id
    }

    #[inline(always)]
    fn depth(&self) -> usize {
        self.inner.len()
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    #[inline]
    fn push_back(&self, entry: QueuedTask) -> SchedulerResult<()> {
        self.inner.push(entry);
        Ok(())
    }

    #[inline]
    fn pop_front(&self) -> Option<QueuedTask> {
        self.inner.pop()
    }
}

/// Fixed-capacity lock-free ready queue
///
/// A full queue rejects the push with `SchedulerError::QueueFull` instead of
/// dropping the task.
pub struct BoundedQueue {
    id: QueueId,
    inner: ArrayQueue<QueuedTask>,
}

impl BoundedQueue {
    /// Create a bounded queue
    ///
    /// A zero capacity is rejected as a configuration error.
    pub fn new(id: QueueId, capacity: usize) -> SchedulerResult<Self> {
        if capacity == 0 {
            return Err(SchedulerError::InvalidConfig(
                "queue capacity must be at least 1".into(),
            ));
        }
        Ok(Self {
            id,
            inner: ArrayQueue::new(capacity),
        })
    }
}

impl ReadyQueue for BoundedQueue {
    #[inline(always)]
    fn id(&self) -> QueueId {
        self.id
    }

    #[inline(always)]
    fn depth(&self) -> usize {
        self.inner.len()
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.inner.capacity())
    }

    #[inline]
    fn push_back(&self, entry: QueuedTask) -> SchedulerResult<()> {
        self.inner
            .push(entry)
            .map_err(|_| SchedulerError::QueueFull {
                queue: self.id.0,
                capacity: self.inner.capacity(),
            })
    }

    #[inline]
    fn pop_front(&self) -> Option<QueuedTask> {
        self.inner.pop()
    }
}
