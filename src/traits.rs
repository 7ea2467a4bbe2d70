//! Capability traits for queue-like containers.
//!
//! These are the structural contracts generic code programs against: a
//! component that needs "something I can add to and take from" takes a
//! [`Queue`] bound, and one that must be able to abort a blocked consumer
//! takes [`BlockingQueue`]. [`BlockingPriorityQueue`](crate::queue::BlockingPriorityQueue)
//! satisfies both.
//!
//! ```text
//!   ┌───────────────────────────────┐
//!   │          Queue<T>             │
//!   │                               │
//!   │  add(&self, T)                │
//!   │  take(&self) → T   (blocks)   │
//!   │  try_take(&self) → Option<T>  │
//!   │  peek(&self) → Option<T>      │
//!   └───────────────┬───────────────┘
//!                   │
//!                   ▼
//!   ┌───────────────────────────────────────────────┐
//!   │              BlockingQueue<T>                 │
//!   │                                               │
//!   │  take_with(&self, &token) → Result<T, ..>     │
//!   └───────────────────────────────────────────────┘
//! ```

use crate::error::Cancelled;
use crate::queue::cancel::CancellationToken;
use crate::queue::BlockingPriorityQueue;

/// Shared-handle queue: producers add, consumers take.
///
/// All methods take `&self`; implementors synchronize internally. `T: Clone`
/// is a trait-level bound because [`peek`](Self::peek) must hand back an
/// owned copy from behind the implementor's lock.
pub trait Queue<T: Clone> {
    /// Adds an element. Never blocks.
    fn add(&self, item: T);

    /// Removes and returns the next element, blocking until one exists.
    fn take(&self) -> T;

    /// Removes and returns the next element if one is present.
    fn try_take(&self) -> Option<T>;

    /// Returns a copy of the next element without removing it.
    fn peek(&self) -> Option<T>;
}

/// A [`Queue`] whose blocking take can be aborted by a cancellation signal.
pub trait BlockingQueue<T: Clone>: Queue<T> {
    /// Blocking take that fails with [`Cancelled`] once `token` is
    /// signalled.
    fn take_with(&self, token: &CancellationToken) -> Result<T, Cancelled>;
}

impl<T: Clone + Send + 'static> Queue<T> for BlockingPriorityQueue<T> {
    fn add(&self, item: T) {
        BlockingPriorityQueue::add(self, item);
    }

    fn take(&self) -> T {
        BlockingPriorityQueue::take(self)
    }

    fn try_take(&self) -> Option<T> {
        BlockingPriorityQueue::try_take(self)
    }

    fn peek(&self) -> Option<T> {
        BlockingPriorityQueue::peek(self)
    }
}

impl<T: Clone + Send + 'static> BlockingQueue<T> for BlockingPriorityQueue<T> {
    fn take_with(&self, token: &CancellationToken) -> Result<T, Cancelled> {
        BlockingPriorityQueue::take_with(self, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<Q: Queue<u32>>(queue: &Q) -> Vec<u32> {
        let mut out = Vec::new();
        while let Some(item) = queue.try_take() {
            out.push(item);
        }
        out
    }

    #[test]
    fn queue_trait_is_object_safe_enough_for_generics() {
        let queue = BlockingPriorityQueue::new();
        Queue::add(&queue, 3u32);
        Queue::add(&queue, 7u32);

        assert_eq!(Queue::peek(&queue), Some(7));
        assert_eq!(drain(&queue), vec![7, 3]);
    }

    #[test]
    fn blocking_queue_trait_surfaces_cancellation() {
        use crate::queue::cancel::CancellationSource;

        let queue: BlockingPriorityQueue<u32> = BlockingPriorityQueue::new();
        let source = CancellationSource::new();
        source.cancel();

        let result = BlockingQueue::take_with(&queue, &source.token());
        assert_eq!(result, Err(Cancelled));
    }
}
