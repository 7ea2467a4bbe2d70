//! Blocking priority queue with cancellable take.
//!
//! Wraps a [`SortedBag`] in a `parking_lot::Mutex` and pairs it with a
//! `Condvar` so consumers can park until an element arrives. Producers never
//! block; the only suspension point in the crate is the consumer wait loop.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                 BlockingPriorityQueue<T> (Arc handle)            │
//! │                                                                  │
//! │   Mutex<SortedBag<T>>            Condvar `available`             │
//! │   ┌───────────────────┐          ┌───────────────────────────┐   │
//! │   │ [1, 3, 5, 9]      │          │ parked consumers          │   │
//! │   │           ▲ max   │          │ notify_all on every add   │   │
//! │   └───────────────────┘          └───────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//!
//! add(item):                        take_with(token):
//!   lock                              cancelled? → Err(Cancelled)
//!   bag.add(item)                     lock; cancelled? → Err(Cancelled)
//!   notify_all                        non-empty? → Ok(bag.take())
//!   unlock                            register wake callback
//!                                     loop:
//!                                       cancelled? → Err(Cancelled)
//!                                       wait_for(30s)
//!                                       cancelled? → Err(Cancelled)
//!                                       non-empty? → Ok(bag.take())
//! ```
//!
//! ## Operations
//!
//! | Operation    | Blocking | Time                                |
//! |--------------|----------|-------------------------------------|
//! | `add`        | no       | O(n) under the lock                 |
//! | `add_many`   | no       | O(n) per element                    |
//! | `take`       | yes      | O(1) on wake                        |
//! | `take_with`  | yes      | O(1) on wake, cancellable           |
//! | `try_take`   | no       | O(1)                                |
//! | `peek`       | no       | O(1) + clone                        |
//! | `snapshot`   | no       | O(n) copy, enumerate without lock   |
//!
//! ## Wait protocol
//!
//! The wait uses the standard predicate loop: lock, loop while empty, wait,
//! re-check. Waits are bounded by a 30-second safety period so a
//! cancellation signalled outside the parked window can never strand a
//! waiter; callers never observe a timeout condition, the loop just
//! re-checks and parks again. A cancellation callback registered for the
//! duration of the wait re-acquires this queue's lock and broadcasts, which
//! guarantees a parked waiter wakes promptly when cancelled. Cancellation
//! wins over a concurrently available element at every checkpoint.
//!
//! ## Ordering guarantees
//!
//! Operations are totally ordered by lock acquisition. A broadcast wake
//! releases every parked consumer; at most one wins each available element
//! and the rest re-check emptiness and park again. No fairness guarantee.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::ds::SortedBag;
use crate::error::Cancelled;
use crate::queue::cancel::CancellationToken;

/// Upper bound on a single park. Bounds how long a waiter can miss a wake;
/// never surfaced to callers.
const SAFETY_WAKE_PERIOD: Duration = Duration::from_secs(30);

struct Shared<T> {
    bag: Mutex<SortedBag<T>>,
    available: Condvar,
}

/// Thread-safe priority queue whose `take` blocks until an element exists.
///
/// The queue is a cheap clonable handle; clones share the same underlying
/// state. Elements come back highest-priority first under the configured
/// comparison, with ties returned last-inserted-first.
///
/// # Example
///
/// ```
/// use synckit::queue::BlockingPriorityQueue;
///
/// let queue = BlockingPriorityQueue::new();
/// queue.add_many([5, 1, 9, 3]);
///
/// assert_eq!(queue.take(), 9);
/// assert_eq!(queue.take(), 5);
/// assert_eq!(queue.try_take(), Some(3));
/// ```
///
/// # Cancellation
///
/// ```
/// use synckit::error::Cancelled;
/// use synckit::queue::{BlockingPriorityQueue, CancellationSource};
///
/// let queue: BlockingPriorityQueue<u32> = BlockingPriorityQueue::new();
/// let source = CancellationSource::new();
/// source.cancel();
///
/// // Already-signalled token fails immediately, queue content is untouched.
/// assert_eq!(queue.take_with(&source.token()), Err(Cancelled));
/// ```
pub struct BlockingPriorityQueue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for BlockingPriorityQueue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Ord> BlockingPriorityQueue<T> {
    /// Creates an empty queue ordered by the type's natural `Ord`.
    pub fn new() -> Self {
        Self::from_bag(SortedBag::new())
    }
}

impl<T: Ord> Default for BlockingPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockingPriorityQueue<T> {
    /// Creates an empty queue ordered by a custom three-way comparison.
    ///
    /// # Example
    ///
    /// ```
    /// use synckit::queue::BlockingPriorityQueue;
    ///
    /// // Min-queue: smallest element has the highest priority.
    /// let queue = BlockingPriorityQueue::with_comparison(|a: &i32, b: &i32| b.cmp(a));
    /// queue.add_many([5, 1, 9]);
    /// assert_eq!(queue.take(), 1);
    /// ```
    pub fn with_comparison(compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Self::from_bag(SortedBag::with_comparison(compare))
    }

    fn from_bag(bag: SortedBag<T>) -> Self {
        Self {
            shared: Arc::new(Shared {
                bag: Mutex::new(bag),
                available: Condvar::new(),
            }),
        }
    }

    /// Inserts an element and wakes every parked consumer. Never blocks.
    pub fn add(&self, item: T) {
        let mut bag = self.shared.bag.lock();
        bag.add(item);
        self.shared.available.notify_all();
    }

    /// Inserts every element of `items`, then wakes every parked consumer.
    /// Never blocks.
    pub fn add_many(&self, items: impl IntoIterator<Item = T>) {
        let mut bag = self.shared.bag.lock();
        bag.add_all(items);
        self.shared.available.notify_all();
    }

    /// Removes and returns the highest-priority element, blocking until one
    /// is available.
    ///
    /// This variant never cancels; a blocked consumer is only released by an
    /// insertion. Use [`take_with`](Self::take_with) when the wait must be
    /// interruptible.
    pub fn take(&self) -> T {
        let mut bag = self.shared.bag.lock();
        loop {
            if let Some(item) = bag.take() {
                return item;
            }
            self.shared.available.wait(&mut bag);
        }
    }

    /// Removes and returns the highest-priority element, blocking until one
    /// is available or `token` is cancelled.
    ///
    /// Cancellation is observed at three checkpoints: before acquiring the
    /// lock, after acquiring it, and on every wake of the wait loop. While
    /// parked, a callback registered on `token` re-acquires the lock and
    /// broadcasts, so a cancel signalled mid-wait unblocks the consumer
    /// promptly; the registration is released on every exit path.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the token was signalled before an element
    /// was claimed.
    pub fn take_with(&self, token: &CancellationToken) -> Result<T, Cancelled>
    where
        T: Send + 'static,
    {
        if token.is_cancelled() {
            return Err(Cancelled);
        }
        let mut bag = self.shared.bag.lock();
        if token.is_cancelled() {
            return Err(Cancelled);
        }
        if let Some(item) = bag.take() {
            return Ok(item);
        }

        let shared = Arc::clone(&self.shared);
        let _registration = token.register(move || {
            // Taking the lock delays the broadcast until the waiter is
            // parked, closing the gap between its cancel check and wait.
            let _guard = shared.bag.lock();
            shared.available.notify_all();
        });

        loop {
            if token.is_cancelled() {
                return Err(Cancelled);
            }
            let _ = self
                .shared
                .available
                .wait_for(&mut bag, SAFETY_WAKE_PERIOD);
            if token.is_cancelled() {
                return Err(Cancelled);
            }
            if let Some(item) = bag.take() {
                return Ok(item);
            }
        }
    }

    /// Removes and returns the highest-priority element if one is present.
    /// Never blocks; `None` means empty, not failure.
    pub fn try_take(&self) -> Option<T> {
        self.shared.bag.lock().take()
    }

    /// Returns a clone of the highest-priority element without removing it.
    /// Never blocks.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.shared.bag.lock().peek().cloned()
    }

    /// Returns the number of queued elements.
    pub fn len(&self) -> usize {
        self.shared.bag.lock().len()
    }

    /// Returns `true` if no elements are queued.
    pub fn is_empty(&self) -> bool {
        self.shared.bag.lock().is_empty()
    }

    /// Returns `true` if an equal element is queued. O(n) under the lock.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.shared.bag.lock().contains(item)
    }

    /// Removes the first element equal to `item`. O(n) under the lock.
    ///
    /// Returns `true` if an element was removed. Removal never unblocks a
    /// waiter, so no wake is broadcast.
    pub fn remove(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.shared.bag.lock().remove(item)
    }

    /// Removes every queued element.
    pub fn clear(&self) {
        self.shared.bag.lock().clear();
    }

    /// Returns a copy of the queue contents in descending priority order.
    ///
    /// The lock is held only while copying; callers enumerate the snapshot
    /// without blocking producers or consumers. Later mutations never affect
    /// an existing snapshot.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.shared.bag.lock().iter().cloned().collect()
    }
}

impl<T> std::fmt::Debug for BlockingPriorityQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingPriorityQueue")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
