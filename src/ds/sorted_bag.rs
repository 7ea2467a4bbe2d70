//! Sorted insertion engine backing the blocking priority queue.
//!
//! Keeps elements in a `Vec<T>` that is always ascending under the configured
//! three-way comparison, so the highest-priority element is the last one and
//! `take`/`peek` are O(1). Insertion pays O(log n) search + O(n) shift, the
//! right trade when consumption is the latency-sensitive path.
//!
//! ## Architecture
//!
//! ```text
//!   items (Vec<T>, ascending under `compare`)
//!   ┌──────┬──────┬──────┬──────┐
//!   │  1   │  3   │  5   │  9   │ ◄── take() / peek() read here
//!   └──────┴──────┴──────┴──────┘
//!      min                 max
//!
//!   add(4): binary search → insert index 2 → [1, 3, 4, 5, 9]
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time       | Notes                                  |
//! |-------------|------------|----------------------------------------|
//! | `add`       | O(n)       | O(log n) search, O(n) element shift    |
//! | `take`      | O(1)       | Pops the maximum                       |
//! | `peek`      | O(1)       | Borrows the maximum                    |
//! | `contains`  | O(n)       | Equality scan                          |
//! | `remove`    | O(n)       | Removes first equal element            |
//! | `iter`      | O(n)       | Descending priority order              |
//!
//! ## Tie-break
//!
//! Elements the comparison considers equal are returned last-inserted-first:
//! a new element is placed after every existing equal element, so it sits
//! closer to the take end than older ties.
//!
//! ## Thread Safety
//!
//! Not thread-safe. [`BlockingPriorityQueue`](crate::queue::BlockingPriorityQueue)
//! owns a `SortedBag` exclusively behind its lock.

use std::cmp::Ordering;
use std::fmt;

/// Three-way ordering function used by [`SortedBag`].
///
/// A single comparison abstraction: both "natural order" and custom orders
/// are expressed as one `Fn(&T, &T) -> Ordering`.
pub type Comparison<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Insertion-sorted sequence with O(1) access to the maximum element.
///
/// # Example
///
/// ```
/// use synckit::ds::SortedBag;
///
/// let mut bag = SortedBag::new();
/// bag.add_all([5, 1, 9, 3]);
///
/// assert_eq!(bag.take(), Some(9));
/// assert_eq!(bag.take(), Some(5));
/// assert_eq!(bag.take(), Some(3));
/// assert_eq!(bag.take(), Some(1));
/// assert_eq!(bag.take(), None);
/// ```
pub struct SortedBag<T> {
    /// Ascending under `compare`; last element is the current maximum.
    items: Vec<T>,
    compare: Comparison<T>,
}

impl<T: Ord> SortedBag<T> {
    /// Creates an empty bag ordered by the type's natural `Ord`.
    pub fn new() -> Self {
        Self::with_comparison(|a: &T, b: &T| a.cmp(b))
    }
}

impl<T: Ord> Default for SortedBag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortedBag<T> {
    /// Creates an empty bag ordered by a custom three-way comparison.
    ///
    /// # Example
    ///
    /// ```
    /// use synckit::ds::SortedBag;
    ///
    /// // Reverse order: smallest integer has the highest priority.
    /// let mut bag = SortedBag::with_comparison(|a: &i32, b: &i32| b.cmp(a));
    /// bag.add_all([5, 1, 9]);
    /// assert_eq!(bag.take(), Some(1));
    /// ```
    pub fn with_comparison(compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            compare: Box::new(compare),
        }
    }

    /// Inserts an element at its sorted position.
    ///
    /// O(log n) binary search plus O(n) shift. Comparison-equal elements are
    /// placed after existing ones, which makes ties come back
    /// last-inserted-first from [`take`](Self::take).
    pub fn add(&mut self, item: T) {
        let compare = &self.compare;
        let index = self
            .items
            .partition_point(|probe| compare(probe, &item) != Ordering::Greater);
        self.items.insert(index, item);

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Inserts every element of `items` via [`add`](Self::add).
    ///
    /// Sequential, no batching: n elements cost n individual inserts.
    pub fn add_all(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.add(item);
        }
    }

    /// Removes and returns the maximum element, or `None` if empty.
    ///
    /// Emptiness is never an error at this layer.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the maximum element without removing it, or `None` if empty.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns `true` if an equal element is present. O(n) scan.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.iter().any(|probe| probe == item)
    }

    /// Removes the first element equal to `item`. O(n) scan.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.items.iter().position(|probe| probe == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the bag holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in descending priority order (maximum first).
    ///
    /// The iterator borrows the bag, so the sequence cannot change while an
    /// iteration is in progress.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }

    /// Validates that the sequence is ascending under the comparison.
    ///
    /// Only runs when debug assertions are enabled.
    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        for window in self.items.windows(2) {
            debug_assert_ne!(
                (self.compare)(&window[0], &window[1]),
                Ordering::Greater,
                "sorted bag out of order"
            );
        }
    }
}

impl<T> fmt::Debug for SortedBag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedBag")
            .field("len", &self.items.len())
            .finish_non_exhaustive()
    }
}
