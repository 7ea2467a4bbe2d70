//! Capacity-bounded cache evicting in insertion order.
//!
//! An associative map with a hard entry ceiling. When a new key arrives at
//! capacity, the **oldest still-present insertion** is evicted. Reads and
//! in-place updates never move an entry: this is deliberately *not* an
//! access-refreshing LRU — only insertion order matters, giving O(1)
//! eviction selection (always the tail) at the cost of ignoring usage
//! recency.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                 BoundedFifoCache<K, V> (one Mutex)                   │
//! │                                                                      │
//! │   index: FxHashMap<K, RecordId>     records: RecordList<Entry>       │
//! │        key → record handle               insertion order             │
//! │                                                                      │
//! │   ┌─────────┬──────────┐      head ─► [d] ◄─► [c] ◄─► [b] ◄── tail   │
//! │   │   Key   │ RecordId │              newest          oldest         │
//! │   ├─────────┼──────────┤              insert          EVICT          │
//! │   │   "b"   │   id_0   │                                             │
//! │   │   "c"   │   id_1   │      update("c", v): value replaced in      │
//! │   │   "d"   │   id_2   │      place, position unchanged              │
//! │   └─────────┴──────────┘                                             │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation       | Time  | Notes                                   |
//! |-----------------|-------|-----------------------------------------|
//! | `insert`        | O(1)  | Upsert; may evict the oldest entry      |
//! | `try_insert`    | O(1)  | Strict; duplicate key is an error       |
//! | `get`           | O(1)  | No reordering                           |
//! | `remove`        | O(1)  | Map entry and list record together      |
//! | `contains_key`  | O(1)  |                                         |
//! | `len`           | O(1)  |                                         |
//! | `keys`/`values` | O(n)  | Snapshot, newest first                  |
//! | `clear`         | O(n)  |                                         |
//!
//! ## Thread Safety
//!
//! Every operation acquires one cache-wide `parking_lot::Mutex` for its
//! whole duration; no finer-grained locking. Snapshots are enumerated
//! outside the lock.

use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::record_list::RecordList;
use crate::ds::RecordId;
use crate::error::{ConfigError, DuplicateKeyError};

struct Entry<K, V> {
    key: K,
    value: V,
}

struct Inner<K, V> {
    index: FxHashMap<K, RecordId>,
    records: RecordList<Entry<K, V>>,
}

/// Thread-safe associative cache bounded to a fixed capacity, evicting the
/// oldest insertion when full.
///
/// # Type Parameters
///
/// - `K`: Key type, `Clone + Eq + Hash` (the key is held by both the index
///   and its record).
/// - `V`: Value type; `Clone` is required only by the value-returning reads.
///
/// # Example
///
/// ```
/// use synckit::cache::BoundedFifoCache;
///
/// let cache = BoundedFifoCache::new(2).unwrap();
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// cache.insert("c", 3); // evicts "a", the oldest insertion
///
/// assert!(!cache.contains_key(&"a"));
/// assert_eq!(cache.get(&"b"), Some(2));
/// assert_eq!(cache.get(&"c"), Some(3));
/// ```
///
/// # Eviction Behavior
///
/// Updating an existing key replaces the value in place and never changes
/// its position, so an old entry stays "old" no matter how often it is
/// rewritten or read:
///
/// ```
/// use synckit::cache::BoundedFifoCache;
///
/// let cache = BoundedFifoCache::new(2).unwrap();
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// cache.insert("a", 10);     // in place, "a" is still the oldest
/// cache.insert("c", 3);      // evicts "a"
/// assert!(!cache.contains_key(&"a"));
/// ```
pub struct BoundedFifoCache<K, V> {
    capacity: usize,
    inner: Mutex<Inner<K, V>>,
}

impl<K, V> BoundedFifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity < 1 {
            return Err(ConfigError::new("cache capacity must be >= 1"));
        }
        Ok(Self {
            capacity,
            inner: Mutex::new(Inner {
                index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                records: RecordList::with_capacity(capacity),
            }),
        })
    }

    /// Inserts or updates a key-value pair (upsert).
    ///
    /// - Existing key: replaces the value in place, position unchanged, and
    ///   returns the previous value. Never evicts.
    /// - New key at capacity: evicts the oldest insertion, then inserts at
    ///   the head. Returns `None`.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(&id) = inner.index.get(&key) {
            if let Some(entry) = inner.records.get_mut(id) {
                let previous = std::mem::replace(&mut entry.value, value);
                return Some(previous);
            }
        }
        inner.insert_new(self.capacity, key, value);

        #[cfg(debug_assertions)]
        inner.validate_invariants(self.capacity);
        None
    }

    /// Inserts a key-value pair, failing if the key already exists.
    ///
    /// Same eviction behavior as [`insert`](Self::insert) for new keys, but
    /// never updates silently.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKeyError`] when the key is present; the cache is
    /// unchanged.
    pub fn try_insert(&self, key: K, value: V) -> Result<(), DuplicateKeyError> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if inner.index.contains_key(&key) {
            return Err(DuplicateKeyError::new("key already present in cache"));
        }
        inner.insert_new(self.capacity, key, value);

        #[cfg(debug_assertions)]
        inner.validate_invariants(self.capacity);
        Ok(())
    }

    /// Returns a clone of the value for `key`, or `None` if absent.
    ///
    /// Lookups never affect eviction order.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let guard = self.inner.lock();
        guard
            .index
            .get(key)
            .and_then(|&id| guard.records.get(id))
            .map(|entry| entry.value.clone())
    }

    /// Removes the entry for `key` from both the index and the record list.
    ///
    /// Returns the removed value, or `None` if the key was absent; a missing
    /// key is never an error.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let id = inner.index.remove(key)?;
        let removed = inner.records.remove(id).map(|entry| entry.value);

        #[cfg(debug_assertions)]
        inner.validate_invariants(self.capacity);
        removed
    }

    /// Returns `true` if `key` is present. O(1), no reordering.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().index.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a snapshot of the keys in insertion-recency order, newest
    /// first.
    pub fn keys(&self) -> Vec<K> {
        let guard = self.inner.lock();
        guard.records.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Returns a snapshot of the values, in the same order as
    /// [`keys`](Self::keys).
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        let guard = self.inner.lock();
        guard
            .records
            .iter()
            .map(|entry| entry.value.clone())
            .collect()
    }

    /// Returns a snapshot of `(key, value)` pairs, newest first.
    ///
    /// The snapshot is enumerated without holding the lock; later mutations
    /// never affect it.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        let guard = self.inner.lock();
        guard
            .records
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    /// Removes every entry. The capacity is unchanged.
    pub fn clear(&self) {
        let mut guard = self.inner.lock();
        guard.index.clear();
        guard.records.clear();
    }
}

impl<K, V> Inner<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Inserts a key known to be absent, evicting the oldest record first
    /// when at capacity.
    fn insert_new(&mut self, capacity: usize, key: K, value: V) {
        if self.records.len() >= capacity {
            if let Some(oldest) = self.records.pop_back() {
                self.index.remove(&oldest.key);
            }
        }
        let id = self.records.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
    }

    /// Validates the map/list bijection and the capacity ceiling.
    ///
    /// Only runs when debug assertions are enabled.
    #[cfg(debug_assertions)]
    fn validate_invariants(&self, capacity: usize) {
        debug_assert_eq!(
            self.index.len(),
            self.records.len(),
            "index and record list have different sizes"
        );
        debug_assert!(
            self.records.len() <= capacity,
            "record count exceeds capacity"
        );
        for (key, &id) in &self.index {
            let entry = self.records.get(id);
            debug_assert!(entry.is_some(), "indexed record missing from list");
            if let Some(entry) = entry {
                debug_assert!(entry.key == *key, "index points at a record with another key");
            }
        }
        self.records.validate_invariants();
    }
}

impl<K, V> std::fmt::Debug for BoundedFifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedFifoCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
