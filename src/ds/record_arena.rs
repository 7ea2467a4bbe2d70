//! Slot-based record store with stable handles.
//!
//! Records live in a `Vec<Option<T>>`; freed slots go on a free list and are
//! reused by later inserts. A [`RecordId`] stays valid until its record is
//! removed, which lets other structures (the cache index, the record list
//! links) refer to records without owning them.

/// Stable handle to a record in a [`RecordArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(pub(crate) usize);

impl RecordId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of records addressed by [`RecordId`].
#[derive(Debug)]
pub struct RecordArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> RecordArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty arena with reserved slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores a record, reusing a freed slot when one is available.
    pub fn insert(&mut self, record: T) -> RecordId {
        let index = match self.free_list.pop() {
            Some(index) => {
                self.slots[index] = Some(record);
                index
            }
            None => {
                self.slots.push(Some(record));
                self.slots.len() - 1
            }
        };
        self.len += 1;
        RecordId(index)
    }

    /// Removes and returns the record behind `id`, freeing its slot.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let record = slot.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(record)
    }

    /// Returns the record behind `id`, if it is still live.
    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Returns a mutable reference to the record behind `id`.
    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Returns `true` if `id` refers to a live record.
    pub fn contains(&self, id: RecordId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Returns the number of live records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no records are live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Frees every record and slot.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }
}

impl<T> Default for RecordArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut arena = RecordArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));

        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.remove(a), None);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = RecordArena::new();
        let a = arena.insert(1);
        arena.insert(2);

        arena.remove(a);
        let c = arena.insert(3);

        assert_eq!(a.index(), c.index());
        assert_eq!(arena.get(c), Some(&3));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = RecordArena::new();
        let id = arena.insert(10);

        if let Some(record) = arena.get_mut(id) {
            *record = 20;
        }
        assert_eq!(arena.get(id), Some(&20));
    }

    #[test]
    fn contains_and_clear() {
        let mut arena = RecordArena::new();
        let id = arena.insert(1);
        assert!(arena.contains(id));

        arena.clear();
        assert!(!arena.contains(id));
        assert!(arena.is_empty());
    }
}
