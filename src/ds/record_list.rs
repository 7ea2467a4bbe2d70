//! Doubly linked record list backed by [`RecordArena`].
//!
//! Nodes live in the arena and link to each other by [`RecordId`], so there
//! is no pointer-cycle ownership to manage and handles stay valid while a
//! record is live. This is the insertion-order backbone of the bounded
//! cache: new records attach at the front, eviction pops the back.
//!
//! ```text
//!   head ─► [newest] ◄──► [...] ◄──► [oldest] ◄── tail
//!            push_front                pop_back
//! ```
//!
//! There is deliberately no `move_to_front`: insertion order never changes
//! once a record is placed.

use crate::ds::record_arena::{RecordArena, RecordId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<RecordId>,
    next: Option<RecordId>,
}

/// Arena-backed doubly linked list preserving insertion order.
#[derive(Debug)]
pub struct RecordList<T> {
    arena: RecordArena<Node<T>>,
    head: Option<RecordId>,
    tail: Option<RecordId>,
}

impl<T> RecordList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: RecordArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: RecordArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is a live record in this list.
    pub fn contains(&self, id: RecordId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the front (newest insertion).
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the value at the back (oldest insertion).
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the id of the back record, if any.
    pub fn back_id(&self) -> Option<RecordId> {
        self.tail
    }

    /// Returns the value for a record id, if present.
    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to a record value, if present.
    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new record at the front and returns its id.
    pub fn push_front(&mut self, value: T) -> RecordId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        if let Some(head) = self.head {
            if let Some(node) = self.arena.get_mut(head) {
                node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
        id
    }

    /// Removes and returns the back (oldest) value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.detach(id);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes the record `id` from the list and returns its value.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        if !self.arena.contains(id) {
            return None;
        }
        self.detach(id);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values from front (newest) to back (oldest).
    pub fn iter(&self) -> RecordListIter<'_, T> {
        RecordListIter {
            list: self,
            current: self.head,
        }
    }

    /// Unlinks `id` from its neighbours without freeing the slot.
    fn detach(&mut self, id: RecordId) {
        let (prev, next) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_id) => {
                if let Some(node) = self.arena.get_mut(prev_id) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(node) = self.arena.get_mut(next_id) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Validates linkage invariants: front-to-back walk visits every live
    /// record exactly once with consistent back-links.
    ///
    /// Only runs when debug assertions are enabled.
    #[cfg(any(debug_assertions, test))]
    pub(crate) fn validate_invariants(&self) {
        let mut visited = 0usize;
        let mut previous: Option<RecordId> = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("linked node missing from arena");
            debug_assert_eq!(node.prev, previous, "back-link mismatch");
            previous = Some(id);
            current = node.next;
            visited += 1;
            debug_assert!(visited <= self.arena.len(), "cycle in record list");
        }
        debug_assert_eq!(visited, self.arena.len(), "unreachable records in arena");
        debug_assert_eq!(self.tail, previous, "tail does not match walk end");
    }
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over record values from front to back.
pub struct RecordListIter<'a, T> {
    list: &'a RecordList<T>,
    current: Option<RecordId>,
}

impl<'a, T> Iterator for RecordListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &RecordList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = RecordList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(collect(&list), vec![3, 2, 1]);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        list.validate_invariants();
    }

    #[test]
    fn pop_back_returns_oldest() {
        let mut list = RecordList::new();
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_back(), Some("b"));
        assert_eq!(list.pop_back(), Some("c"));
        assert_eq!(list.pop_back(), None);
        list.validate_invariants();
    }

    #[test]
    fn remove_middle_record() {
        let mut list = RecordList::new();
        list.push_front(1);
        let middle = list.push_front(2);
        list.push_front(3);

        assert_eq!(list.remove(middle), Some(2));
        assert_eq!(collect(&list), vec![3, 1]);
        assert_eq!(list.remove(middle), None);
        list.validate_invariants();
    }

    #[test]
    fn remove_head_and_tail() {
        let mut list = RecordList::new();
        let tail = list.push_front(1);
        list.push_front(2);
        let head = list.push_front(3);

        assert_eq!(list.remove(head), Some(3));
        assert_eq!(list.front(), Some(&2));

        assert_eq!(list.remove(tail), Some(1));
        assert_eq!(list.back(), Some(&2));
        assert_eq!(list.len(), 1);
        list.validate_invariants();
    }

    #[test]
    fn get_mut_updates_without_reordering() {
        let mut list = RecordList::new();
        list.push_front(10);
        let id = list.push_front(20);
        list.push_front(30);

        if let Some(value) = list.get_mut(id) {
            *value = 25;
        }
        assert_eq!(collect(&list), vec![30, 25, 10]);
        list.validate_invariants();
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = RecordList::new();
        let id = list.push_front(1);
        list.push_front(2);

        list.clear();
        assert!(list.is_empty());
        assert!(!list.contains(id));
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.validate_invariants();
    }

    #[test]
    fn single_record_is_both_ends() {
        let mut list = RecordList::new();
        let id = list.push_front(7);

        assert_eq!(list.front(), Some(&7));
        assert_eq!(list.back(), Some(&7));
        assert_eq!(list.back_id(), Some(id));

        assert_eq!(list.pop_back(), Some(7));
        assert!(list.is_empty());
        list.validate_invariants();
    }
}
