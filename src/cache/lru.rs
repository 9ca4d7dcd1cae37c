//! LRU Ordering Module
//!
//! Arena-backed doubly-linked list that tracks recency for cache eviction.

// == Constants ==
/// Null link marker.
const NIL: usize = usize::MAX;

// == Slot ==
/// Stable handle to a node in an [`LruList`].
///
/// A slot stays valid until its node is removed; after that the index may be
/// reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(usize);

#[derive(Debug)]
struct Node<T> {
    item: Option<T>,
    prev: usize,
    next: usize,
}

// == LRU List ==
/// Tracks access order for LRU eviction strategy.
///
/// Nodes live in a `Vec` and link to each other by index:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// All operations are O(1). Freed indices are recycled on the next push.
#[derive(Debug)]
pub struct LruList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an item as the most recently used and returns its slot.
    pub fn push_front(&mut self, item: T) -> Slot {
        let node = Node {
            item: Some(item),
            prev: NIL,
            next: NIL,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        Slot(idx)
    }

    // == Move To Front ==
    /// Marks a slot as recently used. Stale slots are ignored.
    pub fn move_to_front(&mut self, slot: Slot) {
        if !self.is_live(slot.0) || self.head == slot.0 {
            return;
        }
        self.unlink(slot.0);
        self.link_front(slot.0);
    }

    // == Remove ==
    /// Unlinks a slot and returns its item, or None if the slot is stale.
    pub fn remove(&mut self, slot: Slot) -> Option<T> {
        if !self.is_live(slot.0) {
            return None;
        }
        self.unlink(slot.0);
        self.len -= 1;
        self.free.push(slot.0);
        self.nodes[slot.0].item.take()
    }

    // == Pop Back ==
    /// Returns and removes the least recently used item.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        self.remove(Slot(self.tail))
    }

    // == Peek Back ==
    /// Returns the least recently used item without removing it.
    pub fn peek_back(&self) -> Option<&T> {
        self.nodes.get(self.tail).and_then(|node| node.item.as_ref())
    }

    pub fn get(&self, slot: Slot) -> Option<&T> {
        self.nodes.get(slot.0).and_then(|node| node.item.as_ref())
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        self.nodes.get_mut(slot.0).and_then(|node| node.item.as_mut())
    }

    // == Length ==
    /// Returns the number of live items.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every item and releases the arena.
    pub fn clear(&mut self) {
        self.nodes = Vec::new();
        self.free = Vec::new();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    // == Iter ==
    /// Iterates items from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn is_live(&self, idx: usize) -> bool {
        self.nodes
            .get(idx)
            .is_some_and(|node| node.item.is_some())
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };

        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }

        let node = &mut self.nodes[idx];
        node.prev = NIL;
        node.next = NIL;
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[idx];
            node.prev = NIL;
            node.next = old_head;
        }

        if old_head == NIL {
            self.tail = idx;
        } else {
            self.nodes[old_head].prev = idx;
        }
        self.head = idx;
    }
}

// == Iterator ==
/// MRU→LRU iterator over an [`LruList`].
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.cursor)?;
        self.cursor = node.next;
        node.item.as_ref()
    }
}
