//! LRU List Module
//!
//! Arena-backed doubly linked list that keeps cache entries in recency order.
//!
//! Nodes live in a `Vec` of slots and link to each other by index, so a
//! [`NodeId`] stays valid for as long as its node is linked. Freed slots are
//! recycled through a free list.

// == Node Handle ==
/// Stable handle to a node in an [`LruList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

// == LRU List ==
/// Recency-ordered list.
///
/// - Head = most recently used
/// - Tail = least recently used
#[derive(Debug)]
pub struct LruList<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
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
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a value at the most recently used position.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: None,
            next: None,
        };

        let idx = match self.free {
            Some(idx) => {
                if let Slot::Vacant { next_free } = self.slots[idx] {
                    self.free = next_free;
                }
                self.slots[idx] = Slot::Occupied(node);
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    ///
    /// Promoting the current head leaves the list untouched.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id.0) || self.node(id.0).is_none() {
            return;
        }
        self.unlink(id.0);
        self.link_front(id.0);
    }

    // == Remove ==
    /// Unlinks a node and returns its value.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.node(id.0)?;
        self.unlink(id.0);

        let slot = std::mem::replace(
            &mut self.slots[id.0],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(id.0);
        self.len -= 1;

        match slot {
            Slot::Occupied(node) => Some(node.value),
            Slot::Vacant { .. } => None,
        }
    }

    // == Pop Back ==
    /// Removes and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(NodeId(tail))
    }

    // == Peek Back ==
    /// Returns the least recently used value without removing it.
    #[cfg(test)]
    pub(crate) fn peek_back(&self) -> Option<&T> {
        self.tail.and_then(|idx| self.node(idx)).map(|n| &n.value)
    }

    /// Returns a reference to the value behind `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id.0).map(|n| &n.value)
    }

    /// Returns a mutable reference to the value behind `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => Some(&mut node.value),
            _ => None,
        }
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        match self.slots.get(idx) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match &mut self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("linked index points at a vacant slot"),
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }
}

/// Iterator over an [`LruList`], most recently used first.
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.value)
    }
}
