//! `MinQueue`: min-priority queue with first-in-first-out tie-breaking.
//!
//! Both the shortest-path oracle and the time-expanded search pop the
//! lowest priority first.  When priorities are equal the entry pushed first
//! wins, so a search that pushes neighbours in graph order breaks ties in
//! graph order, independent of the payload type.
//!
//! The payload never takes part in ordering and needs no trait bounds.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

struct Entry<P, T> {
    priority: P,
    seq:      u64,
    item:     T,
}

impl<P: Ord, T> PartialEq for Entry<P, T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<P: Ord, T> Eq for Entry<P, T> {}

impl<P: Ord, T> PartialOrd for Entry<P, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: Ord, T> Ord for Entry<P, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Binary min-heap keyed on `P`; equal keys pop in insertion order.
pub struct MinQueue<P, T> {
    // Reverse makes BinaryHeap (max) behave as a min-heap.
    heap:     BinaryHeap<Reverse<Entry<P, T>>>,
    next_seq: u64,
}

impl<P: Ord, T> MinQueue<P, T> {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity), next_seq: 0 }
    }

    pub fn push(&mut self, priority: P, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { priority, seq, item }));
    }

    /// Remove and return the entry with the lowest priority.
    pub fn pop(&mut self) -> Option<(P, T)> {
        self.heap.pop().map(|Reverse(e)| (e.priority, e.item))
    }

    /// The lowest priority currently queued.
    pub fn peek_priority(&self) -> Option<&P> {
        self.heap.peek().map(|Reverse(e)| &e.priority)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry.  The insertion counter keeps running.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<P: Ord, T> Default for MinQueue<P, T> {
    fn default() -> Self {
        Self::new()
    }
}
