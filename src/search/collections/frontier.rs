use std::{cmp::Ordering, collections::BinaryHeap};

use crate::search::weight::Cost;

/// Entry of a [`Frontier`].
///
/// `sequence` is the insertion counter of the owning frontier. It breaks
/// priority ties in insertion order and keeps nodes out of all comparisons.
#[derive(Clone, Debug)]
pub struct FrontierEntry<N, W, T = ()> {
    pub priority: W,
    pub sequence: u64,
    pub node: N,
    pub payload: T,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl<N, W: Cost, T> Ord for FrontierEntry<N, W, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip both orderings, lower priority first and on a tie the entry
        // that was pushed first.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<N, W: Cost, T> PartialOrd for FrontierEntry<N, W, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, W: Cost, T> PartialEq for FrontierEntry<N, W, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N, W: Cost, T> Eq for FrontierEntry<N, W, T> {}

/// Min-ordered work queue keyed by `(priority, sequence)`.
///
/// There is no decrease-key; callers push duplicates and discard stale
/// entries on pop.
pub struct Frontier<N, W, T = ()> {
    heap: BinaryHeap<FrontierEntry<N, W, T>>,
    next_sequence: u64,
}

impl<N, W: Cost, T> Default for Frontier<N, W, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, W: Cost, T> Frontier<N, W, T> {
    pub fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, priority: W, node: N, payload: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            priority,
            sequence,
            node,
            payload,
        });
    }

    /// Removes and returns the entry with the lowest priority, the oldest one
    /// among equal priorities.
    pub fn pop(&mut self) -> Option<FrontierEntry<N, W, T>> {
        self.heap.pop()
    }
}
