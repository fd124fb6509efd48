//! Min-priority queue over arena nodes
//!
//! Entries with equal keys come out in insertion order, so keying by cost
//! alone gives level-order (breadth-first) expansion.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::search::arena::NodeId;

#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<(u32, u64, NodeId)>>,
    sequence: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// O(log n)
    pub fn insert(&mut self, node: NodeId, key: u32) {
        self.heap.push(Reverse((key, self.sequence, node)));
        self.sequence += 1;
    }

    /// Remove the entry with the smallest key, O(log n)
    pub fn extract_min(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, node))| node)
    }

    /// Smallest key currently queued
    pub fn peek_key(&self) -> Option<u32> {
        self.heap.peek().map(|Reverse((key, _, _))| *key)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
