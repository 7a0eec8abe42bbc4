use std::collections::VecDeque;

use crate::error::{Error, Result};

/// Sorted-insertion priority queue.
///
/// Items come out lowest priority first; equal priorities come out in
/// insertion order. Insertion is linear, which is fine at interactive grid sizes.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, P = usize> {
    items: VecDeque<(T, P)>,
}

impl<T, P: PartialOrd> PriorityQueue<T, P> {
    pub fn new() -> Self {
        PriorityQueue {
            items: VecDeque::new(),
        }
    }

    /// Inserts `item` in front of the first entry whose priority is strictly greater.
    pub fn enqueue(&mut self, item: T, priority: P) {
        let idx = self.items.partition_point(|(_, p)| *p <= priority);
        self.items.insert(idx, (item, priority));
    }

    /// Removes and returns the item with the lowest priority.
    ///
    /// Returns [`Error::EmptyQueue`] when there is nothing to dequeue.
    pub fn dequeue(&mut self) -> Result<T> {
        self.items
            .pop_front()
            .map(|(item, _)| item)
            .ok_or(Error::EmptyQueue)
    }

    pub fn peek_priority(&self) -> Option<&P> {
        self.items.front().map(|(_, p)| p)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T, P: PartialOrd> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
