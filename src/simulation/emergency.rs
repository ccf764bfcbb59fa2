//! Emergency dispatcher
//!
//! A priority queue that vehicles are submitted to explicitly. It is not fed
//! from the intersection queues: an emergency vehicle waiting at an
//! intersection is never promoted here on its own.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::types::{Priority, Vehicle};

/// Heap entry ordered by priority, then by submission order
#[derive(Debug)]
struct Pending {
    priority: Priority,
    sequence: u64,
    vehicle: Vehicle,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.priority, self.sequence).cmp(&(other.priority, other.sequence))
    }
}

#[derive(Debug, Default)]
pub struct EmergencyDispatcher {
    // min-heap: smallest (priority, sequence) comes out first
    heap: BinaryHeap<Reverse<Pending>>,
    next_sequence: u64,
}

impl EmergencyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, vehicle: Vehicle) {
        let pending = Pending {
            priority: vehicle.priority(),
            sequence: self.next_sequence,
            vehicle,
        };
        self.next_sequence += 1;
        self.heap.push(Reverse(pending));
    }

    /// Remove the vehicle that should be served next
    ///
    /// Emergency vehicles come before regular ones; ties go to whoever was
    /// submitted first.
    pub fn pop(&mut self) -> Option<Vehicle> {
        self.heap.pop().map(|Reverse(pending)| pending.vehicle)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
