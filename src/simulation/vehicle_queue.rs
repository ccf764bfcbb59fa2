//! Per-intersection vehicle queues
//!
//! Each intersection owns a FIFO of waiting vehicles. Queues appear lazily
//! on first insertion and are never removed, only emptied.

use std::collections::{HashMap, VecDeque};

use super::types::{IntersectionId, Vehicle};

#[derive(Debug, Default)]
pub struct VehicleQueueStore {
    queues: HashMap<IntersectionId, VecDeque<Vehicle>>,
}

impl VehicleQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle to the tail of an intersection's queue
    pub fn enqueue(&mut self, intersection: &str, vehicle: Vehicle) {
        self.queue_mut(intersection).push_back(vehicle);
    }

    /// Put a vehicle back at the head, ahead of everyone else
    pub fn push_front(&mut self, intersection: &str, vehicle: Vehicle) {
        self.queue_mut(intersection).push_front(vehicle);
    }

    pub fn pop_front(&mut self, intersection: &str) -> Option<Vehicle> {
        self.queues.get_mut(intersection)?.pop_front()
    }

    pub fn len(&self, intersection: &str) -> usize {
        self.queues.get(intersection).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, intersection: &str) -> bool {
        self.len(intersection) == 0
    }

    /// Vehicles waiting at an intersection, head first
    pub fn vehicles_at(&self, intersection: &str) -> impl Iterator<Item = &Vehicle> {
        self.queues.get(intersection).into_iter().flatten()
    }

    /// Total number of queued vehicles across the network
    pub fn total(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    fn queue_mut(&mut self, intersection: &str) -> &mut VecDeque<Vehicle> {
        self.queues
            .entry(IntersectionId::from(intersection))
            .or_default()
    }
}
