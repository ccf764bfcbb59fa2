//! Main simulation world that ties everything together
//!
//! The world owns the road network, lights, queues and emergency dispatcher
//! and exposes them only through its operations. It has no clock: callers
//! decide which intersection advances and when a light changes.

use log::{info, warn};
use std::fmt;

use super::emergency::EmergencyDispatcher;
use super::events::{AdvanceOutcome, Dispatch, Movement, SimEvent};
use super::road_network::SimRoadNetwork;
use super::traffic_light::TrafficLightRegistry;
use super::types::{IntersectionId, LightState, Vehicle};
use super::vehicle_queue::VehicleQueueStore;

/// Running counters over the lifetime of a world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    pub vehicles_added: usize,
    pub vehicles_moved: usize,
    pub vehicles_dropped: usize,
    /// Advance calls that stopped at a red light
    pub advances_blocked: usize,
    pub light_changes: usize,
    pub emergencies_processed: usize,
}

/// What a presentation layer sees of one intersection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionSnapshot {
    pub id: IntersectionId,
    pub light: LightState,
    /// IDs of waiting vehicles, head first
    pub vehicles: Vec<String>,
}

/// Read-only view of every intersection, in the order they were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub intersections: Vec<IntersectionSnapshot>,
}

impl Snapshot {
    pub fn get(&self, intersection: &str) -> Option<&IntersectionSnapshot> {
        self.intersections
            .iter()
            .find(|snapshot| snapshot.id.as_str() == intersection)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for intersection in &self.intersections {
            let marker = match intersection.light {
                LightState::Green => 'G',
                LightState::Yellow => 'Y',
                LightState::Red => 'R',
            };
            writeln!(
                f,
                "  [{}] {:<6} {}",
                marker,
                intersection.id,
                intersection.vehicles.join(" ")
            )?;
        }
        Ok(())
    }
}

/// The main simulation world
#[derive(Default)]
pub struct SimWorld {
    road_network: SimRoadNetwork,
    lights: TrafficLightRegistry,
    queues: VehicleQueueStore,
    emergencies: EmergencyDispatcher,
    events: Vec<SimEvent>,
    stats: SimStats,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a one-way road between two intersections
    pub fn add_road(&mut self, from: &str, to: &str, travel_time: i64) {
        self.road_network.add_road(from, to, travel_time);
    }

    /// Place a vehicle at the back of an intersection's queue
    pub fn add_vehicle(&mut self, intersection: &str, vehicle: Vehicle) {
        self.road_network.ensure_intersection(intersection);
        self.queues.enqueue(intersection, vehicle);
        self.stats.vehicles_added += 1;
    }

    /// Hand a vehicle to the emergency dispatcher
    pub fn submit_emergency(&mut self, vehicle: Vehicle) {
        self.emergencies.submit(vehicle);
    }

    /// Let traffic flow out of an intersection
    ///
    /// A red light stops the very first vehicle and with it the whole queue.
    /// Any other color releases every vehicle that was waiting when the call
    /// started, so a single call drains the queue. Vehicles that loop
    /// straight back onto this intersection wait for the next call.
    pub fn advance_intersection(&mut self, intersection: &str) -> AdvanceOutcome {
        let waiting = self.queues.len(intersection);
        if waiting == 0 {
            self.record(SimEvent::NoVehicles {
                intersection: intersection.into(),
            });
            return AdvanceOutcome::NoVehiclesAtIntersection;
        }

        self.record(SimEvent::FlowStarted {
            intersection: intersection.into(),
        });

        let mut dispatched = Vec::with_capacity(waiting);
        for _ in 0..waiting {
            let Some(vehicle) = self.queues.pop_front(intersection) else {
                break;
            };

            let light = self.lights.status_of(intersection);
            self.record(SimEvent::LightObserved {
                intersection: intersection.into(),
                light,
                vehicle: vehicle.to_string(),
            });

            if !light.allows_movement() {
                let vehicle_id = vehicle.id.clone();
                self.queues.push_front(intersection, vehicle);
                self.stats.advances_blocked += 1;
                return AdvanceOutcome::AdvancedAndBlocked { vehicle_id };
            }

            dispatched.push(self.travel_to_next_intersection(vehicle, intersection));
        }

        AdvanceOutcome::AdvancedAndDrained { dispatched }
    }

    /// Send a vehicle down the first road out of its current intersection
    ///
    /// Routing ignores the vehicle's destination. Without an outgoing road
    /// the vehicle is dropped from the simulation.
    fn travel_to_next_intersection(&mut self, vehicle: Vehicle, current: &str) -> Dispatch {
        let Some(road) = self.road_network.first_road(current) else {
            let vehicle_id = vehicle.id;
            let intersection = IntersectionId::from(current);
            self.stats.vehicles_dropped += 1;
            self.record(SimEvent::Dropped {
                vehicle_id: vehicle_id.clone(),
                intersection: intersection.clone(),
            });
            return Dispatch::NoOutgoingRoad {
                vehicle_id,
                intersection,
            };
        };

        let movement = Movement {
            vehicle_id: vehicle.id.clone(),
            kind: vehicle.kind,
            from: road.from,
            to: road.to,
            travel_time: vehicle.effective_travel_time(road.travel_time),
        };

        self.queues.enqueue(movement.to.as_str(), vehicle);
        self.stats.vehicles_moved += 1;
        self.record(SimEvent::Moved(movement.clone()));
        Dispatch::Moved(movement)
    }

    /// Step an intersection's light along Green -> Yellow -> Red -> Green
    pub fn change_light(&mut self, intersection: &str) -> LightState {
        let light = self.lights.advance(intersection);
        self.stats.light_changes += 1;
        self.record(SimEvent::LightChanged {
            intersection: intersection.into(),
            light,
        });
        light
    }

    /// Serve everything in the emergency dispatcher, highest priority first
    ///
    /// Returns how many vehicles were processed. Processed vehicles leave
    /// the simulation.
    pub fn process_emergencies(&mut self) -> usize {
        let mut processed = 0;
        while let Some(vehicle) = self.emergencies.pop() {
            self.record(SimEvent::EmergencyProcessed {
                vehicle: vehicle.to_string(),
            });
            processed += 1;
        }
        self.stats.emergencies_processed += processed;
        processed
    }

    pub fn light_status(&self, intersection: &str) -> LightState {
        self.lights.status_of(intersection)
    }

    pub fn queue_len(&self, intersection: &str) -> usize {
        self.queues.len(intersection)
    }

    /// Vehicles waiting at an intersection, head first
    pub fn vehicles_at(&self, intersection: &str) -> impl Iterator<Item = &Vehicle> {
        self.queues.vehicles_at(intersection)
    }

    pub fn pending_emergencies(&self) -> usize {
        self.emergencies.len()
    }

    pub fn road_network(&self) -> &SimRoadNetwork {
        &self.road_network
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    /// Take every event recorded since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current light color and occupants of every intersection
    pub fn snapshot(&self) -> Snapshot {
        let intersections = self
            .road_network
            .intersections()
            .map(|id| IntersectionSnapshot {
                id: id.clone(),
                light: self.lights.status_of(id.as_str()),
                vehicles: self
                    .queues
                    .vehicles_at(id.as_str())
                    .map(|vehicle| vehicle.id.clone())
                    .collect(),
            })
            .collect();
        Snapshot { intersections }
    }

    fn record(&mut self, event: SimEvent) {
        match &event {
            SimEvent::Dropped { .. } => warn!("{}", event),
            _ => info!("{}", event),
        }
        self.events.push(event);
    }

    pub fn print_summary(&self) {
        println!("=== Traffic Simulation Summary ===");
        println!(
            "Intersections: {}, Roads: {}",
            self.road_network.intersection_count(),
            self.road_network.road_count()
        );
        println!("Queued vehicles: {}", self.queues.total());
        println!("Pending emergencies: {}", self.emergencies.len());
        println!();
    }

    /// Print each intersection with its light and waiting vehicles
    pub fn draw_map(&self) {
        print!("{}", self.snapshot());
    }
}
