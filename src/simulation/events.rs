//! Observable simulation events and operation outcomes
//!
//! Nothing in the engine fails. Every situation (empty queue, red light,
//! dead end) is reported as an outcome or an event instead.

use std::fmt;

use super::types::{IntersectionId, LightState, VehicleKind};

/// A vehicle leaving one intersection for the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub vehicle_id: String,
    pub kind: VehicleKind,
    pub from: IntersectionId,
    pub to: IntersectionId,
    /// Travel time after the emergency discount
    pub travel_time: i64,
}

/// What happened to a single vehicle released by a non-red light
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Vehicle took the first outgoing road and now waits at its end
    Moved(Movement),
    /// Dead end: the vehicle left the network
    NoOutgoingRoad {
        vehicle_id: String,
        intersection: IntersectionId,
    },
}

/// Result of advancing an intersection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Queue absent or empty; nothing changed
    NoVehiclesAtIntersection,
    /// Red light: the head vehicle stays put and so does everyone behind it
    AdvancedAndBlocked { vehicle_id: String },
    /// Yellow or green: every vehicle that was waiting has been dispatched
    AdvancedAndDrained { dispatched: Vec<Dispatch> },
}

impl AdvanceOutcome {
    /// Movements made during this advance, in dispatch order
    pub fn movements(&self) -> impl Iterator<Item = &Movement> {
        let dispatched: &[Dispatch] = match self {
            AdvanceOutcome::AdvancedAndDrained { dispatched } => dispatched.as_slice(),
            _ => &[],
        };
        dispatched.iter().filter_map(|dispatch| match dispatch {
            Dispatch::Moved(movement) => Some(movement),
            Dispatch::NoOutgoingRoad { .. } => None,
        })
    }
}

/// Narration emitted by the engine, in the order things happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    NoVehicles {
        intersection: IntersectionId,
    },
    FlowStarted {
        intersection: IntersectionId,
    },
    /// A vehicle at the head of the queue looked at the light
    LightObserved {
        intersection: IntersectionId,
        light: LightState,
        vehicle: String,
    },
    Moved(Movement),
    Dropped {
        vehicle_id: String,
        intersection: IntersectionId,
    },
    LightChanged {
        intersection: IntersectionId,
        light: LightState,
    },
    EmergencyProcessed {
        vehicle: String,
    },
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::NoVehicles { intersection } => {
                write!(f, "No vehicles at intersection {}", intersection)
            }
            SimEvent::FlowStarted { intersection } => {
                write!(f, "Simulating traffic flow at intersection {}", intersection)
            }
            SimEvent::LightObserved {
                intersection,
                light,
                vehicle,
            } => {
                let action = match light {
                    LightState::Red => "is waiting",
                    LightState::Yellow => "is preparing to move",
                    LightState::Green => "is proceeding",
                };
                write!(
                    f,
                    "Traffic light at {} is {}. Vehicle {} {}.",
                    intersection, light, vehicle, action
                )
            }
            SimEvent::Moved(movement) => match movement.kind {
                VehicleKind::Emergency => write!(
                    f,
                    "Vehicle {} (Emergency) is traveling faster from {} to {} (Travel time: {} minutes)",
                    movement.vehicle_id, movement.from, movement.to, movement.travel_time
                ),
                VehicleKind::Regular => write!(
                    f,
                    "Vehicle {} (Regular) traveling from {} to {} (Travel time: {} minutes)",
                    movement.vehicle_id, movement.from, movement.to, movement.travel_time
                ),
            },
            SimEvent::Dropped {
                vehicle_id,
                intersection,
            } => write!(
                f,
                "Vehicle {} has no outgoing road at {} and leaves the network",
                vehicle_id, intersection
            ),
            SimEvent::LightChanged {
                intersection,
                light,
            } => write!(f, "Traffic light at {} changed to {}", intersection, light),
            SimEvent::EmergencyProcessed { vehicle } => {
                write!(f, "Processing emergency vehicle: {} with priority.", vehicle)
            }
        }
    }
}
