//! Standalone traffic simulation module
//!
//! This module contains the discrete traffic simulation: the road graph,
//! traffic lights, per-intersection queues, the emergency dispatcher and
//! the world that drives them.

mod emergency;
mod events;
mod road_network;
mod traffic_light;
mod types;
mod vehicle_queue;
mod world;

pub use emergency::EmergencyDispatcher;
pub use events::{AdvanceOutcome, Dispatch, Movement, SimEvent};
pub use road_network::{RoadEdge, SimRoadNetwork};
pub use traffic_light::TrafficLightRegistry;
pub use types::{IntersectionId, LightState, Priority, SimRoad, Vehicle, VehicleKind};
pub use vehicle_queue::VehicleQueueStore;
pub use world::{IntersectionSnapshot, SimStats, SimWorld, Snapshot};
