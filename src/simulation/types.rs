//! Core types for the traffic simulation
//!
//! Intersections are plain string keys; vehicles are value objects that move
//! between per-intersection queues.

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A wrapper type for intersection keys
///
/// Intersections have no entity of their own. The key indexes the road
/// graph, the vehicle queues and the light registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntersectionId(pub String);

impl IntersectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IntersectionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for IntersectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// Lets the stores look up by `&str` without allocating a key.
impl Borrow<str> for IntersectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntersectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type of vehicle in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    /// Ambulances, fire trucks and the like: travel at half the road time
    Emergency,
    /// Everything else
    Regular,
}

impl VehicleKind {
    pub fn priority(self) -> Priority {
        match self {
            VehicleKind::Emergency => Priority::Emergency,
            VehicleKind::Regular => Priority::Regular,
        }
    }
}

/// Parsing never fails: only "emergency" (any case) is an emergency vehicle,
/// every other label is a regular one.
impl FromStr for VehicleKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("emergency") {
            Ok(VehicleKind::Emergency)
        } else {
            Ok(VehicleKind::Regular)
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleKind::Emergency => f.write_str("Emergency"),
            VehicleKind::Regular => f.write_str("Regular"),
        }
    }
}

/// Dispatch priority of a vehicle
///
/// The order is total and ascending: the *smaller* value is served first,
/// so `Priority::Emergency < Priority::Regular`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Emergency,
    Regular,
}

/// A vehicle waiting at or travelling between intersections
///
/// Deliberately not `Clone`: a vehicle lives in exactly one queue at a time
/// and is moved, never copied, between them.
#[derive(Debug, PartialEq, Eq)]
pub struct Vehicle {
    pub kind: VehicleKind,
    pub id: String,
    pub origin: IntersectionId,
    /// Descriptive only; routing does not stop a vehicle here
    pub destination: IntersectionId,
}

impl Vehicle {
    pub fn new(
        kind: VehicleKind,
        id: impl Into<String>,
        origin: impl Into<IntersectionId>,
        destination: impl Into<IntersectionId>,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    pub fn emergency(
        id: impl Into<String>,
        origin: impl Into<IntersectionId>,
        destination: impl Into<IntersectionId>,
    ) -> Self {
        Self::new(VehicleKind::Emergency, id, origin, destination)
    }

    pub fn regular(
        id: impl Into<String>,
        origin: impl Into<IntersectionId>,
        destination: impl Into<IntersectionId>,
    ) -> Self {
        Self::new(VehicleKind::Regular, id, origin, destination)
    }

    pub fn is_emergency(&self) -> bool {
        self.kind == VehicleKind::Emergency
    }

    pub fn priority(&self) -> Priority {
        self.kind.priority()
    }

    /// Time this vehicle needs to cover a road of the given weight
    ///
    /// Emergency vehicles take half the time, truncated.
    pub fn effective_travel_time(&self, travel_time: i64) -> i64 {
        if self.is_emergency() {
            travel_time / 2
        } else {
            travel_time
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Vehicle {} (From {} to {})",
            self.kind, self.id, self.origin, self.destination
        )
    }
}

/// Traffic light color at an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightState {
    #[default]
    Green,
    Yellow,
    Red,
}

impl LightState {
    /// The next color in the Green -> Yellow -> Red -> Green cycle
    pub fn next(self) -> Self {
        match self {
            LightState::Green => LightState::Yellow,
            LightState::Yellow => LightState::Red,
            LightState::Red => LightState::Green,
        }
    }

    /// Whether vehicles may leave the intersection
    pub fn allows_movement(self) -> bool {
        !matches!(self, LightState::Red)
    }
}

/// Unknown color names fall back to Green, same as an unset light.
impl FromStr for LightState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Yellow" => LightState::Yellow,
            "Red" => LightState::Red,
            _ => LightState::Green,
        })
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightState::Green => f.write_str("Green"),
            LightState::Yellow => f.write_str("Yellow"),
            LightState::Red => f.write_str("Red"),
        }
    }
}

/// A directed road segment connecting two intersections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRoad {
    pub from: IntersectionId,
    pub to: IntersectionId,
    /// Minutes to traverse; not validated, negative weights pass through
    pub travel_time: i64,
}
