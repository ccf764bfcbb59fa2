//! Scenarios that drive a [`SimWorld`]
//!
//! The world has no scheduler of its own, so every run is a sequence of
//! [`Command`]s. They come from the built-in demo city, from a seeded random
//! generator, or from a line-based script.

use anyhow::{bail, Context, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::simulation::{SimWorld, Vehicle, VehicleKind};

/// A single call into the simulation world
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Road {
        from: String,
        to: String,
        travel_time: i64,
    },
    Vehicle {
        at: String,
        vehicle: Vehicle,
    },
    /// Submit straight to the emergency dispatcher
    Emergency(Vehicle),
    Advance(String),
    Light(String),
    Process,
}

impl Command {
    pub fn apply(self, world: &mut SimWorld) {
        debug!("Applying {:?}", self);
        match self {
            Command::Road {
                from,
                to,
                travel_time,
            } => world.add_road(&from, &to, travel_time),
            Command::Vehicle { at, vehicle } => world.add_vehicle(&at, vehicle),
            Command::Emergency(vehicle) => world.submit_emergency(vehicle),
            Command::Advance(intersection) => {
                world.advance_intersection(&intersection);
            }
            Command::Light(intersection) => {
                world.change_light(&intersection);
            }
            Command::Process => {
                world.process_emergencies();
            }
        }
    }
}

/// Apply commands in order
pub fn run(world: &mut SimWorld, commands: Vec<Command>) {
    for command in commands {
        command.apply(world);
    }
}

fn road(from: &str, to: &str, travel_time: i64) -> Command {
    Command::Road {
        from: from.to_owned(),
        to: to.to_owned(),
        travel_time,
    }
}

fn place(at: &str, vehicle: Vehicle) -> Command {
    Command::Vehicle {
        at: at.to_owned(),
        vehicle,
    }
}

/// The five-intersection reference city and its call sequence
pub fn demo_commands() -> Vec<Command> {
    vec![
        road("A", "B", 2),
        road("A", "C", 3),
        road("B", "D", 4),
        road("C", "D", 1),
        road("D", "E", 5),
        road("E", "A", 6),
        place("A", Vehicle::regular("V1", "A", "D")),
        place("A", Vehicle::emergency("V2", "A", "E")),
        place("B", Vehicle::regular("V3", "B", "C")),
        place("C", Vehicle::emergency("V4", "C", "A")),
        Command::Advance("A".into()),
        Command::Light("A".into()),
        Command::Advance("A".into()),
        Command::Process,
        Command::Light("B".into()),
        Command::Advance("B".into()),
        Command::Advance("C".into()),
        Command::Light("C".into()),
    ]
}

/// Parameters for a randomly generated city
#[derive(Debug, Clone, Copy)]
pub struct RandomScenario {
    pub intersections: usize,
    pub vehicles: usize,
    pub steps: usize,
    pub seed: u64,
}

/// Share of generated vehicles that are emergency vehicles
const EMERGENCY_SHARE: f64 = 0.2;

/// Share of random steps that change a light instead of advancing
const LIGHT_CHANGE_SHARE: f64 = 0.3;

/// One dispatcher submission per this many placed vehicles
const DISPATCH_RATIO: usize = 4;

/// Longest travel time put on a generated road
const MAX_TRAVEL_TIME: i64 = 10;

impl RandomScenario {
    /// Build a reproducible command sequence
    ///
    /// Intersections form a ring so every vehicle has somewhere to go, with
    /// extra chords added on top. A smaller, separate batch of vehicles is
    /// submitted to the emergency dispatcher.
    pub fn commands(&self) -> Vec<Command> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let count = self.intersections.max(1);
        let name = |index: usize| format!("I{}", index);
        let mut commands = Vec::new();

        for index in 0..count {
            let travel_time = rng.random_range(1..=MAX_TRAVEL_TIME);
            commands.push(road(&name(index), &name((index + 1) % count), travel_time));
        }
        for _ in 0..count / 2 {
            let from = rng.random_range(0..count);
            let to = rng.random_range(0..count);
            let travel_time = rng.random_range(1..=MAX_TRAVEL_TIME);
            commands.push(road(&name(from), &name(to), travel_time));
        }

        for index in 0..self.vehicles {
            let origin = name(rng.random_range(0..count));
            let destination = name(rng.random_range(0..count));
            let kind = if rng.random_bool(EMERGENCY_SHARE) {
                VehicleKind::Emergency
            } else {
                VehicleKind::Regular
            };
            let id = format!("V{}", index + 1);
            let vehicle = Vehicle::new(kind, id, origin.as_str(), destination);
            commands.push(place(&origin, vehicle));
        }

        for index in 0..self.vehicles / DISPATCH_RATIO {
            let origin = name(rng.random_range(0..count));
            let destination = name(rng.random_range(0..count));
            let kind = if rng.random_bool(EMERGENCY_SHARE) {
                VehicleKind::Emergency
            } else {
                VehicleKind::Regular
            };
            commands.push(Command::Emergency(Vehicle::new(
                kind,
                format!("D{}", index + 1),
                origin,
                destination,
            )));
        }

        for _ in 0..self.steps {
            let intersection = name(rng.random_range(0..count));
            if rng.random_bool(LIGHT_CHANGE_SHARE) {
                commands.push(Command::Light(intersection));
            } else {
                commands.push(Command::Advance(intersection));
            }
        }
        commands.push(Command::Process);

        commands
    }
}

/// Parse a command script
///
/// One command per line; blank lines and `#` comments are skipped:
///
/// ```text
/// road A B 2
/// vehicle A Regular V1 A D
/// emergency Emergency V9 A E
/// advance A
/// light A
/// process
/// ```
pub fn parse_script(source: &str) -> Result<Vec<Command>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then_some((index + 1, line))
        })
        .map(|(line_number, line)| {
            parse_line(line).with_context(|| format!("line {}: `{}`", line_number, line))
        })
        .collect()
}

fn parse_line(line: &str) -> Result<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["road", from, to, travel_time] => {
            let travel_time = travel_time
                .parse()
                .with_context(|| format!("invalid travel time {:?}", travel_time))?;
            road(from, to, travel_time)
        }
        ["vehicle", at, kind, id, origin, destination] => {
            place(at, parse_vehicle(kind, id, origin, destination))
        }
        ["emergency", kind, id, origin, destination] => {
            Command::Emergency(parse_vehicle(kind, id, origin, destination))
        }
        ["advance", intersection] => Command::Advance((*intersection).to_owned()),
        ["light", intersection] => Command::Light((*intersection).to_owned()),
        ["process"] => Command::Process,
        [keyword, ..] => bail!("unknown command or wrong argument count for {:?}", keyword),
        [] => bail!("empty command"),
    };
    Ok(command)
}

fn parse_vehicle(kind: &str, id: &str, origin: &str, destination: &str) -> Vehicle {
    let kind = match kind.parse::<VehicleKind>() {
        Ok(kind) => kind,
        Err(never) => match never {},
    };
    Vehicle::new(kind, id, origin, destination)
}
