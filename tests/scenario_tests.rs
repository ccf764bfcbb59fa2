//! Scenario and script tests

use traffic_flow::scenario::{self, Command, RandomScenario};
use traffic_flow::simulation::{LightState, SimWorld, Vehicle};

fn queue_ids(world: &SimWorld, intersection: &str) -> Vec<String> {
    world
        .vehicles_at(intersection)
        .map(|vehicle| vehicle.id.clone())
        .collect()
}

#[test]
fn test_demo_run_final_state() {
    let mut world = SimWorld::new();
    scenario::run(&mut world, scenario::demo_commands());

    assert_eq!(world.road_network().intersection_count(), 5);
    assert_eq!(world.road_network().road_count(), 6);

    // Everyone ends up at D: V3, V1, V2 from B, then V4 from C
    assert_eq!(queue_ids(&world, "D"), vec!["V3", "V1", "V2", "V4"]);
    for intersection in ["A", "B", "C", "E"] {
        assert_eq!(world.queue_len(intersection), 0);
    }

    assert_eq!(world.light_status("A"), LightState::Yellow);
    assert_eq!(world.light_status("B"), LightState::Yellow);
    assert_eq!(world.light_status("C"), LightState::Yellow);
    assert_eq!(world.light_status("D"), LightState::Green);

    let stats = world.stats();
    assert_eq!(stats.vehicles_added, 4);
    assert_eq!(stats.vehicles_moved, 6);
    assert_eq!(stats.vehicles_dropped, 0);
    assert_eq!(stats.emergencies_processed, 0);
}

#[test]
fn test_demo_emergency_from_c_halves_odd_weight() {
    let mut world = SimWorld::new();
    scenario::run(&mut world, scenario::demo_commands());

    let narration: Vec<String> = world
        .drain_events()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert!(narration.contains(
        &"Vehicle V4 (Emergency) is traveling faster from C to D (Travel time: 0 minutes)"
            .to_string()
    ));
    assert!(narration.contains(&"Traffic light at C changed to Yellow".to_string()));
}

#[test]
fn test_parse_script() {
    let commands = scenario::parse_script(
        "# city\n\nroad A B 2   # main street\nvehicle A emergency E1 A B\nemergency Regular R9 A B\nadvance A\nlight A\nprocess\n",
    )
    .expect("script parses");

    assert_eq!(
        commands,
        vec![
            Command::Road {
                from: "A".into(),
                to: "B".into(),
                travel_time: 2,
            },
            Command::Vehicle {
                at: "A".into(),
                vehicle: Vehicle::emergency("E1", "A", "B"),
            },
            Command::Emergency(Vehicle::regular("R9", "A", "B")),
            Command::Advance("A".into()),
            Command::Light("A".into()),
            Command::Process,
        ]
    );
}

#[test]
fn test_parse_script_reports_line_numbers() {
    let error = scenario::parse_script("road A B 2\n\nfly A B\n").unwrap_err();
    let message = format!("{:#}", error);
    assert!(message.contains("line 3"), "unexpected error: {}", message);

    let error = scenario::parse_script("road A B soon\n").unwrap_err();
    assert!(format!("{:#}", error).contains("invalid travel time"));
}

#[test]
fn test_random_scenario_is_deterministic() {
    let config = RandomScenario {
        intersections: 6,
        vehicles: 12,
        steps: 30,
        seed: 99,
    };

    let mut first = SimWorld::new();
    scenario::run(&mut first, config.commands());
    let mut second = SimWorld::new();
    scenario::run(&mut second, config.commands());

    assert_eq!(first.snapshot(), second.snapshot());
    assert_eq!(first.stats(), second.stats());
    assert_eq!(first.road_network().intersection_count(), 6);
    assert_eq!(first.road_network().road_count(), 6 + 3);
}

#[test]
fn test_random_scenario_conserves_vehicles() {
    let config = RandomScenario {
        intersections: 5,
        vehicles: 20,
        steps: 40,
        seed: 3,
    };
    let mut world = SimWorld::new();
    scenario::run(&mut world, config.commands());

    // The ring gives every intersection an exit, so nobody is dropped
    let stats = world.stats();
    assert_eq!(stats.vehicles_dropped, 0);
    let queued: usize = world
        .snapshot()
        .intersections
        .iter()
        .map(|intersection| intersection.vehicles.len())
        .sum();
    assert_eq!(queued, 20);
    assert_eq!(stats.emergencies_processed, 5);
    assert_eq!(world.pending_emergencies(), 0);
}
