use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use traffic_flow::scenario::{self, RandomScenario};
use traffic_flow::simulation::SimWorld;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScenarioKind {
    /// The five-intersection reference city
    Demo,
    /// A seeded random ring city
    Random,
}

#[derive(Parser)]
#[command(name = "traffic_flow")]
#[command(about = "Discrete traffic flow simulation over a graph of intersections")]
struct Cli {
    /// Built-in scenario to run
    #[arg(long, value_enum, default_value = "demo")]
    scenario: ScenarioKind,

    /// Run a command script instead of a built-in scenario
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seed for the random scenario
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of intersections in the random scenario
    #[arg(long, default_value = "8")]
    intersections: usize,

    /// Number of vehicles placed in the random scenario
    #[arg(long, default_value = "20")]
    vehicles: usize,

    /// Number of advance/light-change steps in the random scenario
    #[arg(long, default_value = "50")]
    steps: usize,

    /// Print the final map of lights and queues
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let commands = match (&cli.script, cli.scenario) {
        (Some(path), _) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            scenario::parse_script(&source)
                .with_context(|| format!("Failed to parse script {}", path.display()))?
        }
        (None, ScenarioKind::Demo) => scenario::demo_commands(),
        (None, ScenarioKind::Random) => RandomScenario {
            intersections: cli.intersections,
            vehicles: cli.vehicles,
            steps: cli.steps,
            seed: cli.seed,
        }
        .commands(),
    };

    let mut world = SimWorld::new();
    scenario::run(&mut world, commands);

    if cli.summary {
        world.print_summary();
        world.draw_map();
    }

    let stats = world.stats();
    let network = world.road_network();
    info!("=== SIMULATION COMPLETE ===");
    info!("Total intersections: {}", network.intersection_count());
    info!("Total roads: {}", network.road_count());
    info!("Vehicles added: {}", stats.vehicles_added);
    info!("Vehicles moved: {}", stats.vehicles_moved);
    info!("Vehicles dropped: {}", stats.vehicles_dropped);
    info!("Blocked advances: {}", stats.advances_blocked);
    info!("Emergencies processed: {}", stats.emergencies_processed);

    Ok(())
}
