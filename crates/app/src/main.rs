//! Headless city runner.
//!
//! ```text
//! tilecity [--catalog buildings.json] [--ticks N] [--demo] [--agent]
//! ```
//!
//! `--demo` seeds a small street through the action queue before running.
//! `--agent` switches to the line-based JSON protocol on stdin/stdout.

mod agent_mode;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::buildings::{BuildingCatalog, BuildingRegistry};
use simulation::economy::CityBudget;
use simulation::game_actions::{ActionQueue, ActionResultLog, ActionSource, GameAction};
use simulation::grid_geometry::Rotation;
use simulation::tiles::PlayerId;

const DEFAULT_TICKS: u32 = 100;
const DEMO_PLAYER: PlayerId = PlayerId(1);

#[derive(Debug, Default)]
struct Args {
    catalog: Option<String>,
    ticks: Option<u32>,
    demo: bool,
    agent: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--catalog" => {
                args.catalog = Some(iter.next().ok_or("--catalog needs a path")?);
            }
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a number")?;
                args.ticks = Some(
                    value
                        .parse()
                        .map_err(|e| format!("bad --ticks value {value:?}: {e}"))?,
                );
            }
            "--demo" => args.demo = true,
            "--agent" => args.agent = true,
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    Ok(args)
}

fn load_catalog(path: &str) -> Result<BuildingCatalog, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("reading {path}: {e}"))?;
    BuildingCatalog::from_json(&json).map_err(|e| format!("parsing {path}: {e}"))
}

/// Queue the purchases, road and buildings for a one-street town.
fn queue_demo_street(app: &mut App) {
    let mut actions = Vec::new();
    for y in 0..2 {
        for x in 0..2 {
            actions.push(GameAction::PurchaseTile {
                player: DEMO_PLAYER,
                tile: (x, y),
            });
        }
    }
    actions.push(GameAction::PlaceRoad {
        start: (-2, 1),
        end: (7, 1),
    });
    for (template, x) in [("House", 0.0), ("Shop", 0.2), ("House", 0.4), ("Workshop", 0.6)] {
        actions.push(GameAction::PlaceBuilding {
            player: DEMO_PLAYER,
            template: template.to_string(),
            position: (x, 0.0),
            rotation: Rotation::Deg0,
        });
    }

    let mut queue = app.world_mut().resource_mut::<ActionQueue>();
    for action in actions {
        queue.push(0, ActionSource::Replay, action);
    }
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("tilecity: {e}");
            std::process::exit(2);
        }
    };

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        LogPlugin {
            filter: "info,simulation=debug".to_string(),
            ..default()
        },
        simulation::SimulationPlugin,
    ));

    if let Some(path) = &args.catalog {
        match load_catalog(path) {
            Ok(catalog) => {
                app.insert_resource(catalog);
            }
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        }
    }

    // Run Startup so the tile grid and budget exist.
    app.update();

    if args.agent {
        agent_mode::run_agent_mode(app);
        return;
    }

    if args.demo {
        queue_demo_street(&mut app);
    }

    let ticks = args.ticks.unwrap_or(DEFAULT_TICKS);
    agent_mode::step(&mut app, ticks);

    let world = app.world();
    let log = world.resource::<ActionResultLog>();
    if log.error_count() > 0 {
        warn!("{} of {} actions failed", log.error_count(), log.len());
    }
    let buildings = world.resource::<BuildingRegistry>();
    info!(
        "After {ticks} ticks: treasury {:.2}, {} buildings, {}/{} residents happy",
        world.resource::<CityBudget>().treasury,
        buildings.len(),
        buildings.total_happy_residents(),
        buildings.total_residents()
    );
}
