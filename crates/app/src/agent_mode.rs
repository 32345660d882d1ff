//! Headless `--agent` mode: a blocking loop that reads JSON commands from
//! stdin and writes one JSON response per line to stdout.
//!
//! ## Protocol
//!
//! Each stdin line is a JSON object with a `"cmd"` discriminator:
//!
//! ```text
//! {"cmd":"act","action":{"PurchaseTile":{"player":1,"tile":[0,0]}}}
//! {"cmd":"step","ticks":10}
//! {"cmd":"status"}
//! {"cmd":"quit"}
//! ```
//!
//! Each response carries a `"type"` field. Logs go to stderr.

use std::io::{BufRead, Write};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use simulation::buildings::BuildingRegistry;
use simulation::economy::CityBudget;
use simulation::game_actions::{ActionQueue, ActionResult, ActionResultLog, ActionSource, GameAction};
use simulation::TickCounter;

/// Upper bound on a single `step` so a typo cannot hang the loop.
const MAX_STEP_TICKS: u32 = 10_000;

#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
enum AgentCommand {
    Act { action: GameAction },
    BatchAct { actions: Vec<GameAction> },
    Step { ticks: u32 },
    Status,
    Quit,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AgentResponse {
    Ready,
    ActionResult {
        result: ActionResult,
    },
    BatchResult {
        results: Vec<ActionResult>,
    },
    StepComplete {
        tick: u64,
    },
    Status {
        tick: u64,
        treasury: f64,
        buildings: usize,
        residents: u32,
        happy_residents: u32,
    },
    Error {
        message: String,
    },
    Goodbye,
}

pub fn run_agent_mode(mut app: App) {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    respond(&mut stdout, &AgentResponse::Ready);
    info!("Agent mode ready, waiting for commands on stdin");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin read error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AgentCommand>(&line) {
            Ok(cmd) => process_command(cmd, &mut app),
            Err(e) => AgentResponse::Error {
                message: format!("Parse error: {e}"),
            },
        };
        respond(&mut stdout, &response);
        if matches!(response, AgentResponse::Goodbye) {
            break;
        }
    }

    info!("Agent mode shutting down");
}

fn respond(out: &mut impl Write, response: &AgentResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
            let _ = out.flush();
        }
        Err(e) => error!("Failed to encode response: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: AgentCommand, app: &mut App) -> AgentResponse {
    match cmd {
        AgentCommand::Act { action } => AgentResponse::ActionResult {
            result: act(app, action),
        },
        AgentCommand::BatchAct { actions } => AgentResponse::BatchResult {
            results: actions.into_iter().map(|a| act(app, a)).collect(),
        },
        AgentCommand::Step { ticks } => {
            step(app, ticks.min(MAX_STEP_TICKS));
            AgentResponse::StepComplete {
                tick: current_tick(app),
            }
        }
        AgentCommand::Status => {
            let world = app.world();
            let buildings = world.resource::<BuildingRegistry>();
            AgentResponse::Status {
                tick: current_tick(app),
                treasury: world.resource::<CityBudget>().treasury,
                buildings: buildings.len(),
                residents: buildings.total_residents(),
                happy_residents: buildings.total_happy_residents(),
            }
        }
        AgentCommand::Quit => AgentResponse::Goodbye,
    }
}

/// Queue one action and run a fixed tick so the executor picks it up.
fn act(app: &mut App, action: GameAction) -> ActionResult {
    let tick = current_tick(app);
    app.world_mut()
        .resource_mut::<ActionQueue>()
        .push(tick, ActionSource::Player, action);
    step(app, 1);
    app.world()
        .resource::<ActionResultLog>()
        .last()
        .map(|(_, r)| r.clone())
        .unwrap_or(ActionResult::Success)
}

pub fn step(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

fn current_tick(app: &App) -> u64 {
    app.world().resource::<TickCounter>().0
}
