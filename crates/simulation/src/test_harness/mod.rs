//! # TestCity: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` with a fluent builder so tests
//! can set up land, roads and buildings, advance the fixed schedule and
//! inspect the registries without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::tiles::TileRegistry;
use crate::world_init::SkipWorldInit;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up city state, then call `tick()` to advance the
/// simulation and query/assert on the resulting resources.
pub struct TestCity {
    app: App,
}

impl TestCity {
    /// Create a city with an unowned `width` x `height` tile grid, no roads,
    /// no buildings and the default starting treasury.
    pub fn new(width: u32, height: u32) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Insert the marker BEFORE the first update so init_world skips.
        app.insert_resource(SkipWorldInit);
        app.add_plugins(SimulationPlugin);
        app.insert_resource(TileRegistry::new(width, height));

        // Run one update so Startup systems execute (init_world will no-op).
        app.update();

        Self { app }
    }

    /// The 2x2 grid used by the smallest end-to-end scenarios.
    pub fn small() -> Self {
        Self::new(2, 2)
    }

    pub fn app(&mut self) -> &mut App {
        &mut self.app
    }
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_GRID_WIDTH, crate::config::DEFAULT_GRID_HEIGHT)
    }
}
