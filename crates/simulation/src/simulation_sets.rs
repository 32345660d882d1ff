//! Simulation ordering via `SystemSet` phases.
//!
//! ```text
//! PreSim  →  Simulation
//! ```
//!
//! * **PreSim** – Tick counter and queued game actions. Every placement,
//!   purchase and demolition of a tick lands here, so later phases only ever
//!   see whole buildings.
//! * **Simulation** – The economy tick.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule,
/// configured as a chain by `SimulationPlugin`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
}
