pub mod budget;
pub mod engine;
pub mod plugin;
#[cfg(test)]
mod tests;

pub use budget::{CityBudget, Treasury};
pub use engine::{allocate_and_collect, EconomyEngine, EconomyPhase, TickReport};
pub use plugin::{economy_tick, EconomyPlugin};
