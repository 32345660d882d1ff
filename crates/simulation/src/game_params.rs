//! Data-driven game parameters.
//!
//! Tunable numbers live in a single [`GameParams`] resource so a headless run
//! or a test can override them without touching the constants in
//! [`crate::config`]. Geometry (sub-tile pitch, scan distances) stays in
//! `config`; anything a designer would balance lives here.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

// ---------------------------------------------------------------------------
// Economy parameters
// ---------------------------------------------------------------------------

/// Tunables for the resident/job/shopping economy tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct EconomyParams {
    /// Seconds of simulated time between economy ticks.
    pub update_interval_secs: f32,
    /// Neighbourhood radius in sub-tiles, measured between anchors.
    pub search_radius: f32,
    /// Income per happy resident per second.
    pub happy_resident_income: f64,
    /// Income per unhappy resident per second.
    pub unhappy_resident_income: f64,
}

impl EconomyParams {
    /// Whether `update_interval_secs` can drive a repeating timer.
    pub fn has_valid_interval(&self) -> bool {
        is_valid_interval(self.update_interval_secs)
    }
}

/// A tick interval must convert to a non-zero [`Duration`].
pub fn is_valid_interval(secs: f32) -> bool {
    secs > 0.0 && Duration::try_from_secs_f32(secs).is_ok_and(|d| !d.is_zero())
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            update_interval_secs: 1.0,
            search_radius: 2.0,
            happy_resident_income: 0.1,
            unhappy_resident_income: 0.05,
        }
    }
}

// ---------------------------------------------------------------------------
// Land parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct LandParams {
    /// Price of one tile.
    pub tile_cost: f64,
    /// Treasury of a new city.
    pub starting_money: f64,
    pub grid_width: u32,
    pub grid_height: u32,
}

impl Default for LandParams {
    fn default() -> Self {
        Self {
            tile_cost: 100.0,
            starting_money: 1000.0,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
        }
    }
}

// ---------------------------------------------------------------------------
// GameParams resource
// ---------------------------------------------------------------------------

/// Central resource holding all data-driven game parameters.
#[derive(
    Resource,
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
    Default,
)]
pub struct GameParams {
    pub economy: EconomyParams,
    pub land: LandParams,
}

impl GameParams {
    /// Parse a full or partial override; missing sections keep their defaults.
    /// A non-positive or non-finite economy interval is rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Overrides {
            economy: Option<EconomyParams>,
            land: Option<LandParams>,
        }
        let overrides: Overrides = serde_json::from_str(json)?;
        let params = Self {
            economy: overrides.economy.unwrap_or_default(),
            land: overrides.land.unwrap_or_default(),
        };
        if !params.economy.has_valid_interval() {
            return Err(serde::de::Error::custom(format!(
                "economy.update_interval_secs must be a positive number of seconds, got {}",
                params.economy.update_interval_secs
            )));
        }
        Ok(params)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
