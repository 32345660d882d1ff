use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game_params::LandParams;

/// Money source the placement and economy code pays through.
pub trait Treasury {
    fn balance(&self) -> f64;

    fn can_afford(&self, amount: f64) -> bool {
        self.balance() >= amount
    }

    /// Withdraw `amount`. Returns `false` and leaves the balance untouched if
    /// funds are short.
    fn deduct(&mut self, amount: f64) -> bool;

    fn add(&mut self, amount: f64);
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityBudget {
    pub treasury: f64,
    /// Income paid by the most recent economy tick.
    pub last_income: f64,
    pub total_income: f64,
    pub total_spent: f64,
}

impl Default for CityBudget {
    fn default() -> Self {
        Self::with_starting_money(LandParams::default().starting_money)
    }
}

impl CityBudget {
    pub fn with_starting_money(amount: f64) -> Self {
        Self {
            treasury: amount,
            last_income: 0.0,
            total_income: 0.0,
            total_spent: 0.0,
        }
    }
}

impl Treasury for CityBudget {
    fn balance(&self) -> f64 {
        self.treasury
    }

    fn deduct(&mut self, amount: f64) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.treasury -= amount;
        self.total_spent += amount;
        true
    }

    fn add(&mut self, amount: f64) {
        self.treasury += amount;
        self.last_income = amount;
        self.total_income += amount;
    }
}
