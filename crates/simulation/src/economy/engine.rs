//! Resident allocation and income.
//!
//! Every tick starts from a clean slate: nobody is happy and every job and
//! shop slot is free. Residential buildings are then served in insertion
//! order, each one greedily taking jobs first and shopping second from the
//! buildings around it, so earlier homes get first pick.

use std::time::Duration;

use bevy::prelude::*;

use crate::buildings::{BuildingId, BuildingKind, BuildingRegistry};
use crate::config::MAX_ECONOMY_TICKS_PER_STEP;
use crate::game_params::{is_valid_interval, EconomyParams};

use super::budget::Treasury;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EconomyPhase {
    #[default]
    Idle,
    Ticking,
}

/// Summary of one allocation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub total_income: f64,
    pub happy_residents: u32,
    pub total_residents: u32,
    /// Residential buildings served.
    pub buildings_processed: usize,
    /// Neighbour references that no longer resolved to a building.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Allocation {
    pub happy: u32,
    pub skipped: usize,
}

/// Fill `home`'s residents from `nearby`, in order: jobs, then shopping.
pub(crate) fn allocate_residents(
    buildings: &mut BuildingRegistry,
    home: BuildingId,
    nearby: &[BuildingId],
) -> Allocation {
    let mut allocation = Allocation::default();
    let Some(mut unhappy) = buildings.get(home).map(|b| b.residents) else {
        return allocation;
    };

    for &id in nearby {
        if unhappy == 0 {
            break;
        }
        let Some(neighbor) = buildings.get_mut(id) else {
            warn!("Economy tick: building #{} vanished, skipping", id.0);
            allocation.skipped += 1;
            continue;
        };

        let jobs = unhappy.min(neighbor.available_jobs);
        neighbor.available_jobs -= jobs;
        unhappy -= jobs;
        allocation.happy += jobs;

        let shopping = unhappy.min(neighbor.available_shopping);
        neighbor.available_shopping -= shopping;
        unhappy -= shopping;
        allocation.happy += shopping;
    }

    if let Some(b) = buildings.get_mut(home) {
        b.happy_residents = allocation.happy;
    }
    allocation
}

/// One full allocation pass over the registry. Only touches
/// `happy_residents`, `available_jobs` and `available_shopping`.
pub fn allocate_and_collect(buildings: &mut BuildingRegistry, params: &EconomyParams) -> TickReport {
    buildings.reset_allocations();

    let mut report = TickReport::default();
    for home in buildings.ids_of_kind(BuildingKind::Residential) {
        let Some(anchor) = buildings.get(home).map(|b| b.anchor) else {
            report.skipped += 1;
            continue;
        };
        let nearby = buildings.find_within_radius(anchor, params.search_radius);
        let allocation = allocate_residents(buildings, home, &nearby);

        let Some(b) = buildings.get(home) else {
            continue;
        };
        let unhappy = b.residents - allocation.happy;
        report.total_income += (allocation.happy as f64 * params.happy_resident_income
            + unhappy as f64 * params.unhappy_resident_income)
            * params.update_interval_secs as f64;
        report.happy_residents += allocation.happy;
        report.total_residents += b.residents;
        report.buildings_processed += 1;
        report.skipped += allocation.skipped;
    }
    report
}

/// Drives economy ticks on a fixed interval and pays income into a treasury.
#[derive(Resource, Debug, Clone)]
pub struct EconomyEngine {
    timer: Timer,
    phase: EconomyPhase,
    ticks_run: u64,
    last_report: Option<TickReport>,
    /// Bits of the last interval refused by `set_interval`, so it is logged once.
    rejected_interval: Option<u32>,
}

impl Default for EconomyEngine {
    fn default() -> Self {
        Self::new(EconomyParams::default().update_interval_secs)
    }
}

impl EconomyEngine {
    /// An invalid interval falls back to the default one.
    pub fn new(interval_secs: f32) -> Self {
        let interval_secs = if is_valid_interval(interval_secs) {
            interval_secs
        } else {
            let fallback = EconomyParams::default().update_interval_secs;
            warn!("Economy interval {interval_secs}s is invalid, using {fallback}s");
            fallback
        };
        Self {
            timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
            phase: EconomyPhase::Idle,
            ticks_run: 0,
            last_report: None,
            rejected_interval: None,
        }
    }

    pub fn phase(&self) -> EconomyPhase {
        self.phase
    }

    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    pub fn interval(&self) -> Duration {
        self.timer.duration()
    }

    /// Follow a changed tick interval without losing elapsed time. An invalid
    /// interval is ignored and the current one kept.
    pub fn set_interval(&mut self, interval_secs: f32) {
        if !is_valid_interval(interval_secs) {
            if self.rejected_interval != Some(interval_secs.to_bits()) {
                warn!(
                    "Ignoring economy interval {interval_secs}s, keeping {:?}",
                    self.timer.duration()
                );
                self.rejected_interval = Some(interval_secs.to_bits());
            }
            return;
        }
        self.rejected_interval = None;
        let interval = Duration::from_secs_f32(interval_secs);
        if self.timer.duration() != interval {
            self.timer.set_duration(interval);
        }
    }

    /// Advance the timer and return how many ticks fell due, at most
    /// [`MAX_ECONOMY_TICKS_PER_STEP`].
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.timer.tick(delta);
        let due = self.timer.times_finished_this_tick();
        if due > MAX_ECONOMY_TICKS_PER_STEP {
            debug!("Economy backlog of {due} ticks capped at {MAX_ECONOMY_TICKS_PER_STEP}");
        }
        due.min(MAX_ECONOMY_TICKS_PER_STEP)
    }

    /// Run one tick. Returns `None` if a tick is already in progress.
    pub fn run_tick<T: Treasury + ?Sized>(
        &mut self,
        buildings: &mut BuildingRegistry,
        params: &EconomyParams,
        treasury: &mut T,
    ) -> Option<TickReport> {
        if self.phase == EconomyPhase::Ticking {
            warn!("Economy tick requested while another is running");
            return None;
        }
        self.phase = EconomyPhase::Ticking;

        // Income is scaled by the interval the timer actually runs on.
        let fallback;
        let params = if params.has_valid_interval() {
            params
        } else {
            fallback = EconomyParams {
                update_interval_secs: self.interval().as_secs_f32(),
                ..params.clone()
            };
            &fallback
        };
        let report = allocate_and_collect(buildings, params);
        if report.total_income > 0.0 {
            treasury.add(report.total_income);
        }
        debug!(
            "Economy tick {}: {}/{} residents happy, income {:.2}",
            self.ticks_run, report.happy_residents, report.total_residents, report.total_income
        );

        self.ticks_run += 1;
        self.last_report = Some(report.clone());
        self.phase = EconomyPhase::Idle;
        Some(report)
    }
}
