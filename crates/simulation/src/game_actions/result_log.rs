//! Ring-buffer log of recently executed game actions and their results.
//!
//! Lets the headless driver, tests and any UI inspect what the executor did
//! without keeping their own bookkeeping.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{ActionResult, GameAction};

/// Maximum number of entries retained in the ring buffer.
const MAX_ENTRIES: usize = 64;

#[derive(Resource, Debug, Clone, Default)]
pub struct ActionResultLog {
    entries: VecDeque<(GameAction, ActionResult)>,
}

impl ActionResultLog {
    /// Record a new action/result pair, evicting the oldest when full.
    pub fn push(&mut self, action: GameAction, result: ActionResult) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back((action, result));
    }

    /// The last `n` entries (or fewer), oldest first.
    pub fn last_n(&self, n: usize) -> Vec<&(GameAction, ActionResult)> {
        let start = self.entries.len().saturating_sub(n);
        self.entries.range(start..).collect()
    }

    pub fn last(&self) -> Option<&(GameAction, ActionResult)> {
        self.entries.back()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| !r.is_success()).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
