use std::collections::VecDeque;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::GameAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum ActionSource {
    Player,
    /// Mirrored from an external ledger.
    Ledger,
    Replay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct QueuedAction {
    pub tick: u64,
    pub source: ActionSource,
    pub action: GameAction,
}

/// Actions waiting to run, ordered by the tick they fall due. Actions due on
/// the same tick keep the order they were pushed in.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ActionQueue {
    pending: VecDeque<QueuedAction>,
}

impl ActionQueue {
    pub fn push(&mut self, tick: u64, source: ActionSource, action: GameAction) {
        self.push_queued(QueuedAction {
            tick,
            source,
            action,
        });
    }

    pub fn push_queued(&mut self, queued: QueuedAction) {
        let at = self.pending.partition_point(|q| q.tick <= queued.tick);
        self.pending.insert(at, queued);
    }

    /// Remove every action due at or before `tick`, in execution order.
    pub fn drain_due(&mut self, tick: u64) -> Vec<QueuedAction> {
        let due = self.pending.partition_point(|q| q.tick <= tick);
        self.pending.drain(..due).collect()
    }

    pub fn next_due_tick(&self) -> Option<u64> {
        self.pending.front().map(|q| q.tick)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
