//! Configuration types for search runs

use serde::{Deserialize, Serialize};

use crate::heuristic::Heuristics;

/// Hard cap on states dequeued per run
pub const DEFAULT_MAX_STATES: usize = 1_000_000;

/// Dequeues between cooperative checkpoints
pub const DEFAULT_YIELD_INTERVAL: usize = 4096;

/// Search run configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Exploration budget; a run that dequeues more states than this stops
    /// as exhausted
    pub max_states: usize,
    /// Checkpoint every N dequeues (0 disables checkpoints)
    pub yield_interval: usize,
    /// Heuristic weights for informed search
    pub heuristics: Heuristics,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_states: DEFAULT_MAX_STATES,
            yield_interval: DEFAULT_YIELD_INTERVAL,
            heuristics: Heuristics::default(),
        }
    }
}

impl SearchConfig {
    /// Set exploration budget
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Set checkpoint interval
    pub fn with_yield_interval(mut self, yield_interval: usize) -> Self {
        self.yield_interval = yield_interval;
        self
    }

    /// Set custom heuristics
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }
}
