//! Task Selector
//!
//! Weighted category draw, then a uniform draw among the category's rotation.
//! No history awareness: repeats are expected.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::config::SelectorConfig;
use crate::error::{EngineError, Result};
use crate::types::{TaskCategory, TaskType};

#[derive(Debug, Clone)]
pub struct Selector {
    categories: [TaskCategory; 4],
    weights: WeightedIndex<f64>,
}

impl Selector {
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        let weighted = config.weighted_categories();
        let weights = WeightedIndex::new(weighted.iter().map(|(_, w)| *w))
            .map_err(|err| EngineError::InvalidConfig(format!("selector weights: {err}")))?;
        Ok(Self {
            categories: weighted.map(|(category, _)| category),
            weights,
        })
    }

    pub fn select(&self, rng: &mut dyn RngCore) -> (TaskCategory, TaskType) {
        let category = self.categories[self.weights.sample(&mut *rng)];
        let rotation = category.rotation();
        let task_type = rotation.choose(rng).copied().unwrap_or(rotation[0]);
        tracing::trace!(%category, %task_type, "selected");
        (category, task_type)
    }
}

/// Triggered free-mind insertion: once `interval_ms` of session time has passed since
/// the last break (or session start), the next feed slot is a breathing task.
#[derive(Debug, Clone)]
pub struct FreeMindSchedule {
    interval_ms: Option<u64>,
    last_break_ms: i64,
}

impl FreeMindSchedule {
    pub fn new(interval_ms: Option<u64>, session_start_ms: i64) -> Self {
        Self {
            interval_ms,
            last_break_ms: session_start_ms,
        }
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        match self.interval_ms {
            Some(interval) => now_ms.saturating_sub(self.last_break_ms) >= interval as i64,
            None => false,
        }
    }

    pub fn mark_served(&mut self, now_ms: i64) {
        self.last_break_ms = now_ms;
    }
}
