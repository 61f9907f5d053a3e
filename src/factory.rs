//! Task Factory
//!
//! Selector draw + profile level lookup + generator call, wrapped into an immutable
//! [`Task`]. Reads the profile, never writes it, and keeps no buffering state.

use std::collections::BTreeMap;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::generators;
use crate::profile::UserStats;
use crate::recorder::now_ms;
use crate::selector::Selector;
use crate::types::{Task, TaskType, MIN_LEVEL};

/// Frozen copy of a profile's levels, shared by every task of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSnapshot {
    levels: BTreeMap<TaskType, f64>,
}

impl LevelSnapshot {
    pub fn of(profile: &UserStats) -> Self {
        Self {
            levels: profile.levels().clone(),
        }
    }

    pub fn level(&self, task_type: TaskType) -> f64 {
        self.levels.get(&task_type).copied().unwrap_or(MIN_LEVEL)
    }
}

fn task_id(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
}

/// Generate `task_type` at `level`, bypassing the selector.
pub fn create_task_of_type(task_type: TaskType, level: f64, rng: &mut dyn RngCore) -> Task {
    let generated = generators::generate(task_type, level, rng);
    Task {
        id: task_id(rng),
        category: task_type.category(),
        task_type,
        difficulty_level: level,
        question: generated.question,
        content: generated.content,
        solution: generated.solution,
        generated_at: now_ms(),
    }
}

pub fn create_task(profile: &UserStats, selector: &Selector, rng: &mut dyn RngCore) -> Task {
    let (_, task_type) = selector.select(rng);
    create_task_of_type(task_type, profile.raw_level(task_type), rng)
}

/// `count` tasks generated in parallel against one level snapshot.
///
/// Each task gets its own seed drawn up front from `rng`, so the batch is reproducible
/// for a seeded caller regardless of how rayon schedules the work.
pub fn create_batch(
    profile: &UserStats,
    selector: &Selector,
    count: usize,
    rng: &mut dyn RngCore,
) -> Vec<Task> {
    let snapshot = LevelSnapshot::of(profile);
    let seeds: Vec<u64> = (0..count).map(|_| rng.gen()).collect();

    let tasks: Vec<Task> = seeds
        .into_par_iter()
        .map(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (_, task_type) = selector.select(&mut rng);
            create_task_of_type(task_type, snapshot.level(task_type), &mut rng)
        })
        .collect();

    tracing::debug!(count = tasks.len(), "task batch generated");
    tasks
}
