//! Feed orchestration.
//!
//! `FlowEngine` owns the RNG, the session and the free-mind schedule. The profile stays
//! with the caller and is passed in explicitly: shared for generation, exclusive for
//! recording. Results must be fed back in the order they happened.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsSink;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::factory;
use crate::profile::{self, ProfileStore, UserStats};
use crate::recorder::{self, ResultRecorder, Session};
use crate::regulator::{self, LevelUpdate};
use crate::selector::{FreeMindSchedule, Selector};
use crate::types::{Task, TaskResult, TaskType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Record, regulate, persist
    #[default]
    Solo,
    /// Report to analytics only; the profile never changes
    Duel,
}

/// What one finished task did to the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub result: TaskResult,
    /// `None` in duel mode
    pub update: Option<LevelUpdate>,
}

pub struct FlowEngine {
    config: EngineConfig,
    selector: Selector,
    rng: ChaCha8Rng,
    recorder: ResultRecorder,
    store: Option<Arc<dyn ProfileStore>>,
    session: Session,
    schedule: FreeMindSchedule,
    mode: FeedMode,
}

impl FlowEngine {
    pub fn new(config: EngineConfig, analytics: Arc<dyn AnalyticsSink>) -> Result<Self> {
        config.validate()?;
        let selector = Selector::new(&config.selector)?;
        let rng = match config.feed.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let session = Session::start();
        let schedule =
            FreeMindSchedule::new(config.feed.free_mind_interval_ms, session.started_at_ms());
        tracing::info!(session_id = session.id(), seeded = config.feed.seed.is_some(), "engine started");
        Ok(Self {
            config,
            selector,
            rng,
            recorder: ResultRecorder::new(analytics),
            store: None,
            session,
            schedule,
            mode: FeedMode::Solo,
        })
    }

    pub fn with_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> FeedMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: FeedMode) {
        if self.mode != mode {
            tracing::info!(?mode, "feed mode changed");
        }
        self.mode = mode;
    }

    /// Start a new session and restart the free-mind clock.
    pub fn restart_session(&mut self) {
        self.session = Session::start();
        self.schedule = FreeMindSchedule::new(
            self.config.feed.free_mind_interval_ms,
            self.session.started_at_ms(),
        );
    }

    /// Stored profile, migrated, or a fresh one when there is no store or nothing usable.
    pub fn load_profile(&self) -> UserStats {
        match &self.store {
            Some(store) => profile::load_or_init(store.as_ref()),
            None => UserStats::new(),
        }
    }

    pub fn next_task(&mut self, profile: &UserStats) -> Task {
        self.next_task_at(profile, recorder::now_ms())
    }

    /// Next solo-feed task; a breathing break once the free-mind interval has elapsed.
    pub fn next_task_at(&mut self, profile: &UserStats, now_ms: i64) -> Task {
        if self.mode == FeedMode::Solo && self.schedule.is_due(now_ms) {
            self.schedule.mark_served(now_ms);
            tracing::info!(session_id = self.session.id(), "free-mind break inserted");
            let ty = TaskType::FreeMindBreathe;
            return factory::create_task_of_type(ty, profile.raw_level(ty), &mut self.rng);
        }
        factory::create_task(profile, &self.selector, &mut self.rng)
    }

    /// `count` upcoming tasks, generated in parallel against the current levels.
    pub fn prefetch(&mut self, profile: &UserStats, count: usize) -> Vec<Task> {
        factory::create_batch(profile, &self.selector, count, &mut self.rng)
    }

    /// A full look-ahead buffer of `feed.buffer_size` tasks.
    pub fn fill_buffer(&mut self, profile: &UserStats) -> Vec<Task> {
        self.prefetch(profile, self.config.feed.buffer_size)
    }

    /// Fixed task list for a duel, all generated from one level snapshot.
    pub fn duel_tasks(&mut self, profile: &UserStats) -> Vec<Task> {
        let count = self.config.feed.duel_task_count;
        tracing::info!(count, "duel task list generated");
        self.prefetch(profile, count)
    }

    pub fn complete_task(
        &mut self,
        profile: &mut UserStats,
        task: &Task,
        success: bool,
        time_spent_ms: u64,
    ) -> Completion {
        self.finish(profile, task, success, time_spent_ms, false)
    }

    /// Abandoned tasks are finalized as skipped.
    pub fn skip_task(&mut self, profile: &mut UserStats, task: &Task, time_spent_ms: u64) -> Completion {
        self.finish(profile, task, false, time_spent_ms, true)
    }

    fn finish(
        &mut self,
        profile: &mut UserStats,
        task: &Task,
        success: bool,
        time_spent_ms: u64,
        was_skipped: bool,
    ) -> Completion {
        match self.mode {
            FeedMode::Duel => {
                let result = recorder::build_result(
                    task,
                    success,
                    time_spent_ms,
                    was_skipped,
                    &self.session,
                    recorder::now_ms(),
                );
                self.recorder.report(profile.user_id(), &result);
                Completion { result, update: None }
            }
            FeedMode::Solo => {
                let result = self.recorder.record_result(
                    profile,
                    task,
                    success,
                    time_spent_ms,
                    was_skipped,
                    &self.session,
                );
                let update = regulator::update_level(profile, &result, &self.config.regulator);
                self.persist(profile);
                Completion {
                    result,
                    update: Some(update),
                }
            }
        }
    }

    fn persist(&self, profile: &UserStats) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(err) = store.save(profile) {
            tracing::warn!(error = %err, user_id = profile.user_id(), "failed to persist profile");
        }
    }
}
