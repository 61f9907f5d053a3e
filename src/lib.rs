//! # flowscroll-engine - adaptive task generation for an endless brain-training feed
//!
//! The engine picks the next mini-game, generates it at the user's current level for
//! that game, records the outcome, and moves the level toward the user's flow zone:
//!
//! - **Selector** - weighted category draw, uniform type draw
//! - **Generators** - one pure generator per task family, clamped at both ends of the level range
//! - **Recorder** - immutable results, streaks, analytics hand-off
//! - **Regulator** - windowed accuracy/time control for arithmetic, confidence-weighted steps for the rest
//!
//! ## Modules
//!
//! - [`types`] - task taxonomy, typed levels, task and result records
//! - [`profile`] - `UserStats`, migration of stored profiles, persistence stores
//! - [`content`] - static word, country and symbol pools
//! - [`generators`] - per-family task generators
//! - [`selector`] - category / type draw and free-mind insertion
//! - [`factory`] - task assembly, parallel batches
//! - [`recorder`] - sessions and result recording
//! - [`analytics`] - analytics sinks
//! - [`regulator`] - difficulty regulation
//! - [`validation`] - answer checking
//! - [`summary`] - profile summary
//! - [`engine`] - `FlowEngine`, the feed loop
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use flowscroll_engine::{EngineConfig, FlowEngine, NoopAnalytics, UserStats};
//!
//! let mut engine = FlowEngine::new(EngineConfig::default(), Arc::new(NoopAnalytics)).unwrap();
//! let mut profile = UserStats::new();
//!
//! let task = engine.next_task(&profile);
//! let completion = engine.complete_task(&mut profile, &task, true, 2_400);
//! assert_eq!(profile.history().len(), 1);
//! assert_eq!(completion.result.task_id, task.id());
//! ```

pub mod analytics;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod factory;
pub mod generators;
pub mod logging;
pub mod profile;
pub mod recorder;
pub mod regulator;
pub mod selector;
pub mod summary;
pub mod types;
pub mod validation;

pub use analytics::{AnalyticsEvent, AnalyticsSink, BroadcastAnalytics, BufferedAnalytics, NoopAnalytics};
pub use config::{EngineConfig, FeedConfig, RegulatorConfig, SelectorConfig};
pub use engine::{Completion, FeedMode, FlowEngine};
pub use error::{AnalyticsError, EngineError, Result};
pub use factory::{create_batch, create_task, create_task_of_type, LevelSnapshot};
pub use generators::{generate, generate_named, Generated};
pub use profile::{load_or_init, migrate, JsonFileStore, MemoryStore, ProfileStore, StreakData, UserStats};
pub use recorder::{build_result, ResultRecorder, Session};
pub use regulator::{update_level, Decision, LevelUpdate};
pub use selector::{FreeMindSchedule, Selector};
pub use summary::{summarize, ProfileSummary};
pub use types::{
    ContinuousLevel, DiscreteLevel, Level, Outcome, Regime, Solution, Task, TaskCategory,
    TaskContent, TaskResult, TaskType,
};
pub use validation::{check, Answer};
