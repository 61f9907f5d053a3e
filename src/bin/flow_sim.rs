//! Plays the feed with a synthetic player and prints the resulting profile summary.
//!
//! Usage: `flow-sim [tasks] [profile.json]`

use std::collections::VecDeque;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use flowscroll_engine::logging::init_tracing;
use flowscroll_engine::{
    summarize, BufferedAnalytics, EngineConfig, EngineError, FlowEngine, JsonFileStore, UserStats,
};

const DEFAULT_TASKS: usize = 50;
const SKIP_RATE: f64 = 0.05;

/// Gets slower and less accurate as the level climbs.
struct SyntheticPlayer {
    rng: ChaCha8Rng,
}

impl SyntheticPlayer {
    fn success_probability(level: f64) -> f64 {
        (0.97 - 0.07 * (level - 1.0)).clamp(0.15, 0.97)
    }

    fn play(&mut self, level: f64) -> (bool, bool, u64) {
        if self.rng.gen_bool(SKIP_RATE) {
            return (false, true, self.rng.gen_range(300..4_000));
        }
        let success = self.rng.gen_bool(Self::success_probability(level));
        let base = 1_500.0 + 900.0 * level;
        let time = base * self.rng.gen_range(0.6..1.6);
        (success, false, time.round() as u64)
    }
}

fn main() -> Result<(), EngineError> {
    let _ = dotenvy::dotenv();
    let config = EngineConfig::from_env();
    let _log_guard = init_tracing(&config.log_level);

    let mut args = std::env::args().skip(1);
    let tasks = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_TASKS);
    let profile_path = args.next();

    let analytics = Arc::new(BufferedAnalytics::new(config.feed.analytics_buffer_capacity));
    let player_seed = config.feed.seed.map(|s| s.wrapping_add(1));
    let mut engine = FlowEngine::new(config, analytics.clone())?;
    if let Some(path) = profile_path {
        engine = engine.with_store(Arc::new(JsonFileStore::new(path)));
    }
    let mut profile: UserStats = engine.load_profile();

    let mut player = SyntheticPlayer {
        rng: player_seed
            .map(ChaCha8Rng::seed_from_u64)
            .unwrap_or_else(ChaCha8Rng::from_entropy),
    };

    // Rolling look-ahead window; buffered tasks keep the level they were generated at.
    let mut buffer: VecDeque<_> = engine.fill_buffer(&profile).into();
    for _ in 0..tasks {
        buffer.push_back(engine.next_task(&profile));
        let Some(task) = buffer.pop_front() else {
            break;
        };

        let (success, skipped, time_spent_ms) = player.play(task.difficulty_level());
        let completion = if skipped {
            engine.skip_task(&mut profile, &task, time_spent_ms)
        } else {
            engine.complete_task(&mut profile, &task, success, time_spent_ms)
        };
        if let Some(update) = completion.update {
            tracing::info!(
                task_type = %update.task_type,
                outcome = completion.result.outcome.as_str(),
                level = %update.level,
                decision = update.decision.as_str(),
                "task finished"
            );
        }
        analytics.drain();
    }

    let summary = summarize(&profile, 20);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
