//! Integration tests for FlowEngine: feed loop, persistence, duel mode, analytics.

use std::sync::Arc;

use flowscroll_engine::profile::MemoryStore;
use flowscroll_engine::{
    check, summarize, Answer, BroadcastAnalytics, BufferedAnalytics, EngineConfig, FeedMode,
    FlowEngine, NoopAnalytics, ProfileStore, Solution, TaskCategory, TaskType, UserStats,
};

fn seeded_config(seed: u64) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.feed.seed = Some(seed);
    config.feed.free_mind_interval_ms = None;
    config
}

#[test]
fn test_task_level_is_frozen_at_generation() {
    let mut engine = FlowEngine::new(seeded_config(1), Arc::new(NoopAnalytics)).unwrap();
    let mut profile = UserStats::with_user_id("frozen");

    let buffered = engine.prefetch(&profile, 10);
    let levels: Vec<f64> = buffered.iter().map(|t| t.difficulty_level()).collect();

    // Play a stream of fast wins, moving every level the buffered tasks were drawn from.
    for task in &buffered {
        engine.complete_task(&mut profile, task, true, 1_200);
    }
    for (task, level) in buffered.iter().zip(&levels) {
        assert_eq!(task.difficulty_level(), *level);
        assert!(profile.raw_level(task.task_type()) > task.difficulty_level());
    }
    for (result, level) in profile.history().iter().zip(&levels) {
        assert_eq!(result.difficulty_level, *level);
    }
}

#[test]
fn test_seeded_engines_serve_the_same_feed() {
    let profile = UserStats::with_user_id("same");
    let mut a = FlowEngine::new(seeded_config(77), Arc::new(NoopAnalytics)).unwrap();
    let mut b = FlowEngine::new(seeded_config(77), Arc::new(NoopAnalytics)).unwrap();
    for _ in 0..25 {
        let (x, y) = (a.next_task(&profile), b.next_task(&profile));
        assert_eq!(x.id(), y.id());
        assert_eq!(x.task_type(), y.task_type());
        assert_eq!(x.content(), y.content());
    }
}

#[test]
fn test_profile_persists_after_every_solo_result() {
    let store = Arc::new(MemoryStore::new());
    let mut engine = FlowEngine::new(seeded_config(3), Arc::new(NoopAnalytics))
        .unwrap()
        .with_store(store.clone());
    let mut profile = engine.load_profile();

    for i in 0..12 {
        let task = engine.next_task(&profile);
        if i % 4 == 0 {
            engine.skip_task(&mut profile, &task, 700);
        } else {
            engine.complete_task(&mut profile, &task, i % 3 != 0, 3_500);
        }
    }
    assert_eq!(store.save_count(), 12);

    // A restarted engine picks up exactly where the last one stopped.
    let restarted = FlowEngine::new(seeded_config(4), Arc::new(NoopAnalytics))
        .unwrap()
        .with_store(store.clone());
    let reloaded = restarted.load_profile();
    assert_eq!(reloaded, profile);
    assert_eq!(reloaded.history().len(), 12);
}

struct FailingStore;

impl ProfileStore for FailingStore {
    fn load(&self) -> flowscroll_engine::Result<Option<serde_json::Value>> {
        Err(std::io::Error::other("disk unavailable").into())
    }

    fn save(&self, _stats: &UserStats) -> flowscroll_engine::Result<()> {
        Err(std::io::Error::other("disk unavailable").into())
    }
}

#[test]
fn test_storage_failures_never_interrupt_the_feed() {
    let mut engine = FlowEngine::new(seeded_config(5), Arc::new(NoopAnalytics))
        .unwrap()
        .with_store(Arc::new(FailingStore));
    let mut profile = engine.load_profile();
    for _ in 0..5 {
        let task = engine.next_task(&profile);
        engine.complete_task(&mut profile, &task, true, 2_000);
    }
    assert_eq!(profile.history().len(), 5);
}

#[test]
fn test_analytics_receives_every_result_in_both_modes() {
    let sink = Arc::new(BufferedAnalytics::new(100));
    let mut engine = FlowEngine::new(seeded_config(9), sink.clone()).unwrap();
    let mut profile = UserStats::with_user_id("tracked");

    let task = engine.next_task(&profile);
    engine.complete_task(&mut profile, &task, true, 1_000);
    engine.set_mode(FeedMode::Duel);
    let duel = engine.duel_tasks(&profile);
    engine.complete_task(&mut profile, &duel[0], false, 5_000);

    let events = sink.drain();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.user_id == "tracked"));
    assert!(events.iter().all(|e| e.session_id == engine.session().id()));
    assert_eq!(profile.history().len(), 1);
}

#[test]
fn test_broadcast_subscriber_sees_events() {
    let sink = Arc::new(BroadcastAnalytics::new(16));
    let mut rx = sink.subscribe();
    let mut engine = FlowEngine::new(seeded_config(10), sink.clone()).unwrap();
    let mut profile = UserStats::with_user_id("live");

    let task = engine.next_task(&profile);
    let completion = engine.complete_task(&mut profile, &task, true, 1_000);
    let event = rx.try_recv().unwrap();
    assert_eq!(event.task_id, completion.result.task_id);
    assert_eq!(event.task_type, task.task_type());
}

#[test]
fn test_duel_list_is_fixed_and_never_contains_breaks() {
    let mut config = seeded_config(12);
    config.feed.free_mind_interval_ms = Some(1);
    let mut engine = FlowEngine::new(config, Arc::new(NoopAnalytics)).unwrap();
    engine.set_mode(FeedMode::Duel);
    let profile = UserStats::with_user_id("duel");

    let tasks = engine.duel_tasks(&profile);
    assert_eq!(tasks.len(), 20);
    assert!(tasks.iter().all(|t| t.category() != TaskCategory::FreeMind));
    assert!(tasks.iter().all(|t| t.difficulty_level() == 1.0));
    let next = engine.next_task_at(&profile, engine.session().started_at_ms() + 10_000);
    assert_ne!(next.task_type(), TaskType::FreeMindBreathe);
}

#[test]
fn test_validated_answers_drive_a_session() {
    let mut engine = FlowEngine::new(seeded_config(21), Arc::new(NoopAnalytics)).unwrap();
    let mut profile = UserStats::with_user_id("solver");

    for _ in 0..40 {
        let task = engine.next_task(&profile);
        let answer = match task.solution() {
            Solution::Number(n) => Answer::Number(*n),
            Solution::Grid(grid) => Answer::Grid(*grid),
            Solution::Sequence(pads) => Answer::Pads(pads.clone()),
            Solution::Pattern(beats) => Answer::Taps(beats.iter().map(|b| b.time_offset_ms).collect()),
            Solution::Index(index) => Answer::Choice(*index),
            Solution::Interactive => Answer::None,
        };
        let success = check(&task, &answer);
        assert!(success, "{} rejected its own solution", task.task_type());
        engine.complete_task(&mut profile, &task, success, 2_000);
    }

    let summary = summarize(&profile, 10);
    assert_eq!(summary.tasks_completed, 40);
    assert_eq!(summary.recent.len(), 10);
    assert!(summary.brain_level > 20.0);
    assert!(profile.history().iter().all(|r| r.success));
}
