//! User Profile Store
//!
//! `UserStats` is the per-user aggregate the engine reads and the regulator mutates.
//! Levels and history are crate-private for writing: only the factory reads levels and
//! only the recorder / regulator write them.
//!
//! Stored profiles of any age are accepted through [`migrate`], which never fails.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::{Level, Outcome, TaskResult, TaskType, MIN_LEVEL};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakData {
    pub correct: u32,
    pub wrong: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub(crate) user_id: String,
    pub(crate) levels: BTreeMap<TaskType, f64>,
    pub(crate) confidence: BTreeMap<TaskType, f64>,
    pub(crate) streaks: BTreeMap<TaskType, StreakData>,
    pub(crate) history: Vec<TaskResult>,
    /// History entries of task types this build does not know, kept verbatim
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) retained_history: Vec<Value>,
    pub(crate) total_time_ms: u64,
}

impl Default for UserStats {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStats {
    /// Fresh profile: new user id, every type at level 1.
    pub fn new() -> Self {
        Self::with_user_id(new_user_id())
    }

    pub fn with_user_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            levels: TaskType::ALL.iter().map(|&ty| (ty, MIN_LEVEL)).collect(),
            confidence: BTreeMap::new(),
            streaks: BTreeMap::new(),
            history: Vec::new(),
            retained_history: Vec::new(),
            total_time_ms: 0,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Typed level for `task_type`; a missing entry reads as level 1.
    pub fn level(&self, task_type: TaskType) -> Level {
        Level::for_type(task_type, self.raw_level(task_type))
    }

    pub fn raw_level(&self, task_type: TaskType) -> f64 {
        self.levels.get(&task_type).copied().unwrap_or(MIN_LEVEL)
    }

    pub fn levels(&self) -> &BTreeMap<TaskType, f64> {
        &self.levels
    }

    pub(crate) fn set_level(&mut self, task_type: TaskType, level: Level) {
        self.levels.insert(task_type, level.value());
    }

    /// Stored confidence, if the type was ever regulated.
    pub fn confidence(&self, task_type: TaskType) -> Option<f64> {
        self.confidence.get(&task_type).copied()
    }

    pub(crate) fn set_confidence(&mut self, task_type: TaskType, confidence: f64) {
        self.confidence.insert(task_type, confidence.clamp(0.0, 1.0));
    }

    pub fn streak(&self, task_type: TaskType) -> StreakData {
        self.streaks.get(&task_type).copied().unwrap_or_default()
    }

    pub fn history(&self) -> &[TaskResult] {
        &self.history
    }

    pub fn retained_history(&self) -> &[Value] {
        &self.retained_history
    }

    /// Results of one type, oldest first.
    pub fn history_of(&self, task_type: TaskType) -> impl Iterator<Item = &TaskResult> {
        self.history.iter().filter(move |r| r.task_type == task_type)
    }

    pub fn total_time_ms(&self) -> u64 {
        self.total_time_ms
    }

    pub(crate) fn push_result(&mut self, result: TaskResult) {
        self.total_time_ms = self.total_time_ms.saturating_add(result.time_spent_ms);
        self.history.push(result);
    }

    pub(crate) fn update_streak(&mut self, task_type: TaskType, outcome: Outcome) {
        let streak = self.streaks.entry(task_type).or_default();
        match outcome {
            Outcome::Success => {
                streak.correct += 1;
                streak.wrong = 0;
            }
            Outcome::Failed => {
                streak.wrong += 1;
                streak.correct = 0;
            }
            Outcome::Skipped => {}
        }
    }
}

fn new_user_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ==================== Migration ====================

/// Bring any stored shape up to the current profile. Never fails: anything unusable is
/// replaced by its default and logged. `migrate(migrate(x)) == migrate(x)`.
pub fn migrate(raw: Value) -> UserStats {
    let Value::Object(mut obj) = raw else {
        tracing::warn!("stored profile is not an object, starting fresh");
        return UserStats::new();
    };

    let user_id = match obj.get("userId").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => {
            tracing::info!("profile without user id, assigning a new one");
            new_user_id()
        }
    };

    let mut stats = UserStats::with_user_id(user_id);

    if let Some(Value::Object(levels)) = obj.get("levels") {
        for (key, value) in levels {
            let (Some(task_type), Some(raw)) = (TaskType::parse(key), finite(value)) else {
                continue;
            };
            stats.set_level(task_type, Level::for_type(task_type, raw));
        }
    }

    if let Some(Value::Object(confidence)) = obj.get("confidence") {
        for (key, value) in confidence {
            if let (Some(task_type), Some(raw)) = (TaskType::parse(key), finite(value)) {
                stats.set_confidence(task_type, raw);
            }
        }
    }

    if let Some(Value::Object(streaks)) = obj.get("streaks") {
        for (key, value) in streaks {
            let Some(task_type) = TaskType::parse(key) else {
                continue;
            };
            if let Ok(streak) = serde_json::from_value::<StreakData>(value.clone()) {
                stats.streaks.insert(task_type, streak);
            }
        }
    }

    if let Some(Value::Array(entries)) = obj.remove("history") {
        let mut dropped = 0usize;
        for entry in entries {
            match entry {
                Value::Object(map) => match parse_result(&map) {
                    Some(result) => stats.history.push(result),
                    None => stats.retained_history.push(Value::Object(map)),
                },
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            tracing::warn!(dropped, "discarded non-object history entries");
        }
    }

    if let Some(Value::Array(entries)) = obj.remove("retainedHistory") {
        stats
            .retained_history
            .extend(entries.into_iter().filter(Value::is_object));
    }

    stats.total_time_ms = match obj.get("totalTimeMs").and_then(finite) {
        Some(total) if total >= 0.0 => total.round() as u64,
        _ => stats.history.iter().map(|r| r.time_spent_ms).sum(),
    };

    stats
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn non_negative_ms(value: Option<&Value>) -> u64 {
    match value.and_then(finite) {
        Some(ms) if ms > 0.0 => ms.round() as u64,
        _ => 0,
    }
}

fn timestamp(value: Option<&Value>) -> Option<i64> {
    value.and_then(finite).map(|ms| ms.round() as i64)
}

/// Lenient history entry parse. `None` means the type is not recognised.
fn parse_result(map: &Map<String, Value>) -> Option<TaskResult> {
    let task_type = map.get("type").and_then(Value::as_str).and_then(TaskType::parse)?;

    let success = map.get("success").and_then(Value::as_bool).unwrap_or(false);
    let was_skipped = map.get("wasSkipped").and_then(Value::as_bool).unwrap_or(false);
    let outcome = map
        .get("outcome")
        .cloned()
        .and_then(|v| serde_json::from_value::<Outcome>(v).ok())
        .unwrap_or_else(|| Outcome::derive(success, was_skipped));
    let time_spent_ms = non_negative_ms(map.get("timeSpentMs"));
    let timestamp_ms = timestamp(map.get("timestamp")).unwrap_or(0);
    let string = |key: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Some(TaskResult {
        task_id: string("taskId"),
        task_type,
        success,
        outcome,
        time_spent_ms,
        timestamp: timestamp_ms,
        start_time: timestamp(map.get("startTime")).unwrap_or(timestamp_ms),
        difficulty_level: map
            .get("difficultyLevel")
            .and_then(finite)
            .unwrap_or(MIN_LEVEL),
        was_skipped,
        session_id: string("sessionId"),
        session_duration_ms: non_negative_ms(map.get("sessionDurationMs")),
    })
}

// ==================== Persistence ====================

/// External persistence collaborator. Implementations only move bytes; migration is
/// applied by [`load_or_init`].
pub trait ProfileStore: Send + Sync {
    fn load(&self) -> Result<Option<Value>>;
    fn save(&self, stats: &UserStats) -> Result<()>;
}

/// Load and migrate, or start a fresh profile when nothing usable is stored.
pub fn load_or_init(store: &dyn ProfileStore) -> UserStats {
    match store.load() {
        Ok(Some(raw)) => {
            let stats = migrate(raw);
            tracing::info!(
                user_id = %stats.user_id,
                results = stats.history.len(),
                "profile loaded"
            );
            stats
        }
        Ok(None) => {
            tracing::info!("no stored profile, starting fresh");
            UserStats::new()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load profile, starting fresh");
            UserStats::new()
        }
    }
}

/// Pretty JSON on disk, replaced atomically through a sibling temp file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "profile.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Option<Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, stats: &UserStats) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(stats)?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process store, for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Value>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: Value) -> Self {
        Self {
            slot: Mutex::new(Some(value)),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }

    pub fn snapshot(&self) -> Option<Value> {
        self.slot.lock().clone()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<Value>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, stats: &UserStats) -> Result<()> {
        let value = serde_json::to_value(stats)?;
        *self.slot.lock() = Some(value);
        *self.saves.lock() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fresh_profile_has_every_level_at_one() {
        let stats = UserStats::new();
        for ty in TaskType::ALL {
            assert_eq!(stats.raw_level(ty), 1.0);
        }
        assert!(!stats.user_id().is_empty());
        assert!(stats.history().is_empty());
    }

    #[test]
    fn test_migrate_fills_missing_fields() {
        let stats = migrate(json!({
            "levels": { "MATH_ADDITION": 4, "LANG_FLAG": 2.3456 },
            "history": [],
            "totalTimeMs": 1200
        }));
        assert_eq!(stats.raw_level(TaskType::MathAddition), 4.0);
        assert_eq!(stats.raw_level(TaskType::LangFlag), 2.35);
        assert_eq!(stats.raw_level(TaskType::MusicMemory), 1.0);
        assert_eq!(stats.total_time_ms(), 1200);
        assert!(!stats.user_id().is_empty());
        assert!(stats.confidence(TaskType::LangFlag).is_none());
    }

    #[test]
    fn test_migrate_normalises_levels_per_regime() {
        let stats = migrate(json!({
            "userId": "u1",
            "levels": {
                "MATH_SUDOKU": 14,
                "MATH_SUBTRACTION": 2.6,
                "REACTION_COLOR": 0.2,
                "MATH_DIVISION": 3
            },
            "confidence": { "REACTION_COLOR": 1.7, "MUSIC_MEMORY": -1 }
        }));
        assert_eq!(stats.user_id(), "u1");
        assert_eq!(stats.raw_level(TaskType::MathSudoku), 10.0);
        assert_eq!(stats.raw_level(TaskType::MathSubtraction), 3.0);
        assert_eq!(stats.raw_level(TaskType::ReactionColor), 1.0);
        assert_eq!(stats.confidence(TaskType::ReactionColor), Some(1.0));
        assert_eq!(stats.confidence(TaskType::MusicMemory), Some(0.0));
        assert!(!stats.levels().keys().any(|k| k.as_str() == "MATH_DIVISION"));
    }

    #[test]
    fn test_migrate_keeps_unknown_history_entries() {
        let stats = migrate(json!({
            "userId": "u2",
            "history": [
                { "taskId": "a", "type": "MATH_ADDITION", "success": true, "timeSpentMs": 4000 },
                { "taskId": "b", "type": "MATH_DIVISION", "success": true, "timeSpentMs": 1000 },
                42,
                { "taskId": "c", "type": "LANG_MAP", "wasSkipped": true, "timeSpentMs": 900 }
            ]
        }));
        assert_eq!(stats.history().len(), 2);
        assert_eq!(stats.retained_history().len(), 1);
        assert_eq!(stats.retained_history()[0]["taskId"], "b");
        assert_eq!(stats.history()[0].outcome, Outcome::Success);
        assert_eq!(stats.history()[1].outcome, Outcome::Skipped);
        // No stored total: recomputed from recognised history.
        assert_eq!(stats.total_time_ms(), 4900);
    }

    #[test]
    fn test_migrate_non_object_starts_fresh() {
        let stats = migrate(json!([1, 2, 3]));
        assert_eq!(stats.raw_level(TaskType::MathAddition), 1.0);
        assert!(stats.history().is_empty());
    }

    #[test]
    fn test_migrate_is_idempotent_on_sample() {
        let once = migrate(json!({
            "levels": { "LANG_CONNECT": 3.14159, "MATH_ADDITION": 0 },
            "streaks": { "MATH_ADDITION": { "correct": 2, "wrong": 0 }, "bad": 1 },
            "history": [{ "type": "LANG_CONNECT", "success": false }, { "type": "X" }],
            "totalTimeMs": -5
        }));
        let twice = migrate(serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_streaks() {
        let mut stats = UserStats::new();
        stats.update_streak(TaskType::MathAddition, Outcome::Success);
        stats.update_streak(TaskType::MathAddition, Outcome::Success);
        stats.update_streak(TaskType::MathAddition, Outcome::Skipped);
        assert_eq!(stats.streak(TaskType::MathAddition), StreakData { correct: 2, wrong: 0 });
        stats.update_streak(TaskType::MathAddition, Outcome::Failed);
        assert_eq!(stats.streak(TaskType::MathAddition), StreakData { correct: 0, wrong: 1 });
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        let stats = UserStats::with_user_id("mem");
        store.save(&stats).unwrap();
        assert_eq!(store.save_count(), 1);
        assert_eq!(load_or_init(&store), stats);
    }
}
