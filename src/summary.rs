//! Profile summary: the numbers behind the stats screen.

use serde::Serialize;

use crate::profile::UserStats;
use crate::types::{TaskType, MIN_LEVEL};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Compact axis label, e.g. `M:ADDITION`
    pub label: String,
    pub level: f64,
    pub attempts: usize,
    pub accuracy: Option<f64>,
    pub avg_time_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub difficulty: f64,
    pub seconds: f64,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub user_id: String,
    pub brain_level: f64,
    pub tasks_completed: usize,
    pub flow_minutes: u64,
    pub skills: Vec<SkillEntry>,
    pub recent: Vec<HistoryPoint>,
}

pub fn skill_label(task_type: TaskType) -> String {
    let name = task_type.as_str();
    for (prefix, short) in [
        ("MATH_", "M:"),
        ("LANG_", "S:"),
        ("REACTION_", "R:"),
        ("MUSIC_", "Mu:"),
        ("FREE_MIND_", "E:"),
    ] {
        if let Some(rest) = name.strip_prefix(prefix) {
            return format!("{short}{rest}");
        }
    }
    name.to_string()
}

/// Sum of every stored level, truncated to one decimal.
pub fn brain_level(profile: &UserStats) -> f64 {
    let total: f64 = profile.levels().values().sum();
    (total * 10.0).floor() / 10.0
}

fn skill_entry(profile: &UserStats, task_type: TaskType) -> SkillEntry {
    let (attempts, wins, time) = profile
        .history_of(task_type)
        .fold((0usize, 0usize, 0u64), |(n, w, t), r| {
            (n + 1, w + r.success as usize, t.saturating_add(r.time_spent_ms))
        });
    let mean = |x: f64| (attempts > 0).then(|| x / attempts as f64);
    SkillEntry {
        task_type,
        label: skill_label(task_type),
        level: profile.levels().get(&task_type).copied().unwrap_or(MIN_LEVEL),
        attempts,
        accuracy: mean(wins as f64),
        avg_time_ms: mean(time as f64),
    }
}

/// Summary with the last `recent` history points.
pub fn summarize(profile: &UserStats, recent: usize) -> ProfileSummary {
    let history = profile.history();
    let skills = profile
        .levels()
        .keys()
        .filter(|ty| !ty.is_legacy())
        .map(|&ty| skill_entry(profile, ty))
        .collect();

    ProfileSummary {
        user_id: profile.user_id().to_string(),
        brain_level: brain_level(profile),
        tasks_completed: history.len(),
        flow_minutes: profile.total_time_ms() / 60_000,
        skills,
        recent: history[history.len().saturating_sub(recent)..]
            .iter()
            .map(|r| HistoryPoint {
                difficulty: r.difficulty_level,
                seconds: r.time_spent_ms as f64 / 1000.0,
                success: r.success,
            })
            .collect(),
    }
}
