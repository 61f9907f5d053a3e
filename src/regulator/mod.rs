//! Difficulty Regulator
//!
//! After every recorded result, move that type's level toward the user's flow zone.
//! The type's static regime picks the algorithm:
//! - [`windowed`]: integer levels 1–10 driven by trailing accuracy and completion time
//! - [`confidence`]: real levels ≥ 1 driven by a confidence-scaled step
//!
//! Deterministic given `(profile, result)`; never fails for any history shape.

pub mod confidence;
pub mod windowed;

use serde::{Deserialize, Serialize};

use crate::config::RegulatorConfig;
use crate::profile::UserStats;
use crate::types::{Level, TaskResult, TaskType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Decrease,
    IncreaseFast,
    Increase,
    Maintain,
    IncreaseElo,
    DecreaseElo,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decrease => "decrease",
            Self::IncreaseFast => "increase_fast",
            Self::Increase => "increase",
            Self::Maintain => "maintain",
            Self::IncreaseElo => "increase_elo",
            Self::DecreaseElo => "decrease_elo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUpdate {
    pub task_type: TaskType,
    pub previous: Level,
    pub level: Level,
    pub decision: Decision,
    /// Stored confidence after the update; continuous regime only
    pub confidence: Option<f64>,
}

/// Apply one result to `profile`. The result must already be in the profile's history.
pub fn update_level(
    profile: &mut UserStats,
    result: &TaskResult,
    config: &RegulatorConfig,
) -> LevelUpdate {
    let task_type = result.task_type;
    let previous = profile.level(task_type);

    let update = match previous {
        Level::Discrete(current) => {
            let history: Vec<&TaskResult> = profile.history_of(task_type).collect();
            let (level, decision) =
                windowed::evaluate(task_type, current, &history, &config.windowed);
            LevelUpdate {
                task_type,
                previous,
                level: Level::Discrete(level),
                decision,
                confidence: None,
            }
        }
        Level::Continuous(current) => {
            let stored = profile
                .confidence(task_type)
                .unwrap_or(config.continuous.default_confidence);
            let adj = confidence::evaluate(current, stored, result, &config.continuous);
            profile.set_confidence(task_type, adj.confidence);
            LevelUpdate {
                task_type,
                previous,
                level: Level::Continuous(adj.level),
                decision: adj.decision,
                confidence: Some(adj.confidence),
            }
        }
    };

    profile.set_level(task_type, update.level);
    tracing::debug!(
        %task_type,
        previous = %update.previous,
        level = %update.level,
        decision = update.decision.as_str(),
        "level updated"
    );
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    fn push(profile: &mut UserStats, task_type: TaskType, success: bool, time_spent_ms: u64) -> TaskResult {
        let result = TaskResult {
            task_id: format!("t{}", profile.history().len()),
            task_type,
            success,
            outcome: Outcome::derive(success, false),
            time_spent_ms,
            timestamp: 0,
            start_time: 0,
            difficulty_level: profile.raw_level(task_type),
            was_skipped: false,
            session_id: "s".into(),
            session_duration_ms: 0,
        };
        profile.push_result(result.clone());
        result
    }

    #[test]
    fn test_scenario_language_success_with_default_confidence() {
        let mut profile = UserStats::with_user_id("u");
        let result = push(&mut profile, TaskType::LangConnect, true, 2_000);
        let update = update_level(&mut profile, &result, &RegulatorConfig::default());
        assert_eq!(update.decision, Decision::IncreaseElo);
        assert_eq!(profile.raw_level(TaskType::LangConnect), 3.8);
        let confidence = profile.confidence(TaskType::LangConnect).unwrap();
        assert!((confidence - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_windowed_regime_leaves_confidence_alone() {
        let mut profile = UserStats::with_user_id("u");
        let result = push(&mut profile, TaskType::MathAddition, true, 1_000);
        let update = update_level(&mut profile, &result, &RegulatorConfig::default());
        assert_eq!(update.decision, Decision::IncreaseFast);
        assert_eq!(update.level, Level::for_type(TaskType::MathAddition, 2.0));
        assert!(profile.confidence(TaskType::MathAddition).is_none());
        assert!(update.confidence.is_none());
    }

    #[test]
    fn test_decision_names() {
        assert_eq!(Decision::IncreaseFast.as_str(), "increase_fast");
        assert_eq!(
            serde_json::to_string(&Decision::DecreaseElo).unwrap(),
            "\"decrease_elo\""
        );
    }
}
