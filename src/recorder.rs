//! Result Recorder
//!
//! Turns one finished interaction into an immutable `TaskResult`, appends it to the
//! profile, and forwards it to analytics. Must run before the regulator.

use std::sync::Arc;

use chrono::Utc;

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::profile::UserStats;
use crate::types::{Outcome, Task, TaskResult};

pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// One continuous stretch of feed usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    started_at_ms: i64,
}

impl Session {
    pub fn start() -> Self {
        Self::starting_at(now_ms())
    }

    /// Id format: `sess_<8 hex>_<start millis in base 36>`.
    pub fn starting_at(started_at_ms: i64) -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        let id = format!(
            "sess_{}_{}",
            &uuid[..8],
            base36(started_at_ms.max(0) as u64)
        );
        Self { id, started_at_ms }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at_ms(&self) -> i64 {
        self.started_at_ms
    }

    pub fn duration_at(&self, now_ms: i64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms).max(0) as u64
    }
}

/// Build the record for `task` finishing at `now_ms`.
///
/// `time_spent_ms` is engaged time as reported by the renderer and trusted as given.
pub fn build_result(
    task: &Task,
    success: bool,
    time_spent_ms: u64,
    was_skipped: bool,
    session: &Session,
    now_ms: i64,
) -> TaskResult {
    TaskResult {
        task_id: task.id().to_string(),
        task_type: task.task_type(),
        success,
        outcome: Outcome::derive(success, was_skipped),
        time_spent_ms,
        timestamp: now_ms,
        start_time: now_ms.saturating_sub(time_spent_ms.min(i64::MAX as u64) as i64),
        difficulty_level: task.difficulty_level(),
        was_skipped,
        session_id: session.id().to_string(),
        session_duration_ms: session.duration_at(now_ms),
    }
}

#[derive(Clone)]
pub struct ResultRecorder {
    analytics: Arc<dyn AnalyticsSink>,
}

impl ResultRecorder {
    pub fn new(analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self { analytics }
    }

    pub fn record_result(
        &self,
        profile: &mut UserStats,
        task: &Task,
        success: bool,
        time_spent_ms: u64,
        was_skipped: bool,
        session: &Session,
    ) -> TaskResult {
        let result = build_result(task, success, time_spent_ms, was_skipped, session, now_ms());
        self.append(profile, result.clone());
        result
    }

    /// Append a prebuilt result: history, total time, streak, then analytics.
    pub fn append(&self, profile: &mut UserStats, result: TaskResult) {
        self.report(profile.user_id(), &result);
        profile.update_streak(result.task_type, result.outcome);
        profile.push_result(result);
    }

    /// Analytics only; the profile is left untouched.
    pub fn report(&self, user_id: &str, result: &TaskResult) {
        let event = AnalyticsEvent::from_result(user_id, result);
        if let Err(err) = self.analytics.deliver(event) {
            tracing::debug!(error = %err, task_id = %result.task_id, "analytics delivery failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{BroadcastAnalytics, BufferedAnalytics};
    use crate::types::{Solution, TaskContent, TaskType};

    fn task(task_type: TaskType, level: f64) -> Task {
        Task {
            id: "task-1".into(),
            category: task_type.category(),
            task_type,
            difficulty_level: level,
            question: "3 + 4".into(),
            content: TaskContent::Empty,
            solution: Solution::Number(7),
            generated_at: 0,
        }
    }

    #[test]
    fn test_base36() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn test_session_id_format() {
        let session = Session::starting_at(1_700_000_000_000);
        let parts: Vec<&str> = session.id().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "sess");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(parts[2], "loyw3v28");
        assert_eq!(session.duration_at(1_700_000_060_000), 60_000);
    }

    #[test]
    fn test_build_result_fields() {
        let session = Session::starting_at(1_000);
        let result = build_result(&task(TaskType::MathAddition, 3.0), false, 4_000, true, &session, 10_000);
        assert_eq!(result.outcome, Outcome::Skipped);
        assert_eq!(result.start_time, 6_000);
        assert_eq!(result.session_duration_ms, 9_000);
        assert_eq!(result.difficulty_level, 3.0);
        assert_eq!(result.session_id, session.id());
    }

    #[test]
    fn test_append_updates_profile_and_analytics() {
        let sink = Arc::new(BufferedAnalytics::new(8));
        let recorder = ResultRecorder::new(sink.clone());
        let mut profile = UserStats::with_user_id("u");
        let session = Session::start();

        let result = recorder.record_result(
            &mut profile,
            &task(TaskType::MathAddition, 1.0),
            true,
            2_500,
            false,
            &session,
        );

        assert_eq!(profile.history(), &[result.clone()]);
        assert_eq!(profile.total_time_ms(), 2_500);
        assert_eq!(profile.streak(TaskType::MathAddition).correct, 1);
        let events = sink.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].user_id, "u");
        assert_eq!(events[0].task_id, result.task_id);
    }

    #[test]
    fn test_analytics_failure_does_not_block_recording() {
        // No subscribers: every delivery fails.
        let recorder = ResultRecorder::new(Arc::new(BroadcastAnalytics::new(4)));
        let mut profile = UserStats::with_user_id("u");
        let session = Session::start();
        for _ in 0..3 {
            recorder.record_result(
                &mut profile,
                &task(TaskType::LangFlag, 1.0),
                false,
                1_000,
                false,
                &session,
            );
        }
        assert_eq!(profile.history().len(), 3);
        assert_eq!(profile.streak(TaskType::LangFlag).wrong, 3);
    }
}
