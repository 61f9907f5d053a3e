//! Analytics collaborator
//!
//! Every finalized `TaskResult` is handed to an [`AnalyticsSink`] together with the user id.
//! Delivery is fire-and-forget: sinks must not block, and the recorder only logs their errors.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::AnalyticsError;
use crate::types::{Outcome, TaskResult, TaskType};

/// Off-device record of one result. Timestamps are RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub user_id: String,
    pub task_id: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub success: bool,
    pub outcome: Outcome,
    pub time_spent_ms: u64,
    pub difficulty_level: f64,
    pub timestamp: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub was_skipped: bool,
    pub session_id: String,
    pub session_duration_ms: u64,
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default()
}

impl AnalyticsEvent {
    pub fn from_result(user_id: &str, result: &TaskResult) -> Self {
        Self {
            user_id: user_id.to_string(),
            task_id: result.task_id.clone(),
            task_type: result.task_type,
            success: result.success,
            outcome: result.outcome,
            time_spent_ms: result.time_spent_ms,
            difficulty_level: result.difficulty_level,
            timestamp: from_millis(result.timestamp),
            start_time: from_millis(result.start_time),
            was_skipped: result.was_skipped,
            session_id: result.session_id.clone(),
            session_duration_ms: result.session_duration_ms,
        }
    }
}

pub trait AnalyticsSink: Send + Sync {
    /// Hand off one event without waiting on any I/O.
    fn deliver(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn deliver(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

/// Fans events out to async subscribers (an uploader task, a live dashboard).
#[derive(Debug, Clone)]
pub struct BroadcastAnalytics {
    sender: broadcast::Sender<AnalyticsEvent>,
}

impl BroadcastAnalytics {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AnalyticsEvent> {
        self.sender.subscribe()
    }
}

impl AnalyticsSink for BroadcastAnalytics {
    fn deliver(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        self.sender
            .send(event)
            .map(|receivers| {
                tracing::trace!(receivers, "analytics event broadcast");
            })
            .map_err(|_| AnalyticsError::Closed)
    }
}

/// Bounded in-memory queue drained by the embedder. Events beyond capacity are rejected.
#[derive(Debug)]
pub struct BufferedAnalytics {
    capacity: usize,
    queue: Mutex<VecDeque<AnalyticsEvent>>,
}

impl BufferedAnalytics {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    pub fn drain(&self) -> Vec<AnalyticsEvent> {
        self.queue.lock().drain(..).collect()
    }
}

impl AnalyticsSink for BufferedAnalytics {
    fn deliver(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        let mut queue = self.queue.lock();
        if queue.len() >= self.capacity {
            return Err(AnalyticsError::Full);
        }
        queue.push_back(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> TaskResult {
        TaskResult {
            task_id: "t1".into(),
            task_type: TaskType::LangFlag,
            success: true,
            outcome: Outcome::Success,
            time_spent_ms: 2500,
            timestamp: 1_700_000_002_500,
            start_time: 1_700_000_000_000,
            difficulty_level: 2.4,
            was_skipped: false,
            session_id: "sess_abc".into(),
            session_duration_ms: 60_000,
        }
    }

    #[test]
    fn test_event_wire_shape() {
        let event = AnalyticsEvent::from_result("user-1", &result());
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["userId"], "user-1");
        assert_eq!(value["type"], "LANG_FLAG");
        assert_eq!(value["outcome"], "success");
        assert_eq!(value["startTime"], "2023-11-14T22:13:20Z");
        assert_eq!(value["timestamp"], "2023-11-14T22:13:22.500Z");
    }

    #[test]
    fn test_buffer_rejects_when_full() {
        let sink = BufferedAnalytics::new(2);
        let event = AnalyticsEvent::from_result("u", &result());
        assert!(sink.deliver(event.clone()).is_ok());
        assert!(sink.deliver(event.clone()).is_ok());
        assert_eq!(sink.deliver(event), Err(AnalyticsError::Full));
        assert_eq!(sink.drain().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_broadcast_without_subscribers_reports_closed() {
        let sink = BroadcastAnalytics::new(8);
        let event = AnalyticsEvent::from_result("u", &result());
        assert_eq!(sink.deliver(event.clone()), Err(AnalyticsError::Closed));

        let mut rx = sink.subscribe();
        sink.deliver(event.clone()).unwrap();
        assert_eq!(rx.try_recv().unwrap(), event);
    }
}
