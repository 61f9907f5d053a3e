//! Regime A: trailing-window accuracy / completion-time regulator for integer levels.

use crate::config::{FlowBand, WindowedParams};
use crate::types::{DiscreteLevel, TaskResult, TaskType};

use super::Decision;

/// Accuracy and mean time over the trailing window of one type's results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub total_solved: usize,
    pub window_size: usize,
    pub accuracy: f64,
    pub avg_time_ms: f64,
}

impl WindowStats {
    /// `history` must hold only results of one type, oldest first.
    pub fn compute(history: &[&TaskResult], params: &WindowedParams) -> Option<Self> {
        let total_solved = history.len();
        if total_solved == 0 {
            return None;
        }
        let window_size = if total_solved < params.stabilization_count {
            params.early_window
        } else {
            params.stable_window
        };
        let window = &history[total_solved.saturating_sub(window_size)..];
        let n = window.len() as f64;
        let wins = window.iter().filter(|r| r.success).count() as f64;
        let total_time: f64 = window.iter().map(|r| r.time_spent_ms as f64).sum();
        Some(Self {
            total_solved,
            window_size,
            accuracy: wins / n,
            avg_time_ms: total_time / n,
        })
    }
}

pub fn flow_band(task_type: TaskType, params: &WindowedParams) -> FlowBand {
    match task_type {
        TaskType::MathSudoku => params.grid_flow_band,
        _ => params.flow_band,
    }
}

pub fn decide(stats: &WindowStats, band: FlowBand, params: &WindowedParams) -> Decision {
    if stats.accuracy < params.low_accuracy || stats.avg_time_ms > band.max_ms * params.time_cap_factor
    {
        Decision::Decrease
    } else if stats.accuracy >= params.high_accuracy && stats.avg_time_ms < band.min_ms {
        if stats.total_solved < params.stabilization_count {
            Decision::IncreaseFast
        } else if stats.total_solved % params.throttle_every == 0 {
            Decision::Increase
        } else {
            Decision::Maintain
        }
    } else {
        Decision::Maintain
    }
}

/// New level for `task_type` given its full result history (including the latest result).
pub fn evaluate(
    task_type: TaskType,
    current: DiscreteLevel,
    history: &[&TaskResult],
    params: &WindowedParams,
) -> (DiscreteLevel, Decision) {
    let Some(stats) = WindowStats::compute(history, params) else {
        return (current, Decision::Maintain);
    };
    let decision = decide(&stats, flow_band(task_type, params), params);
    let level = match decision {
        Decision::Decrease => current.lowered(),
        Decision::IncreaseFast | Decision::Increase => current.raised(),
        _ => current,
    };
    tracing::debug!(
        %task_type,
        total = stats.total_solved,
        window = stats.window_size,
        accuracy = stats.accuracy,
        avg_time_ms = stats.avg_time_ms,
        decision = decision.as_str(),
        "windowed evaluation"
    );
    (level, decision)
}
