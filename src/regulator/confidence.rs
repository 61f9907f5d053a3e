//! Regime B: confidence-weighted continuous adjustment.
//!
//! Low confidence means high volatility, so new types swing quickly toward the right
//! level and settle as confidence saturates.

use crate::config::ContinuousParams;
use crate::types::{ContinuousLevel, TaskResult};

use super::Decision;

/// `1 + (1 - c) * 2`: 3 at no confidence, 1 at full confidence.
pub fn volatility(confidence: f64) -> f64 {
    1.0 + (1.0 - confidence.clamp(0.0, 1.0)) * 2.0
}

pub fn base_step(result: &TaskResult, params: &ContinuousParams) -> f64 {
    let time = result.time_spent_ms as f64;
    if result.success {
        params
            .success_steps
            .iter()
            .find(|(limit, _)| time < *limit)
            .map(|(_, step)| *step)
            .unwrap_or(params.slow_success_step)
    } else if result.was_skipped {
        if time < params.fast_skip_ms {
            params.fast_skip_step
        } else {
            params.slow_skip_step
        }
    } else {
        params.failure_step
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub level: ContinuousLevel,
    pub confidence: f64,
    pub change: f64,
    pub decision: Decision,
}

pub fn evaluate(
    current: ContinuousLevel,
    confidence: f64,
    result: &TaskResult,
    params: &ContinuousParams,
) -> Adjustment {
    let change = base_step(result, params) * volatility(confidence);
    let gain = if result.was_skipped {
        params.skip_confidence_gain
    } else {
        params.confidence_gain
    };
    let decision = if change > 0.0 {
        Decision::IncreaseElo
    } else if change < 0.0 {
        Decision::DecreaseElo
    } else {
        Decision::Maintain
    };
    Adjustment {
        level: current.shifted(change),
        confidence: (confidence + gain).min(1.0),
        change,
        decision,
    }
}
