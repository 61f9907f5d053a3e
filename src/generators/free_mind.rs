//! Fixed-shape tasks: the breathing break and the running-total stream.

use rand::RngCore;

use super::Generated;
use crate::types::{Solution, TaskContent, TaskType};

pub(super) fn breathe(_task_type: TaskType, _level: f64, _rng: &mut dyn RngCore) -> Generated {
    Generated {
        question: "Atme tief durch".to_string(),
        content: TaskContent::Breathe {
            cycles: 3,
            inhale_ms: 4000,
            exhale_ms: 4000,
        },
        solution: Solution::Interactive,
    }
}

/// Running total driven by the renderer; the stored answer is a placeholder.
pub(super) fn math_stream(_task_type: TaskType, _level: f64, _rng: &mut dyn RngCore) -> Generated {
    Generated {
        question: "Math Stream".to_string(),
        content: TaskContent::MathStream {
            start_value: 10,
            default_speed_ms: 2000,
            default_ops: vec!["+".to_string()],
        },
        solution: Solution::Number(0),
    }
}
