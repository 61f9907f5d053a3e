//! Flow digit-budget arithmetic.
//!
//! A level `L` gives a total of `floor(L) + 1` digits, split across the two operands.

use rand::Rng;
use rand::RngCore;

use super::Generated;
use crate::types::{Operator, Solution, TaskContent, TaskType, MAX_DISCRETE_LEVEL};

/// Total digits across both operands at `level` (level clamped to the discrete range).
pub fn digit_budget(level: f64) -> u32 {
    level.floor().clamp(1.0, MAX_DISCRETE_LEVEL as f64) as u32 + 1
}

fn number_with_digits(digits: u32, rng: &mut dyn RngCore) -> i64 {
    if digits == 0 {
        return 0;
    }
    let min = 10_i64.pow(digits - 1);
    let max = 10_i64.pow(digits) - 1;
    rng.gen_range(min..=max)
}

/// `ceil`/`floor` halves of the budget, swapped half the time once there are 4+ digits.
fn split_budget(total: u32, rng: &mut dyn RngCore) -> (u32, u32) {
    let (a, b) = (total.div_ceil(2), total / 2);
    if total >= 4 && rng.gen_bool(0.5) {
        (b, a)
    } else {
        (a, b)
    }
}

pub(super) fn generate(task_type: TaskType, level: f64, rng: &mut dyn RngCore) -> Generated {
    let total = digit_budget(level);
    let (digits_a, digits_b) = split_budget(total, rng);

    match task_type {
        TaskType::MathSubtraction => {
            let mut a = number_with_digits(digits_a, rng);
            let mut b = number_with_digits(digits_b, rng);
            // Swapping keeps the same pair of digit counts.
            if a < b {
                std::mem::swap(&mut a, &mut b);
            }
            build(a, b, Operator::Subtract)
        }
        TaskType::MathMultiplication => {
            let split = match total {
                4 if rng.gen_bool(0.5) => (3, 1),
                4 => (2, 2),
                t if t >= 5 => {
                    let b = digits_b.min(2);
                    (t - b, b)
                }
                _ => (digits_a, digits_b),
            };
            build_multiplication(level, split, rng)
        }
        _ => {
            let a = number_with_digits(digits_a, rng);
            let b = number_with_digits(digits_b, rng);
            build(a, b, Operator::Add)
        }
    }
}

/// Multiplication with a fixed digit split. Past level 1 a single-digit operand is
/// drawn from `2..=9` so trivial ×0 / ×1 factors never appear.
pub fn build_multiplication(level: f64, split: (u32, u32), rng: &mut dyn RngCore) -> Generated {
    let harder = level > 1.0;
    let a = factor(split.0, harder, rng);
    let b = factor(split.1, harder, rng);
    build(a, b, Operator::Multiply)
}

fn factor(digits: u32, harder: bool, rng: &mut dyn RngCore) -> i64 {
    if harder && digits == 1 {
        rng.gen_range(2..=9)
    } else {
        number_with_digits(digits, rng)
    }
}

fn build(a: i64, b: i64, operator: Operator) -> Generated {
    let answer = match operator {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
    };
    Generated {
        question: format!("{a} {} {b}", operator.symbol()),
        content: TaskContent::Arithmetic { a, b, operator },
        solution: Solution::Number(answer),
    }
}
