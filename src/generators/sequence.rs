//! Number-sequence continuation with four numeric options.

use rand::seq::SliceRandom;
use rand::Rng;
use rand::RngCore;

use super::{place_answer, Generated};
use crate::types::{Solution, TaskContent, TaskType};

const TERMS: usize = 5;
const OPTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Linear,
    Progressive,
    Geometric,
    Fibonacci,
    Alternating,
}

fn pick_pattern(level: f64, rng: &mut dyn RngCore) -> Pattern {
    if level >= 8.0 {
        let r: f64 = rng.gen();
        if r > 0.6 {
            Pattern::Fibonacci
        } else if r > 0.3 {
            Pattern::Geometric
        } else {
            Pattern::Alternating
        }
    } else if level >= 4.0 {
        if rng.gen_bool(0.5) {
            Pattern::Progressive
        } else {
            Pattern::Alternating
        }
    } else {
        Pattern::Linear
    }
}

fn build_terms(pattern: Pattern, level: f64, rng: &mut dyn RngCore) -> Vec<i64> {
    let mut current: i64 = if level > 5.0 {
        rng.gen_range(5..=24)
    } else {
        rng.gen_range(1..=10)
    };
    let mut terms = Vec::with_capacity(TERMS);

    match pattern {
        Pattern::Linear => {
            let step = rng.gen_range(1..=5) + (level / 3.0).floor().min(1000.0) as i64;
            let descending = current > 20 && rng.gen_bool(0.2);
            terms.push(current);
            for _ in 1..TERMS {
                current = if descending { current - step } else { current + step };
                terms.push(current);
            }
        }
        Pattern::Progressive => {
            let start_step = rng.gen_range(1..=2);
            let increment = rng.gen_range(1..=2);
            terms.push(current);
            for i in 0..(TERMS as i64 - 1) {
                current += start_step + i * increment;
                terms.push(current);
            }
        }
        Pattern::Geometric => {
            let factor = if rng.gen_bool(0.3) { 3 } else { 2 };
            current = rng.gen_range(1..=3);
            terms.push(current);
            for _ in 1..TERMS {
                current *= factor;
                terms.push(current);
            }
        }
        Pattern::Fibonacci => {
            let (mut a, mut b) = (rng.gen_range(1..=5), rng.gen_range(1..=5));
            terms.extend([a, b]);
            while terms.len() < TERMS {
                let next = a + b;
                terms.push(next);
                a = b;
                b = next;
            }
        }
        Pattern::Alternating => {
            let up = rng.gen_range(2..=4);
            let down = rng.gen_range(1..=2);
            terms.push(current);
            for i in 0..(TERMS - 1) {
                current += if i % 2 == 0 { up } else { -down };
                terms.push(current);
            }
        }
    }

    terms
}

/// Three distinct wrong answers near `answer`: small offsets or ±10.
fn distractors(answer: i64, rng: &mut dyn RngCore) -> Vec<i64> {
    let mut fakes: Vec<i64> = Vec::with_capacity(OPTIONS - 1);
    while fakes.len() < OPTIONS - 1 {
        let offset = rng.gen_range(1..=5);
        let r: f64 = rng.gen();
        let fake = if r < 0.3 {
            answer + offset
        } else if r < 0.6 {
            answer - offset
        } else if r < 0.8 {
            answer + 10
        } else {
            answer - 10
        };
        if fake != answer && !fakes.contains(&fake) {
            fakes.push(fake);
        }
    }
    fakes.shuffle(rng);
    fakes
}

pub(super) fn generate(_task_type: TaskType, level: f64, rng: &mut dyn RngCore) -> Generated {
    let pattern = pick_pattern(level, rng);
    let mut sequence = build_terms(pattern, level, rng);
    let answer = sequence.pop().unwrap_or_default();
    let (options, correct_index) = place_answer(answer, distractors(answer, rng), rng);

    tracing::trace!(?pattern, answer, "sequence generated");

    Generated {
        question: "Setze die Reihe fort".to_string(),
        content: TaskContent::Sequence {
            sequence,
            options,
            correct_index,
        },
        solution: Solution::Number(answer),
    }
}
