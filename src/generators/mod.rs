//! Per-Category Generators
//!
//! Pure functions `(type, level, rng) -> Generated`. Dispatch goes through an exhaustive
//! `TaskType -> fn` table so adding a type without a generator fails to compile.
//!
//! Every generator accepts any finite level ≥ 1 and clamps its own parameters, so the
//! produced task is solvable at both ends of the range.

mod arithmetic;
mod free_mind;
mod grid;
mod language;
mod music;
mod reaction;
mod sequence;

pub use arithmetic::{build_multiplication, digit_budget};

use rand::Rng;
use rand::RngCore;

use crate::types::{Solution, TaskContent, TaskType, MIN_LEVEL};

/// Output of one generator call, before the factory wraps it into a `Task`.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub question: String,
    pub content: TaskContent,
    pub solution: Solution,
}

impl Generated {
    /// Empty-but-valid shape for type names this build does not know.
    pub fn empty() -> Self {
        Self {
            question: "Task".to_string(),
            content: TaskContent::Empty,
            solution: Solution::Interactive,
        }
    }
}

type GeneratorFn = fn(TaskType, f64, &mut dyn RngCore) -> Generated;

fn generator_for(task_type: TaskType) -> GeneratorFn {
    match task_type {
        TaskType::MathAddition | TaskType::MathSubtraction | TaskType::MathMultiplication => {
            arithmetic::generate
        }
        TaskType::MathStream => free_mind::math_stream,
        TaskType::MathSequence => sequence::generate,
        TaskType::MathSudoku => grid::generate,
        TaskType::ReactionColor
        | TaskType::ReactionShape
        | TaskType::ReactionStream
        | TaskType::ReactionColorSwitch => reaction::generate,
        TaskType::MusicRhythm | TaskType::MusicMemory => music::generate,
        TaskType::LangOddOneOut
        | TaskType::LangConnect
        | TaskType::LangFlag
        | TaskType::LangMap
        | TaskType::LangSynonym
        | TaskType::LangRhyme
        | TaskType::LangSentence => language::generate,
        TaskType::FreeMindBreathe => free_mind::breathe,
    }
}

/// Non-finite or sub-minimum levels are treated as level 1.
fn sanitize_level(level: f64) -> f64 {
    if level.is_finite() {
        level.max(MIN_LEVEL)
    } else {
        MIN_LEVEL
    }
}

pub fn generate(task_type: TaskType, level: f64, rng: &mut dyn RngCore) -> Generated {
    generator_for(task_type)(task_type, sanitize_level(level), rng)
}

/// Generate by wire name; unknown names yield [`Generated::empty`] instead of an error.
pub fn generate_named(name: &str, level: f64, rng: &mut dyn RngCore) -> Generated {
    match TaskType::parse(name) {
        Some(task_type) => generate(task_type, level, rng),
        None => {
            tracing::warn!(task_type = name, "no generator for task type, serving empty task");
            Generated::empty()
        }
    }
}

/// Insert `answer` at a uniformly random slot among the (already shuffled) distractors.
///
/// Callers guarantee `answer` is not among `distractors`, so the returned index is the
/// only position holding it.
pub(crate) fn place_answer<T>(
    answer: T,
    mut distractors: Vec<T>,
    rng: &mut dyn RngCore,
) -> (Vec<T>, usize) {
    let index = rng.gen_range(0..=distractors.len());
    distractors.insert(index, answer);
    (distractors, index)
}
