//! Answer checking for every task family.
//!
//! Timed reaction tasks and the breathing break validate themselves inside the renderer;
//! for those `Answer::None` is accepted. Every other family needs an answer of the
//! matching shape, and a mismatched shape is simply wrong.

use serde::{Deserialize, Serialize};

use crate::types::{Beat, Grid, Solution, Task, TaskContent};

/// Mean absolute tap offset (ms) below which a rhythm counts as played correctly.
pub const RHYTHM_TOLERANCE_MS: f64 = 150.0;

/// Minimum sentence length, in characters, for the sentence-building task.
const MIN_SENTENCE_CHARS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Answer {
    Number(i64),
    /// Index into the task's option list or shape grid
    Choice(usize),
    Grid(Grid),
    Pads(Vec<u8>),
    /// Tap times in ms; only offsets relative to the first tap matter
    Taps(Vec<u32>),
    Text(String),
    None,
}

pub fn check(task: &Task, answer: &Answer) -> bool {
    match (task.content(), task.solution(), answer) {
        (TaskContent::Synonym { synonyms, .. }, _, Answer::Text(text)) => word_in(text, synonyms),
        (TaskContent::Rhyme { rhymes, .. }, _, Answer::Text(text)) => word_in(text, rhymes),
        (TaskContent::Sentence { word1, word2, .. }, _, Answer::Text(text)) => {
            sentence_uses(text, word1, word2)
        }
        (_, _, Answer::Choice(chosen)) => correct_choice(task) == Some(*chosen),
        (_, Solution::Number(expected), Answer::Number(given)) => expected == given,
        (_, Solution::Grid(expected), Answer::Grid(given)) => expected == given,
        (_, Solution::Sequence(expected), Answer::Pads(given)) => expected == given,
        (_, Solution::Pattern(pattern), Answer::Taps(taps)) => rhythm_matches(pattern, taps),
        (TaskContent::Synonym { .. } | TaskContent::Rhyme { .. } | TaskContent::Sentence { .. }, _, _) => {
            false
        }
        (_, Solution::Interactive, Answer::None) => true,
        _ => false,
    }
}

/// Recorded correct index: from the option list, or the shape grid's odd cell.
pub fn correct_choice(task: &Task) -> Option<usize> {
    match (task.content().choices(), task.solution()) {
        (Some((_, index)), _) => Some(index),
        (None, Solution::Index(index)) => Some(*index),
        _ => None,
    }
}

fn word_in(input: &str, accepted: &[String]) -> bool {
    let input = input.trim().to_lowercase();
    !input.is_empty() && accepted.iter().any(|w| w.to_lowercase() == input)
}

fn sentence_uses(text: &str, word1: &str, word2: &str) -> bool {
    let lower = text.to_lowercase();
    text.trim().chars().count() > MIN_SENTENCE_CHARS
        && lower.contains(&word1.to_lowercase())
        && lower.contains(&word2.to_lowercase())
}

/// Mean absolute error between taps and beats, both measured from their first event.
pub fn rhythm_error_ms(pattern: &[Beat], taps: &[u32]) -> Option<f64> {
    let (first_beat, first_tap) = (pattern.first()?, taps.first()?);
    let total: f64 = pattern
        .iter()
        .zip(taps)
        .map(|(beat, tap)| {
            let expected = beat.time_offset_ms as f64 - first_beat.time_offset_ms as f64;
            let actual = *tap as f64 - *first_tap as f64;
            (expected - actual).abs()
        })
        .sum();
    Some(total / taps.len() as f64)
}

fn rhythm_matches(pattern: &[Beat], taps: &[u32]) -> bool {
    taps.len() == pattern.len()
        && rhythm_error_ms(pattern, taps).is_some_and(|err| err < RHYTHM_TOLERANCE_MS)
}
