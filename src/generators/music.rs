use rand::seq::SliceRandom;
use rand::Rng;
use rand::RngCore;

use super::Generated;
use crate::types::{Beat, Instrument, Solution, TaskContent, TaskType};

const BEAT_SPACING_MS: u32 = 500;
const MAX_RHYTHM_STEPS: u32 = 16;
const MAX_MEMORY_LENGTH: usize = 12;
const MAX_PADS: u8 = 4;
const MIN_PLAYBACK_MS: f64 = 300.0;

const INSTRUMENTS: [Instrument; 4] = [
    Instrument::Kick,
    Instrument::Snare,
    Instrument::Hihat,
    Instrument::Tom,
];

fn half(level: f64) -> f64 {
    (level / 2.0).floor()
}

pub(crate) fn rhythm_steps(level: f64) -> u32 {
    (4.0 + half(level)).min(MAX_RHYTHM_STEPS as f64) as u32
}

pub(crate) fn memory_length(level: f64) -> usize {
    (3.0 + half(level)).min(MAX_MEMORY_LENGTH as f64) as usize
}

pub(crate) fn playback_speed_ms(level: f64) -> u32 {
    (800.0 - 50.0 * level).max(MIN_PLAYBACK_MS).round() as u32
}

pub(crate) fn active_pads(level: f64) -> u8 {
    (2.0 + (level / 3.0).floor()).min(MAX_PADS as f64) as u8
}

pub(super) fn generate(task_type: TaskType, level: f64, rng: &mut dyn RngCore) -> Generated {
    match task_type {
        TaskType::MusicRhythm => rhythm(level, rng),
        _ => memory(level, rng),
    }
}

fn rhythm(level: f64, rng: &mut dyn RngCore) -> Generated {
    let steps = rhythm_steps(level);
    let density = (0.2 + 0.05 * level).min(0.8);

    let mut pattern = Vec::with_capacity(steps as usize);
    for step in 0..steps {
        let time_offset_ms = step * BEAT_SPACING_MS;
        // The downbeat always sounds so the pattern is never empty.
        if step == 0 {
            pattern.push(Beat {
                time_offset_ms,
                instrument: Instrument::Kick,
            });
        } else if rng.gen_bool(density) {
            let instrument = *INSTRUMENTS.choose(&mut *rng).unwrap_or(&Instrument::Kick);
            pattern.push(Beat {
                time_offset_ms,
                instrument,
            });
        }
    }

    Generated {
        question: "Wiederhole den Beat".to_string(),
        content: TaskContent::Rhythm {
            pattern: pattern.clone(),
            total_duration_ms: steps * BEAT_SPACING_MS,
        },
        solution: Solution::Pattern(pattern),
    }
}

fn memory(level: f64, rng: &mut dyn RngCore) -> Generated {
    let pads = active_pads(level);
    let sequence: Vec<u8> = (0..memory_length(level))
        .map(|_| rng.gen_range(0..pads))
        .collect();

    Generated {
        question: "Merke dir den Klang".to_string(),
        content: TaskContent::Memory {
            sequence: sequence.clone(),
            playback_speed_ms: playback_speed_ms(level),
            active_pads: pads,
        },
        solution: Solution::Sequence(sequence),
    }
}
