//! Reaction family: go-signal wait, odd-shape grid, colour switch, target stream.
//!
//! Parameters move toward faster, denser and less forgiving with level, each with a floor.

use rand::seq::SliceRandom;
use rand::Rng;
use rand::RngCore;

use super::Generated;
use crate::content::symbols::{
    switch_palette, ROTATION_PAIR, SHAPE_PAIRS, STREAM_SETS, TARGET_COLOR, TARGET_COLOR_NAME,
};
use crate::types::{ReactionTier, ShapeMode, Solution, TaskContent, TaskType};

const MIN_WAIT_MS: f64 = 1000.0;
const MIN_WAIT_SPAN_MS: f64 = 2000.0;
const MAX_SHAPE_GRID: usize = 5;

/// Wait window before the go signal: `3500·0.9^L` / `5000·0.9^L`, floored at 1s / 2s.
pub(crate) fn wait_window(level: f64) -> (u32, u32) {
    let decay = 0.9_f64.powf(level);
    let min = (3500.0 * decay).max(MIN_WAIT_MS);
    let max = (5000.0 * decay).max(MIN_WAIT_SPAN_MS);
    (min.round() as u32, max.round() as u32)
}

pub(crate) fn shape_grid_size(level: f64) -> usize {
    (2.0 + (level / 3.0).floor()).min(MAX_SHAPE_GRID as f64) as usize
}

struct SwitchParams {
    trials: u32,
    step_min: u32,
    step_max: u32,
    speed_ms: u32,
    window_ms: u32,
}

fn switch_params(tier: ReactionTier) -> SwitchParams {
    match tier {
        ReactionTier::Easy => SwitchParams {
            trials: 5,
            step_min: 2,
            step_max: 4,
            speed_ms: 800,
            window_ms: 1200,
        },
        ReactionTier::Medium => SwitchParams {
            trials: 8,
            step_min: 3,
            step_max: 6,
            speed_ms: 600,
            window_ms: 900,
        },
        ReactionTier::Hard => SwitchParams {
            trials: 10,
            step_min: 4,
            step_max: 8,
            speed_ms: 400,
            window_ms: 600,
        },
    }
}

struct StreamParams {
    targets: u32,
    ratio: u32,
    interval_min_ms: u32,
    interval_max_ms: u32,
    display_ms: u32,
}

fn stream_params(tier: ReactionTier) -> StreamParams {
    match tier {
        ReactionTier::Easy => StreamParams {
            targets: 3,
            ratio: 2,
            interval_min_ms: 800,
            interval_max_ms: 1400,
            display_ms: 800,
        },
        ReactionTier::Medium => StreamParams {
            targets: 4,
            ratio: 3,
            interval_min_ms: 600,
            interval_max_ms: 1100,
            display_ms: 600,
        },
        ReactionTier::Hard => StreamParams {
            targets: 5,
            ratio: 4,
            interval_min_ms: 400,
            interval_max_ms: 900,
            display_ms: 450,
        },
    }
}

pub(super) fn generate(task_type: TaskType, level: f64, rng: &mut dyn RngCore) -> Generated {
    match task_type {
        TaskType::ReactionShape => shape(level, rng),
        TaskType::ReactionColorSwitch => color_switch(level),
        TaskType::ReactionStream => stream(level, rng),
        _ => color(level),
    }
}

fn color(level: f64) -> Generated {
    let (wait_min_ms, wait_max_ms) = wait_window(level);
    Generated {
        question: "Tippe bei Grün".to_string(),
        content: TaskContent::ReactionColor {
            wait_min_ms,
            wait_max_ms,
        },
        solution: Solution::Interactive,
    }
}

fn shape(level: f64, rng: &mut dyn RngCore) -> Generated {
    let grid_size = shape_grid_size(level);
    let odd_index = rng.gen_range(0..grid_size * grid_size);
    let (mode, pair) = if rng.gen_bool(0.5) {
        let pair = SHAPE_PAIRS.choose(&mut *rng).unwrap_or(&ROTATION_PAIR);
        (ShapeMode::Emoji, pair)
    } else {
        (ShapeMode::Rotation, &ROTATION_PAIR)
    };

    Generated {
        question: "Finde den Außenseiter".to_string(),
        content: TaskContent::ReactionShape {
            grid_size,
            odd_index,
            mode,
            base: pair.base.to_string(),
            odd: pair.odd.to_string(),
        },
        solution: Solution::Index(odd_index),
    }
}

fn color_switch(level: f64) -> Generated {
    let tier = ReactionTier::for_level(level);
    let params = switch_params(tier);
    Generated {
        question: format!("Tippe nur bei {TARGET_COLOR_NAME}"),
        content: TaskContent::ColorSwitch {
            tier,
            num_trials: params.trials,
            distractor_step_min: params.step_min,
            distractor_step_max: params.step_max,
            color_change_speed_ms: params.speed_ms,
            target_window_ms: params.window_ms,
            distractors: switch_palette(tier).iter().map(|c| c.to_string()).collect(),
            target_color: TARGET_COLOR.to_string(),
            target_color_name: TARGET_COLOR_NAME.to_string(),
        },
        solution: Solution::Interactive,
    }
}

fn stream(level: f64, rng: &mut dyn RngCore) -> Generated {
    let tier = ReactionTier::for_level(level);
    let params = stream_params(tier);
    let (target, distractors) = match STREAM_SETS.choose(&mut *rng) {
        Some(set) => (
            set.target.to_string(),
            set.distractors.iter().map(|d| d.to_string()).collect(),
        ),
        None => ("🦊".to_string(), Vec::new()),
    };

    Generated {
        question: "Ziel Fokus".to_string(),
        content: TaskContent::ReactionStream {
            tier,
            target_emoji: target,
            distractors,
            num_target_events: params.targets,
            distractor_ratio: params.ratio,
            min_interval_ms: params.interval_min_ms,
            max_interval_ms: params.interval_max_ms,
            display_duration_ms: params.display_ms,
        },
        solution: Solution::Interactive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_wait_window_shrinks_to_floor() {
        let (min1, max1) = wait_window(1.0);
        assert_eq!((min1, max1), (3150, 4500));
        let (min5, max5) = wait_window(5.0);
        assert!(min5 < min1 && max5 < max1);
        assert_eq!(wait_window(40.0), (1000, 2000));
    }

    #[test]
    fn test_shape_grid_steps_up_and_caps() {
        assert_eq!(shape_grid_size(1.0), 2);
        assert_eq!(shape_grid_size(3.0), 3);
        assert_eq!(shape_grid_size(9.0), 5);
        assert_eq!(shape_grid_size(100.0), 5);
    }

    #[test]
    fn test_shape_odd_index_inside_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        for level in [1.0, 4.0, 12.0] {
            let generated = generate(TaskType::ReactionShape, level, &mut rng);
            let TaskContent::ReactionShape {
                grid_size,
                odd_index,
                ref base,
                ref odd,
                ..
            } = generated.content
            else {
                panic!("expected shape content");
            };
            assert!(odd_index < grid_size * grid_size);
            assert_ne!(base, odd);
            assert_eq!(generated.solution, Solution::Index(odd_index));
        }
    }

    #[test]
    fn test_tiers_get_less_forgiving() {
        let easy = switch_params(ReactionTier::Easy);
        let hard = switch_params(ReactionTier::Hard);
        assert!(hard.window_ms < easy.window_ms);
        assert!(hard.speed_ms < easy.speed_ms);
        assert!(stream_params(ReactionTier::Hard).display_ms < stream_params(ReactionTier::Easy).display_ms);
    }

    #[test]
    fn test_switch_tier_boundaries() {
        let tier_at = |level: f64| match color_switch(level).content {
            TaskContent::ColorSwitch { tier, .. } => tier,
            _ => panic!("expected colour switch"),
        };
        assert_eq!(tier_at(3.99), ReactionTier::Easy);
        assert_eq!(tier_at(4.0), ReactionTier::Medium);
        assert_eq!(tier_at(8.0), ReactionTier::Hard);
    }
}
