//! Emoji and colour pools for the reaction family.

use crate::types::ReactionTier;

/// Near-identical pair for the find-the-odd-one grid.
pub struct ShapePair {
    pub base: &'static str,
    pub odd: &'static str,
}

pub static SHAPE_PAIRS: &[ShapePair] = &[
    ShapePair { base: "😐", odd: "😶" },
    ShapePair { base: "😀", odd: "😃" },
    ShapePair { base: "⚪", odd: "⚫" },
    ShapePair { base: "⬛", odd: "⬜" },
    ShapePair { base: "🍎", odd: "🍅" },
    ShapePair { base: "🕒", odd: "🕓" },
];

/// Glyph pair used by the rotation mode; the odd cell is rendered rotated.
pub const ROTATION_PAIR: ShapePair = ShapePair { base: "A", odd: "B" };

pub struct StreamSet {
    pub target: &'static str,
    pub distractors: &'static [&'static str],
}

pub static STREAM_SETS: &[StreamSet] = &[
    StreamSet {
        target: "🦊",
        distractors: &["🐶", "🐱", "🦁", "🐯", "🐻", "🐨", "🐼"],
    },
    StreamSet {
        target: "⚽",
        distractors: &["🏀", "🏈", "⚾", "🎾", "🏐", "🏉", "🎱"],
    },
    StreamSet {
        target: "🍎",
        distractors: &["🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓"],
    },
    StreamSet {
        target: "🚀",
        distractors: &["✈️", "🚁", "🚂", "🚗", "🚌", "🚲", "🛵"],
    },
    StreamSet {
        target: "⭐",
        distractors: &["🌟", "✨", "💫", "☀️", "🌙", "⚡", "❄️"],
    },
];

pub const TARGET_COLOR: &str = "#22c55e";
pub const TARGET_COLOR_NAME: &str = "Grün";

/// Distractor colours per tier. The hard palette sits close to the green target.
pub fn switch_palette(tier: ReactionTier) -> &'static [&'static str] {
    match tier {
        ReactionTier::Easy => &["#ef4444", "#3b82f6", "#eab308", "#a855f7", "#f97316"],
        ReactionTier::Medium => &[
            "#ef4444", "#2563eb", "#eab308", "#9333ea", "#f97316", "#ec4899",
        ],
        ReactionTier::Hard => &["#14b8a6", "#84cc16", "#047857", "#06b6d4", "#facc15"],
    }
}
