//! Common Types and Constants
//!
//! Task taxonomy, the two level regimes, and the task / result records shared
//! by every module of the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ==================== Constants ====================

/// Lowest level any task type can hold
pub const MIN_LEVEL: f64 = 1.0;

/// Highest level of the discrete (windowed) regime
pub const MAX_DISCRETE_LEVEL: u8 = 10;

/// Confidence assumed for a type that has never been regulated
pub const DEFAULT_CONFIDENCE: f64 = 0.1;

/// Side length of the grid-logic puzzle
pub const GRID_SIZE: usize = 4;

/// Fully solved or partially blanked grid; `0` marks a blank cell
pub type Grid = [[u8; GRID_SIZE]; GRID_SIZE];

/// Round to two decimal places (continuous regime precision)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ==================== Taxonomy ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    Math,
    Reaction,
    Music,
    Language,
    FreeMind,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Math,
        TaskCategory::Reaction,
        TaskCategory::Music,
        TaskCategory::Language,
        TaskCategory::FreeMind,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "MATH",
            Self::Reaction => "REACTION",
            Self::Music => "MUSIC",
            Self::Language => "LANGUAGE",
            Self::FreeMind => "FREE_MIND",
        }
    }

    /// Types served when this category wins the weighted draw.
    pub fn rotation(&self) -> &'static [TaskType] {
        match self {
            Self::Math => &[
                TaskType::MathAddition,
                TaskType::MathSubtraction,
                TaskType::MathMultiplication,
                TaskType::MathSequence,
                TaskType::MathSudoku,
            ],
            Self::Reaction => &[
                TaskType::ReactionColor,
                TaskType::ReactionShape,
                TaskType::ReactionStream,
                TaskType::ReactionColorSwitch,
            ],
            Self::Language => &[
                TaskType::LangOddOneOut,
                TaskType::LangConnect,
                TaskType::LangFlag,
                TaskType::LangMap,
            ],
            Self::Music => &[TaskType::MusicRhythm, TaskType::MusicMemory],
            Self::FreeMind => &[TaskType::FreeMindBreathe],
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete mini-game kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    MathAddition,
    MathSubtraction,
    MathMultiplication,
    MathStream,
    MathSequence,
    MathSudoku,
    LangSynonym,
    LangRhyme,
    LangSentence,
    LangOddOneOut,
    LangConnect,
    LangFlag,
    LangMap,
    ReactionColor,
    ReactionShape,
    ReactionStream,
    ReactionColorSwitch,
    MusicRhythm,
    MusicMemory,
    FreeMindBreathe,
}

impl TaskType {
    pub const ALL: [TaskType; 20] = [
        TaskType::MathAddition,
        TaskType::MathSubtraction,
        TaskType::MathMultiplication,
        TaskType::MathStream,
        TaskType::MathSequence,
        TaskType::MathSudoku,
        TaskType::LangSynonym,
        TaskType::LangRhyme,
        TaskType::LangSentence,
        TaskType::LangOddOneOut,
        TaskType::LangConnect,
        TaskType::LangFlag,
        TaskType::LangMap,
        TaskType::ReactionColor,
        TaskType::ReactionShape,
        TaskType::ReactionStream,
        TaskType::ReactionColorSwitch,
        TaskType::MusicRhythm,
        TaskType::MusicMemory,
        TaskType::FreeMindBreathe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MathAddition => "MATH_ADDITION",
            Self::MathSubtraction => "MATH_SUBTRACTION",
            Self::MathMultiplication => "MATH_MULTIPLICATION",
            Self::MathStream => "MATH_STREAM",
            Self::MathSequence => "MATH_SEQUENCE",
            Self::MathSudoku => "MATH_SUDOKU",
            Self::LangSynonym => "LANG_SYNONYM",
            Self::LangRhyme => "LANG_RHYME",
            Self::LangSentence => "LANG_SENTENCE",
            Self::LangOddOneOut => "LANG_ODD_ONE_OUT",
            Self::LangConnect => "LANG_CONNECT",
            Self::LangFlag => "LANG_FLAG",
            Self::LangMap => "LANG_MAP",
            Self::ReactionColor => "REACTION_COLOR",
            Self::ReactionShape => "REACTION_SHAPE",
            Self::ReactionStream => "REACTION_STREAM",
            Self::ReactionColorSwitch => "REACTION_COLOR_SWITCH",
            Self::MusicRhythm => "MUSIC_RHYTHM",
            Self::MusicMemory => "MUSIC_MEMORY",
            Self::FreeMindBreathe => "FREE_MIND_BREATHE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.as_str() == s)
    }

    pub fn category(&self) -> TaskCategory {
        match self {
            Self::MathAddition
            | Self::MathSubtraction
            | Self::MathMultiplication
            | Self::MathStream
            | Self::MathSequence
            | Self::MathSudoku => TaskCategory::Math,
            Self::LangSynonym
            | Self::LangRhyme
            | Self::LangSentence
            | Self::LangOddOneOut
            | Self::LangConnect
            | Self::LangFlag
            | Self::LangMap => TaskCategory::Language,
            Self::ReactionColor
            | Self::ReactionShape
            | Self::ReactionStream
            | Self::ReactionColorSwitch => TaskCategory::Reaction,
            Self::MusicRhythm | Self::MusicMemory => TaskCategory::Music,
            Self::FreeMindBreathe => TaskCategory::FreeMind,
        }
    }

    /// Static type → regime table.
    pub fn regime(&self) -> Regime {
        match self {
            Self::MathAddition
            | Self::MathSubtraction
            | Self::MathMultiplication
            | Self::MathSudoku => Regime::Windowed,
            _ => Regime::Continuous,
        }
    }

    /// Types kept for old profiles but hidden from the skill profile.
    pub fn is_legacy(&self) -> bool {
        matches!(
            self,
            Self::LangSentence | Self::LangRhyme | Self::LangSynonym | Self::MusicRhythm
        )
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| EngineError::UnknownTaskType(s.to_string()))
    }
}

// ==================== Levels ====================

/// Which adaptive algorithm owns a task type's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Integer tiers 1–10, windowed accuracy/time regulator
    Windowed,
    /// Real level ≥ 1, confidence-weighted step regulator
    Continuous,
}

/// Integer level of the windowed regime, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscreteLevel(u8);

impl DiscreteLevel {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(MAX_DISCRETE_LEVEL);

    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, MAX_DISCRETE_LEVEL))
    }

    /// Normalise a stored number: non-finite → 1, otherwise rounded and clamped.
    pub fn from_raw(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::MIN;
        }
        Self::new(raw.round().clamp(1.0, MAX_DISCRETE_LEVEL as f64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn raised(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn lowered(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

/// Real-valued level of the continuous regime: ≥ 1 with two-decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuousLevel(f64);

impl ContinuousLevel {
    pub const MIN: Self = Self(MIN_LEVEL);

    pub fn new(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::MIN;
        }
        Self(round2(raw.max(MIN_LEVEL)))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Apply a signed change, then floor at 1 and round to 2 dp.
    pub fn shifted(self, change: f64) -> Self {
        Self::new(self.0 + change)
    }
}

/// A level tagged with its regime, so the two numeric domains never mix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Level {
    Discrete(DiscreteLevel),
    Continuous(ContinuousLevel),
}

impl Level {
    pub fn for_type(task_type: TaskType, raw: f64) -> Self {
        match task_type.regime() {
            Regime::Windowed => Level::Discrete(DiscreteLevel::from_raw(raw)),
            Regime::Continuous => Level::Continuous(ContinuousLevel::new(raw)),
        }
    }

    pub fn initial(task_type: TaskType) -> Self {
        Self::for_type(task_type, MIN_LEVEL)
    }

    pub fn value(&self) -> f64 {
        match self {
            Level::Discrete(level) => level.get() as f64,
            Level::Continuous(level) => level.get(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Discrete(level) => write!(f, "{}", level.get()),
            Level::Continuous(level) => write!(f, "{:.2}", level.get()),
        }
    }
}

// ==================== Task Content ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionTier {
    Easy,
    Medium,
    Hard,
}

impl ReactionTier {
    pub fn for_level(level: f64) -> Self {
        if level >= 8.0 {
            Self::Hard
        } else if level >= 4.0 {
            Self::Medium
        } else {
            Self::Easy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    Emoji,
    Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Kick,
    Snare,
    Hihat,
    Tom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    pub time_offset_ms: u32,
    pub instrument: Instrument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Synonym,
    Antonym,
}

/// Category-specific payload; opaque to the engine, read by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TaskContent {
    #[serde(rename_all = "camelCase")]
    Arithmetic { a: i64, b: i64, operator: Operator },
    #[serde(rename_all = "camelCase")]
    MathStream {
        start_value: i64,
        default_speed_ms: u32,
        default_ops: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Sequence {
        sequence: Vec<i64>,
        options: Vec<i64>,
        correct_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    GridLogic { puzzle: Grid, grid_size: usize },
    #[serde(rename_all = "camelCase")]
    ReactionColor { wait_min_ms: u32, wait_max_ms: u32 },
    #[serde(rename_all = "camelCase")]
    ReactionShape {
        grid_size: usize,
        odd_index: usize,
        mode: ShapeMode,
        base: String,
        odd: String,
    },
    #[serde(rename_all = "camelCase")]
    ColorSwitch {
        tier: ReactionTier,
        num_trials: u32,
        distractor_step_min: u32,
        distractor_step_max: u32,
        color_change_speed_ms: u32,
        target_window_ms: u32,
        distractors: Vec<String>,
        target_color: String,
        target_color_name: String,
    },
    #[serde(rename_all = "camelCase")]
    ReactionStream {
        tier: ReactionTier,
        target_emoji: String,
        distractors: Vec<String>,
        num_target_events: u32,
        distractor_ratio: u32,
        min_interval_ms: u32,
        max_interval_ms: u32,
        display_duration_ms: u32,
    },
    #[serde(rename_all = "camelCase")]
    Rhythm {
        pattern: Vec<Beat>,
        total_duration_ms: u32,
    },
    #[serde(rename_all = "camelCase")]
    Memory {
        sequence: Vec<u8>,
        playback_speed_ms: u32,
        active_pads: u8,
    },
    #[serde(rename_all = "camelCase")]
    OddOneOut {
        options: Vec<String>,
        odd_index: usize,
        hint: String,
    },
    #[serde(rename_all = "camelCase")]
    Connect {
        mode: RelationKind,
        target: String,
        options: Vec<String>,
        correct_index: usize,
        answer: String,
    },
    #[serde(rename_all = "camelCase")]
    Flag {
        flag: String,
        options: Vec<String>,
        correct_index: usize,
        country_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Map {
        path: String,
        view_box: String,
        options: Vec<String>,
        correct_index: usize,
        country_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Synonym {
        word: String,
        synonyms: Vec<String>,
        hint: String,
    },
    #[serde(rename_all = "camelCase")]
    Rhyme {
        word: String,
        rhymes: Vec<String>,
        hint: String,
    },
    #[serde(rename_all = "camelCase")]
    Sentence {
        word1: String,
        word2: String,
        example_sentence: String,
    },
    #[serde(rename_all = "camelCase")]
    Breathe {
        cycles: u32,
        inhale_ms: u32,
        exhale_ms: u32,
    },
    Empty,
}

impl TaskContent {
    /// Options of a multiple-choice payload, with the index of the correct one.
    pub fn choices(&self) -> Option<(Vec<String>, usize)> {
        match self {
            TaskContent::Sequence {
                options,
                correct_index,
                ..
            } => Some((
                options.iter().map(|v| v.to_string()).collect(),
                *correct_index,
            )),
            TaskContent::OddOneOut {
                options, odd_index, ..
            } => Some((options.clone(), *odd_index)),
            TaskContent::Connect {
                options,
                correct_index,
                ..
            }
            | TaskContent::Flag {
                options,
                correct_index,
                ..
            }
            | TaskContent::Map {
                options,
                correct_index,
                ..
            } => Some((options.clone(), *correct_index)),
            _ => None,
        }
    }
}

/// Canonical answer; shape depends on the task type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Solution {
    Number(i64),
    Index(usize),
    Grid(Grid),
    Sequence(Vec<u8>),
    Pattern(Vec<Beat>),
    /// Validated by the interaction itself (timed reaction, breathing)
    Interactive,
}

// ==================== Task ====================

/// A generated task. Immutable once built: fields are only readable from outside the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub(crate) id: String,
    pub(crate) category: TaskCategory,
    #[serde(rename = "type")]
    pub(crate) task_type: TaskType,
    pub(crate) difficulty_level: f64,
    pub(crate) question: String,
    pub(crate) content: TaskContent,
    pub(crate) solution: Solution,
    pub(crate) generated_at: i64,
}

impl Task {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> TaskCategory {
        self.category
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Level in effect when the task was generated.
    pub fn difficulty_level(&self) -> f64 {
        self.difficulty_level
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn content(&self) -> &TaskContent {
        &self.content
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn generated_at(&self) -> i64 {
        self.generated_at
    }
}

// ==================== Results ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
    Skipped,
}

impl Outcome {
    /// Success wins; a non-successful skip is `Skipped`; everything else `Failed`.
    pub fn derive(success: bool, was_skipped: bool) -> Self {
        if success {
            Self::Success
        } else if was_skipped {
            Self::Skipped
        } else {
            Self::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

/// Immutable record of one completed or abandoned task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub task_id: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub success: bool,
    pub outcome: Outcome,
    pub time_spent_ms: u64,
    pub timestamp: i64,
    pub start_time: i64,
    pub difficulty_level: f64,
    pub was_skipped: bool,
    pub session_id: String,
    pub session_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_names_round_trip_through_serde() {
        for ty in TaskType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
            assert_eq!(TaskType::parse(ty.as_str()), Some(ty));
        }
        assert!("MATH_DIVISION".parse::<TaskType>().is_err());
    }

    #[test]
    fn test_rotation_types_belong_to_their_category() {
        for category in TaskCategory::ALL {
            for ty in category.rotation() {
                assert_eq!(ty.category(), category);
            }
        }
        assert!(!TaskCategory::Math.rotation().contains(&TaskType::MathStream));
    }

    #[test]
    fn test_regime_table() {
        assert_eq!(TaskType::MathAddition.regime(), Regime::Windowed);
        assert_eq!(TaskType::MathSudoku.regime(), Regime::Windowed);
        assert_eq!(TaskType::MathSequence.regime(), Regime::Continuous);
        assert_eq!(TaskType::LangFlag.regime(), Regime::Continuous);
    }

    #[test]
    fn test_discrete_level_clamps() {
        assert_eq!(DiscreteLevel::from_raw(0.0).get(), 1);
        assert_eq!(DiscreteLevel::from_raw(12.0).get(), 10);
        assert_eq!(DiscreteLevel::from_raw(2.6).get(), 3);
        assert_eq!(DiscreteLevel::from_raw(f64::NAN).get(), 1);
        assert_eq!(DiscreteLevel::MAX.raised(), DiscreteLevel::MAX);
        assert_eq!(DiscreteLevel::MIN.lowered(), DiscreteLevel::MIN);
    }

    #[test]
    fn test_continuous_level_floor_and_precision() {
        assert_eq!(ContinuousLevel::new(0.3).get(), 1.0);
        assert_eq!(ContinuousLevel::new(2.345_6).get(), 2.35);
        assert_eq!(ContinuousLevel::new(1.0).shifted(-0.5).get(), 1.0);
        assert_eq!(ContinuousLevel::new(f64::INFINITY).get(), 1.0);
    }

    #[test]
    fn test_outcome_derivation() {
        assert_eq!(Outcome::derive(true, true), Outcome::Success);
        assert_eq!(Outcome::derive(false, true), Outcome::Skipped);
        assert_eq!(Outcome::derive(false, false), Outcome::Failed);
    }

    #[test]
    fn test_content_serializes_with_kind_tag() {
        let content = TaskContent::Arithmetic {
            a: 3,
            b: 4,
            operator: Operator::Add,
        };
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["kind"], "arithmetic");
        assert_eq!(value["operator"], "add");
    }
}
