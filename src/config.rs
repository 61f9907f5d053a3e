use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{TaskCategory, DEFAULT_CONFIDENCE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub math_weight: f64,
    pub reaction_weight: f64,
    pub language_weight: f64,
    pub music_weight: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            math_weight: 0.40,
            reaction_weight: 0.30,
            language_weight: 0.20,
            music_weight: 0.10,
        }
    }
}

impl SelectorConfig {
    /// Categories in normal rotation with their draw weights. Free-mind is never drawn.
    pub fn weighted_categories(&self) -> [(TaskCategory, f64); 4] {
        [
            (TaskCategory::Math, self.math_weight),
            (TaskCategory::Reaction, self.reaction_weight),
            (TaskCategory::Language, self.language_weight),
            (TaskCategory::Music, self.music_weight),
        ]
    }
}

/// Target completion-time band of the windowed regulator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlowBand {
    pub min_ms: f64,
    pub max_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowedParams {
    pub early_window: usize,
    pub stable_window: usize,
    /// Results of one type after which the wider window and throttled growth apply
    pub stabilization_count: usize,
    /// Throttled growth fires only when the total count is a multiple of this
    pub throttle_every: usize,
    pub low_accuracy: f64,
    pub high_accuracy: f64,
    pub time_cap_factor: f64,
    pub flow_band: FlowBand,
    pub grid_flow_band: FlowBand,
}

impl Default for WindowedParams {
    fn default() -> Self {
        Self {
            early_window: 8,
            stable_window: 15,
            stabilization_count: 30,
            throttle_every: 15,
            low_accuracy: 0.6,
            high_accuracy: 0.9,
            time_cap_factor: 1.2,
            flow_band: FlowBand {
                min_ms: 5000.0,
                max_ms: 20000.0,
            },
            grid_flow_band: FlowBand {
                min_ms: 10000.0,
                max_ms: 40000.0,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousParams {
    pub default_confidence: f64,
    /// Upper bounds (exclusive, ms) of the success speed bands and their steps
    pub success_steps: Vec<(f64, f64)>,
    /// Step for a success slower than every band
    pub slow_success_step: f64,
    pub fast_skip_ms: f64,
    pub fast_skip_step: f64,
    pub slow_skip_step: f64,
    pub failure_step: f64,
    pub confidence_gain: f64,
    pub skip_confidence_gain: f64,
}

impl Default for ContinuousParams {
    fn default() -> Self {
        Self {
            default_confidence: DEFAULT_CONFIDENCE,
            success_steps: vec![(3000.0, 1.0), (5000.0, 0.6), (10000.0, 0.3)],
            slow_success_step: 0.1,
            fast_skip_ms: 1500.0,
            fast_skip_step: -0.5,
            slow_skip_step: -0.2,
            failure_step: -0.5,
            confidence_gain: 0.05,
            skip_confidence_gain: 0.01,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegulatorConfig {
    pub windowed: WindowedParams,
    pub continuous: ContinuousParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub buffer_size: usize,
    pub duel_task_count: usize,
    /// Session time between free-mind insertions; `None` disables them
    pub free_mind_interval_ms: Option<u64>,
    pub analytics_buffer_capacity: usize,
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            buffer_size: 3,
            duel_task_count: 20,
            free_mind_interval_ms: Some(20 * 60 * 1000),
            analytics_buffer_capacity: 256,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub selector: SelectorConfig,
    pub regulator: RegulatorConfig,
    pub feed: FeedConfig,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            selector: SelectorConfig::default(),
            regulator: RegulatorConfig::default(),
            feed: FeedConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("FLOW_LOG") {
            config.log_level = val;
        }
        if let Ok(val) = std::env::var("FLOW_BUFFER_SIZE") {
            config.feed.buffer_size = val.parse().unwrap_or(config.feed.buffer_size);
        }
        if let Ok(val) = std::env::var("FLOW_DUEL_TASKS") {
            config.feed.duel_task_count = val.parse().unwrap_or(config.feed.duel_task_count);
        }
        if let Ok(val) = std::env::var("FLOW_FREE_MIND_INTERVAL_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                config.feed.free_mind_interval_ms = (ms > 0).then_some(ms);
            }
        }
        if let Ok(val) = std::env::var("FLOW_SEED") {
            config.feed.seed = val.parse().ok();
        }

        config
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for (category, weight) in self.selector.weighted_categories() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "weight for {category} must be a non-negative number"
                )));
            }
        }
        let total: f64 = self
            .selector
            .weighted_categories()
            .iter()
            .map(|(_, w)| w)
            .sum();
        if total <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "selector weights sum to zero".to_string(),
            ));
        }

        let windowed = &self.regulator.windowed;
        for band in [windowed.flow_band, windowed.grid_flow_band] {
            if !(band.min_ms < band.max_ms) {
                return Err(EngineError::InvalidConfig(format!(
                    "flow band [{}, {}] is empty",
                    band.min_ms, band.max_ms
                )));
            }
        }
        if windowed.early_window == 0 || windowed.stable_window == 0 || windowed.throttle_every == 0
        {
            return Err(EngineError::InvalidConfig(
                "regulator windows must be positive".to_string(),
            ));
        }

        let confidence = self.regulator.continuous.default_confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(EngineError::InvalidConfig(format!(
                "default confidence {confidence} outside [0, 1]"
            )));
        }

        Ok(())
    }
}
