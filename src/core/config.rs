//! Engine configuration with documented constants
//!
//! The reaction heuristics and the rubric thresholds that are not part of the
//! marking scheme itself are collected here. Grade bands are not
//! configurable; they live in `rubric::evaluate::Grade`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{PracticalError, Result};

/// Tuning for the reaction rule engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionConfig {
    /// Temperature of a freshly placed vessel (°C)
    ///
    /// Also the reference point for the thiosulfate clock: reaction time
    /// halves for every 10 °C above this.
    pub room_temperature: f32,

    /// Contents with an amount below this are removed from the vessel
    ///
    /// Transfers scale amounts geometrically, so without a floor a vessel
    /// would keep a vanishing trace of everything it ever held.
    pub empty_epsilon: f32,

    /// Half-width of the cosmetic reaction-time jitter (seconds)
    ///
    /// Only applied by `ReactionEngine::simulate_with_jitter`. Never touches
    /// colour, precipitate or gas fields.
    pub jitter_seconds: f32,

    /// Lower clamp for any reported reaction time (seconds)
    pub min_reaction_time: f32,

    /// Upper clamp for any reported reaction time (seconds)
    ///
    /// Past five minutes a student would abandon the run anyway.
    pub max_reaction_time: f32,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            room_temperature: 20.0,
            empty_epsilon: 0.001,
            jitter_seconds: 3.0,
            min_reaction_time: 2.0,
            max_reaction_time: 300.0,
        }
    }
}

/// Tuning for the rubric scoring engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    /// Minimum trimmed length of an observation for it to count as recorded
    ///
    /// Filters out placeholder entries like "ok" or "-".
    pub min_observation_len: usize,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            min_observation_len: 10,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub reaction: ReactionConfig,
    #[serde(default)]
    pub rubric: RubricConfig,
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing sections and fields take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let r = &self.reaction;

        let non_negative = [
            ("empty_epsilon", r.empty_epsilon),
            ("jitter_seconds", r.jitter_seconds),
            ("min_reaction_time", r.min_reaction_time),
            ("max_reaction_time", r.max_reaction_time),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PracticalError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !r.room_temperature.is_finite() {
            return Err(PracticalError::InvalidConfig(
                "room_temperature must be finite".into(),
            ));
        }

        if r.min_reaction_time > r.max_reaction_time {
            return Err(PracticalError::InvalidConfig(format!(
                "min_reaction_time ({}) should be <= max_reaction_time ({})",
                r.min_reaction_time, r.max_reaction_time
            )));
        }

        Ok(())
    }
}
