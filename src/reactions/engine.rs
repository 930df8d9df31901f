//! First-match reaction engine
//!
//! Rules are tried in registration order and the first eligible rule wins.
//! Generic fallbacks therefore belong at the end of the table.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::core::config::ReactionConfig;
use crate::lab::log::LabAction;
use crate::lab::vessel::Vessel;
use crate::reactions::rule::{ChemicalSet, ReactionEffect, ReactionRule};
use crate::reactions::table::default_rules;

pub const EMPTY_OBSERVATION: &str = "Vessel is empty.";
pub const NO_REACTION_OBSERVATION: &str = "No reaction observed.";

/// What happened when an action was performed on a vessel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionResult {
    pub observation: Option<String>,
    pub color_change: Option<String>,
    pub precipitate: Option<String>,
    pub gas: Option<String>,
    pub new_color: String,
    pub has_precipitate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_change: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_time: Option<f32>,
}

impl ReactionResult {
    /// Result with nothing happening: colour unchanged, no precipitate
    pub fn baseline(vessel: &Vessel) -> Self {
        Self {
            observation: None,
            color_change: None,
            precipitate: None,
            gas: None,
            new_color: vessel.color.clone(),
            has_precipitate: false,
            temp_change: None,
            reaction_time: None,
        }
    }

    /// Overlay the fields a rule set
    pub fn merged(mut self, effect: ReactionEffect) -> Self {
        if effect.observation.is_some() {
            self.observation = effect.observation;
        }
        if effect.color_change.is_some() {
            self.color_change = effect.color_change;
        }
        if effect.precipitate.is_some() {
            self.precipitate = effect.precipitate;
        }
        if effect.gas.is_some() {
            self.gas = effect.gas;
        }
        if let Some(color) = effect.new_color {
            self.new_color = color;
        }
        if let Some(flag) = effect.has_precipitate {
            self.has_precipitate = flag;
        }
        if effect.temp_change.is_some() {
            self.temp_change = effect.temp_change;
        }
        if effect.reaction_time.is_some() {
            self.reaction_time = effect.reaction_time;
        }
        self
    }
}

/// Ordered rule table plus tuning
#[derive(Debug)]
pub struct ReactionEngine {
    rules: Vec<ReactionRule>,
    config: ReactionConfig,
}

impl Default for ReactionEngine {
    fn default() -> Self {
        Self::new(ReactionConfig::default())
    }
}

impl ReactionEngine {
    /// Engine with the standard bench rule table
    pub fn new(config: ReactionConfig) -> Self {
        Self::with_rules(default_rules(), config)
    }

    /// Engine with a caller-supplied rule table (order preserved)
    pub fn with_rules(rules: Vec<ReactionRule>, config: ReactionConfig) -> Self {
        Self { rules, config }
    }

    pub fn rules(&self) -> &[ReactionRule] {
        &self.rules
    }

    pub fn config(&self) -> &ReactionConfig {
        &self.config
    }

    /// Id of the rule that would fire, if any
    pub fn matching_rule(&self, vessel: &Vessel, action: &LabAction) -> Option<&ReactionRule> {
        let chemicals = ChemicalSet::from_vessel(vessel);
        self.rules.iter().find(|rule| {
            let eligible = rule.is_eligible(&chemicals, vessel, action);
            if !eligible {
                tracing::trace!(rule = %rule.id, %action, "rule not eligible");
            }
            eligible
        })
    }

    /// Decide what happens; deterministic
    pub fn simulate(&self, vessel: &Vessel, action: &LabAction) -> ReactionResult {
        let baseline = ReactionResult::baseline(vessel);

        match self.matching_rule(vessel, action) {
            Some(rule) => {
                tracing::debug!(
                    rule = %rule.id,
                    vessel = %vessel.label,
                    %action,
                    "reaction rule fired"
                );
                let mut result = baseline.merged(rule.produce(vessel, action, &self.config));
                if let Some(t) = result.reaction_time {
                    result.reaction_time = Some(self.clamp_time(t));
                }
                result
            }
            None => {
                let text = if vessel.is_empty() {
                    EMPTY_OBSERVATION
                } else {
                    NO_REACTION_OBSERVATION
                };
                ReactionResult {
                    observation: Some(text.to_string()),
                    ..baseline
                }
            }
        }
    }

    /// Same as `simulate`, with cosmetic jitter on the reaction time only
    pub fn simulate_with_jitter<R: Rng + ?Sized>(
        &self,
        vessel: &Vessel,
        action: &LabAction,
        rng: &mut R,
    ) -> ReactionResult {
        let mut result = self.simulate(vessel, action);
        let spread = self.config.jitter_seconds;
        if let Some(t) = result.reaction_time {
            if spread > 0.0 {
                let jittered = t + rng.gen_range(-spread..=spread);
                result.reaction_time = Some(round_tenth(self.clamp_time(jittered)));
            }
        }
        result
    }

    /// Bound a reaction time; an inverted range resolves to the maximum
    fn clamp_time(&self, seconds: f32) -> f32 {
        seconds
            .max(self.config.min_reaction_time)
            .min(self.config.max_reaction_time)
    }
}

fn round_tenth(x: f32) -> f32 {
    (x * 10.0).round() / 10.0
}

static DEFAULT_ENGINE: OnceLock<ReactionEngine> = OnceLock::new();

/// Simulate with the standard rule table and default tuning
pub fn simulate_reaction(vessel: &Vessel, action: &LabAction) -> ReactionResult {
    DEFAULT_ENGINE
        .get_or_init(ReactionEngine::default)
        .simulate(vessel, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::chemical::{Amount, ChemicalContent};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tube(ids: &[&str]) -> Vessel {
        let mut vessel = Vessel::new("Test tube", "tube", 20.0);
        for id in ids {
            vessel.add_content(ChemicalContent::new(*id, Amount::Volume(5.0), *id));
        }
        vessel
    }

    #[test]
    fn test_first_eligible_rule_wins() {
        let rules = vec![
            ReactionRule::requires("first", &["A", "B"], |_, _, _| {
                ReactionEffect::observe("first").tint("red")
            }),
            ReactionRule::requires("second", &["A"], |_, _, _| {
                ReactionEffect::observe("second").tint("green")
            }),
        ];
        let engine = ReactionEngine::with_rules(rules, ReactionConfig::default());

        let result = engine.simulate(&tube(&["A", "B"]), &LabAction::AddChemical);
        assert_eq!(result.observation.as_deref(), Some("first"));
        assert_eq!(result.new_color, "red");

        let result = engine.simulate(&tube(&["A"]), &LabAction::AddChemical);
        assert_eq!(result.observation.as_deref(), Some("second"));
    }

    #[test]
    fn test_unmatched_reports_empty_or_no_reaction() {
        let engine = ReactionEngine::with_rules(Vec::new(), ReactionConfig::default());

        let empty = engine.simulate(&tube(&[]), &LabAction::Stir);
        assert_eq!(empty.observation.as_deref(), Some(EMPTY_OBSERVATION));

        let inert = engine.simulate(&tube(&["NaCl"]), &LabAction::Stir);
        assert_eq!(inert.observation.as_deref(), Some(NO_REACTION_OBSERVATION));
        assert_eq!(inert.new_color, "colourless");
        assert!(!inert.has_precipitate);
    }

    #[test]
    fn test_merge_keeps_baseline_for_unset_fields() {
        let vessel = tube(&["A"]);
        let result =
            ReactionResult::baseline(&vessel).merged(ReactionEffect::observe("x").gas("H₂"));
        assert_eq!(result.new_color, vessel.color);
        assert_eq!(result.gas.as_deref(), Some("H₂"));
        assert!(result.precipitate.is_none());
    }

    #[test]
    fn test_reaction_time_clamped() {
        let rules = vec![ReactionRule::always("slow", |_, _, _| {
            ReactionEffect::observe("slow").timed(10_000.0)
        })];
        let engine = ReactionEngine::with_rules(rules, ReactionConfig::default());
        let result = engine.simulate(&tube(&["A"]), &LabAction::AddChemical);
        assert_eq!(result.reaction_time, Some(300.0));
    }

    #[test]
    fn test_inverted_time_bounds_do_not_panic() {
        let config = ReactionConfig {
            min_reaction_time: 50.0,
            max_reaction_time: 10.0,
            ..ReactionConfig::default()
        };
        let engine = ReactionEngine::new(config);
        let vessel = tube(&["Na2S2O3", "HCl"]);

        let result = engine.simulate(&vessel, &LabAction::AddChemical);
        assert_eq!(result.reaction_time, Some(10.0));

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let jittered = engine.simulate_with_jitter(&vessel, &LabAction::AddChemical, &mut rng);
        assert_eq!(jittered.reaction_time, Some(10.0));
    }

    #[test]
    fn test_jitter_only_touches_reaction_time() {
        let rules = vec![ReactionRule::always("timed", |_, _, _| {
            ReactionEffect::observe("cloudy").precipitate("S(s)").timed(60.0)
        })];
        let engine = ReactionEngine::with_rules(rules, ReactionConfig::default());
        let vessel = tube(&["A"]);

        let plain = engine.simulate(&vessel, &LabAction::AddChemical);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let jittered =
                engine.simulate_with_jitter(&vessel, &LabAction::AddChemical, &mut rng);
            let t = jittered.reaction_time.unwrap();
            assert!((57.0..=63.0).contains(&t), "jitter out of range: {}", t);
            assert_eq!(jittered.observation, plain.observation);
            assert_eq!(jittered.precipitate, plain.precipitate);
            assert_eq!(jittered.has_precipitate, plain.has_precipitate);
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let rules = vec![ReactionRule::always("timed", |_, _, _| {
            ReactionEffect::observe("t").timed(30.0)
        })];
        let engine = ReactionEngine::with_rules(rules, ReactionConfig::default());
        let vessel = tube(&["A"]);

        let mut first = ChaCha8Rng::seed_from_u64(42);
        let mut second = ChaCha8Rng::seed_from_u64(42);
        let a = engine.simulate_with_jitter(&vessel, &LabAction::Stir, &mut first);
        let b = engine.simulate_with_jitter(&vessel, &LabAction::Stir, &mut second);
        assert_eq!(a, b);
    }
}
