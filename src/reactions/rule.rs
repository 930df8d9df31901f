//! Reaction rule definitions
//!
//! A rule pairs an eligibility test with a `produce` function. Eligibility is
//! a closed variant so every kind of test can be exercised on its own.

use ahash::AHashSet;

use crate::core::config::ReactionConfig;
use crate::lab::log::LabAction;
use crate::lab::vessel::Vessel;

/// Set of chemical ids currently in a vessel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChemicalSet {
    ids: AHashSet<String>,
}

impl ChemicalSet {
    pub fn from_vessel(vessel: &Vessel) -> Self {
        Self {
            ids: vessel
                .contents
                .iter()
                .map(|c| c.chemical_id.clone())
                .collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Every listed id is present
    pub fn contains_all(&self, ids: &[&str]) -> bool {
        ids.iter().all(|id| self.ids.contains(*id))
    }

    /// At least one listed id is present
    pub fn contains_any(&self, ids: &[&str]) -> bool {
        ids.iter().any(|id| self.ids.contains(*id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ChemicalSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

pub type MatchFn = Box<dyn Fn(&ChemicalSet, &Vessel, &LabAction) -> bool + Send + Sync>;
pub type ProduceFn =
    Box<dyn Fn(&Vessel, &LabAction, &ReactionConfig) -> ReactionEffect + Send + Sync>;

/// How a rule decides whether it applies
pub enum RuleMatch {
    /// Every listed chemical must be present (pure AND)
    Requires(Vec<String>),
    /// Arbitrary test; the only way to express OR-style conditions
    Predicate(MatchFn),
    /// Matches unconditionally; only for terminal fallbacks
    Always,
}

impl RuleMatch {
    pub fn matches(&self, chemicals: &ChemicalSet, vessel: &Vessel, action: &LabAction) -> bool {
        match self {
            RuleMatch::Requires(ids) => ids.iter().all(|id| chemicals.contains(id)),
            RuleMatch::Predicate(test) => test(chemicals, vessel, action),
            RuleMatch::Always => true,
        }
    }
}

impl std::fmt::Debug for RuleMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleMatch::Requires(ids) => f.debug_tuple("Requires").field(ids).finish(),
            RuleMatch::Predicate(_) => f.write_str("Predicate(..)"),
            RuleMatch::Always => f.write_str("Always"),
        }
    }
}

/// Partial reaction result; unset fields keep the baseline value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionEffect {
    pub observation: Option<String>,
    pub color_change: Option<String>,
    pub precipitate: Option<String>,
    pub gas: Option<String>,
    pub new_color: Option<String>,
    pub has_precipitate: Option<bool>,
    pub temp_change: Option<f32>,
    pub reaction_time: Option<f32>,
}

impl ReactionEffect {
    pub fn observe(text: impl Into<String>) -> Self {
        Self {
            observation: Some(text.into()),
            ..Self::default()
        }
    }

    /// Visible colour change, e.g. "blue → white"
    pub fn color_change(mut self, change: impl Into<String>, new_color: impl Into<String>) -> Self {
        self.color_change = Some(change.into());
        self.new_color = Some(new_color.into());
        self
    }

    /// Set the resulting colour without describing a change
    pub fn tint(mut self, new_color: impl Into<String>) -> Self {
        self.new_color = Some(new_color.into());
        self
    }

    pub fn precipitate(mut self, label: impl Into<String>) -> Self {
        self.precipitate = Some(label.into());
        self.has_precipitate = Some(true);
        self
    }

    pub fn gas(mut self, gas: impl Into<String>) -> Self {
        self.gas = Some(gas.into());
        self
    }

    pub fn temp(mut self, delta: f32) -> Self {
        self.temp_change = Some(delta);
        self
    }

    pub fn timed(mut self, seconds: f32) -> Self {
        self.reaction_time = Some(seconds);
        self
    }
}

/// A single entry in the ordered rule table
pub struct ReactionRule {
    pub id: String,
    pub matcher: RuleMatch,
    /// If set, the rule only applies to this action
    pub action_filter: Option<LabAction>,
    produce: ProduceFn,
}

impl ReactionRule {
    pub fn new<F>(id: impl Into<String>, matcher: RuleMatch, produce: F) -> Self
    where
        F: Fn(&Vessel, &LabAction, &ReactionConfig) -> ReactionEffect + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            matcher,
            action_filter: None,
            produce: Box::new(produce),
        }
    }

    /// Rule requiring every listed chemical
    pub fn requires<F>(id: impl Into<String>, chemicals: &[&str], produce: F) -> Self
    where
        F: Fn(&Vessel, &LabAction, &ReactionConfig) -> ReactionEffect + Send + Sync + 'static,
    {
        let ids = chemicals.iter().map(|c| c.to_string()).collect();
        Self::new(id, RuleMatch::Requires(ids), produce)
    }

    /// Rule gated by a custom predicate
    pub fn when<P, F>(id: impl Into<String>, predicate: P, produce: F) -> Self
    where
        P: Fn(&ChemicalSet, &Vessel, &LabAction) -> bool + Send + Sync + 'static,
        F: Fn(&Vessel, &LabAction, &ReactionConfig) -> ReactionEffect + Send + Sync + 'static,
    {
        Self::new(id, RuleMatch::Predicate(Box::new(predicate)), produce)
    }

    /// Unconditional rule
    pub fn always<F>(id: impl Into<String>, produce: F) -> Self
    where
        F: Fn(&Vessel, &LabAction, &ReactionConfig) -> ReactionEffect + Send + Sync + 'static,
    {
        Self::new(id, RuleMatch::Always, produce)
    }

    /// Restrict the rule to one action
    pub fn on(mut self, action: LabAction) -> Self {
        self.action_filter = Some(action);
        self
    }

    /// Action filter first, then the matcher
    pub fn is_eligible(
        &self,
        chemicals: &ChemicalSet,
        vessel: &Vessel,
        action: &LabAction,
    ) -> bool {
        if let Some(filter) = &self.action_filter {
            if filter != action {
                return false;
            }
        }
        self.matcher.matches(chemicals, vessel, action)
    }

    pub fn produce(
        &self,
        vessel: &Vessel,
        action: &LabAction,
        config: &ReactionConfig,
    ) -> ReactionEffect {
        (self.produce)(vessel, action, config)
    }
}

impl std::fmt::Debug for ReactionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionRule")
            .field("id", &self.id)
            .field("matcher", &self.matcher)
            .field("action_filter", &self.action_filter)
            .finish_non_exhaustive()
    }
}
