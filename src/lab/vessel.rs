//! Vessels and their contents
//!
//! A vessel is owned by the lab session. The reaction engine only reads it;
//! results are folded back in with `Vessel::apply_reaction`.

use serde::{Deserialize, Serialize};

use crate::core::types::VesselId;
use crate::lab::chemical::ChemicalContent;
use crate::lab::log::LabAction;
use crate::reactions::ReactionResult;

pub const DEFAULT_COLOR: &str = "colourless";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    #[serde(default)]
    pub id: VesselId,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub contents: Vec<ChemicalContent>,
    #[serde(default = "default_color")]
    pub color: String,
    /// Current temperature (°C)
    pub temperature: f32,
    #[serde(default)]
    pub observation_history: Vec<String>,
    #[serde(default)]
    pub has_precipitate: bool,
    #[serde(default)]
    pub precipitate_label: Option<String>,
    /// Seconds the last timed reaction took, if any
    #[serde(default)]
    pub reaction_time_hint: Option<f32>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Vessel {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, temperature: f32) -> Self {
        Self {
            id: VesselId::new(),
            label: label.into(),
            icon: icon.into(),
            contents: Vec::new(),
            color: default_color(),
            temperature,
            observation_history: Vec::new(),
            has_precipitate: false,
            precipitate_label: None,
            reaction_time_hint: None,
        }
    }

    /// Builder-style content addition, mostly for setting up benches and tests
    pub fn with_content(mut self, content: ChemicalContent) -> Self {
        self.add_content(content);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn content(&self, chemical_id: &str) -> Option<&ChemicalContent> {
        self.contents.iter().find(|c| c.chemical_id == chemical_id)
    }

    pub fn contains(&self, chemical_id: &str) -> bool {
        self.content(chemical_id).is_some()
    }

    /// Volume of one chemical in cm³ (0 if absent or a solid)
    pub fn volume_of(&self, chemical_id: &str) -> f32 {
        self.content(chemical_id)
            .map(|c| c.amount.volume())
            .unwrap_or(0.0)
    }

    /// Total liquid volume in cm³
    pub fn total_volume(&self) -> f32 {
        self.contents.iter().map(|c| c.amount.volume()).sum()
    }

    /// True if the chemical is present and is an exam unknown
    pub fn is_hidden(&self, chemical_id: &str) -> bool {
        self.content(chemical_id).map(|c| c.is_unknown).unwrap_or(false)
    }

    /// True if any of the listed chemicals present is an exam unknown
    pub fn any_hidden(&self, chemical_ids: &[&str]) -> bool {
        chemical_ids.iter().any(|id| self.is_hidden(id))
    }

    /// Add a chemical, merging with an existing entry for the same id
    pub fn add_content(&mut self, content: ChemicalContent) {
        match self
            .contents
            .iter_mut()
            .find(|c| c.chemical_id == content.chemical_id)
        {
            Some(existing) => {
                existing.amount = existing.amount.plus(content.amount);
                existing.is_unknown |= content.is_unknown;
            }
            None => self.contents.push(content),
        }
    }

    /// Remove `fraction` of every content and return the removed portion
    ///
    /// Anything left below `epsilon` (in either vessel) is dropped.
    pub fn take_fraction(&mut self, fraction: f32, epsilon: f32) -> Vec<ChemicalContent> {
        let fraction = fraction.clamp(0.0, 1.0);
        let mut portion = Vec::new();

        for content in &mut self.contents {
            let moved = content.amount.scaled(fraction);
            if moved.value() >= epsilon {
                portion.push(ChemicalContent {
                    amount: moved,
                    ..content.clone()
                });
            }
            content.amount = content.amount.scaled(1.0 - fraction);
        }

        self.contents.retain(|c| c.amount.value() >= epsilon);
        portion
    }

    /// Merge a transferred portion into this vessel
    pub fn receive(&mut self, portion: Vec<ChemicalContent>, epsilon: f32) {
        for content in portion {
            if content.amount.value() >= epsilon {
                self.add_content(content);
            }
        }
    }

    /// Pour `fraction` of this vessel's contents into `other`
    pub fn transfer_to(&mut self, other: &mut Vessel, fraction: f32, epsilon: f32) {
        let portion = self.take_fraction(fraction, epsilon);
        other.receive(portion, epsilon);
    }

    /// Fold a reaction result into this vessel's state
    pub fn apply_reaction(&mut self, action: &LabAction, result: &ReactionResult) {
        if let Some(observation) = &result.observation {
            self.observation_history.push(observation.clone());
        }

        self.color = result.new_color.clone();

        if let Some(delta) = result.temp_change {
            self.temperature += delta;
        }

        if *action == LabAction::Filter {
            self.has_precipitate = false;
            self.precipitate_label = None;
        } else if result.has_precipitate {
            self.has_precipitate = true;
            if result.precipitate.is_some() {
                self.precipitate_label = result.precipitate.clone();
            }
        }

        if result.reaction_time.is_some() {
            self.reaction_time_hint = result.reaction_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::chemical::Amount;

    const EPS: f32 = 0.001;

    fn beaker() -> Vessel {
        Vessel::new("Beaker 1", "beaker", 20.0)
    }

    #[test]
    fn test_same_chemical_merges() {
        let mut vessel = beaker();
        vessel.add_content(ChemicalContent::new("HCl", Amount::Volume(10.0), "HCl"));
        vessel.add_content(ChemicalContent::new("HCl", Amount::Volume(5.0), "HCl"));

        assert_eq!(vessel.contents.len(), 1);
        assert_eq!(vessel.volume_of("HCl"), 15.0);
    }

    #[test]
    fn test_unknown_flag_is_sticky_on_merge() {
        let mut vessel = beaker();
        vessel.add_content(ChemicalContent::new("FeSO4", Amount::Volume(2.0), "FA 1").unknown());
        vessel.add_content(ChemicalContent::new("FeSO4", Amount::Volume(2.0), "FeSO₄"));
        assert!(vessel.is_hidden("FeSO4"));
    }

    #[test]
    fn test_transfer_scales_both_vessels() {
        let mut source =
            beaker().with_content(ChemicalContent::new("NaOH", Amount::Volume(20.0), "NaOH"));
        let mut target = Vessel::new("Conical flask", "flask", 20.0);

        source.transfer_to(&mut target, 0.25, EPS);

        assert!((source.volume_of("NaOH") - 15.0).abs() < 1e-4);
        assert!((target.volume_of("NaOH") - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_full_transfer_empties_source() {
        let mut source = beaker().with_content(ChemicalContent::new("Mg", Amount::Mass(0.1), "Mg"));
        let mut target = beaker();

        source.transfer_to(&mut target, 1.0, EPS);

        assert!(source.is_empty());
        assert_eq!(target.content("Mg").unwrap().amount, Amount::Mass(0.1));
    }

    #[test]
    fn test_trace_amounts_removed() {
        let mut source =
            beaker().with_content(ChemicalContent::new("KI", Amount::Volume(0.0015), "KI"));
        let portion = source.take_fraction(0.5, EPS);
        assert!(source.is_empty());
        assert!(portion.is_empty());
    }

    #[test]
    fn test_apply_reaction_folds_state() {
        let mut vessel = beaker();
        let result = ReactionResult {
            observation: Some("Solution turns cloudy".into()),
            color_change: Some("pale yellow".into()),
            precipitate: Some("S(s)".into()),
            gas: None,
            new_color: "pale yellow".into(),
            has_precipitate: true,
            temp_change: Some(1.5),
            reaction_time: Some(42.0),
        };

        vessel.apply_reaction(&LabAction::AddChemical, &result);

        assert_eq!(vessel.observation_history, vec!["Solution turns cloudy".to_string()]);
        assert_eq!(vessel.color, "pale yellow");
        assert!(vessel.has_precipitate);
        assert_eq!(vessel.precipitate_label.as_deref(), Some("S(s)"));
        assert_eq!(vessel.temperature, 21.5);
        assert_eq!(vessel.reaction_time_hint, Some(42.0));

        let filtered = ReactionResult {
            observation: Some("Residue collected".into()),
            new_color: "colourless".into(),
            ..ReactionResult::baseline(&vessel)
        };
        vessel.apply_reaction(&LabAction::Filter, &filtered);
        assert!(!vessel.has_precipitate);
        assert!(vessel.precipitate_label.is_none());
    }
}
