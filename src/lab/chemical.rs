//! Chemicals and vessel contents
//!
//! The catalog only records what the engines need to reason about a
//! chemical: its canonical id, a readable name and formula, and its phase
//! (which decides whether amounts are volumes or masses).

use serde::{Deserialize, Serialize};

use crate::core::error::{PracticalError, Result};

/// Physical form a chemical is dispensed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Aqueous solution, measured by volume
    Solution,
    /// Pure liquid, measured by volume
    Liquid,
    /// Solid, measured by mass
    Solid,
}

impl Phase {
    pub fn is_measured_by_volume(self) -> bool {
        matches!(self, Phase::Solution | Phase::Liquid)
    }
}

/// Quantity of a chemical: volume in cm³ or mass in g, never both
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amount {
    Volume(f32),
    Mass(f32),
}

impl Amount {
    pub fn for_phase(phase: Phase, quantity: f32) -> Self {
        if phase.is_measured_by_volume() {
            Amount::Volume(quantity)
        } else {
            Amount::Mass(quantity)
        }
    }

    /// Raw magnitude regardless of unit
    pub fn value(&self) -> f32 {
        match *self {
            Amount::Volume(v) | Amount::Mass(v) => v,
        }
    }

    /// Volume in cm³, or 0 for solids
    pub fn volume(&self) -> f32 {
        match *self {
            Amount::Volume(v) => v,
            Amount::Mass(_) => 0.0,
        }
    }

    pub fn scaled(&self, factor: f32) -> Self {
        match *self {
            Amount::Volume(v) => Amount::Volume(v * factor),
            Amount::Mass(m) => Amount::Mass(m * factor),
        }
    }

    /// Sum two amounts, keeping this amount's unit
    pub fn plus(&self, other: Amount) -> Self {
        match *self {
            Amount::Volume(v) => Amount::Volume(v + other.value()),
            Amount::Mass(m) => Amount::Mass(m + other.value()),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Amount::Volume(_) => "cm³",
            Amount::Mass(_) => "g",
        }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.value(), self.unit())
    }
}

/// A catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chemical {
    /// Canonical id used by reaction rules and the rubric
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Display formula (may contain Unicode sub/superscripts)
    pub formula: String,
    pub phase: Phase,
}

impl Chemical {
    fn new(id: &str, name: &str, formula: &str, phase: Phase) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            formula: formula.into(),
            phase,
        }
    }
}

/// Catalog of all chemicals known to the reaction table
#[derive(Debug, Clone, Default)]
pub struct ChemicalCatalog {
    chemicals: Vec<Chemical>,
}

impl ChemicalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bench reagents for the standard practical papers
    pub fn with_defaults() -> Self {
        use Phase::*;

        let mut catalog = Self::new();
        let entries = [
            ("Na2S2O3", "Sodium thiosulfate", "Na₂S₂O₃", Solution),
            ("HCl", "Hydrochloric acid", "HCl", Solution),
            ("H2SO4", "Sulfuric acid", "H₂SO₄", Solution),
            ("HNO3", "Nitric acid", "HNO₃", Solution),
            ("NaOH", "Sodium hydroxide", "NaOH", Solution),
            ("NH3", "Aqueous ammonia", "NH₃", Solution),
            ("BaCl2", "Barium chloride", "BaCl₂", Solution),
            ("AgNO3", "Silver nitrate", "AgNO₃", Solution),
            ("KMnO4", "Potassium manganate(VII)", "KMnO₄", Solution),
            ("CuSO4", "Copper(II) sulfate", "CuSO₄", Solution),
            ("FeSO4", "Iron(II) sulfate", "FeSO₄", Solution),
            ("FeCl3", "Iron(III) chloride", "FeCl₃", Solution),
            ("ZnSO4", "Zinc sulfate", "ZnSO₄", Solution),
            ("Na2SO4", "Sodium sulfate", "Na₂SO₄", Solution),
            ("NaCl", "Sodium chloride", "NaCl", Solution),
            ("KBr", "Potassium bromide", "KBr", Solution),
            ("KI", "Potassium iodide", "KI", Solution),
            ("H2O2", "Hydrogen peroxide", "H₂O₂", Solution),
            ("H2O", "Distilled water", "H₂O", Liquid),
            ("phenolphthalein", "Phenolphthalein indicator", "phenolphthalein", Solution),
            ("methyl_orange", "Methyl orange indicator", "methyl orange", Solution),
            ("Mg", "Magnesium ribbon", "Mg", Solid),
            ("Zn", "Zinc powder", "Zn", Solid),
            ("CaCO3", "Calcium carbonate", "CaCO₃", Solid),
            ("Na2CO3", "Sodium carbonate", "Na₂CO₃", Solid),
            ("MnO2", "Manganese(IV) oxide", "MnO₂", Solid),
            ("CuSO4_5H2O", "Hydrated copper(II) sulfate", "CuSO₄·5H₂O", Solid),
            ("alum", "Potassium alum", "KAl(SO₄)₂·12H₂O", Solid),
        ];

        for (id, name, formula, phase) in entries {
            catalog.add(Chemical::new(id, name, formula, phase));
        }

        catalog
    }

    /// Add a chemical to the catalog, replacing any entry with the same id
    pub fn add(&mut self, chemical: Chemical) {
        self.chemicals.retain(|c| c.id != chemical.id);
        self.chemicals.push(chemical);
    }

    pub fn get(&self, id: &str) -> Option<&Chemical> {
        self.chemicals.iter().find(|c| c.id == id)
    }

    /// Look up a chemical, failing with `UnknownChemical`
    pub fn require(&self, id: &str) -> Result<&Chemical> {
        self.get(id)
            .ok_or_else(|| PracticalError::UnknownChemical(id.to_string()))
    }

    pub fn all(&self) -> &[Chemical] {
        &self.chemicals
    }
}

/// One chemical's presence inside a vessel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalContent {
    pub chemical_id: String,
    pub amount: Amount,
    pub display_label: String,
    /// Exam unknown ("FA"): observations must not reveal its identity
    #[serde(default)]
    pub is_unknown: bool,
}

impl ChemicalContent {
    pub fn new(
        chemical_id: impl Into<String>,
        amount: Amount,
        display_label: impl Into<String>,
    ) -> Self {
        Self {
            chemical_id: chemical_id.into(),
            amount,
            display_label: display_label.into(),
            is_unknown: false,
        }
    }

    /// Build content for a catalog chemical, choosing the unit from its phase
    ///
    /// Known chemicals are labelled with their formula; unknowns take the
    /// supplied opaque label (e.g. "FA 3").
    pub fn from_catalog(
        catalog: &ChemicalCatalog,
        chemical_id: &str,
        quantity: f32,
        unknown_label: Option<&str>,
    ) -> Result<Self> {
        let chemical = catalog.require(chemical_id)?;
        let amount = Amount::for_phase(chemical.phase, quantity);
        Ok(match unknown_label {
            Some(label) => Self::new(chemical_id, amount, label).unknown(),
            None => Self::new(chemical_id, amount, chemical.formula.clone()),
        })
    }

    /// Mark this content as an exam unknown
    pub fn unknown(mut self) -> Self {
        self.is_unknown = true;
        self
    }
}
