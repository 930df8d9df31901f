//! Lab actions and the append-only action log

use serde::{Deserialize, Serialize};

use crate::core::types::Timestamp;

/// Everything a student can do at the bench
///
/// Serialized as the snake_case action name; unrecognised names round-trip
/// through `Other` so logs from newer front-ends still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LabAction {
    AddChemical,
    Heat,
    Stir,
    Filter,
    StartClock,
    StopClock,
    MeasureTemp,
    Weigh,
    TestGasSplint,
    TestGasGlowing,
    TestLitmus,
    Transfer,
    Other(String),
}

impl LabAction {
    pub fn as_str(&self) -> &str {
        match self {
            LabAction::AddChemical => "add_chemical",
            LabAction::Heat => "heat",
            LabAction::Stir => "stir",
            LabAction::Filter => "filter",
            LabAction::StartClock => "start_clock",
            LabAction::StopClock => "stop_clock",
            LabAction::MeasureTemp => "measure_temp",
            LabAction::Weigh => "weigh",
            LabAction::TestGasSplint => "test_gas_splint",
            LabAction::TestGasGlowing => "test_gas_glowing",
            LabAction::TestLitmus => "test_litmus",
            LabAction::Transfer => "transfer",
            LabAction::Other(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "add_chemical" => LabAction::AddChemical,
            "heat" => LabAction::Heat,
            "stir" => LabAction::Stir,
            "filter" => LabAction::Filter,
            "start_clock" => LabAction::StartClock,
            "stop_clock" => LabAction::StopClock,
            "measure_temp" => LabAction::MeasureTemp,
            "weigh" => LabAction::Weigh,
            "test_gas_splint" => LabAction::TestGasSplint,
            "test_gas_glowing" => LabAction::TestGasGlowing,
            "test_litmus" => LabAction::TestLitmus,
            "transfer" => LabAction::Transfer,
            other => LabAction::Other(other.to_string()),
        }
    }

    /// Gas and litmus tests
    pub fn is_gas_test(&self) -> bool {
        matches!(
            self,
            LabAction::TestGasSplint | LabAction::TestGasGlowing | LabAction::TestLitmus
        )
    }
}

impl From<String> for LabAction {
    fn from(name: String) -> Self {
        LabAction::parse(&name)
    }
}

impl From<LabAction> for String {
    fn from(action: LabAction) -> Self {
        action.as_str().to_string()
    }
}

impl std::fmt::Display for LabAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable record in the action log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub action: LabAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemical_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default)]
    pub timestamp: Timestamp,
}

impl ActionLogEntry {
    pub fn new(action: LabAction, timestamp: Timestamp) -> Self {
        Self {
            action,
            vessel_label: None,
            chemical_id: None,
            amount: None,
            observation: None,
            details: None,
            timestamp,
        }
    }

    /// Shorthand for an `add_chemical` entry
    pub fn added(chemical_id: impl Into<String>, amount: f32, timestamp: Timestamp) -> Self {
        Self::new(LabAction::AddChemical, timestamp).with_chemical(chemical_id, amount)
    }

    pub fn with_chemical(mut self, chemical_id: impl Into<String>, amount: f32) -> Self {
        self.chemical_id = Some(chemical_id.into());
        self.amount = Some(amount);
        self
    }

    pub fn in_vessel(mut self, label: impl Into<String>) -> Self {
        self.vessel_label = Some(label.into());
        self
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Captured copy of a log, used for whole-log undo
#[derive(Debug, Clone, PartialEq)]
pub struct LogSnapshot(Vec<ActionLogEntry>);

impl LogSnapshot {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Append-only action log
///
/// Entries are never edited in place. Undo replaces the whole log with an
/// earlier snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog {
    entries: Vec<ActionLogEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ActionLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ActionLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> LogSnapshot {
        LogSnapshot(self.entries.clone())
    }

    pub fn restore(&mut self, snapshot: LogSnapshot) {
        self.entries = snapshot.0;
    }
}

impl From<Vec<ActionLogEntry>> for ActionLog {
    fn from(entries: Vec<ActionLogEntry>) -> Self {
        Self { entries }
    }
}
