//! Evidence channels a criterion can inspect
//!
//! Action-log predicates and free-text predicates over the notes. Built once
//! per evaluation and shared by every scorer.

use ahash::AHashSet;

use crate::core::config::RubricConfig;
use crate::lab::log::{ActionLogEntry, LabAction};
use crate::rubric::text::{self, TextPattern};

#[derive(Debug)]
pub struct Evidence<'a> {
    log: &'a [ActionLogEntry],
    /// Lower-cased JSON of each entry, for keyword searches
    serialized: Vec<String>,
    notes: String,
    config: &'a RubricConfig,
}

impl<'a> Evidence<'a> {
    pub fn new(log: &'a [ActionLogEntry], notes: &str, config: &'a RubricConfig) -> Self {
        let serialized = log
            .iter()
            .map(|entry| {
                serde_json::to_string(entry)
                    .unwrap_or_default()
                    .to_lowercase()
            })
            .collect();

        Self {
            log,
            serialized,
            notes: notes.to_string(),
            config,
        }
    }

    // --- action-log predicates ---

    /// The chemical appears anywhere in the log
    pub fn used_chemical(&self, chemical_id: &str) -> bool {
        self.log.iter().any(|entry| {
            entry
                .chemical_id
                .as_deref()
                .map(|id| id.eq_ignore_ascii_case(chemical_id))
                .unwrap_or(false)
        })
    }

    pub fn used_any(&self, chemical_ids: &[&str]) -> bool {
        chemical_ids.iter().any(|id| self.used_chemical(id))
    }

    pub fn count(&self, action: &LabAction) -> usize {
        self.log.iter().filter(|entry| &entry.action == action).count()
    }

    pub fn count_where(&self, test: impl Fn(&LabAction) -> bool) -> usize {
        self.log.iter().filter(|entry| test(&entry.action)).count()
    }

    /// Any entry's serialized form contains the keyword (case-insensitive)
    pub fn mentions(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.serialized.iter().any(|s| s.contains(&keyword))
    }

    /// Number of different chemicals added with `add_chemical`
    pub fn distinct_chemicals_added(&self) -> usize {
        self.log
            .iter()
            .filter(|entry| entry.action == LabAction::AddChemical)
            .filter_map(|entry| entry.chemical_id.as_deref())
            .map(str::to_ascii_lowercase)
            .collect::<AHashSet<_>>()
            .len()
    }

    /// Some entry carries an observation of at least the configured length
    pub fn has_recorded_observation(&self) -> bool {
        let min_len = self.config.min_observation_len;
        self.log.iter().any(|entry| {
            entry
                .observation
                .as_deref()
                .map(|o| o.trim().chars().count() >= min_len)
                .unwrap_or(false)
        })
    }

    // --- free-text predicates ---

    pub fn notes_contain_any(&self, needles: &[&str]) -> bool {
        text::contains_any(&self.notes, needles)
    }

    pub fn notes_match(&self, pattern: &TextPattern) -> bool {
        pattern.is_match(&self.notes)
    }

    pub fn notes_have_ionic_equation(&self) -> bool {
        text::looks_like_ionic_equation(&self.notes)
    }
}
