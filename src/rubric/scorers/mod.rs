//! Per-question scorers
//!
//! Dispatch is two-level: the question's type tag picks the family, and
//! quantitative questions are refined by sniffing their title and context.

pub mod crystallisation;
pub mod energetics;
pub mod qualitative;
pub mod quantitative;
pub mod rate;
pub mod titration;

use serde::{Deserialize, Serialize};

use crate::rubric::criterion::Criterion;
use crate::rubric::evidence::Evidence;
use crate::rubric::paper::{Question, QuestionType};
use crate::rubric::text;

const RATE_KEYWORDS: &[&str] = &["rate", "clock", "thiosulfate"];
const TITRATION_KEYWORDS: &[&str] = &["titration", "burette", "titre"];
const CRYSTALLISATION_KEYWORDS: &[&str] = &["crystallis", "crystalliz", "alum", "water of"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    Rate,
    Titration,
    Crystallisation,
    Quantitative,
    Energetics,
    Qualitative,
}

impl ScorerKind {
    pub fn for_question(question: &Question) -> Self {
        match question.question_type {
            QuestionType::Energetics => ScorerKind::Energetics,
            QuestionType::Qualitative => ScorerKind::Qualitative,
            QuestionType::Quantitative | QuestionType::Other(_) => {
                let description = format!("{} {}", question.title, question.context);
                Self::refine_quantitative(&description)
            }
        }
    }

    /// Keyword families are checked in order; the first hit wins
    fn refine_quantitative(description: &str) -> Self {
        if text::contains_any(description, RATE_KEYWORDS) {
            ScorerKind::Rate
        } else if text::contains_any(description, TITRATION_KEYWORDS) {
            ScorerKind::Titration
        } else if text::contains_any(description, CRYSTALLISATION_KEYWORDS) {
            ScorerKind::Crystallisation
        } else {
            ScorerKind::Quantitative
        }
    }

    pub fn score(self, evidence: &Evidence) -> Vec<Criterion> {
        match self {
            ScorerKind::Rate => rate::score(evidence),
            ScorerKind::Titration => titration::score(evidence),
            ScorerKind::Crystallisation => crystallisation::score(evidence),
            ScorerKind::Quantitative => quantitative::score(evidence),
            ScorerKind::Energetics => energetics::score(evidence),
            ScorerKind::Qualitative => qualitative::score(evidence),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScorerKind::Rate => "rate",
            ScorerKind::Titration => "titration",
            ScorerKind::Crystallisation => "crystallisation",
            ScorerKind::Quantitative => "quantitative",
            ScorerKind::Energetics => "energetics",
            ScorerKind::Qualitative => "qualitative",
        }
    }
}
