//! Log evaluation: per-question sections, capped totals and the grade

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::core::config::RubricConfig;
use crate::lab::log::ActionLogEntry;
use crate::rubric::criterion::Criterion;
use crate::rubric::evidence::Evidence;
use crate::rubric::paper::{default_paper, Question, QuestionPaper};
use crate::rubric::scorers::ScorerKind;

/// Overall grade, from the fraction of available marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A*")]
    APlus,
    A,
    B,
    C,
    D,
    U,
}

impl Grade {
    /// Inclusive lower bounds, compared without rounding
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction >= 0.88 {
            Grade::APlus
        } else if fraction >= 0.78 {
            Grade::A
        } else if fraction >= 0.68 {
            Grade::B
        } else if fraction >= 0.58 {
            Grade::C
        } else if fraction >= 0.48 {
            Grade::D
        } else {
            Grade::U
        }
    }

    /// A paper worth nothing grades U
    pub fn for_score(total: u32, max_marks: u32) -> Self {
        if max_marks == 0 {
            return Grade::U;
        }
        Self::from_fraction(total as f64 / max_marks as f64)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A*",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::U => "U",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scored result for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub label: String,
    /// Sum of criterion marks, capped at `max`
    pub score: u32,
    pub max: u32,
    pub criteria: Vec<Criterion>,
}

impl Section {
    fn score_question(question: &Question, evidence: &Evidence) -> Self {
        let kind = ScorerKind::for_question(question);
        let criteria = kind.score(evidence);
        let raw: u32 = criteria.iter().map(|c| c.marks).sum();
        let score = raw.min(question.marks);

        tracing::debug!(
            question = %question.id,
            scorer = kind.as_str(),
            raw,
            score,
            max = question.marks,
            "scored question"
        );

        Self {
            label: format!("{}: {}", question.id, question.title),
            score,
            max: question.marks,
            criteria,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub total: u32,
    pub max_marks: u32,
    pub grade: Grade,
    pub sections: Vec<Section>,
    /// Every criterion's text, section by section
    pub feedback: Vec<String>,
}

static DEFAULT_PAPER: OnceLock<QuestionPaper> = OnceLock::new();

/// The cached built-in paper used when a caller supplies none
pub fn cached_default_paper() -> &'static QuestionPaper {
    DEFAULT_PAPER.get_or_init(default_paper)
}

/// Score a log against a paper, falling back to the built-in paper
pub fn evaluate_log(
    log: &[ActionLogEntry],
    notes: &str,
    paper: Option<&QuestionPaper>,
) -> EvaluationResult {
    let paper = match paper {
        Some(paper) => paper,
        None => {
            tracing::debug!("no paper supplied, using the built-in default paper");
            cached_default_paper()
        }
    };
    evaluate_log_with(log, notes, paper, &RubricConfig::default())
}

pub fn evaluate_log_with(
    log: &[ActionLogEntry],
    notes: &str,
    paper: &QuestionPaper,
    config: &RubricConfig,
) -> EvaluationResult {
    let evidence = Evidence::new(log, notes, config);

    let sections: Vec<Section> = paper
        .questions
        .iter()
        .map(|question| Section::score_question(question, &evidence))
        .collect();

    let total: u32 = sections.iter().map(|s| s.score).sum();
    let max_marks = paper.marks;
    let grade = Grade::for_score(total, max_marks);

    tracing::info!(
        paper = %paper.id,
        entries = log.len(),
        total,
        max_marks,
        grade = grade.as_str(),
        "evaluated action log"
    );

    EvaluationResult {
        total,
        max_marks,
        grade,
        feedback: feedback(&sections),
        sections,
    }
}

fn feedback(sections: &[Section]) -> Vec<String> {
    sections
        .iter()
        .flat_map(|s| s.criteria.iter().map(|c| c.text.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_fraction(1.0), Grade::APlus);
        assert_eq!(Grade::from_fraction(0.88), Grade::APlus);
        assert_eq!(Grade::from_fraction(0.8799), Grade::A);
        assert_eq!(Grade::from_fraction(0.78), Grade::A);
        assert_eq!(Grade::from_fraction(0.68), Grade::B);
        assert_eq!(Grade::from_fraction(0.58), Grade::C);
        assert_eq!(Grade::from_fraction(0.48), Grade::D);
        assert_eq!(Grade::from_fraction(0.4799), Grade::U);
        assert_eq!(Grade::from_fraction(0.0), Grade::U);
    }

    #[test]
    fn test_exact_boundary_fractions() {
        assert_eq!(Grade::for_score(22, 25), Grade::APlus);
        assert_eq!(Grade::for_score(21, 25), Grade::A);
        assert_eq!(Grade::for_score(0, 0), Grade::U);
    }

    #[test]
    fn test_grade_serializes_with_star() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A*\"");
        assert_eq!(serde_json::to_string(&Grade::U).unwrap(), "\"U\"");
    }

    #[test]
    fn test_empty_log_on_default_paper() {
        let result = evaluate_log(&[], "", None);
        assert_eq!(result.sections.len(), 3);
        assert_eq!(result.max_marks, 40);
        assert_eq!(result.total, 0);
        assert_eq!(result.grade, Grade::U);
        assert_eq!(
            result.sections[0].label,
            "Q1: Rate of reaction between sodium thiosulfate and hydrochloric acid"
        );
        assert_eq!(result.feedback.len(), 22);
    }

    #[test]
    fn test_feedback_is_every_criterion_text_in_order() {
        let log = vec![ActionLogEntry::new(crate::lab::log::LabAction::StartClock, 0)];
        let result = evaluate_log(&log, "", None);

        let texts: Vec<String> = result
            .sections
            .iter()
            .flat_map(|s| s.criteria.iter().map(|c| c.text.clone()))
            .collect();
        assert_eq!(texts.len(), 22);
        assert_eq!(result.feedback, texts);
        assert_eq!(result.feedback[1], "Clock started but never stopped");
    }
}
