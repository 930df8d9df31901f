//! Question papers: static exam content the scoring engine grades against
//!
//! Papers are plain data and can be loaded from TOML. `default_paper()` is
//! the standard three-question paper used when a caller has none.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{PracticalError, Result};

/// Coarse question type; selects the scorer family
///
/// Unrecognised type names load as `Other` and are scored on the
/// quantitative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    Quantitative,
    Energetics,
    Qualitative,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Quantitative => "quantitative",
            QuestionType::Energetics => "energetics",
            QuestionType::Qualitative => "qualitative",
            QuestionType::Other(name) => name,
        }
    }
}

impl From<String> for QuestionType {
    fn from(name: String) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "quantitative" => QuestionType::Quantitative,
            "energetics" => QuestionType::Energetics,
            "qualitative" => QuestionType::Qualitative,
            _ => QuestionType::Other(name),
        }
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPart {
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub marks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub context: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub marks: u32,
    #[serde(default)]
    pub parts: Vec<QuestionPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPaper {
    pub id: String,
    pub title: String,
    pub marks: u32,
    pub questions: Vec<Question>,
}

impl QuestionPaper {
    /// Parse and validate a paper from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let paper: QuestionPaper = toml::from_str(content)?;
        paper.validate()?;
        Ok(paper)
    }

    /// Check the paper is internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(PracticalError::InvalidPaper(format!(
                "{}: paper has no questions",
                self.id
            )));
        }

        let mut seen = AHashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(PracticalError::InvalidPaper(format!(
                    "{}: duplicate question id '{}'",
                    self.id, question.id
                )));
            }
        }

        let sum: u32 = self.questions.iter().map(|q| q.marks).sum();
        if sum != self.marks {
            return Err(PracticalError::InvalidPaper(format!(
                "{}: question marks sum to {} but paper is worth {}",
                self.id, sum, self.marks
            )));
        }

        Ok(())
    }
}

/// Load a paper from a TOML file
pub fn load_paper(path: &Path) -> Result<QuestionPaper> {
    let content = std::fs::read_to_string(path)?;
    QuestionPaper::from_toml_str(&content)
}

fn part(id: &str, prompt: &str, marks: u32) -> QuestionPart {
    QuestionPart {
        id: id.into(),
        prompt: prompt.into(),
        marks,
    }
}

/// The standard practical paper: rate (17), energetics (10), qualitative (13)
pub fn default_paper() -> QuestionPaper {
    QuestionPaper {
        id: "practical-default".into(),
        title: "Chemistry Practical Examination".into(),
        marks: 40,
        questions: vec![
            Question {
                id: "Q1".into(),
                title: "Rate of reaction between sodium thiosulfate and hydrochloric acid".into(),
                context: "Use the disappearing-cross clock method to find how the concentration \
                          of thiosulfate affects the rate of reaction."
                    .into(),
                question_type: QuestionType::Quantitative,
                marks: 17,
                parts: vec![
                    part("1(a)", "Record your times in a suitable results table.", 6),
                    part("1(b)", "Calculate a rate for each experiment.", 3),
                    part("1(c)", "Plot a graph of rate against concentration.", 4),
                    part("1(d)", "State and explain your conclusion.", 4),
                ],
            },
            Question {
                id: "Q2".into(),
                title: "Enthalpy change of neutralisation".into(),
                context: "React sodium hydroxide with hydrochloric acid in an insulated cup \
                          and measure the temperature rise."
                    .into(),
                question_type: QuestionType::Energetics,
                marks: 10,
                parts: vec![
                    part("2(a)", "Record the initial and maximum temperatures.", 4),
                    part("2(b)", "Calculate the heat released.", 3),
                    part("2(c)", "Calculate the enthalpy change of neutralisation.", 3),
                ],
            },
            Question {
                id: "Q3".into(),
                title: "Qualitative analysis of FA 3".into(),
                context: "Carry out the tests on FA 3, record your observations and identify \
                          the ions present."
                    .into(),
                question_type: QuestionType::Qualitative,
                marks: 13,
                parts: vec![
                    part("3(a)", "Tests with aqueous sodium hydroxide.", 4),
                    part("3(b)", "Tests for anions.", 4),
                    part("3(c)", "Test any gas evolved.", 2),
                    part("3(d)", "Identify the ions and write an ionic equation.", 3),
                ],
            },
        ],
    }
}
