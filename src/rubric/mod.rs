//! Rubric scoring engine
//!
//! Scores an action log and free-text notes against a question paper. Every
//! input degrades to a zero or partial result; nothing here can fail.

pub mod criterion;
pub mod evaluate;
pub mod evidence;
pub mod notes;
pub mod paper;
pub mod scorers;
pub mod text;

pub use criterion::{Criterion, Ladder, Status};
pub use evaluate::{evaluate_log, evaluate_log_with, EvaluationResult, Grade, Section};
pub use evidence::Evidence;
pub use notes::flatten_notes;
pub use paper::{default_paper, load_paper, Question, QuestionPaper, QuestionPart, QuestionType};
pub use scorers::ScorerKind;
