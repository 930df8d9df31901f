//! Chem Practical - Reaction and Rubric Engines for a Chemistry Practical Exam
//!
//! Two pure engines: a first-match reaction rule table that decides what a
//! student sees at the bench, and a rubric scorer that grades the resulting
//! action log and notes against a question paper.

pub mod core;
pub mod lab;
pub mod reactions;
pub mod rubric;

pub use reactions::simulate_reaction;
pub use rubric::{default_paper, evaluate_log};
