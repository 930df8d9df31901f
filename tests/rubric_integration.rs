//! Integration tests for the rubric scoring engine
//!
//! These tests grade complete logs against question papers:
//! - Graceful degradation on an empty log or missing paper
//! - Threshold ladders on the rate-of-reaction question
//! - Independence of criteria on the qualitative question
//! - Exact grade boundaries and total consistency
//!
//! Logs are built with the same entry builders a lab session uses.

use chem_practical::core::config::{EngineConfig, RubricConfig};
use chem_practical::lab::log::{ActionLogEntry, LabAction};
use chem_practical::rubric::criterion::Status;
use chem_practical::rubric::evaluate::{evaluate_log_with, Grade};
use chem_practical::rubric::notes::flatten_notes;
use chem_practical::rubric::paper::{load_paper, QuestionPaper};
use chem_practical::{default_paper, evaluate_log};
use std::path::Path;

fn clock_runs(starts: usize, stops: usize) -> Vec<ActionLogEntry> {
    let mut log = Vec::new();
    let mut ts = 0;
    for i in 0..starts.max(stops) {
        if i < starts {
            log.push(ActionLogEntry::new(LabAction::StartClock, ts));
            ts += 1;
        }
        if i < stops {
            log.push(ActionLogEntry::new(LabAction::StopClock, ts));
            ts += 1;
        }
    }
    log
}

fn criterion_marks(result: &chem_practical::rubric::EvaluationResult, section: usize) -> Vec<u32> {
    result.sections[section]
        .criteria
        .iter()
        .map(|c| c.marks)
        .collect()
}

// ============================================================================
// Graceful degradation
// ============================================================================

#[test]
fn test_empty_log_scores_zero_on_default_paper() {
    let result = evaluate_log(&[], "", None);

    assert_eq!(result.sections.len(), 3);
    assert_eq!(result.max_marks, 40);
    assert_eq!(result.total, 0);
    assert_eq!(result.grade, Grade::U);
    assert!(result.sections.iter().all(|s| s.score == 0));
}

#[test]
fn test_explicit_default_paper_matches_fallback() {
    let paper = default_paper();
    let log = clock_runs(3, 3);
    assert_eq!(
        evaluate_log(&log, "rate = 1/t", Some(&paper)),
        evaluate_log(&log, "rate = 1/t", None)
    );
}

#[test]
fn test_missing_answers_flatten_to_empty_text() {
    let notes = flatten_notes([("1(a)", None), ("1(b)", None)]);
    let result = evaluate_log(&[], &notes, None);
    assert_eq!(result.total, 0);
}

// ============================================================================
// Rate of reaction (Q1 of the default paper)
// ============================================================================

#[test]
fn test_five_timed_runs_reach_top_rung() {
    let result = evaluate_log(&clock_runs(5, 5), "", None);
    let rate = &result.sections[0];

    assert!(rate.criteria[2].marks >= 3);
    assert_eq!(rate.criteria[2].status, Status::Pass);
    assert_eq!(rate.criteria[1].marks, 2);
}

#[test]
fn test_started_but_never_stopped_is_partial() {
    let result = evaluate_log(&clock_runs(2, 0), "", None);
    let clock = &result.sections[0].criteria[1];

    assert_eq!(clock.status, Status::Partial);
    assert!(clock.marks > 0 && clock.marks < 2);
    assert_eq!(result.sections[0].criteria[2].marks, 0);
}

#[test]
fn test_complete_rate_work_scores_every_criterion() {
    let mut log = clock_runs(6, 6);
    log.push(ActionLogEntry::added("Na2S2O3", 50.0, 100));
    log.push(ActionLogEntry::added("HCl", 5.0, 101));
    log.push(ActionLogEntry::added("H2O", 10.0, 102));
    let notes = "Results table\nrate = 1/t\ngraph plotted";

    let result = evaluate_log(&log, notes, None);
    assert_eq!(result.sections[0].score, 15);
    assert!(result.sections[0].score <= result.sections[0].max);
}

// ============================================================================
// Qualitative analysis (Q3 of the default paper)
// ============================================================================

#[test]
fn test_reagent_and_observation_criteria_are_independent() {
    let observed = vec![ActionLogEntry::added("NaOH", 1.0, 1)
        .in_vessel("Test tube 1")
        .with_observation("white precipitate, soluble in excess")];
    let result = evaluate_log(&observed, "", None);
    let qualitative = criterion_marks(&result, 2);
    assert_eq!(qualitative[0], 1);
    assert_eq!(qualitative[6], 2);

    let silent = vec![ActionLogEntry::added("NaOH", 1.0, 1).in_vessel("Test tube 1")];
    let result = evaluate_log(&silent, "", None);
    let qualitative = criterion_marks(&result, 2);
    assert_eq!(qualitative[0], 1);
    assert_eq!(qualitative[6], 0);
}

#[test]
fn test_ionic_equation_needs_state_symbols() {
    let with_states = evaluate_log(&[], "Ba2+(aq) + SO4 2-(aq) -> BaSO4(s)", None);
    let without = evaluate_log(&[], "Ba2+ + SO4 2- -> BaSO4", None);

    assert_eq!(with_states.sections[2].criteria[8].marks, 1);
    assert_eq!(without.sections[2].criteria[8].marks, 0);
}

// ============================================================================
// Grade boundaries
// ============================================================================

fn boundary_paper() -> QuestionPaper {
    QuestionPaper::from_toml_str(
        r#"
id = "boundary"
title = "Boundary paper"
marks = 25

[[questions]]
id = "Q1"
title = "Enthalpy of neutralisation"
type = "energetics"
marks = 10

[[questions]]
id = "Q2"
title = "Identify FA 7"
type = "qualitative"
marks = 15
"#,
    )
    .expect("valid paper")
}

fn strong_log() -> Vec<ActionLogEntry> {
    vec![
        ActionLogEntry::new(LabAction::Weigh, 0),
        ActionLogEntry::new(LabAction::MeasureTemp, 1),
        ActionLogEntry::added("NaOH", 2.0, 2).with_observation("green precipitate forms"),
        ActionLogEntry::added("BaCl2", 2.0, 3),
        ActionLogEntry::added("AgNO3", 2.0, 4),
        ActionLogEntry::added("KMnO4", 2.0, 5),
        ActionLogEntry::new(LabAction::Stir, 6),
        ActionLogEntry::new(LabAction::MeasureTemp, 7),
        ActionLogEntry::new(LabAction::TestGasSplint, 8),
    ]
}

#[test]
fn test_exactly_88_percent_is_a_star() {
    let notes = "q = mcΔT = 1358 J\nΔH = -57 kJ/mol\nFA 7 contains Fe2+ and sulfate ions";
    let result = evaluate_log(&strong_log(), notes, Some(&boundary_paper()));

    assert_eq!(result.sections[0].score, 10);
    assert_eq!(result.sections[1].score, 12);
    assert_eq!(result.total, 22);
    assert_eq!(result.grade, Grade::APlus);
}

#[test]
fn test_one_mark_below_boundary_is_a() {
    let notes = "q = mcΔT = 1358 J\nΔH = -57 kJ/mol";
    let result = evaluate_log(&strong_log(), notes, Some(&boundary_paper()));

    assert_eq!(result.total, 20);
    assert_eq!(result.grade, Grade::A);
}

// ============================================================================
// Papers from disk and configuration
// ============================================================================

#[test]
fn test_titration_paper_from_disk() {
    let paper = load_paper(Path::new("data/papers/titration_crystallisation.toml")).expect("paper");
    let log = vec![
        ActionLogEntry::new(LabAction::Transfer, 0).with_details("25.0 cm3 FA 1 by pipette"),
        ActionLogEntry::added("phenolphthalein", 0.1, 1),
        ActionLogEntry::added("HCl", 22.10, 2),
        ActionLogEntry::added("HCl", 22.15, 3),
        ActionLogEntry::new(LabAction::Weigh, 4),
        ActionLogEntry::new(LabAction::Heat, 5),
        ActionLogEntry::new(LabAction::Weigh, 6),
    ];
    let notes = "Titres 22.10 22.15 cm3\nMean titre = 22.13 cm3\nmoles = 0.00221";

    let result = evaluate_log(&log, notes, Some(&paper));
    assert_eq!(result.sections.len(), 3);
    assert_eq!(result.max_marks, 35);
    assert_eq!(result.sections[0].score, 11);
    // one heat, two weighings, and "moles" alone is not water-of-crystallisation working
    assert_eq!(criterion_marks(&result, 1), vec![1, 2, 0, 0]);

    let sum: u32 = result.sections.iter().map(|s| s.score).sum();
    assert_eq!(result.total, sum);
}

#[test]
fn test_stricter_observation_length() {
    let log = vec![ActionLogEntry::added("NaOH", 1.0, 1).with_observation("white ppt")];
    let lenient = RubricConfig { min_observation_len: 5 };
    let strict = RubricConfig::default();
    let paper = default_paper();

    let a = evaluate_log_with(&log, "", &paper, &lenient);
    let b = evaluate_log_with(&log, "", &paper, &strict);
    assert_eq!(a.sections[2].criteria[6].marks, 2);
    assert_eq!(b.sections[2].criteria[6].marks, 0);
}

#[test]
fn test_shipped_engine_config_matches_defaults() {
    let config = EngineConfig::load(Path::new("data/config/engine.toml")).expect("config");
    assert_eq!(config, EngineConfig::default());
}
