//! Chem Practical - Headless Runner
//!
//! Simulates single bench actions and grades submitted logs, printing JSON.

use chem_practical::core::config::EngineConfig;
use chem_practical::core::error::Result;
use chem_practical::lab::log::{ActionLogEntry, LabAction};
use chem_practical::lab::vessel::Vessel;
use chem_practical::reactions::ReactionEngine;
use chem_practical::rubric::evaluate::{
    cached_default_paper, evaluate_log_with, EvaluationResult, Section,
};
use chem_practical::rubric::notes::flatten_notes;
use chem_practical::rubric::paper::{load_paper, QuestionPaper};

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Chemistry practical engines - reaction simulation and log grading
#[derive(Parser, Debug)]
#[command(name = "chem-practical")]
#[command(about = "Simulate bench reactions and grade practical exam logs")]
struct Args {
    /// Engine tuning (TOML); defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one action on a vessel
    React {
        /// Vessel state (JSON)
        #[arg(long)]
        vessel: PathBuf,

        /// Action name, e.g. add_chemical, heat, stop_clock
        #[arg(long, default_value = "add_chemical")]
        action: String,

        /// Seed for the reaction-time jitter; omit for exact times
        #[arg(long)]
        seed: Option<u64>,

        /// Also print the vessel with the result applied
        #[arg(long)]
        apply: bool,
    },
    /// Grade an action log against a paper
    Evaluate {
        /// Action log (JSON array of entries)
        #[arg(long)]
        log: PathBuf,

        /// Answers: a JSON object of part id to text, or plain text
        #[arg(long)]
        notes: Option<PathBuf>,

        /// Question paper (TOML); the built-in paper when omitted
        #[arg(long)]
        paper: Option<PathBuf>,
    },
    /// Print a question paper as JSON
    Paper {
        #[arg(long)]
        paper: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct ReactOutput<'a> {
    action: &'a str,
    rule: Option<&'a str>,
    result: chem_practical::reactions::ReactionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    vessel: Option<Vessel>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chem_practical=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::React {
            vessel,
            action,
            seed,
            apply,
        } => react(&config, &vessel, &action, seed, apply),
        Command::Evaluate { log, notes, paper } => {
            evaluate(&config, &log, notes.as_deref(), paper.as_deref())
        }
        Command::Paper { paper } => {
            let paper = resolve_paper(paper.as_deref())?;
            print_json(&paper)
        }
    }
}

fn react(
    config: &EngineConfig,
    vessel_path: &Path,
    action_name: &str,
    seed: Option<u64>,
    apply: bool,
) -> Result<()> {
    let mut vessel: Vessel = serde_json::from_str(&std::fs::read_to_string(vessel_path)?)?;
    let action = LabAction::parse(action_name);
    let engine = ReactionEngine::new(config.reaction.clone());

    let result = match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            engine.simulate_with_jitter(&vessel, &action, &mut rng)
        }
        None => engine.simulate(&vessel, &action),
    };
    let rule = engine.matching_rule(&vessel, &action).map(|r| r.id.as_str());

    let applied = if apply {
        vessel.apply_reaction(&action, &result);
        Some(vessel)
    } else {
        None
    };

    print_json(&ReactOutput {
        action: action.as_str(),
        rule,
        result,
        vessel: applied,
    })
}

fn evaluate(
    config: &EngineConfig,
    log_path: &Path,
    notes_path: Option<&Path>,
    paper_path: Option<&Path>,
) -> Result<()> {
    let log: Vec<ActionLogEntry> = serde_json::from_str(&std::fs::read_to_string(log_path)?)?;
    let notes = match notes_path {
        Some(path) => read_notes(path)?,
        None => String::new(),
    };
    let paper = resolve_paper(paper_path)?;

    let result = evaluate_log_with(&log, &notes, &paper, &config.rubric);
    if let Some(section) = weakest_section(&result) {
        tracing::info!(
            section = %section.label,
            score = section.score,
            max = section.max,
            "most marks lost here"
        );
    }
    print_json(&result)
}

/// Section with the lowest fraction of its marks, ignoring full marks
fn weakest_section(result: &EvaluationResult) -> Option<&Section> {
    result
        .sections
        .iter()
        .filter(|s| s.max > 0 && s.score < s.max)
        .min_by(|a, b| {
            let fa = a.score as f64 / a.max as f64;
            let fb = b.score as f64 / b.max as f64;
            fa.total_cmp(&fb)
        })
}

/// Structured answers are flattened; anything that is not a JSON object is
/// taken as already-flattened text
fn read_notes(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<BTreeMap<String, Option<String>>>(&content) {
        Ok(answers) => Ok(flatten_notes(
            answers
                .iter()
                .map(|(part, text)| (part.as_str(), text.as_deref())),
        )),
        Err(_) => Ok(content),
    }
}

fn resolve_paper(path: Option<&Path>) -> Result<QuestionPaper> {
    match path {
        Some(path) => load_paper(path),
        None => Ok(cached_default_paper().clone()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
