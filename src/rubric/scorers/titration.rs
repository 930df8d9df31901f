//! Acid-base titration

use crate::lab::log::LabAction;
use crate::rubric::criterion::{rung, Criterion, Ladder, Status};
use crate::rubric::evidence::Evidence;
use crate::rubric::text::{MEAN_TITRE, MOLES, TITRE};

pub const ADDITION_LADDER: Ladder =
    Ladder::new(&[rung(3, 3, Status::Pass), rung(1, 1, Status::Partial)]);

const INDICATORS: &[&str] = &["phenolphthalein", "methyl_orange"];

pub fn score(evidence: &Evidence) -> Vec<Criterion> {
    let additions = evidence.count(&LabAction::AddChemical);

    vec![
        Criterion::graded(
            &ADDITION_LADDER,
            additions,
            format!("{} addition(s) made", additions),
        ),
        Criterion::check(
            evidence.used_any(INDICATORS) || evidence.mentions("indicator"),
            1,
            "Indicator used",
            "No indicator used",
        ),
        Criterion::check(
            evidence.notes_match(&TITRE),
            2,
            "Burette readings recorded to 0.05 cm³",
            "No titre values recorded to two decimal places",
        ),
        Criterion::check(
            evidence.notes_match(&MEAN_TITRE),
            2,
            "Mean titre calculated",
            "No mean titre found",
        ),
        Criterion::check(
            evidence.notes_match(&MOLES),
            2,
            "Moles or concentration calculated",
            "No mole calculation found",
        ),
        Criterion::check(
            evidence.count(&LabAction::Transfer) > 0 || evidence.mentions("pipette"),
            1,
            "Pipette used to transfer the aliquot",
            "No pipette transfer recorded",
        ),
    ]
}
