//! Fallback for quantitative questions with no recognised experiment

use crate::lab::log::LabAction;
use crate::rubric::criterion::{rung, Criterion, Ladder, Status};
use crate::rubric::evidence::Evidence;
use crate::rubric::text::{CALCULATION, UNITS};

pub const REAGENT_LADDER: Ladder =
    Ladder::new(&[rung(2, 2, Status::Pass), rung(1, 1, Status::Partial)]);

pub const MEASUREMENT_LADDER: Ladder =
    Ladder::new(&[rung(2, 2, Status::Pass), rung(1, 1, Status::Partial)]);

pub fn score(evidence: &Evidence) -> Vec<Criterion> {
    let reagents = evidence.distinct_chemicals_added();
    let measurements = evidence
        .count_where(|action| matches!(action, LabAction::Weigh | LabAction::MeasureTemp));

    vec![
        Criterion::graded(
            &REAGENT_LADDER,
            reagents,
            format!("{} reagent(s) used", reagents),
        ),
        Criterion::graded(
            &MEASUREMENT_LADDER,
            measurements,
            format!("{} measurement(s) taken", measurements),
        ),
        Criterion::check(
            evidence.notes_match(&CALCULATION),
            2,
            "Calculation shown",
            "No calculation found",
        ),
        Criterion::check(
            evidence.notes_match(&UNITS),
            1,
            "Values given with units",
            "No units given",
        ),
    ]
}
