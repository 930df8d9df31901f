//! Water of crystallisation by heating to constant mass

use crate::lab::log::LabAction;
use crate::rubric::criterion::{rung, Criterion, Ladder, Status};
use crate::rubric::evidence::Evidence;
use crate::rubric::text::{FORMULA_MASS, WATER_OF_CRYSTALLISATION};

pub const HEATING_LADDER: Ladder =
    Ladder::new(&[rung(2, 3, Status::Pass), rung(1, 1, Status::Partial)]);

pub const WEIGHING_LADDER: Ladder = Ladder::new(&[
    rung(3, 3, Status::Pass),
    rung(2, 2, Status::Partial),
    rung(1, 1, Status::Warn),
]);

pub fn score(evidence: &Evidence) -> Vec<Criterion> {
    let heats = evidence.count(&LabAction::Heat);
    let weighs = evidence.count(&LabAction::Weigh);

    vec![
        Criterion::graded(
            &HEATING_LADDER,
            heats,
            format!("Heated {} time(s)", heats),
        ),
        Criterion::graded(
            &WEIGHING_LADDER,
            weighs,
            format!("{} weighing(s) recorded", weighs),
        ),
        Criterion::check(
            evidence.notes_match(&WATER_OF_CRYSTALLISATION),
            2,
            "Water of crystallisation calculated",
            "No water of crystallisation working found",
        ),
        Criterion::check(
            evidence.notes_match(&FORMULA_MASS),
            1,
            "Formula or Mr stated",
            "No formula or Mr found",
        ),
    ]
}
