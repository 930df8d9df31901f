//! Qualitative analysis: reagent tests, observations and ion identification

use crate::lab::log::LabAction;
use crate::rubric::criterion::{rung, Criterion, Ladder, Status};
use crate::rubric::evidence::Evidence;
use crate::rubric::text::ION_IDENTIFICATION;

/// The four canonical test reagents, each worth a mark when used
pub const CANONICAL_REAGENTS: &[(&str, &str)] = &[
    ("NaOH", "aqueous sodium hydroxide"),
    ("BaCl2", "aqueous barium chloride"),
    ("AgNO3", "aqueous silver nitrate"),
    ("KMnO4", "acidified potassium manganate(VII)"),
];

pub const DIVERSITY_LADDER: Ladder = Ladder::new(&[
    rung(4, 3, Status::Pass),
    rung(2, 2, Status::Partial),
    rung(1, 1, Status::Warn),
]);

pub fn score(evidence: &Evidence) -> Vec<Criterion> {
    let mut criteria: Vec<Criterion> = CANONICAL_REAGENTS
        .iter()
        .map(|(id, name)| {
            Criterion::check(
                evidence.used_chemical(id),
                1,
                &format!("Tested with {}", name),
                &format!("No test with {}", name),
            )
        })
        .collect();

    let distinct = evidence.distinct_chemicals_added();
    criteria.push(Criterion::graded(
        &DIVERSITY_LADDER,
        distinct,
        format!("{} different reagent(s) used", distinct),
    ));

    criteria.push(Criterion::check(
        evidence.count_where(LabAction::is_gas_test) > 0,
        1,
        "Gas test performed",
        "No gas test performed",
    ));
    criteria.push(Criterion::check(
        evidence.has_recorded_observation(),
        2,
        "Observations recorded",
        "No observations recorded",
    ));
    criteria.push(Criterion::check(
        evidence.notes_match(&ION_IDENTIFICATION),
        2,
        "Ions identified",
        "No ions identified",
    ));
    criteria.push(Criterion::check(
        evidence.notes_have_ionic_equation(),
        1,
        "Ionic equation with state symbols",
        "No ionic equation found",
    ));

    criteria
}
