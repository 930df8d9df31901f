//! Enthalpy change by calorimetry

use crate::lab::log::LabAction;
use crate::rubric::criterion::{rung, Criterion, Ladder, Status};
use crate::rubric::evidence::Evidence;
use crate::rubric::text::{ENTHALPY_CHANGE, HEAT_EQUATION};

pub const TEMPERATURE_LADDER: Ladder =
    Ladder::new(&[rung(2, 2, Status::Pass), rung(1, 1, Status::Partial)]);

pub fn score(evidence: &Evidence) -> Vec<Criterion> {
    let readings = evidence.count(&LabAction::MeasureTemp);

    vec![
        Criterion::check(
            evidence.count(&LabAction::Weigh) > 0,
            2,
            "Mass measured",
            "Mass was not measured",
        ),
        Criterion::graded(
            &TEMPERATURE_LADDER,
            readings,
            format!("{} temperature reading(s)", readings),
        ),
        Criterion::check(
            evidence.count(&LabAction::Stir) > 0,
            1,
            "Mixture stirred",
            "Mixture was not stirred",
        ),
        Criterion::check(
            evidence.distinct_chemicals_added() >= 2,
            1,
            "Reagents combined",
            "Fewer than two reagents combined",
        ),
        Criterion::check(
            evidence.notes_match(&HEAT_EQUATION),
            2,
            "q = mcΔT used",
            "No q = mcΔT calculation found",
        ),
        Criterion::check(
            evidence.notes_match(&ENTHALPY_CHANGE),
            2,
            "ΔH calculated",
            "No ΔH value found",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RubricConfig;
    use crate::lab::log::ActionLogEntry;

    #[test]
    fn test_single_reading_is_partial() {
        let log = vec![ActionLogEntry::new(LabAction::MeasureTemp, 0)];
        let config = RubricConfig::default();
        let criteria = score(&Evidence::new(&log, "", &config));
        assert_eq!((criteria[1].marks, criteria[1].status), (1, Status::Partial));
    }

    #[test]
    fn test_full_calorimetry() {
        let log = vec![
            ActionLogEntry::new(LabAction::Weigh, 0),
            ActionLogEntry::new(LabAction::MeasureTemp, 1),
            ActionLogEntry::added("HCl", 25.0, 2),
            ActionLogEntry::added("NaOH", 25.0, 3),
            ActionLogEntry::new(LabAction::Stir, 4),
            ActionLogEntry::new(LabAction::MeasureTemp, 5),
        ];
        let notes = "q = mcΔT = 50 × 4.18 × 6.5 = 1358.5 J\nΔH = -54.3 kJ mol-1";
        let config = RubricConfig::default();
        let criteria = score(&Evidence::new(&log, notes, &config));
        assert_eq!(criteria.iter().map(|c| c.marks).sum::<u32>(), 10);
    }
}
