//! Rate of reaction by the clock method

use crate::lab::log::LabAction;
use crate::rubric::criterion::{rung, Criterion, Ladder, Status};
use crate::rubric::evidence::Evidence;
use crate::rubric::text::{GRAPH, RATE_EXPRESSION, RESULTS_TABLE};

/// Timed runs, counted by `stop_clock`
pub const EXPERIMENT_LADDER: Ladder = Ladder::new(&[
    rung(5, 3, Status::Pass),
    rung(3, 2, Status::Partial),
    rung(1, 1, Status::Warn),
]);

pub fn score(evidence: &Evidence) -> Vec<Criterion> {
    let starts = evidence.count(&LabAction::StartClock);
    let stops = evidence.count(&LabAction::StopClock);

    vec![
        Criterion::check(
            evidence.used_chemical("Na2S2O3") && evidence.used_chemical("HCl"),
            2,
            "Sodium thiosulfate and hydrochloric acid used",
            "Both reagents (Na2S2O3 and HCl) must be used",
        ),
        clock_criterion(starts, stops),
        Criterion::graded(
            &EXPERIMENT_LADDER,
            stops,
            format!("{} timed experiment(s) completed", stops),
        ),
        Criterion::check(
            evidence.used_chemical("H2O"),
            2,
            "Distilled water used to vary concentration",
            "Concentration not varied with distilled water",
        ),
        Criterion::check(
            evidence.notes_match(&RESULTS_TABLE),
            2,
            "Results recorded in a table",
            "No results table found",
        ),
        Criterion::check(
            evidence.notes_match(&RATE_EXPRESSION),
            2,
            "Rate expressed as 1/t",
            "No rate calculation found",
        ),
        Criterion::check(
            evidence.notes_match(&GRAPH),
            2,
            "Graph of results described",
            "No graph found",
        ),
    ]
}

fn clock_criterion(starts: usize, stops: usize) -> Criterion {
    let (status, marks, text) = match (starts > 0, stops > 0) {
        (true, true) => (Status::Pass, 2, "Clock started and stopped"),
        (true, false) => (Status::Partial, 1, "Clock started but never stopped"),
        _ => (Status::Fail, 0, "Reaction was not timed"),
    };

    Criterion {
        status,
        text: text.to_string(),
        marks,
        available: 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RubricConfig;
    use crate::lab::log::ActionLogEntry;

    fn timed_log(starts: usize, stops: usize) -> Vec<ActionLogEntry> {
        let mut log = vec![
            ActionLogEntry::added("Na2S2O3", 10.0, 0),
            ActionLogEntry::added("HCl", 5.0, 1),
        ];
        log.extend((0..starts).map(|i| ActionLogEntry::new(LabAction::StartClock, 10 + i as u64)));
        log.extend((0..stops).map(|i| ActionLogEntry::new(LabAction::StopClock, 50 + i as u64)));
        log
    }

    #[test]
    fn test_clock_ladder() {
        assert_eq!(clock_criterion(1, 1).marks, 2);
        let partial = clock_criterion(3, 0);
        assert_eq!((partial.marks, partial.status), (1, Status::Partial));
        assert_eq!(clock_criterion(0, 2).marks, 0);
    }

    #[test]
    fn test_full_marks_with_notes() {
        let mut log = timed_log(5, 5);
        log.push(ActionLogEntry::added("H2O", 20.0, 100));
        let config = RubricConfig::default();
        let notes = "Results table:\nrate = 1/t\nI plotted a graph of rate against volume";
        let criteria = score(&Evidence::new(&log, notes, &config));

        let total: u32 = criteria.iter().map(|c| c.marks).sum();
        let available: u32 = criteria.iter().map(|c| c.available).sum();
        assert_eq!(total, 15);
        assert_eq!(available, 15);
    }

    #[test]
    fn test_experiment_count_thresholds() {
        let config = RubricConfig::default();
        for (stops, expected) in [(0, 0), (1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3)] {
            let log = timed_log(stops, stops);
            let criteria = score(&Evidence::new(&log, "", &config));
            assert_eq!(criteria[2].marks, expected, "{} stops", stops);
        }
    }
}
