//! Rubric criteria and threshold ladders

use serde::{Deserialize, Serialize};

/// Severity hint for rendering; the marks are the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Partial,
    Warn,
    Fail,
}

/// One atomic, independently scored check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub status: Status,
    pub text: String,
    pub marks: u32,
    /// Most this check can award
    pub available: u32,
}

impl Criterion {
    /// All-or-nothing check
    pub fn check(passed: bool, marks: u32, pass_text: &str, fail_text: &str) -> Self {
        if passed {
            Self {
                status: Status::Pass,
                text: pass_text.to_string(),
                marks,
                available: marks,
            }
        } else {
            Self {
                status: Status::Fail,
                text: fail_text.to_string(),
                marks: 0,
                available: marks,
            }
        }
    }

    /// Graded by a threshold ladder over a count
    pub fn graded(ladder: &Ladder, count: usize, text: String) -> Self {
        let (marks, status) = ladder.award(count);
        Self {
            status,
            text,
            marks,
            available: ladder.max_marks(),
        }
    }
}

/// One step of a ladder: at least `at_least` earns `marks`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rung {
    pub at_least: usize,
    pub marks: u32,
    pub status: Status,
}

/// Threshold ladder, highest rung first; below the last rung is 0 / Fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ladder {
    rungs: &'static [Rung],
}

impl Ladder {
    pub const fn new(rungs: &'static [Rung]) -> Self {
        Self { rungs }
    }

    pub fn award(&self, count: usize) -> (u32, Status) {
        self.rungs
            .iter()
            .find(|rung| count >= rung.at_least)
            .map(|rung| (rung.marks, rung.status))
            .unwrap_or((0, Status::Fail))
    }

    pub fn max_marks(&self) -> u32 {
        self.rungs.iter().map(|r| r.marks).max().unwrap_or(0)
    }
}

pub const fn rung(at_least: usize, marks: u32, status: Status) -> Rung {
    Rung {
        at_least,
        marks,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_STEP: Ladder = Ladder::new(&[
        rung(5, 3, Status::Pass),
        rung(3, 2, Status::Partial),
        rung(1, 1, Status::Warn),
    ]);

    #[test]
    fn test_ladder_thresholds_inclusive() {
        assert_eq!(FOUR_STEP.award(0), (0, Status::Fail));
        assert_eq!(FOUR_STEP.award(1), (1, Status::Warn));
        assert_eq!(FOUR_STEP.award(2), (1, Status::Warn));
        assert_eq!(FOUR_STEP.award(3), (2, Status::Partial));
        assert_eq!(FOUR_STEP.award(5), (3, Status::Pass));
        assert_eq!(FOUR_STEP.award(50), (3, Status::Pass));
        assert_eq!(FOUR_STEP.max_marks(), 3);
    }

    #[test]
    fn test_check_awards_all_or_nothing() {
        let passed = Criterion::check(true, 2, "yes", "no");
        assert_eq!((passed.marks, passed.status, passed.text.as_str()), (2, Status::Pass, "yes"));

        let failed = Criterion::check(false, 2, "yes", "no");
        assert_eq!((failed.marks, failed.status, failed.available), (0, Status::Fail, 2));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Partial).unwrap(), "\"partial\"");
    }
}
