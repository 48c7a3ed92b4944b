//! Overall-success rule and summary line for a finished run.

use super::models::StepCounts;

/// A run succeeds when nothing failed, or when completed steps strictly
/// outnumber failed ones. Skipped steps are neutral: two completes beside one
/// failure is a success, one complete beside one failure is not.
pub fn overall_success(counts: &StepCounts) -> bool {
    counts.failed == 0 || (counts.completed > 0 && counts.failed < counts.completed)
}

pub fn summarize(counts: &StepCounts, success: bool) -> String {
    format!(
        "{} complete, {} failed, {} skipped (success: {})",
        counts.completed, counts.failed, counts.skipped, success
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(completed: usize, failed: usize, skipped: usize) -> StepCounts {
        StepCounts {
            completed,
            failed,
            skipped,
            pending: 6 - completed - failed - skipped,
        }
    }

    #[test]
    fn success_table() {
        let cases = [
            // (completed, failed, skipped, expected)
            (6, 0, 0, true),
            (1, 0, 5, true),
            (0, 0, 6, true),
            (2, 1, 3, true),
            (5, 1, 0, true),
            (1, 1, 4, false),
            (0, 1, 0, false),
            (2, 2, 2, false),
            (1, 2, 3, false),
        ];

        for (completed, failed, skipped, expected) in cases {
            assert_eq!(
                overall_success(&counts(completed, failed, skipped)),
                expected,
                "completed={} failed={} skipped={}",
                completed,
                failed,
                skipped
            );
        }
    }

    #[test]
    fn summary_reports_counts_and_flag() {
        assert_eq!(
            summarize(&counts(4, 1, 1), true),
            "4 complete, 1 failed, 1 skipped (success: true)"
        );
    }
}
