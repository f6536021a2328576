use super::rules::StateRules;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which statutory window the landlord let lapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// Single-window states: neither a refund nor an itemization went out in time.
    MissedReturnDeadline,
    /// Split-window states: the itemized deduction notice went out late or never.
    MissedItemizationDeadline,
}

impl ViolationType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MissedReturnDeadline => "Missed deposit return deadline",
            Self::MissedItemizationDeadline => "Missed itemized notice deadline",
        }
    }
}

/// Deadline facts derived from a move-out date and a state's rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineAnalysis {
    pub move_out_date: NaiveDate,
    pub reference_date: NaiveDate,
    pub return_deadline: NaiveDate,
    pub claim_deadline: NaiveDate,
    pub return_deadline_passed: bool,
    pub claim_deadline_passed: bool,
    pub days_until_return_deadline: i64,
    pub days_until_claim_deadline: i64,
    pub landlord_in_violation: bool,
    pub violation_type: Option<ViolationType>,
}

/// Compute return and claim deadlines relative to `reference_date`.
///
/// Move-out dates after the reference date are accepted as-is: both windows
/// are simply still open.
pub fn analyze_deadlines(
    move_out_date: NaiveDate,
    rules: &StateRules,
    reference_date: NaiveDate,
) -> DeadlineAnalysis {
    let return_deadline = rules.day_unit.advance(move_out_date, rules.return_deadline);
    let claim_deadline = rules.day_unit.advance(move_out_date, rules.claim_deadline);

    let return_deadline_passed = reference_date > return_deadline;
    let claim_deadline_passed = reference_date > claim_deadline;

    let violation_type = claim_deadline_passed.then(|| {
        if rules.has_single_deadline() {
            ViolationType::MissedReturnDeadline
        } else {
            ViolationType::MissedItemizationDeadline
        }
    });

    DeadlineAnalysis {
        move_out_date,
        reference_date,
        return_deadline,
        claim_deadline,
        return_deadline_passed,
        claim_deadline_passed,
        days_until_return_deadline: days_between(reference_date, return_deadline),
        days_until_claim_deadline: days_between(reference_date, claim_deadline),
        landlord_in_violation: claim_deadline_passed,
        violation_type,
    }
}

/// [`analyze_deadlines`] against the local calendar date.
pub fn analyze_deadlines_today(move_out_date: NaiveDate, rules: &StateRules) -> DeadlineAnalysis {
    analyze_deadlines(move_out_date, rules, Local::now().date_naive())
}

pub(crate) fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::deposit::rules::get_state_rules_by_code;
    use chrono::Duration;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn rules(code: &str) -> &'static StateRules {
        get_state_rules_by_code(code).expect("state present")
    }

    #[test]
    fn florida_claim_deadline_lapses_after_thirty_days() {
        let analysis = analyze_deadlines(date(2025, 1, 1), rules("FL"), date(2025, 3, 1));

        assert_eq!(analysis.return_deadline, date(2025, 1, 16));
        assert_eq!(analysis.claim_deadline, date(2025, 1, 31));
        assert!(analysis.return_deadline_passed);
        assert!(analysis.claim_deadline_passed);
        assert_eq!(analysis.days_until_claim_deadline, -29);
        assert!(analysis.landlord_in_violation);
        assert_eq!(
            analysis.violation_type,
            Some(ViolationType::MissedItemizationDeadline)
        );
    }

    #[test]
    fn deadline_day_itself_is_not_passed() {
        let analysis = analyze_deadlines(date(2025, 1, 1), rules("FL"), date(2025, 1, 31));
        assert!(!analysis.claim_deadline_passed);
        assert_eq!(analysis.days_until_claim_deadline, 0);
        assert!(!analysis.landlord_in_violation);
        assert_eq!(analysis.violation_type, None);
    }

    #[test]
    fn return_window_can_lapse_before_claim_window() {
        let analysis = analyze_deadlines(date(2025, 1, 1), rules("FL"), date(2025, 1, 20));
        assert!(analysis.return_deadline_passed);
        assert!(!analysis.claim_deadline_passed);
        assert!(!analysis.landlord_in_violation);
        assert_eq!(analysis.days_until_return_deadline, -4);
        assert_eq!(analysis.days_until_claim_deadline, 11);
    }

    #[test]
    fn single_window_states_report_missed_return() {
        let analysis = analyze_deadlines(date(2025, 1, 1), rules("CA"), date(2025, 3, 1));
        assert_eq!(analysis.claim_deadline, date(2025, 1, 22));
        assert_eq!(
            analysis.violation_type,
            Some(ViolationType::MissedReturnDeadline)
        );
    }

    #[test]
    fn future_move_out_is_accepted_without_violation() {
        let analysis = analyze_deadlines(date(2025, 6, 1), rules("FL"), date(2025, 5, 1));
        assert!(!analysis.return_deadline_passed);
        assert!(!analysis.claim_deadline_passed);
        assert_eq!(analysis.days_until_claim_deadline, 61);
    }

    #[test]
    fn extreme_dates_do_not_panic() {
        let analysis = analyze_deadlines(NaiveDate::MAX, rules("FL"), date(2025, 1, 1));
        assert_eq!(analysis.claim_deadline, NaiveDate::MAX);
        assert!(!analysis.landlord_in_violation);
    }

    #[test]
    fn analysis_is_deterministic() {
        let florida = rules("FL");
        let first = analyze_deadlines(date(2024, 11, 12), florida, date(2025, 1, 2));
        let second = analyze_deadlines(date(2024, 11, 12), florida, date(2025, 1, 2));
        assert_eq!(first, second);
    }

    #[test]
    fn earlier_move_out_strictly_shrinks_days_remaining() {
        let florida = rules("FL");
        let today = date(2025, 3, 1);
        let mut previous: Option<DeadlineAnalysis> = None;
        let mut flips = 0;

        for offset in 0..90 {
            let move_out = today - Duration::days(offset);
            let analysis = analyze_deadlines(move_out, florida, today);
            if let Some(prev) = &previous {
                assert!(analysis.days_until_claim_deadline < prev.days_until_claim_deadline);
                if analysis.claim_deadline_passed != prev.claim_deadline_passed {
                    assert!(analysis.claim_deadline_passed, "flag never flips back");
                    flips += 1;
                }
            }
            previous = Some(analysis);
        }

        assert_eq!(flips, 1);
    }

    #[test]
    fn claim_date_never_precedes_return_date() {
        for rules in crate::workflows::deposit::rules::get_all_states() {
            let analysis = analyze_deadlines(date(2025, 1, 3), rules, date(2025, 2, 1));
            assert!(
                analysis.claim_deadline >= analysis.return_deadline,
                "{}",
                rules.code
            );
        }
    }

    // Arizona is the only built-in business-day state. Its deadline lands later
    // than a naive calendar count would; if the registry ever switches it to a
    // calendar estimate this test must change with it.
    #[test]
    fn arizona_deadline_counts_business_days() {
        let analysis = analyze_deadlines(date(2025, 1, 3), rules("AZ"), date(2025, 1, 20));
        assert_eq!(analysis.claim_deadline, date(2025, 1, 24));
        assert_ne!(analysis.claim_deadline, date(2025, 1, 17));
        assert_eq!(analysis.days_until_claim_deadline, 4);
    }
}
