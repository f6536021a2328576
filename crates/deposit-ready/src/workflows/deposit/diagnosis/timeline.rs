use super::domain::{NoticeStatus, TimelineEvent, TimelineEventKind};
use crate::workflows::deposit::deadlines::DeadlineAnalysis;
use chrono::NaiveDate;

pub(crate) fn build_timeline(
    analysis: &DeadlineAnalysis,
    status: NoticeStatus,
    notice_sent_date: Option<NaiveDate>,
    day_unit_label: &str,
) -> Vec<TimelineEvent> {
    let mut events = vec![TimelineEvent {
        date: analysis.move_out_date,
        kind: TimelineEventKind::Neutral,
        label: "You moved out".to_string(),
    }];

    if analysis.return_deadline != analysis.claim_deadline {
        events.push(TimelineEvent {
            date: analysis.return_deadline,
            kind: TimelineEventKind::Neutral,
            label: format!("Deadline to return the full deposit ({day_unit_label})"),
        });
    }

    let passed = analysis.claim_deadline_passed;
    let (claim_kind, claim_label) = match status {
        NoticeStatus::NoticeMissed => (
            TimelineEventKind::Violation,
            "Itemized notice deadline passed with no notice",
        ),
        NoticeStatus::NoticeLate => (TimelineEventKind::Violation, "Itemized notice deadline missed"),
        NoticeStatus::NoticeUnclear if passed => (
            TimelineEventKind::Violation,
            "Itemized notice deadline passed without a confirmed notice",
        ),
        NoticeStatus::NoticeTimely => (TimelineEventKind::Compliant, "Itemized notice deadline met"),
        NoticeStatus::NoticePending | NoticeStatus::NoticeUnclear => (
            TimelineEventKind::Compliant,
            "Deadline for the landlord's itemized notice",
        ),
    };
    events.push(TimelineEvent {
        date: analysis.claim_deadline,
        kind: claim_kind,
        label: claim_label.to_string(),
    });

    // Only a confirmed notice has a date worth charting.
    let notice = match (status, notice_sent_date) {
        (NoticeStatus::NoticeLate, Some(sent)) => Some((
            sent,
            TimelineEventKind::Violation,
            "Landlord sent notice late",
        )),
        (NoticeStatus::NoticeTimely, Some(sent)) => Some((
            sent,
            TimelineEventKind::Compliant,
            "Landlord sent itemized notice",
        )),
        _ => None,
    };
    if let Some((date, kind, label)) = notice {
        events.push(TimelineEvent {
            date,
            kind,
            label: label.to_string(),
        });
    }

    // stable: same-day events keep insertion order
    events.sort_by_key(|event| event.date);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::deposit::deadlines::analyze_deadlines;
    use crate::workflows::deposit::rules::get_state_rules_by_code;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn florida_analysis() -> DeadlineAnalysis {
        let florida = get_state_rules_by_code("FL").expect("florida present");
        analyze_deadlines(date(2025, 1, 1), florida, date(2025, 3, 1))
    }

    #[test]
    fn notice_before_return_deadline_is_sorted_into_place() {
        let events = build_timeline(
            &florida_analysis(),
            NoticeStatus::NoticeTimely,
            Some(date(2025, 1, 10)),
            "calendar days",
        );

        let dates: Vec<NaiveDate> = events.iter().map(|event| event.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 1, 1),
                date(2025, 1, 10),
                date(2025, 1, 16),
                date(2025, 1, 31)
            ]
        );
        assert_eq!(events[1].kind, TimelineEventKind::Compliant);
        assert_eq!(events[3].kind, TimelineEventKind::Compliant);
    }

    #[test]
    fn late_notice_follows_the_violated_deadline() {
        let events = build_timeline(
            &florida_analysis(),
            NoticeStatus::NoticeLate,
            Some(date(2025, 2, 15)),
            "calendar days",
        );

        let last_two: Vec<TimelineEventKind> =
            events.iter().rev().take(2).map(|event| event.kind).collect();
        assert_eq!(
            last_two,
            vec![TimelineEventKind::Violation, TimelineEventKind::Violation]
        );
        assert_eq!(events.last().map(|event| event.date), Some(date(2025, 2, 15)));
    }

    #[test]
    fn single_deadline_states_skip_the_return_event() {
        let california = get_state_rules_by_code("CA").expect("california present");
        let analysis = analyze_deadlines(date(2025, 1, 1), california, date(2025, 1, 5));
        let events = build_timeline(&analysis, NoticeStatus::NoticePending, None, "calendar days");

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind, TimelineEventKind::Compliant);
    }

    #[test]
    fn unclear_notice_after_the_deadline_marks_a_violation() {
        let events = build_timeline(
            &florida_analysis(),
            NoticeStatus::NoticeUnclear,
            None,
            "calendar days",
        );

        let claim = events
            .iter()
            .find(|event| event.date == date(2025, 1, 31))
            .expect("claim deadline event");
        assert_eq!(claim.kind, TimelineEventKind::Violation);
    }

    #[test]
    fn stray_notice_date_is_ignored_without_a_confirmed_notice() {
        for status in [NoticeStatus::NoticeMissed, NoticeStatus::NoticeUnclear] {
            let events = build_timeline(
                &florida_analysis(),
                status,
                Some(date(2025, 1, 20)),
                "calendar days",
            );
            assert!(events.iter().all(|event| event.date != date(2025, 1, 20)));
            assert!(events
                .iter()
                .all(|event| event.kind != TimelineEventKind::Compliant));
        }
    }
}
