use super::domain::{CaseStrength, NoticeAnswer, NoticeStatus};
use crate::workflows::deposit::deadlines::DeadlineAnalysis;
use chrono::NaiveDate;

impl NoticeStatus {
    /// Fixed lookup: missed or late notices make a strong case, open or
    /// unknown timing a moderate one, a timely notice a weak one.
    pub const fn case_strength(self) -> CaseStrength {
        match self {
            Self::NoticeMissed | Self::NoticeLate => CaseStrength::Strong,
            Self::NoticePending | Self::NoticeUnclear => CaseStrength::Moderate,
            Self::NoticeTimely => CaseStrength::Weak,
        }
    }

    /// Whether the landlord broke the itemization rule.
    pub const fn is_violation(self) -> bool {
        matches!(self, Self::NoticeMissed | Self::NoticeLate)
    }
}

/// Classify the landlord's notice against the claim deadline.
///
/// A "yes" without a send date cannot be placed relative to the deadline and
/// is treated like "not sure".
pub(crate) fn classify_notice(
    answer: NoticeAnswer,
    notice_sent_date: Option<NaiveDate>,
    analysis: &DeadlineAnalysis,
) -> NoticeStatus {
    match (answer, notice_sent_date) {
        (NoticeAnswer::No, _) if analysis.claim_deadline_passed => NoticeStatus::NoticeMissed,
        (NoticeAnswer::No, _) => NoticeStatus::NoticePending,
        (NoticeAnswer::Yes, Some(sent)) if sent > analysis.claim_deadline => {
            NoticeStatus::NoticeLate
        }
        (NoticeAnswer::Yes, Some(_)) => NoticeStatus::NoticeTimely,
        (NoticeAnswer::Yes, None) | (NoticeAnswer::NotSure, _) => NoticeStatus::NoticeUnclear,
    }
}
