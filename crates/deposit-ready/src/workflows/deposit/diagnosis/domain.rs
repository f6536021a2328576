use crate::workflows::deposit::deadlines::DeadlineAnalysis;
use crate::workflows::deposit::rules::StateRules;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tenant's answer to "did your landlord send an itemized notice?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeAnswer {
    Yes,
    No,
    NotSure,
}

impl NoticeAnswer {
    pub const ALL: [Self; 3] = [Self::Yes, Self::No, Self::NotSure];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NotSure => "Not sure",
        }
    }
}

/// Facts a tenant supplies for a diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisInput {
    pub state_code: String,
    pub move_out_date: NaiveDate,
    pub received_notice: NoticeAnswer,
    #[serde(default)]
    pub notice_sent_date: Option<NaiveDate>,
    pub total_deposit: f64,
    pub amount_withheld: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeStatus {
    NoticeMissed,
    NoticeLate,
    NoticePending,
    NoticeUnclear,
    NoticeTimely,
}

impl NoticeStatus {
    pub const ALL: [Self; 5] = [
        Self::NoticeMissed,
        Self::NoticeLate,
        Self::NoticePending,
        Self::NoticeUnclear,
        Self::NoticeTimely,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::NoticeMissed => "No notice sent before the deadline",
            Self::NoticeLate => "Notice sent after the deadline",
            Self::NoticePending => "Deadline has not passed yet",
            Self::NoticeUnclear => "Notice status unclear",
            Self::NoticeTimely => "Notice sent on time",
        }
    }

    /// Wire token, identical to the serialized form.
    pub const fn code(self) -> &'static str {
        match self {
            Self::NoticeMissed => "NOTICE_MISSED",
            Self::NoticeLate => "NOTICE_LATE",
            Self::NoticePending => "NOTICE_PENDING",
            Self::NoticeUnclear => "NOTICE_UNCLEAR",
            Self::NoticeTimely => "NOTICE_TIMELY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStrength {
    Weak,
    Moderate,
    Strong,
}

impl CaseStrength {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryBasis {
    /// Landlord lost the right to keep any of the deposit.
    Forfeiture,
    WithheldOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    Violation,
    Compliant,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub kind: TimelineEventKind,
    pub label: String,
}

/// Everything the UI, checkout payload, and dispute letters need from one diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub notice_status: NoticeStatus,
    pub case_strength: CaseStrength,
    pub recovery_estimate: f64,
    pub max_recovery: f64,
    pub recovery_basis: RecoveryBasis,
    pub roi_multiple: u32,
    pub timeline: Vec<TimelineEvent>,
    pub deadline_date: NaiveDate,
    pub analysis: DeadlineAnalysis,
    pub state_rules: StateRules,
}
