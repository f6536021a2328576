//! Security deposit deadlines, tenant diagnosis, and landlord risk.
//!
//! The calculators are pure functions over the read-only rules registry.
//! Telemetry and lead storage sit behind traits so hosts can inject their own
//! collaborators.

pub mod calendar;
pub mod deadlines;
pub mod diagnosis;
pub mod errors;
pub mod integrations;
pub mod landlord;
pub mod requests;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use calendar::{BusinessCalendar, DayUnit};
pub use deadlines::{analyze_deadlines, analyze_deadlines_today, DeadlineAnalysis, ViolationType};
pub use diagnosis::{
    diagnose, CaseStrength, DiagnosisEngine, DiagnosisInput, DiagnosisResult, NoticeAnswer,
    NoticeStatus, RecoveryBasis, TimelineEvent, TimelineEventKind, PACKET_PRICE_USD,
};
pub use errors::DepositError;
pub use integrations::{
    CheckoutRequest, LeadCapture, LeadCaptureError, LeadSink, NoopTelemetry, TelemetrySink,
    TracingTelemetry,
};
pub use landlord::{
    calculate_landlord_risk, LandlordRiskInput, LandlordViolation, RiskAssessment,
    RiskCalculator, RiskLevel, RiskSignal, APPROACHING_DEADLINE_BUFFER_DAYS,
};
pub use requests::{reference_date_or_today, DeadlineForm, DiagnosisForm, LandlordRiskForm};
pub use router::deposit_router;
pub use rules::{
    get_all_state_slugs, get_all_states, get_state_rules_by_code, get_state_rules_by_slug,
    RulesLoadError, RulesRegistry, StateRules,
};
pub use service::{DepositService, LeadOutcome};
