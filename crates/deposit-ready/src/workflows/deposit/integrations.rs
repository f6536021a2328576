use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::diagnosis::{CaseStrength, DiagnosisInput, DiagnosisResult, NoticeStatus};

/// Capability for recording product analytics events.
pub trait TelemetrySink: Send + Sync {
    fn record_event(&self, name: &str, attributes: &BTreeMap<String, String>);
}

/// Forwards analytics events to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record_event(&self, name: &str, attributes: &BTreeMap<String, String>) {
        info!(event = name, ?attributes, "analytics event");
    }
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record_event(&self, _name: &str, _attributes: &BTreeMap<String, String>) {}
}

/// Outbound hook for lead storage (mailing list, CRM, database).
pub trait LeadSink: Send + Sync {
    fn capture(&self, lead: LeadCapture) -> Result<(), LeadCaptureError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCapture {
    pub email: String,
    pub state_code: String,
    pub deposit_amount: f64,
    pub landlord_in_violation: bool,
    pub potential_recovery: f64,
}

impl LeadCapture {
    pub fn from_diagnosis(email: &str, input: &DiagnosisInput, result: &DiagnosisResult) -> Self {
        Self {
            email: email.trim().to_string(),
            state_code: result.state_rules.code.clone(),
            deposit_amount: input.total_deposit,
            landlord_in_violation: result.notice_status.is_violation(),
            potential_recovery: result.max_recovery,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadCaptureError {
    #[error("lead storage unavailable: {0}")]
    Transport(String),
    #[error("lead rejected: {0}")]
    Rejected(String),
}

/// Body posted to the checkout-session endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub state_code: String,
    pub move_out_date: NaiveDate,
    pub notice_status: NoticeStatus,
    pub case_strength: CaseStrength,
    pub recovery_estimate: f64,
    pub total_deposit: f64,
    pub amount_withheld: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CheckoutRequest {
    /// Build the payload from the input snapshot and the result computed from it.
    pub fn from_diagnosis(
        input: &DiagnosisInput,
        result: &DiagnosisResult,
        email: Option<&str>,
    ) -> Self {
        Self {
            state_code: result.state_rules.code.clone(),
            move_out_date: input.move_out_date,
            notice_status: result.notice_status,
            case_strength: result.case_strength,
            recovery_estimate: result.recovery_estimate,
            total_deposit: input.total_deposit,
            amount_withheld: input.amount_withheld,
            email: email
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_string),
        }
    }
}
