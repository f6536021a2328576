use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::deposit::{
    deposit_router, DepositService, DiagnosisForm, DiagnosisInput, LeadCapture, LeadCaptureError,
    LeadSink, NoticeAnswer, RulesRegistry, TelemetrySink,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Florida move-out used across the worked examples: claim deadline 2025-01-31.
pub(super) fn move_out() -> NaiveDate {
    date(2025, 1, 1)
}

pub(super) fn after_deadline() -> NaiveDate {
    date(2025, 3, 1)
}

pub(super) fn florida_input(
    received_notice: NoticeAnswer,
    notice_sent_date: Option<NaiveDate>,
) -> DiagnosisInput {
    DiagnosisInput {
        state_code: "FL".to_string(),
        move_out_date: move_out(),
        received_notice,
        notice_sent_date,
        total_deposit: 1500.0,
        amount_withheld: 600.0,
    }
}

pub(super) fn florida_form(received_notice: NoticeAnswer) -> DiagnosisForm {
    DiagnosisForm {
        state_code: Some("FL".to_string()),
        move_out_date: Some(move_out()),
        received_notice: Some(received_notice),
        notice_sent_date: None,
        total_deposit: Some(1500.0),
        amount_withheld: Some(600.0),
        email: Some(" tenant@example.com ".to_string()),
        reference_date: Some(after_deadline()),
    }
}

pub(super) fn registry() -> Arc<RulesRegistry> {
    Arc::new(RulesRegistry::builtin().clone())
}

pub(super) fn build_service() -> (
    DepositService<MemoryTelemetry, MemoryLeads>,
    Arc<MemoryTelemetry>,
    Arc<MemoryLeads>,
) {
    let telemetry = Arc::new(MemoryTelemetry::default());
    let leads = Arc::new(MemoryLeads::default());
    let service = DepositService::new(registry(), telemetry.clone(), leads.clone());
    (service, telemetry, leads)
}

pub(super) fn router_with_service<T, L>(service: DepositService<T, L>) -> Router
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    deposit_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryTelemetry {
    events: Arc<Mutex<Vec<(String, BTreeMap<String, String>)>>>,
}

impl MemoryTelemetry {
    pub(super) fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .expect("telemetry mutex poisoned")
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub(super) fn last(&self) -> Option<(String, BTreeMap<String, String>)> {
        self.events
            .lock()
            .expect("telemetry mutex poisoned")
            .last()
            .cloned()
    }
}

impl TelemetrySink for MemoryTelemetry {
    fn record_event(&self, name: &str, attributes: &BTreeMap<String, String>) {
        self.events
            .lock()
            .expect("telemetry mutex poisoned")
            .push((name.to_string(), attributes.clone()));
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLeads {
    leads: Arc<Mutex<Vec<LeadCapture>>>,
}

impl MemoryLeads {
    pub(super) fn leads(&self) -> Vec<LeadCapture> {
        self.leads.lock().expect("lead mutex poisoned").clone()
    }
}

impl LeadSink for MemoryLeads {
    fn capture(&self, lead: LeadCapture) -> Result<(), LeadCaptureError> {
        self.leads.lock().expect("lead mutex poisoned").push(lead);
        Ok(())
    }
}

pub(super) struct OfflineLeads;

impl LeadSink for OfflineLeads {
    fn capture(&self, _lead: LeadCapture) -> Result<(), LeadCaptureError> {
        Err(LeadCaptureError::Transport("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
