use chrono::NaiveDate;
use deposit_ready::config::DepositConfig;
use deposit_ready::error::AppError;
use deposit_ready::workflows::deposit::{
    LeadCapture, LeadCaptureError, LeadSink, RulesRegistry,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local lead store until a CRM adapter is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadSink {
    leads: Arc<Mutex<Vec<LeadCapture>>>,
}

impl LeadSink for InMemoryLeadSink {
    fn capture(&self, lead: LeadCapture) -> Result<(), LeadCaptureError> {
        let mut guard = self.leads.lock().expect("lead mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.email.eq_ignore_ascii_case(&lead.email))
        {
            return Err(LeadCaptureError::Rejected(format!(
                "{} is already on file",
                lead.email
            )));
        }
        guard.push(lead);
        Ok(())
    }
}

#[cfg(test)]
impl InMemoryLeadSink {
    pub(crate) fn leads(&self) -> Vec<LeadCapture> {
        self.leads.lock().expect("lead mutex poisoned").clone()
    }
}

/// Built-in rules, with the configured override file layered on top.
pub(crate) fn load_registry(config: &DepositConfig) -> Result<RulesRegistry, AppError> {
    let builtin = RulesRegistry::builtin();
    match &config.rules_path {
        Some(path) => {
            let registry = builtin.with_overrides_from_path(path)?;
            info!(path = %path.display(), states = registry.len(), "loaded state rules overrides");
            Ok(registry)
        }
        None => Ok(builtin.clone()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a dollar amount ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_dollar_signs_and_separators() {
        assert_eq!(parse_amount("$1,500.00"), Ok(1500.0));
        assert_eq!(parse_amount(" 600 "), Ok(600.0));
        assert!(parse_amount("lots").is_err());
    }

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(
            parse_date("2025-01-01"),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid"))
        );
        assert!(parse_date("01/01/2025").is_err());
    }

    #[test]
    fn duplicate_leads_are_rejected() {
        let sink = InMemoryLeadSink::default();
        let lead = LeadCapture {
            email: "renter@example.com".to_string(),
            state_code: "FL".to_string(),
            deposit_amount: 1500.0,
            landlord_in_violation: true,
            potential_recovery: 4500.0,
        };

        sink.capture(lead.clone()).expect("first capture");
        assert!(matches!(
            sink.capture(lead),
            Err(LeadCaptureError::Rejected(_))
        ));
        assert_eq!(sink.leads().len(), 1);
    }

    #[test]
    fn registry_defaults_to_builtin_table() {
        let registry = load_registry(&DepositConfig::default()).expect("builtin registry");
        assert_eq!(registry.len(), RulesRegistry::builtin().len());
    }
}
