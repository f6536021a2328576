use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::deadlines::{analyze_deadlines, DeadlineAnalysis};
use super::diagnosis::{DiagnosisEngine, DiagnosisResult, PACKET_PRICE_USD};
use super::errors::DepositError;
use super::integrations::{CheckoutRequest, LeadCapture, LeadSink, TelemetrySink};
use super::landlord::{RiskAssessment, RiskCalculator};
use super::requests::{reference_date_or_today, DeadlineForm, DiagnosisForm, LandlordRiskForm};
use super::rules::{RulesRegistry, StateRules};

/// Service wiring the pure engines to the telemetry and lead collaborators.
pub struct DepositService<T, L> {
    registry: Arc<RulesRegistry>,
    telemetry: Arc<T>,
    leads: Arc<L>,
    packet_price: f64,
}

/// What happened to a submitted lead. Failures never reach the caller as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    Stored,
    Skipped(String),
    Failed(String),
}

impl LeadOutcome {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Skipped(_) => "skipped",
            Self::Failed(_) => "failed",
        }
    }
}

impl<T, L> DepositService<T, L>
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    pub fn new(registry: Arc<RulesRegistry>, telemetry: Arc<T>, leads: Arc<L>) -> Self {
        Self {
            registry,
            telemetry,
            leads,
            packet_price: PACKET_PRICE_USD,
        }
    }

    pub fn with_packet_price(mut self, packet_price: f64) -> Self {
        let sanitized = self.engine().with_packet_price(packet_price).packet_price();
        self.packet_price = sanitized;
        self
    }

    pub fn packet_price(&self) -> f64 {
        self.packet_price
    }

    pub fn registry(&self) -> &RulesRegistry {
        &self.registry
    }

    pub fn states(&self) -> &[StateRules] {
        self.registry.all()
    }

    pub fn state_by_slug(&self, slug: &str) -> Option<&StateRules> {
        self.registry.by_slug(slug)
    }

    pub fn analyze(&self, form: &DeadlineForm) -> Result<DeadlineAnalysis, DepositError> {
        let code = form.state_code()?;
        let rules = self
            .registry
            .by_code(code)
            .ok_or_else(|| DepositError::invalid_state(code))?;
        let move_out_date = form.move_out_date()?;
        let today = reference_date_or_today(form.reference_date);

        let analysis = analyze_deadlines(move_out_date, rules, today);
        self.record(
            "deadlines_calculated",
            [
                ("state_code", rules.code.clone()),
                (
                    "landlord_in_violation",
                    analysis.landlord_in_violation.to_string(),
                ),
            ],
        );
        Ok(analysis)
    }

    pub fn diagnose(&self, form: &DiagnosisForm) -> Result<DiagnosisResult, DepositError> {
        let input = form.to_input()?;
        let today = reference_date_or_today(form.reference_date);
        let result = self.engine().diagnose(&input, today)?;

        self.record(
            "diagnosis_completed",
            [
                ("state_code", result.state_rules.code.clone()),
                ("notice_status", result.notice_status.code().to_string()),
                ("case_strength", result.case_strength.label().to_string()),
            ],
        );
        Ok(result)
    }

    pub fn landlord_risk(&self, form: &LandlordRiskForm) -> Result<RiskAssessment, DepositError> {
        let input = form.to_input()?;
        let today = reference_date_or_today(form.reference_date);
        let assessment = RiskCalculator::new(&self.registry).assess(&input, today)?;

        self.record(
            "landlord_risk_assessed",
            [
                ("state_code", input.state_code.trim().to_uppercase()),
                ("risk_level", assessment.risk_level.label().to_string()),
            ],
        );
        Ok(assessment)
    }

    /// Recompute the diagnosis from the submitted snapshot and build the checkout body.
    pub fn checkout_request(&self, form: &DiagnosisForm) -> Result<CheckoutRequest, DepositError> {
        let input = form.to_input()?;
        let today = reference_date_or_today(form.reference_date);
        let result = self.engine().diagnose(&input, today)?;
        let request = CheckoutRequest::from_diagnosis(&input, &result, form.email());

        self.record(
            "checkout_started",
            [
                ("state_code", request.state_code.clone()),
                ("recovery_estimate", format!("{:.2}", request.recovery_estimate)),
            ],
        );
        Ok(request)
    }

    /// Forward a lead to storage. Input problems and sink failures are logged and swallowed.
    pub fn capture_lead(&self, form: &DiagnosisForm) -> LeadOutcome {
        let lead = match self.build_lead(form) {
            Ok(lead) => lead,
            Err(err) => {
                debug!(%err, "lead skipped");
                return LeadOutcome::Skipped(err.to_string());
            }
        };

        let state_code = lead.state_code.clone();
        match self.leads.capture(lead) {
            Ok(()) => {
                self.record("lead_captured", [("state_code", state_code)]);
                LeadOutcome::Stored
            }
            Err(err) => {
                warn!(%err, state_code = %state_code, "lead capture failed");
                LeadOutcome::Failed(err.to_string())
            }
        }
    }

    fn build_lead(&self, form: &DiagnosisForm) -> Result<LeadCapture, DepositError> {
        let email = form.require_email()?;
        let input = form.to_input()?;
        let today = reference_date_or_today(form.reference_date);
        let result = self.engine().diagnose(&input, today)?;
        Ok(LeadCapture::from_diagnosis(email, &input, &result))
    }

    fn engine(&self) -> DiagnosisEngine<'_> {
        DiagnosisEngine::new(&self.registry).with_packet_price(self.packet_price)
    }

    fn record<const N: usize>(&self, name: &str, attributes: [(&str, String); N]) {
        let attributes: BTreeMap<String, String> = attributes
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        self.telemetry.record_event(name, &attributes);
    }
}
