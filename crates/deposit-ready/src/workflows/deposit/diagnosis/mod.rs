//! Tenant-side diagnosis: notice classification, case strength, and recovery.

mod classification;
pub mod domain;
mod recovery;
mod timeline;

pub use domain::{
    CaseStrength, DiagnosisInput, DiagnosisResult, NoticeAnswer, NoticeStatus, RecoveryBasis,
    TimelineEvent, TimelineEventKind,
};

use super::deadlines::analyze_deadlines;
use super::errors::{ensure_amount, DepositError};
use super::rules::RulesRegistry;
use chrono::NaiveDate;

/// Current price of the dispute packet, in dollars.
pub const PACKET_PRICE_USD: f64 = 49.0;

/// Stateless engine resolving rules from a registry and pricing against the packet.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosisEngine<'r> {
    registry: &'r RulesRegistry,
    packet_price: f64,
}

impl<'r> DiagnosisEngine<'r> {
    pub fn new(registry: &'r RulesRegistry) -> Self {
        Self {
            registry,
            packet_price: PACKET_PRICE_USD,
        }
    }

    /// Override the packet price; non-positive or non-finite prices keep the default.
    pub fn with_packet_price(mut self, packet_price: f64) -> Self {
        if packet_price.is_finite() && packet_price > 0.0 {
            self.packet_price = packet_price;
        }
        self
    }

    pub fn packet_price(&self) -> f64 {
        self.packet_price
    }

    pub fn diagnose(
        &self,
        input: &DiagnosisInput,
        today: NaiveDate,
    ) -> Result<DiagnosisResult, DepositError> {
        let rules = self
            .registry
            .by_code(&input.state_code)
            .ok_or_else(|| DepositError::invalid_state(&input.state_code))?;

        let total_deposit = ensure_amount("totalDeposit", input.total_deposit)?;
        let amount_withheld = ensure_amount("amountWithheld", input.amount_withheld)?;
        if amount_withheld > total_deposit {
            return Err(DepositError::InvalidAmount {
                field: "amountWithheld",
                reason: format!(
                    "cannot exceed the total deposit ({amount_withheld} > {total_deposit})"
                ),
            });
        }

        let analysis = analyze_deadlines(input.move_out_date, rules, today);
        let notice_status = classification::classify_notice(
            input.received_notice,
            input.notice_sent_date,
            &analysis,
        );
        let case_strength = notice_status.case_strength();
        let figures =
            recovery::estimate_recovery(notice_status, rules, total_deposit, amount_withheld);
        let roi_multiple = recovery::roi_multiple(figures.estimate, self.packet_price);
        let timeline = timeline::build_timeline(
            &analysis,
            notice_status,
            input.notice_sent_date,
            rules.day_unit.label(),
        );

        Ok(DiagnosisResult {
            notice_status,
            case_strength,
            recovery_estimate: figures.estimate,
            max_recovery: figures.max,
            recovery_basis: figures.basis,
            roi_multiple,
            timeline,
            deadline_date: analysis.claim_deadline,
            analysis,
            state_rules: rules.clone(),
        })
    }
}

/// Diagnose against the built-in rules table at the default packet price.
pub fn diagnose(input: &DiagnosisInput, today: NaiveDate) -> Result<DiagnosisResult, DepositError> {
    DiagnosisEngine::new(RulesRegistry::builtin()).diagnose(input, today)
}
