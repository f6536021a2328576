//! Landlord-facing mirror of the tenant diagnosis: how exposed is a landlord
//! who just received a demand letter?

use super::deadlines::days_between;
use super::errors::{ensure_amount, DepositError};
use super::rules::{RulesRegistry, StateRules};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days before the response deadline at which an otherwise clean file turns yellow.
pub const APPROACHING_DEADLINE_BUFFER_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordRiskInput {
    pub state_code: String,
    pub demand_letter_date: NaiveDate,
    pub deposit_returned: bool,
    pub itemized_list_sent: bool,
    #[serde(default)]
    pub deposit_amount: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Green,
    Yellow,
    Red,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Low risk",
            Self::Yellow => "Moderate risk",
            Self::Red => "High risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandlordViolation {
    DepositNotReturned,
    MissingItemizedList,
}

impl LandlordViolation {
    pub const ALL: [Self; 2] = [Self::DepositNotReturned, Self::MissingItemizedList];

    pub const fn describe(self) -> &'static str {
        match self {
            Self::DepositNotReturned => "Deposit not returned before the response deadline",
            Self::MissingItemizedList => "No itemized list of deductions was sent",
        }
    }

    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::DepositNotReturned => "Return the deposit now to limit penalty exposure",
            Self::MissingItemizedList => "Send an itemized list of deductions immediately",
        }
    }
}

const BASELINE_RECOMMENDATION: &str =
    "Keep dated records of the deposit return and any deductions";

/// Facts about a landlord's file that drive the risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskSignal {
    Overdue,
    MultipleViolations,
    SingleViolation,
    ApproachingDeadline,
    Clear,
}

impl RiskSignal {
    pub const ALL: [Self; 5] = [
        Self::Overdue,
        Self::MultipleViolations,
        Self::SingleViolation,
        Self::ApproachingDeadline,
        Self::Clear,
    ];

    pub const fn risk_level(self) -> RiskLevel {
        match self {
            Self::Overdue | Self::MultipleViolations => RiskLevel::Red,
            Self::SingleViolation | Self::ApproachingDeadline => RiskLevel::Yellow,
            Self::Clear => RiskLevel::Green,
        }
    }

    /// Strongest signal present; overdue outranks violation counts.
    fn strongest(is_overdue: bool, violations: usize, approaching: bool) -> Self {
        if is_overdue {
            Self::Overdue
        } else if violations >= 2 {
            Self::MultipleViolations
        } else if violations == 1 {
            Self::SingleViolation
        } else if approaching {
            Self::ApproachingDeadline
        } else {
            Self::Clear
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_label: String,
    pub response_deadline: NaiveDate,
    pub days_remaining: i64,
    pub is_overdue: bool,
    pub exposure_amount: f64,
    pub exposure_description: String,
    pub violations: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct RiskCalculator<'r> {
    registry: &'r RulesRegistry,
}

impl<'r> RiskCalculator<'r> {
    pub fn new(registry: &'r RulesRegistry) -> Self {
        Self { registry }
    }

    pub fn assess(
        &self,
        input: &LandlordRiskInput,
        today: NaiveDate,
    ) -> Result<RiskAssessment, DepositError> {
        let rules = self
            .registry
            .by_code(&input.state_code)
            .ok_or_else(|| DepositError::invalid_state(&input.state_code))?;
        let deposit_amount = input
            .deposit_amount
            .map(|amount| ensure_amount("depositAmount", amount))
            .transpose()?;

        let response_deadline = rules
            .day_unit
            .advance(input.demand_letter_date, rules.return_deadline);
        let days_remaining = days_between(today, response_deadline);
        let window_elapsed = today > response_deadline;
        let is_overdue = window_elapsed && !input.deposit_returned;

        let violations = detect_violations(input, window_elapsed);
        let approaching = !input.deposit_returned
            && (0..=APPROACHING_DEADLINE_BUFFER_DAYS).contains(&days_remaining);
        let risk_level =
            RiskSignal::strongest(is_overdue, violations.len(), approaching).risk_level();

        let (exposure_amount, exposure_description) =
            exposure(rules, deposit_amount, !violations.is_empty());

        let mut recommendations: Vec<String> = violations
            .iter()
            .map(|violation| violation.recommendation().to_string())
            .collect();
        if recommendations.is_empty() {
            recommendations.push(BASELINE_RECOMMENDATION.to_string());
        }

        Ok(RiskAssessment {
            risk_level,
            risk_label: risk_level.label().to_string(),
            response_deadline,
            days_remaining,
            is_overdue,
            exposure_amount,
            exposure_description,
            violations: violations
                .iter()
                .map(|violation| violation.describe().to_string())
                .collect(),
            recommendations,
        })
    }
}

fn detect_violations(input: &LandlordRiskInput, window_elapsed: bool) -> Vec<LandlordViolation> {
    LandlordViolation::ALL
        .into_iter()
        .filter(|violation| match violation {
            LandlordViolation::DepositNotReturned => !input.deposit_returned && window_elapsed,
            // withholding the deposit implies deductions that must be itemized
            LandlordViolation::MissingItemizedList => {
                !input.itemized_list_sent && !input.deposit_returned
            }
        })
        .collect()
}

fn exposure(rules: &StateRules, deposit_amount: Option<f64>, in_violation: bool) -> (f64, String) {
    match deposit_amount {
        None => (
            0.0,
            "Enter the deposit amount to estimate your exposure".to_string(),
        ),
        Some(amount) if in_violation => (
            amount * rules.damages_multiplier,
            format!(
                "Up to {}x the deposit under {}: {}",
                rules.damages_multiplier, rules.statute_title, rules.damages_description
            ),
        ),
        Some(amount) => (
            amount,
            "The deposit itself, if the tenant disputes your deductions".to_string(),
        ),
    }
}

/// Assess landlord risk against the built-in rules table.
pub fn calculate_landlord_risk(
    input: &LandlordRiskInput,
    today: NaiveDate,
) -> Result<RiskAssessment, DepositError> {
    RiskCalculator::new(RulesRegistry::builtin()).assess(input, today)
}
