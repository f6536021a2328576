//! Partially filled form snapshots as they arrive over HTTP or the CLI.
//!
//! Every field is optional so a half-completed form deserializes cleanly;
//! conversion into engine inputs reports the first missing field.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::diagnosis::{DiagnosisInput, NoticeAnswer};
use super::errors::DepositError;
use super::landlord::LandlordRiskInput;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineForm {
    pub state_code: Option<String>,
    pub move_out_date: Option<NaiveDate>,
    /// Evaluate as of this date instead of today.
    pub reference_date: Option<NaiveDate>,
}

impl DeadlineForm {
    pub fn state_code(&self) -> Result<&str, DepositError> {
        required_text(&self.state_code, "stateCode")
    }

    pub fn move_out_date(&self) -> Result<NaiveDate, DepositError> {
        self.move_out_date.ok_or(DepositError::IncompleteInput {
            field: "moveOutDate",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisForm {
    pub state_code: Option<String>,
    pub move_out_date: Option<NaiveDate>,
    pub received_notice: Option<NoticeAnswer>,
    pub notice_sent_date: Option<NaiveDate>,
    pub total_deposit: Option<f64>,
    pub amount_withheld: Option<f64>,
    pub email: Option<String>,
    pub reference_date: Option<NaiveDate>,
}

impl DiagnosisForm {
    pub fn to_input(&self) -> Result<DiagnosisInput, DepositError> {
        let state_code = required_text(&self.state_code, "stateCode")?.to_string();
        let move_out_date = self.move_out_date.ok_or(DepositError::IncompleteInput {
            field: "moveOutDate",
        })?;
        let received_notice = self.received_notice.ok_or(DepositError::IncompleteInput {
            field: "receivedNotice",
        })?;
        let total_deposit = self.total_deposit.ok_or(DepositError::IncompleteInput {
            field: "totalDeposit",
        })?;
        let amount_withheld = self.amount_withheld.ok_or(DepositError::IncompleteInput {
            field: "amountWithheld",
        })?;

        Ok(DiagnosisInput {
            state_code,
            move_out_date,
            received_notice,
            notice_sent_date: self.notice_sent_date,
            total_deposit,
            amount_withheld,
        })
    }

    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    pub fn require_email(&self) -> Result<&str, DepositError> {
        self.email()
            .ok_or(DepositError::IncompleteInput { field: "email" })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordRiskForm {
    pub state_code: Option<String>,
    pub demand_letter_date: Option<NaiveDate>,
    pub deposit_returned: Option<bool>,
    pub itemized_list_sent: Option<bool>,
    pub deposit_amount: Option<f64>,
    pub reference_date: Option<NaiveDate>,
}

impl LandlordRiskForm {
    pub fn to_input(&self) -> Result<LandlordRiskInput, DepositError> {
        Ok(LandlordRiskInput {
            state_code: required_text(&self.state_code, "stateCode")?.to_string(),
            demand_letter_date: self.demand_letter_date.ok_or(DepositError::IncompleteInput {
                field: "demandLetterDate",
            })?,
            deposit_returned: self.deposit_returned.ok_or(DepositError::IncompleteInput {
                field: "depositReturned",
            })?,
            itemized_list_sent: self.itemized_list_sent.ok_or(
                DepositError::IncompleteInput {
                    field: "itemizedListSent",
                },
            )?,
            deposit_amount: self.deposit_amount,
        })
    }
}

/// The supplied reference date, or the local calendar date.
pub fn reference_date_or_today(reference_date: Option<NaiveDate>) -> NaiveDate {
    reference_date.unwrap_or_else(|| Local::now().date_naive())
}

fn required_text<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, DepositError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(DepositError::IncompleteInput { field })
}
