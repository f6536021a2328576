/// Input problems that keep the engine from producing a result.
///
/// Every variant is recoverable: callers show a message and fall back to an
/// empty state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DepositError {
    #[error("state '{code}' is not supported")]
    InvalidState { code: String },
    #[error("invalid {field}: {reason}")]
    InvalidAmount { field: &'static str, reason: String },
    #[error("missing required field: {field}")]
    IncompleteInput { field: &'static str },
}

impl DepositError {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidState { .. } => "invalid_state",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::IncompleteInput { .. } => "incomplete_input",
        }
    }

    pub(crate) fn invalid_state(code: &str) -> Self {
        Self::InvalidState {
            code: code.trim().to_string(),
        }
    }
}

/// Reject amounts that are not finite or are below zero.
pub(crate) fn ensure_amount(field: &'static str, value: f64) -> Result<f64, DepositError> {
    if !value.is_finite() {
        return Err(DepositError::InvalidAmount {
            field,
            reason: "must be a number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(DepositError::InvalidAmount {
            field,
            reason: format!("must not be negative (found {value})"),
        });
    }

    Ok(value)
}
