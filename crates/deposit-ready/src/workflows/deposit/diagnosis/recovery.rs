use super::domain::{CaseStrength, NoticeStatus, RecoveryBasis};
use crate::workflows::deposit::rules::StateRules;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RecoveryFigures {
    pub estimate: f64,
    pub max: f64,
    pub basis: RecoveryBasis,
}

pub(crate) fn estimate_recovery(
    status: NoticeStatus,
    rules: &StateRules,
    total_deposit: f64,
    amount_withheld: f64,
) -> RecoveryFigures {
    let strength = status.case_strength();
    let forfeited = strength == CaseStrength::Strong
        && match status {
            NoticeStatus::NoticeMissed => true,
            NoticeStatus::NoticeLate => rules.forfeits_on_late_notice,
            _ => false,
        };

    let (estimate, basis) = if forfeited {
        (total_deposit, RecoveryBasis::Forfeiture)
    } else {
        (amount_withheld, RecoveryBasis::WithheldOnly)
    };

    let max = if strength == CaseStrength::Weak {
        estimate
    } else {
        estimate * rules.damages_multiplier
    };

    RecoveryFigures {
        estimate,
        max,
        basis,
    }
}

/// Recovery estimate expressed as a whole multiple of the packet price.
pub(crate) fn roi_multiple(recovery_estimate: f64, packet_price: f64) -> u32 {
    if recovery_estimate <= 0.0 || packet_price <= 0.0 {
        return 0;
    }

    (recovery_estimate / packet_price).round() as u32
}
