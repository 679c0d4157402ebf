//! Cashback request lifecycle.

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_PAID: &str = "paid";

pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED, STATUS_PAID];

/// Upper bound on a claimed booking amount, in rupees.
pub const MAX_AMOUNT_PAID: i32 = 1_000_000;

/// - `pending`  -> `approved`, `rejected`
/// - `approved` -> `paid`, `rejected`
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_APPROVED, STATUS_REJECTED],
        STATUS_APPROVED => &[STATUS_PAID, STATUS_REJECTED],
        _ => &[],
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid cashback status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot change cashback status from '{current}' to '{next}'. Allowed: {allowed:?}"
        )))
    }
}

pub fn validate_amount(amount_paid: i32) -> Result<(), CoreError> {
    if amount_paid > 0 && amount_paid <= MAX_AMOUNT_PAID {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Amount paid must be between 1 and {MAX_AMOUNT_PAID} (got {amount_paid})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payout_flow() {
        assert!(validate_transition(STATUS_PENDING, STATUS_APPROVED).is_ok());
        assert!(validate_transition(STATUS_APPROVED, STATUS_PAID).is_ok());
        assert!(validate_transition(STATUS_PENDING, STATUS_PAID).is_err());
        assert!(validate_transition(STATUS_PAID, STATUS_REJECTED).is_err());
    }

    #[test]
    fn amount_bounds() {
        assert!(validate_amount(8500).is_ok());
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-5).is_err());
        assert!(validate_amount(MAX_AMOUNT_PAID + 1).is_err());
    }
}
