//! Landlord account statuses and login policy.

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_VERIFIED: &str = "verified";
pub const STATUS_SUSPENDED: &str = "suspended";
pub const STATUS_REJECTED: &str = "rejected";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_VERIFIED,
    STATUS_SUSPENDED,
    STATUS_REJECTED,
];

/// Consecutive failed logins before the account is locked.
pub const MAX_FAILED_LOGIN_ATTEMPTS: i32 = 5;

/// Lock duration once the failure threshold is reached.
pub const LOCKOUT_MINUTES: i64 = 15;

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid landlord status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Pending landlords may log in and submit listings; suspended and rejected ones may not.
pub fn ensure_can_login(status: &str) -> Result<(), CoreError> {
    match status {
        STATUS_SUSPENDED => Err(CoreError::forbidden(
            "ACCOUNT_SUSPENDED",
            "Your landlord account has been suspended",
        )),
        STATUS_REJECTED => Err(CoreError::forbidden(
            "ACCOUNT_REJECTED",
            "Your landlord registration was rejected",
        )),
        _ => Ok(()),
    }
}

/// Whether a failed attempt bringing the count to `failed_count` triggers a lock.
pub fn should_lock(failed_count: i32) -> bool {
    failed_count >= MAX_FAILED_LOGIN_ATTEMPTS
}

pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
