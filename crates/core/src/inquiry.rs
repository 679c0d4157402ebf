//! Inquiry status lifecycle.

use crate::error::CoreError;

pub const STATUS_NEW: &str = "new";
pub const STATUS_CONTACTED: &str = "contacted";
pub const STATUS_RESOLVED: &str = "resolved";
pub const STATUS_CANCELLED: &str = "cancelled";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_NEW,
    STATUS_CONTACTED,
    STATUS_RESOLVED,
    STATUS_CANCELLED,
];

pub const DEFAULT_INQUIRY_TYPE: &str = "general";
pub const MAX_MESSAGE_LENGTH: usize = 2_000;

/// `resolved` and `cancelled` are terminal.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_NEW => &[STATUS_CONTACTED, STATUS_RESOLVED, STATUS_CANCELLED],
        STATUS_CONTACTED => &[STATUS_RESOLVED, STATUS_CANCELLED],
        _ => &[],
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid inquiry status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot change inquiry status from '{current}' to '{next}'. Allowed: {allowed:?}"
        )))
    }
}

pub fn validate_message(message: &str) -> Result<(), CoreError> {
    let len = message.chars().count();
    if len > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message exceeds maximum length of {MAX_MESSAGE_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_inquiries_progress() {
        assert!(validate_transition(STATUS_NEW, STATUS_CONTACTED).is_ok());
        assert!(validate_transition(STATUS_NEW, STATUS_CANCELLED).is_ok());
        assert!(validate_transition(STATUS_CONTACTED, STATUS_RESOLVED).is_ok());
        assert!(validate_transition(STATUS_CONTACTED, STATUS_NEW).is_err());
    }

    #[test]
    fn closed_inquiries_are_terminal() {
        for next in VALID_STATUSES {
            assert!(validate_transition(STATUS_RESOLVED, next).is_err());
            assert!(validate_transition(STATUS_CANCELLED, next).is_err());
        }
    }

    #[test]
    fn message_length_limit() {
        assert!(validate_message(&"a".repeat(MAX_MESSAGE_LENGTH)).is_ok());
        assert!(validate_message(&"a".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
    }
}
