//! PG listing status lifecycle and field rules.
//!
//! A listing is created `pending` (or `draft`), moderated by an admin, and
//! may later be marked `sold` by its landlord. Only approved listings are
//! publicly visible or eligible for the featured section.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_SOLD: &str = "sold";
pub const STATUS_DRAFT: &str = "draft";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_APPROVED,
    STATUS_REJECTED,
    STATUS_SOLD,
    STATUS_DRAFT,
];

/// Query value meaning "any status" on list endpoints.
pub const STATUS_FILTER_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Field limits
// ---------------------------------------------------------------------------

pub const MIN_RENT: i32 = 1_000;
pub const MAX_RENT: i32 = 100_000;
pub const MIN_ROOMS: i32 = 1;
pub const MAX_ROOMS: i32 = 100;
pub const DEFAULT_MAX_IMAGES: usize = 15;

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Statuses reachable from `from_status` by an admin.
///
/// - `draft`    -> `pending`
/// - `pending`  -> `approved`, `rejected`
/// - `approved` -> `sold`, `rejected`, `pending`
/// - `sold`     -> `approved`
/// - `rejected` -> `pending`
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_DRAFT => &[STATUS_PENDING],
        STATUS_PENDING => &[STATUS_APPROVED, STATUS_REJECTED],
        STATUS_APPROVED => &[STATUS_SOLD, STATUS_REJECTED, STATUS_PENDING],
        STATUS_SOLD => &[STATUS_APPROVED],
        STATUS_REJECTED => &[STATUS_PENDING],
        _ => &[],
    }
}

/// Subset of transitions a landlord may perform on their own listing.
pub fn landlord_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_DRAFT => &[STATUS_PENDING],
        STATUS_APPROVED => &[STATUS_SOLD],
        STATUS_SOLD => &[STATUS_APPROVED],
        STATUS_REJECTED => &[STATUS_PENDING],
        _ => &[],
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid PG status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot change PG status from '{current}' to '{next}'. Allowed: {allowed:?}"
        )))
    }
}

/// Landlord-initiated transition check. Returns `Forbidden` for transitions
/// that exist but are reserved for admins.
pub fn validate_landlord_transition(current: &str, next: &str) -> Result<(), CoreError> {
    validate_transition(current, next)?;
    if landlord_transitions(current).contains(&next) {
        Ok(())
    } else {
        Err(CoreError::forbidden(
            "INVALID_ADMIN",
            format!("Only an admin can change PG status from '{current}' to '{next}'"),
        ))
    }
}

/// Initial status for a new submission.
pub fn initial_status(as_draft: bool) -> &'static str {
    if as_draft {
        STATUS_DRAFT
    } else {
        STATUS_PENDING
    }
}

/// Status after a landlord edits listing content. Rejected listings are
/// resubmitted for moderation; everything else keeps its status.
pub fn status_after_landlord_edit(current: &str) -> &str {
    if current == STATUS_REJECTED {
        STATUS_PENDING
    } else {
        current
    }
}

/// Whether the featured flag survives a move into `status`.
pub fn keeps_featured(status: &str) -> bool {
    status == STATUS_APPROVED
}

pub fn validate_featurable(status: &str) -> Result<(), CoreError> {
    if status == STATUS_APPROVED {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Only approved PGs can be featured (current status '{status}')"
        )))
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

pub fn validate_rent(monthly_rent: i32) -> Result<(), CoreError> {
    if (MIN_RENT..=MAX_RENT).contains(&monthly_rent) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Monthly rent must be between {MIN_RENT} and {MAX_RENT} (got {monthly_rent})"
        )))
    }
}

/// `available` may be zero (fully booked); `total` may not.
pub fn validate_room_counts(total: Option<i32>, available: Option<i32>) -> Result<(), CoreError> {
    if let Some(total) = total {
        if !(MIN_ROOMS..=MAX_ROOMS).contains(&total) {
            return Err(CoreError::Validation(format!(
                "Total rooms must be between {MIN_ROOMS} and {MAX_ROOMS} (got {total})"
            )));
        }
    }
    if let Some(available) = available {
        if !(0..=MAX_ROOMS).contains(&available) {
            return Err(CoreError::Validation(format!(
                "Available rooms must be between 0 and {MAX_ROOMS} (got {available})"
            )));
        }
        if let Some(total) = total {
            if available > total {
                return Err(CoreError::Validation(format!(
                    "Available rooms ({available}) cannot exceed total rooms ({total})"
                )));
            }
        }
    }
    Ok(())
}

pub fn validate_image_count(count: usize, max: usize) -> Result<(), CoreError> {
    if count <= max {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "At most {max} images are allowed per PG (got {count})"
        )))
    }
}

pub fn validate_price_range(min: Option<i32>, max: Option<i32>) -> Result<(), CoreError> {
    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => Err(CoreError::Validation(format!(
            "minPrice ({lo}) cannot exceed maxPrice ({hi})"
        ))),
        _ => Ok(()),
    }
}
