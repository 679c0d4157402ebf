use crate::types::DbId;

/// Entity name for PG listings, used in not-found errors.
pub const ENTITY_PG: &str = "PG";
/// Entity name for landlords.
pub const ENTITY_LANDLORD: &str = "Landlord";
/// Entity name for inquiries.
pub const ENTITY_INQUIRY: &str = "Inquiry";
/// Entity name for cashback requests.
pub const ENTITY_CASHBACK: &str = "CashbackRequest";

/// Domain-level failure shared by every layer above `core`.
///
/// Each variant knows the machine-readable error code clients switch on
/// (`PG_NOT_FOUND`, `VALIDATION_ERROR`, `INVALID_TOKEN`, ...).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },

    #[error("{message}")]
    Forbidden { code: &'static str, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        Self::Forbidden {
            code,
            message: message.into(),
        }
    }

    /// Machine-readable error code for the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { entity, .. } => not_found_code(entity),
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Conflict { code, .. }
            | CoreError::Unauthorized { code, .. }
            | CoreError::Forbidden { code, .. } => code,
            CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

fn not_found_code(entity: &str) -> &'static str {
    match entity {
        ENTITY_PG => "PG_NOT_FOUND",
        ENTITY_LANDLORD => "LANDLORD_NOT_FOUND",
        ENTITY_INQUIRY => "INQUIRY_NOT_FOUND",
        ENTITY_CASHBACK => "CASHBACK_REQUEST_NOT_FOUND",
        _ => "NOT_FOUND",
    }
}
