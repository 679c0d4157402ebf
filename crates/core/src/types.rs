//! Shared id and time aliases.

/// Landlords, listings, inquiries and cashback requests are keyed by BIGSERIAL.
pub type DbId = i64;

/// Stored as TIMESTAMPTZ, serialized as RFC 3339 UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
