//! Row models and request DTOs, one module per table.

pub mod cashback;
pub mod dashboard;
pub mod inquiry;
pub mod landlord;
pub mod pg_listing;
