//! Domain rules for the PG marketplace: status lifecycles, field
//! validation, catalogs, pagination and rate-limit math.
//!
//! Nothing in this crate touches the database or the network.

pub mod cashback;
pub mod catalog;
pub mod error;
pub mod inquiry;
pub mod landlord;
pub mod listing;
pub mod pagination;
pub mod rate_limit;
pub mod roles;
pub mod text;
pub mod types;
pub mod validation;
