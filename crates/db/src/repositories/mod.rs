//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod cashback_repo;
pub mod dashboard_repo;
pub mod inquiry_repo;
pub mod landlord_repo;
pub mod pg_listing_repo;

pub use cashback_repo::CashbackRepo;
pub use dashboard_repo::DashboardRepo;
pub use inquiry_repo::InquiryRepo;
pub use landlord_repo::LandlordRepo;
pub use pg_listing_repo::PgListingRepo;
