//! Aggregate counts for the landlord and admin dashboards.

use serde::Serialize;
use sqlx::FromRow;

use crate::models::inquiry::InquiryWithListing;
use crate::models::pg_listing::PgListing;

/// Listing counts per status.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStatusCounts {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub sold: i64,
    pub draft: i64,
    pub featured: i64,
}

/// Inquiry counts per status.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryStatusCounts {
    pub total: i64,
    pub new: i64,
    pub contacted: i64,
    pub resolved: i64,
    pub cancelled: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordDashboard {
    pub listings: ListingStatusCounts,
    pub inquiries: InquiryStatusCounts,
    pub recent_inquiries: Vec<InquiryWithListing>,
}

/// Platform-wide counters for the admin dashboard.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCounts {
    pub total_landlords: i64,
    pub pending_landlords: i64,
    pub verified_landlords: i64,
    pub pending_cashback_requests: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub listings: ListingStatusCounts,
    pub inquiries: InquiryStatusCounts,
    pub platform: PlatformCounts,
    pub recent_listings: Vec<PgListing>,
    pub recent_inquiries: Vec<InquiryWithListing>,
}
