//! Aggregate queries backing the landlord and admin dashboards.

use sqlx::PgPool;
use pgwale_core::types::DbId;

use crate::models::dashboard::{InquiryStatusCounts, ListingStatusCounts, PlatformCounts};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Listing counts per status, optionally for one landlord.
    pub async fn listing_counts(
        pool: &PgPool,
        landlord_id: Option<DbId>,
    ) -> Result<ListingStatusCounts, sqlx::Error> {
        sqlx::query_as::<_, ListingStatusCounts>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected,
                COUNT(*) FILTER (WHERE status = 'sold') AS sold,
                COUNT(*) FILTER (WHERE status = 'draft') AS draft,
                COUNT(*) FILTER (WHERE is_featured) AS featured
             FROM pg_listings
             WHERE ($1::BIGINT IS NULL OR landlord_id = $1)",
        )
        .bind(landlord_id)
        .fetch_one(pool)
        .await
    }

    /// Inquiry counts per status, optionally across one landlord's listings.
    pub async fn inquiry_counts(
        pool: &PgPool,
        landlord_id: Option<DbId>,
    ) -> Result<InquiryStatusCounts, sqlx::Error> {
        sqlx::query_as::<_, InquiryStatusCounts>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE i.status = 'new') AS \"new\",
                COUNT(*) FILTER (WHERE i.status = 'contacted') AS contacted,
                COUNT(*) FILTER (WHERE i.status = 'resolved') AS resolved,
                COUNT(*) FILTER (WHERE i.status = 'cancelled') AS cancelled
             FROM inquiries i
             JOIN pg_listings p ON p.id = i.pg_id
             WHERE ($1::BIGINT IS NULL OR p.landlord_id = $1)",
        )
        .bind(landlord_id)
        .fetch_one(pool)
        .await
    }

    pub async fn platform_counts(pool: &PgPool) -> Result<PlatformCounts, sqlx::Error> {
        sqlx::query_as::<_, PlatformCounts>(
            "SELECT
                (SELECT COUNT(*) FROM landlords) AS total_landlords,
                (SELECT COUNT(*) FROM landlords WHERE status = 'pending') AS pending_landlords,
                (SELECT COUNT(*) FROM landlords WHERE status = 'verified') AS verified_landlords,
                (SELECT COUNT(*) FROM cashback_requests WHERE status = 'pending')
                    AS pending_cashback_requests",
        )
        .fetch_one(pool)
        .await
    }
}
