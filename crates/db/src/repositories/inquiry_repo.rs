//! Repository for the `inquiries` table.

use sqlx::PgPool;
use pgwale_core::pagination::Page;
use pgwale_core::types::DbId;

use crate::models::inquiry::{CreateInquiry, Inquiry, InquiryWithListing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, pg_id, name, phone, email, message, inquiry_type, status, created_at, updated_at";

/// Columns for [`InquiryWithListing`], aliased over `inquiries i JOIN pg_listings p`.
const JOINED_COLUMNS: &str = "i.id, i.pg_id, p.title AS pg_title, i.name, i.phone, i.email, \
    i.message, i.inquiry_type, i.status, i.created_at, i.updated_at";

pub struct InquiryRepo;

impl InquiryRepo {
    pub async fn create(pool: &PgPool, input: &CreateInquiry) -> Result<Inquiry, sqlx::Error> {
        let query = format!(
            "INSERT INTO inquiries (pg_id, name, phone, email, message, inquiry_type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(input.pg_id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.message)
            .bind(&input.inquiry_type)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inquiries WHERE id = $1");
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Inquiries for one listing, newest first.
    pub async fn list_for_pg(
        pool: &PgPool,
        pg_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Inquiry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inquiries
             WHERE pg_id = $1 AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(pg_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// One page of inquiries across every listing owned by `landlord_id`.
    pub async fn list_for_landlord(
        pool: &PgPool,
        landlord_id: DbId,
        status: Option<&str>,
        page: &Page,
    ) -> Result<Vec<InquiryWithListing>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM inquiries i
             JOIN pg_listings p ON p.id = i.pg_id
             WHERE p.landlord_id = $1 AND ($2::TEXT IS NULL OR i.status = $2)
             ORDER BY i.created_at DESC, i.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, InquiryWithListing>(&query)
            .bind(landlord_id)
            .bind(status)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_landlord(
        pool: &PgPool,
        landlord_id: DbId,
        status: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)
             FROM inquiries i
             JOIN pg_listings p ON p.id = i.pg_id
             WHERE p.landlord_id = $1 AND ($2::TEXT IS NULL OR i.status = $2)",
        )
        .bind(landlord_id)
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// Latest inquiries, optionally restricted to one landlord's listings.
    pub async fn list_recent(
        pool: &PgPool,
        landlord_id: Option<DbId>,
        limit: i64,
    ) -> Result<Vec<InquiryWithListing>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM inquiries i
             JOIN pg_listings p ON p.id = i.pg_id
             WHERE ($1::BIGINT IS NULL OR p.landlord_id = $1)
             ORDER BY i.created_at DESC, i.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, InquiryWithListing>(&query)
            .bind(landlord_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!("UPDATE inquiries SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
