//! Repository for the `cashback_requests` table.

use sqlx::PgPool;
use pgwale_core::pagination::Page;
use pgwale_core::types::DbId;

use crate::models::cashback::{CashbackRequest, CreateCashbackRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, pg_id, full_name, contact_info, pg_name, booking_date, amount_paid, \
    booking_code, status, admin_notes, created_at, updated_at";

pub struct CashbackRepo;

impl CashbackRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCashbackRequest,
    ) -> Result<CashbackRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO cashback_requests (pg_id, full_name, contact_info, pg_name,
                 booking_date, amount_paid, booking_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CashbackRequest>(&query)
            .bind(input.pg_id)
            .bind(&input.full_name)
            .bind(&input.contact_info)
            .bind(&input.pg_name)
            .bind(input.booking_date)
            .bind(input.amount_paid)
            .bind(&input.booking_code)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CashbackRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cashback_requests WHERE id = $1");
        sqlx::query_as::<_, CashbackRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        page: &Page,
    ) -> Result<Vec<CashbackRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cashback_requests
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CashbackRequest>(&query)
            .bind(status)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cashback_requests WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// Set a new status. `admin_notes = None` keeps the existing notes.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        admin_notes: Option<&str>,
    ) -> Result<Option<CashbackRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE cashback_requests SET
                status = $2,
                admin_notes = COALESCE($3, admin_notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CashbackRequest>(&query)
            .bind(id)
            .bind(status)
            .bind(admin_notes)
            .fetch_optional(pool)
            .await
    }
}
