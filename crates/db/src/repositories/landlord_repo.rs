//! Repository for the `landlords` table.

use sqlx::PgPool;
use pgwale_core::pagination::Page;
use pgwale_core::types::{DbId, Timestamp};

use crate::models::landlord::{CreateLandlord, Landlord, LandlordSummary, UpdateLandlordProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, whatsapp, address, business_name, document_type, \
    document_number, password_hash, status, failed_login_count, locked_until, last_login_at, \
    created_at, updated_at";

/// Provides CRUD and login bookkeeping for landlords.
pub struct LandlordRepo;

impl LandlordRepo {
    /// Insert a new landlord, returning the created row.
    ///
    /// Fails with a unique violation when the email (case-insensitive) is taken.
    pub async fn create(pool: &PgPool, input: &CreateLandlord) -> Result<Landlord, sqlx::Error> {
        let query = format!(
            "INSERT INTO landlords (name, email, phone, whatsapp, address, business_name,
                 document_type, document_number, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Landlord>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.whatsapp)
            .bind(&input.address)
            .bind(&input.business_name)
            .bind(&input.document_type)
            .bind(&input.document_number)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Landlord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM landlords WHERE id = $1");
        sqlx::query_as::<_, Landlord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a landlord by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Landlord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM landlords WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, Landlord>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// One page of landlords with their listing counts, newest first.
    pub async fn list_with_counts(
        pool: &PgPool,
        status: Option<&str>,
        page: &Page,
    ) -> Result<Vec<LandlordSummary>, sqlx::Error> {
        sqlx::query_as::<_, LandlordSummary>(
            "SELECT l.id, l.name, l.email, l.phone, l.business_name, l.status,
                    l.last_login_at, l.created_at,
                    COUNT(p.id) AS pg_count
             FROM landlords l
             LEFT JOIN pg_listings p ON p.landlord_id = l.id
             WHERE ($1::TEXT IS NULL OR l.status = $1)
             GROUP BY l.id
             ORDER BY l.created_at DESC, l.id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM landlords WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLandlordProfile,
    ) -> Result<Option<Landlord>, sqlx::Error> {
        let query = format!(
            "UPDATE landlords SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                whatsapp = COALESCE($4, whatsapp),
                address = COALESCE($5, address),
                business_name = COALESCE($6, business_name),
                document_type = COALESCE($7, document_type),
                document_number = COALESCE($8, document_number)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Landlord>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.whatsapp)
            .bind(&input.address)
            .bind(&input.business_name)
            .bind(&input.document_type)
            .bind(&input.document_number)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Landlord>, sqlx::Error> {
        let query = format!("UPDATE landlords SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Landlord>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Increment the failed login counter, returning the new value.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE landlords SET failed_login_count = failed_login_count + 1
             WHERE id = $1
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Lock the account until `until` and reset the failure counter.
    pub async fn lock_account(pool: &PgPool, id: DbId, until: Timestamp) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE landlords SET locked_until = $2, failed_login_count = 0 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear `locked_until`,
    /// and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE landlords SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
