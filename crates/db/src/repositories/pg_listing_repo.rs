//! Repository for the `pg_listings` table.

use sqlx::PgPool;
use pgwale_core::listing::STATUS_APPROVED;
use pgwale_core::pagination::Page;
use pgwale_core::types::DbId;

use crate::models::pg_listing::{
    CreatePgListing, PgListing, PgListingFilter, PgSearch, UpdatePgListing,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, landlord_id, title, slug, description, area, locality, full_address, \
    monthly_rent, room_type, gender_preference, total_rooms, available_rooms, amenities, \
    other_amenities, images, contact_person, phone_number, email, whatsapp_number, status, \
    rejection_reason, is_featured, approved_at, created_at, updated_at";

/// Predicate for [`PgListingFilter`]; binds `$1..=$8`.
const FILTER_WHERE: &str = "($1::TEXT IS NULL OR status = $1)
      AND ($2::BIGINT IS NULL OR landlord_id = $2)
      AND ($3::BOOLEAN IS NULL OR is_featured = $3)
      AND ($4::TEXT IS NULL OR LOWER(area) = LOWER($4))
      AND ($5::TEXT IS NULL OR gender_preference = $5)
      AND ($6::TEXT IS NULL OR STRPOS(LOWER(room_type), LOWER($6)) > 0)
      AND ($7::INTEGER IS NULL OR monthly_rent >= $7)
      AND ($8::INTEGER IS NULL OR monthly_rent <= $8)";

/// Predicate for [`PgSearch`]; binds `$1..=$8`. Approved listings only.
const SEARCH_WHERE: &str = "status = $1
      AND ($2::TEXT IS NULL
           OR STRPOS(LOWER(title), LOWER($2)) > 0
           OR STRPOS(LOWER(area), LOWER($2)) > 0
           OR STRPOS(LOWER(COALESCE(locality, '')), LOWER($2)) > 0
           OR STRPOS(LOWER(COALESCE(full_address, '')), LOWER($2)) > 0)
      AND ($3::TEXT IS NULL OR LOWER(area) = LOWER($3))
      AND ($4::TEXT IS NULL OR gender_preference = $4)
      AND ($5::TEXT IS NULL OR STRPOS(LOWER(room_type), LOWER($5)) > 0)
      AND ($6::INTEGER IS NULL OR monthly_rent >= $6)
      AND ($7::INTEGER IS NULL OR monthly_rent <= $7)
      AND NOT EXISTS (
          SELECT 1 FROM UNNEST($8::TEXT[]) AS wanted(name)
          WHERE NOT EXISTS (
              SELECT 1 FROM UNNEST(amenities) AS have(name)
              WHERE LOWER(have.name) = LOWER(wanted.name)
          )
      )";

/// Provides CRUD, filtering and search over PG listings.
pub struct PgListingRepo;

impl PgListingRepo {
    /// Insert a new listing, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePgListing) -> Result<PgListing, sqlx::Error> {
        let query = format!(
            "INSERT INTO pg_listings (landlord_id, title, slug, description, area, locality,
                 full_address, monthly_rent, room_type, gender_preference, total_rooms,
                 available_rooms, amenities, other_amenities, images, contact_person,
                 phone_number, email, whatsapp_number, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PgListing>(&query)
            .bind(input.landlord_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.area)
            .bind(&input.locality)
            .bind(&input.full_address)
            .bind(input.monthly_rent)
            .bind(&input.room_type)
            .bind(&input.gender_preference)
            .bind(input.total_rooms)
            .bind(input.available_rooms)
            .bind(&input.amenities)
            .bind(&input.other_amenities)
            .bind(&input.images)
            .bind(&input.contact_person)
            .bind(&input.phone_number)
            .bind(&input.email)
            .bind(&input.whatsapp_number)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PgListing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pg_listings WHERE id = $1");
        sqlx::query_as::<_, PgListing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of listings matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PgListingFilter,
        page: &Page,
    ) -> Result<Vec<PgListing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pg_listings
             WHERE {FILTER_WHERE}
             ORDER BY created_at DESC, id DESC
             LIMIT $9 OFFSET $10"
        );
        sqlx::query_as::<_, PgListing>(&query)
            .bind(&filter.status)
            .bind(filter.landlord_id)
            .bind(filter.featured)
            .bind(&filter.area)
            .bind(&filter.gender_preference)
            .bind(&filter.room_type)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Total rows matching `filter`, for pagination.
    pub async fn count(pool: &PgPool, filter: &PgListingFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM pg_listings WHERE {FILTER_WHERE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.status)
            .bind(filter.landlord_id)
            .bind(filter.featured)
            .bind(&filter.area)
            .bind(&filter.gender_preference)
            .bind(&filter.room_type)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_one(pool)
            .await
    }

    /// Search approved listings. Featured listings sort first.
    pub async fn search(
        pool: &PgPool,
        search: &PgSearch,
        page: &Page,
    ) -> Result<Vec<PgListing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pg_listings
             WHERE {SEARCH_WHERE}
             ORDER BY is_featured DESC, created_at DESC, id DESC
             LIMIT $9 OFFSET $10"
        );
        sqlx::query_as::<_, PgListing>(&query)
            .bind(STATUS_APPROVED)
            .bind(&search.query)
            .bind(&search.area)
            .bind(&search.gender_preference)
            .bind(&search.room_type)
            .bind(search.min_price)
            .bind(search.max_price)
            .bind(&search.amenities)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count_search(pool: &PgPool, search: &PgSearch) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM pg_listings WHERE {SEARCH_WHERE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(STATUS_APPROVED)
            .bind(&search.query)
            .bind(&search.area)
            .bind(&search.gender_preference)
            .bind(&search.room_type)
            .bind(search.min_price)
            .bind(search.max_price)
            .bind(&search.amenities)
            .fetch_one(pool)
            .await
    }

    /// Most recently created listings of any status.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<PgListing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pg_listings ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, PgListing>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update listing content. Only non-`None` fields in `input` are applied.
    ///
    /// A status change through this path clears the featured flag when the
    /// new status is not `approved`. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePgListing,
    ) -> Result<Option<PgListing>, sqlx::Error> {
        let query = format!(
            "UPDATE pg_listings SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                area = COALESCE($5, area),
                locality = COALESCE($6, locality),
                full_address = COALESCE($7, full_address),
                monthly_rent = COALESCE($8, monthly_rent),
                room_type = COALESCE($9, room_type),
                gender_preference = COALESCE($10, gender_preference),
                total_rooms = COALESCE($11, total_rooms),
                available_rooms = COALESCE($12, available_rooms),
                amenities = COALESCE($13, amenities),
                other_amenities = COALESCE($14, other_amenities),
                images = COALESCE($15, images),
                contact_person = COALESCE($16, contact_person),
                phone_number = COALESCE($17, phone_number),
                email = COALESCE($18, email),
                whatsapp_number = COALESCE($19, whatsapp_number),
                status = COALESCE($20, status),
                is_featured = is_featured AND COALESCE($20, status) = '{STATUS_APPROVED}'
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PgListing>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.area)
            .bind(&input.locality)
            .bind(&input.full_address)
            .bind(input.monthly_rent)
            .bind(&input.room_type)
            .bind(&input.gender_preference)
            .bind(input.total_rooms)
            .bind(input.available_rooms)
            .bind(&input.amenities)
            .bind(&input.other_amenities)
            .bind(&input.images)
            .bind(&input.contact_person)
            .bind(&input.phone_number)
            .bind(&input.email)
            .bind(&input.whatsapp_number)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Move a listing to `status`.
    ///
    /// Entering `approved` stamps `approved_at`; any other status clears the
    /// featured flag. `rejection_reason` is kept only for `rejected`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        rejection_reason: Option<&str>,
    ) -> Result<Option<PgListing>, sqlx::Error> {
        let query = format!(
            "UPDATE pg_listings SET
                status = $2,
                approved_at = CASE WHEN $2 = '{STATUS_APPROVED}' THEN NOW() ELSE approved_at END,
                is_featured = is_featured AND $2 = '{STATUS_APPROVED}',
                rejection_reason = CASE WHEN $2 = 'rejected' THEN $3::TEXT ELSE NULL END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PgListing>(&query)
            .bind(id)
            .bind(status)
            .bind(rejection_reason)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_featured(
        pool: &PgPool,
        id: DbId,
        featured: bool,
    ) -> Result<Option<PgListing>, sqlx::Error> {
        let query = format!(
            "UPDATE pg_listings SET is_featured = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PgListing>(&query)
            .bind(id)
            .bind(featured)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a listing. Its inquiries cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pg_listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
