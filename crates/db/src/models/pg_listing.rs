//! PG listing entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use pgwale_core::types::{DbId, Timestamp};

/// A row from the `pg_listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PgListing {
    pub id: DbId,
    pub landlord_id: Option<DbId>,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub area: String,
    pub locality: Option<String>,
    pub full_address: Option<String>,
    pub monthly_rent: i32,
    pub room_type: String,
    pub gender_preference: String,
    pub total_rooms: Option<i32>,
    pub available_rooms: Option<i32>,
    pub amenities: Vec<String>,
    pub other_amenities: Option<String>,
    pub images: Vec<String>,
    pub contact_person: String,
    pub phone_number: String,
    pub email: String,
    pub whatsapp_number: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub is_featured: bool,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated insert payload. Handlers resolve `status` and `slug` before
/// calling the repository.
#[derive(Debug, Clone)]
pub struct CreatePgListing {
    pub landlord_id: Option<DbId>,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub area: String,
    pub locality: Option<String>,
    pub full_address: Option<String>,
    pub monthly_rent: i32,
    pub room_type: String,
    pub gender_preference: String,
    pub total_rooms: Option<i32>,
    pub available_rooms: Option<i32>,
    pub amenities: Vec<String>,
    pub other_amenities: Option<String>,
    pub images: Vec<String>,
    pub contact_person: String,
    pub phone_number: String,
    pub email: String,
    pub whatsapp_number: Option<String>,
    pub status: String,
}

/// Partial update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePgListing {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub area: Option<String>,
    pub locality: Option<String>,
    pub full_address: Option<String>,
    pub monthly_rent: Option<i32>,
    pub room_type: Option<String>,
    pub gender_preference: Option<String>,
    pub total_rooms: Option<i32>,
    pub available_rooms: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub other_amenities: Option<String>,
    pub images: Option<Vec<String>>,
    pub contact_person: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub whatsapp_number: Option<String>,
    pub status: Option<String>,
}

/// Filters for the listing index. `status = None` means any status.
#[derive(Debug, Clone, Default)]
pub struct PgListingFilter {
    pub status: Option<String>,
    pub landlord_id: Option<DbId>,
    pub featured: Option<bool>,
    pub area: Option<String>,
    pub gender_preference: Option<String>,
    pub room_type: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
}

/// Free-text search over approved listings.
#[derive(Debug, Clone, Default)]
pub struct PgSearch {
    /// Matched case-insensitively against title, area, locality and address.
    pub query: Option<String>,
    pub area: Option<String>,
    pub gender_preference: Option<String>,
    pub room_type: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    /// Every listed amenity must be present.
    pub amenities: Vec<String>,
}
