//! Static option lists the listing and registration forms are built from.

use pgwale_core::catalog::{AMENITIES, DOCUMENT_TYPES, GENDER_PREFERENCES, POPULAR_AREAS, ROOM_TYPES};
use serde::Serialize;

use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingOptions {
    pub room_types: &'static [&'static str],
    pub gender_preferences: &'static [&'static str],
    pub popular_areas: &'static [&'static str],
    pub document_types: &'static [&'static str],
    pub amenities: &'static [&'static str],
}

/// GET /api/amenities
pub async fn amenities() -> ApiResponse<&'static [&'static str]> {
    ApiResponse::ok("Amenities fetched successfully", AMENITIES)
}

/// GET /api/listing-options
pub async fn listing_options() -> ApiResponse<ListingOptions> {
    ApiResponse::ok(
        "Listing options fetched successfully",
        ListingOptions {
            room_types: ROOM_TYPES,
            gender_preferences: GENDER_PREFERENCES,
            popular_areas: POPULAR_AREAS,
            document_types: DOCUMENT_TYPES,
            amenities: AMENITIES,
        },
    )
}
