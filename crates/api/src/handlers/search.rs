//! Handler for `GET /search`.

use axum::extract::State;
use pgwale_core::catalog::normalize_amenities;
use pgwale_core::listing::validate_price_range;
use pgwale_db::models::pg_listing::{PgListing, PgSearch};
use pgwale_db::repositories::PgListingRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::query::{lenient, non_blank, resolve_page};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /search`.
///
/// `amenities` is a comma-separated list; every amenity must be present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, deserialize_with = "non_blank")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub gender_preference: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub room_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_price: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_price: Option<i32>,
    #[serde(default, deserialize_with = "non_blank")]
    pub amenities: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

impl SearchParams {
    fn amenity_list(&self) -> Vec<String> {
        let raw: Vec<String> = self
            .amenities
            .as_deref()
            .map(|list| list.split(',').map(String::from).collect())
            .unwrap_or_default();
        normalize_amenities(&raw)
    }
}

/// GET /api/search
///
/// Approved listings only, featured first.
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> AppResult<ApiResponse<Vec<PgListing>>> {
    validate_price_range(params.min_price, params.max_price)?;

    let amenities = params.amenity_list();
    let search = PgSearch {
        query: params.q,
        area: params.area,
        gender_preference: params.gender_preference,
        room_type: params.room_type,
        min_price: params.min_price,
        max_price: params.max_price,
        amenities,
    };
    let page = resolve_page(params.page, params.limit, &state.config);

    let results = PgListingRepo::search(&state.pool, &search, &page).await?;
    let total = PgListingRepo::count_search(&state.pool, &search).await?;

    tracing::debug!(query = ?search.query, total, "PG search");
    Ok(ApiResponse::paginated(
        format!("Found {total} PGs"),
        results,
        page.info(total),
    ))
}
