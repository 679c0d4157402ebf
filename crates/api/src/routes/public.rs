use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{cashback, catalog, contact, health};
use crate::state::AppState;

/// Public endpoints, plus the admin-only cashback index sharing their path.
///
/// ```text
/// GET  /health                -> health_check
/// GET  /amenities             -> amenities
/// GET  /listing-options       -> listing_options
/// POST /contact               -> submit
/// POST /cashback-requests     -> cashback::create
/// GET  /cashback-requests     -> cashback::list (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/amenities", get(catalog::amenities))
        .route("/listing-options", get(catalog::listing_options))
        .route("/contact", post(contact::submit))
        .route(
            "/cashback-requests",
            post(cashback::create).get(cashback::list),
        )
}
