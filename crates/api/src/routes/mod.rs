pub mod admin;
pub mod landlord;
pub mod pg;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health, /amenities, /listing-options, /contact      public
/// /search                                              approved listings
/// /pgs, /pgs/{id}, /pgs/{id}/...                       listings and inquiries
/// /inquiries/{id}/status                               inquiry workflow
/// /landlord-register, /landlord-login                  landlord auth
/// /landlord/{id}/...                                   landlord self-service
/// /admin-login, /admin/dashboard                       admin console
/// /landlords, /landlords/{id}/status                   landlord moderation
/// /cashback-requests, /cashback-requests/{id}/status   cashback workflow
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .merge(pg::router())
        .merge(landlord::router())
        .merge(admin::router())
}
