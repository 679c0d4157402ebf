use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{inquiry, pg, search};
use crate::state::AppState;

/// Listing, search and inquiry routes.
///
/// ```text
/// GET    /pgs                      -> list
/// POST   /pgs                      -> create
/// GET    /pgs/{id}                 -> get_by_id
/// PUT    /pgs/{id}                 -> update
/// DELETE /pgs/{id}                 -> delete
/// PATCH  /pgs/{id}/status          -> update_status
/// PATCH  /pgs/{id}/featured        -> toggle_featured
/// POST   /pgs/{id}/inquire         -> inquiry::create
/// GET    /pgs/{id}/inquiries       -> list_inquiries
/// PATCH  /inquiries/{id}/status    -> inquiry::update_status
/// GET    /search                   -> search
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pgs", get(pg::list).post(pg::create))
        .route(
            "/pgs/{id}",
            get(pg::get_by_id).put(pg::update).delete(pg::delete),
        )
        .route("/pgs/{id}/status", patch(pg::update_status))
        .route("/pgs/{id}/featured", patch(pg::toggle_featured))
        .route("/pgs/{id}/inquire", post(inquiry::create))
        .route("/pgs/{id}/inquiries", get(pg::list_inquiries))
        .route("/inquiries/{id}/status", patch(inquiry::update_status))
        .route("/search", get(search::search))
}
