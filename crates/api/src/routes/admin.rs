use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{admin, cashback};
use crate::state::AppState;

/// Admin console routes. Everything except login requires the admin role.
///
/// ```text
/// POST  /admin-login                       -> login
/// GET   /admin/dashboard                   -> dashboard
/// GET   /landlords                         -> list_landlords
/// PATCH /landlords/{id}/status             -> update_landlord_status
/// PATCH /cashback-requests/{id}/status     -> cashback::update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin-login", post(admin::login))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/landlords", get(admin::list_landlords))
        .route("/landlords/{id}/status", patch(admin::update_landlord_status))
        .route(
            "/cashback-requests/{id}/status",
            patch(cashback::update_status),
        )
}
