use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::landlord;
use crate::state::AppState;

/// Landlord auth and self-service routes.
///
/// ```text
/// POST /landlord-register          -> register
/// POST /landlord-login             -> login
/// GET  /landlord/{id}/dashboard    -> dashboard
/// GET  /landlord/{id}/pgs          -> list_pgs
/// GET  /landlord/{id}/inquiries    -> list_inquiries
/// PUT  /landlord/{id}/profile      -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/landlord-register", post(landlord::register))
        .route("/landlord-login", post(landlord::login))
        .route("/landlord/{id}/dashboard", get(landlord::dashboard))
        .route("/landlord/{id}/pgs", get(landlord::list_pgs))
        .route("/landlord/{id}/inquiries", get(landlord::list_inquiries))
        .route("/landlord/{id}/profile", put(landlord::update_profile))
}
