//! Role and ownership checks.
//!
//! The extractors wrap [`AuthUser`] and reject callers whose role does not
//! qualify. Ownership of a specific record is checked inside handlers with
//! [`ensure_listing_access`] and [`ensure_landlord_access`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pgwale_core::error::CoreError;
use pgwale_core::roles::is_listing_manager;
use pgwale_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 `INVALID_ADMIN` otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<ApiResponse<()>> {
///     Ok(ApiResponse::message("ok"))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Core(CoreError::forbidden(
                "INVALID_ADMIN",
                "Access denied. Admin privileges required.",
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `landlord` or `admin`. Rejects with 403 `INVALID_LANDLORD` otherwise.
pub struct RequireListingManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireListingManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_listing_manager(&user.role) {
            return Err(AppError::Core(CoreError::forbidden(
                "INVALID_LANDLORD",
                "Access denied. Landlord privileges required.",
            )));
        }
        Ok(RequireListingManager(user))
    }
}

/// Admins, or the landlord owning the listing.
pub fn ensure_listing_access(user: &AuthUser, owner: Option<DbId>) -> Result<(), AppError> {
    if user.is_admin() || (owner.is_some() && user.landlord_id == owner) {
        return Ok(());
    }
    Err(AppError::Core(CoreError::forbidden(
        "UNAUTHORIZED_PG_ACCESS",
        "You do not have permission to manage this PG",
    )))
}

/// Admins, or the landlord whose account this is.
pub fn ensure_landlord_access(user: &AuthUser, landlord_id: DbId) -> Result<(), AppError> {
    if user.is_admin() || user.landlord_id == Some(landlord_id) {
        return Ok(());
    }
    Err(AppError::Core(CoreError::forbidden(
        "INVALID_LANDLORD",
        "You can only access your own landlord account",
    )))
}
