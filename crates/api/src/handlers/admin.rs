//! Handlers for the admin console: login, dashboard and landlord moderation.

use axum::extract::{Path, State};
use pgwale_core::error::{CoreError, ENTITY_LANDLORD};
use pgwale_core::landlord;
use pgwale_core::roles::ROLE_ADMIN;
use pgwale_core::types::DbId;
use pgwale_core::validation::{require_fields, Sanitize};
use pgwale_db::models::dashboard::AdminDashboard;
use pgwale_db::models::landlord::{LandlordResponse, LandlordSummary};
use pgwale_db::repositories::{DashboardRepo, InquiryRepo, LandlordRepo, PgListingRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_token, ADMIN_SUBJECT};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiQuery, ValidatedJson};
use crate::handlers::landlord::LoginRequest;
use crate::middleware::rbac::RequireAdmin;
use crate::query::StatusPageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Listings and inquiries shown in the dashboard's recent-activity panels.
const DASHBOARD_RECENT_ITEMS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub email: String,
    pub role: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AdminAuthResponse {
    pub token: String,
    pub admin: AdminInfo,
}

/// Request body for `PATCH /landlords/{id}/status`.
#[derive(Debug, Deserialize, Validate)]
pub struct LandlordStatusRequest {
    pub status: Option<String>,
}

impl Sanitize for LandlordStatusRequest {
    fn sanitize(&mut self) {
        self.status.sanitize();
    }
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::unauthorized(
        "INVALID_CREDENTIALS",
        "Invalid admin credentials",
    ))
}

/// POST /api/admin-login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<AdminAuthResponse>> {
    let (email, password) = input.credentials()?;

    let Some(admin) = state.admin.as_deref() else {
        return Err(CoreError::unauthorized(
            "ADMIN_LOGIN_DISABLED",
            "Admin login is not configured",
        )
        .into());
    };

    if !email.eq_ignore_ascii_case(&admin.email) {
        tracing::warn!("Admin login attempt with unknown email");
        return Err(invalid_credentials());
    }
    let valid = verify_password(&password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::warn!("Admin login attempt with wrong password");
        return Err(invalid_credentials());
    }

    let token = generate_token(ADMIN_SUBJECT, ROLE_ADMIN, &admin.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!("Admin logged in");
    Ok(ApiResponse::ok(
        "Admin login successful",
        AdminAuthResponse {
            token,
            admin: AdminInfo {
                email: admin.email.clone(),
                role: ROLE_ADMIN,
            },
        },
    ))
}

/// GET /api/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<ApiResponse<AdminDashboard>> {
    let listings = DashboardRepo::listing_counts(&state.pool, None).await?;
    let inquiries = DashboardRepo::inquiry_counts(&state.pool, None).await?;
    let platform = DashboardRepo::platform_counts(&state.pool).await?;
    let recent_listings = PgListingRepo::list_recent(&state.pool, DASHBOARD_RECENT_ITEMS).await?;
    let recent_inquiries =
        InquiryRepo::list_recent(&state.pool, None, DASHBOARD_RECENT_ITEMS).await?;

    Ok(ApiResponse::ok(
        "Dashboard fetched successfully",
        AdminDashboard {
            listings,
            inquiries,
            platform,
            recent_listings,
            recent_inquiries,
        },
    ))
}

/// GET /api/landlords
pub async fn list_landlords(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiQuery(params): ApiQuery<StatusPageParams>,
) -> AppResult<ApiResponse<Vec<LandlordSummary>>> {
    let status = params.status_filter();
    if let Some(s) = status {
        landlord::validate_status(s)?;
    }
    let page = params.page(&state.config);
    let landlords = LandlordRepo::list_with_counts(&state.pool, status, &page).await?;
    let total = LandlordRepo::count(&state.pool, status).await?;

    Ok(ApiResponse::paginated(
        "Landlords fetched successfully",
        landlords,
        page.info(total),
    ))
}

/// PATCH /api/landlords/{id}/status
pub async fn update_landlord_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<LandlordStatusRequest>,
) -> AppResult<ApiResponse<LandlordResponse>> {
    require_fields(&[("status", input.status.as_deref())])?;
    let status = input.status.unwrap_or_default();
    landlord::validate_status(&status)?;

    let updated = LandlordRepo::update_status(&state.pool, id, &status)
        .await?
        .ok_or(CoreError::NotFound {
            entity: ENTITY_LANDLORD,
            id,
        })?;

    tracing::info!(landlord_id = id, status = %updated.status, "Landlord status changed");
    Ok(ApiResponse::ok(
        format!("Landlord status updated to {}", updated.status),
        updated.into(),
    ))
}
