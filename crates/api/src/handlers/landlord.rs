//! Handlers for landlord accounts: registration, login, dashboard and profile.

use axum::extract::{Path, State};
use chrono::Utc;
use pgwale_core::error::{CoreError, ENTITY_LANDLORD};
use pgwale_core::landlord::{
    ensure_can_login, should_lock, validate_password_strength, LOCKOUT_MINUTES,
};
use pgwale_core::roles::ROLE_LANDLORD;
use pgwale_core::types::DbId;
use pgwale_core::validation::{require_fields, validate_email, validate_phone, Sanitize};
use pgwale_core::{inquiry, listing};
use pgwale_db::is_unique_violation;
use pgwale_db::models::dashboard::LandlordDashboard;
use pgwale_db::models::inquiry::InquiryWithListing;
use pgwale_db::models::landlord::{
    CreateLandlord, Landlord, LandlordResponse, UpdateLandlordProfile,
};
use pgwale_db::models::pg_listing::{PgListing, PgListingFilter};
use pgwale_db::repositories::{DashboardRepo, InquiryRepo, LandlordRepo, PgListingRepo};
use pgwale_events::MarketplaceEvent;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::{ApiQuery, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_landlord_access;
use crate::notify::landlord_contact;
use crate::query::StatusPageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Recent inquiries shown on the landlord dashboard.
const DASHBOARD_RECENT_INQUIRIES: i64 = 5;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /landlord-register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: Option<String>,
    pub whatsapp: Option<String>,
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 200, message = "Business name must be at most 200 characters"))]
    pub business_name: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
}

impl Sanitize for RegisterRequest {
    fn sanitize(&mut self) {
        self.name.sanitize();
        self.email.sanitize();
        self.phone.sanitize();
        self.whatsapp.sanitize();
        self.address.sanitize();
        self.business_name.sanitize();
        self.document_type.sanitize();
        self.document_number.sanitize();
        // Passwords are taken verbatim.
    }
}

/// Request body for `POST /landlord-login` and `POST /admin-login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Sanitize for LoginRequest {
    fn sanitize(&mut self) {
        self.email.sanitize();
    }
}

impl LoginRequest {
    /// Lowercased email and password, or the missing-fields validation error.
    pub fn credentials(self) -> Result<(String, String), CoreError> {
        require_fields(&[
            ("email", self.email.as_deref()),
            ("password", self.password.as_deref()),
        ])?;
        Ok((
            self.email.unwrap_or_default().to_lowercase(),
            self.password.unwrap_or_default(),
        ))
    }
}

/// Request body for `PUT /landlord/{id}/profile`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    /// Accepted only when unchanged.
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 200, message = "Business name must be at most 200 characters"))]
    pub business_name: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
}

impl Sanitize for UpdateProfileRequest {
    fn sanitize(&mut self) {
        self.name.sanitize();
        self.email.sanitize();
        self.phone.sanitize();
        self.whatsapp.sanitize();
        self.address.sanitize();
        self.business_name.sanitize();
        self.document_type.sanitize();
        self.document_number.sanitize();
    }
}

#[derive(Debug, Serialize)]
pub struct LandlordAuthResponse {
    pub token: String,
    pub landlord: LandlordResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordDashboardResponse {
    pub landlord: LandlordResponse,
    #[serde(flatten)]
    pub stats: LandlordDashboard,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::unauthorized(
        "INVALID_CREDENTIALS",
        "Invalid email or password",
    ))
}

fn landlord_exists() -> AppError {
    AppError::Core(CoreError::conflict(
        "LANDLORD_EXISTS",
        "A landlord with this email already exists",
    ))
}

async fn find_landlord(state: &AppState, id: DbId) -> AppResult<Landlord> {
    LandlordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_LANDLORD,
            id,
        }))
}

fn issue_token(state: &AppState, landlord: &Landlord) -> AppResult<String> {
    generate_token(
        &landlord.id.to_string(),
        ROLE_LANDLORD,
        &landlord.email,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))
}

fn validate_optional_phone(phone: Option<&str>) -> Result<(), CoreError> {
    match phone {
        Some(p) if !p.is_empty() => validate_phone(p),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/landlord-register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<ApiResponse<LandlordAuthResponse>> {
    require_fields(&[
        ("name", input.name.as_deref()),
        ("email", input.email.as_deref()),
        ("phone", input.phone.as_deref()),
        ("password", input.password.as_deref()),
    ])?;
    let email = input.email.unwrap_or_default().to_lowercase();
    let phone = input.phone.unwrap_or_default();
    let password = input.password.unwrap_or_default();

    validate_email(&email)?;
    validate_phone(&phone)?;
    validate_optional_phone(input.whatsapp.as_deref())?;
    validate_password_strength(&password)?;

    if LandlordRepo::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(landlord_exists());
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let new_landlord = CreateLandlord {
        name: input.name.unwrap_or_default(),
        email,
        phone,
        whatsapp: input.whatsapp.filter(|w| !w.is_empty()),
        address: input.address,
        business_name: input.business_name,
        document_type: input.document_type,
        document_number: input.document_number,
        password_hash,
    };
    let landlord = LandlordRepo::create(&state.pool, &new_landlord)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                landlord_exists()
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(landlord_id = landlord.id, "Landlord registered");
    let token = issue_token(&state, &landlord)?;
    state.event_bus.publish(MarketplaceEvent::LandlordRegistered {
        landlord: landlord_contact(&landlord),
    });

    Ok(ApiResponse::created(
        "Landlord registered successfully",
        LandlordAuthResponse {
            token,
            landlord: landlord.into(),
        },
    ))
}

/// POST /api/landlord-login
///
/// Five consecutive failures lock the account for fifteen minutes.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<LandlordAuthResponse>> {
    let (email, password) = input.credentials()?;

    let landlord = LandlordRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    ensure_can_login(&landlord.status)?;

    if let Some(locked_until) = landlord.locked_until {
        if locked_until > Utc::now() {
            return Err(CoreError::forbidden(
                "ACCOUNT_LOCKED",
                "Account is temporarily locked due to too many failed login attempts. Try again later.",
            )
            .into());
        }
    }

    let password_valid = verify_password(&password, &landlord.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failures = LandlordRepo::increment_failed_login(&state.pool, landlord.id).await?;
        if should_lock(failures) {
            let until = Utc::now() + chrono::Duration::minutes(LOCKOUT_MINUTES);
            LandlordRepo::lock_account(&state.pool, landlord.id, until).await?;
            tracing::warn!(landlord_id = landlord.id, %until, "Landlord account locked");
        }
        return Err(invalid_credentials());
    }

    LandlordRepo::record_successful_login(&state.pool, landlord.id).await?;
    let landlord = find_landlord(&state, landlord.id).await?;
    let token = issue_token(&state, &landlord)?;

    tracing::info!(landlord_id = landlord.id, "Landlord logged in");
    state.event_bus.publish(MarketplaceEvent::LandlordLoggedIn {
        landlord: landlord_contact(&landlord),
        at: landlord.last_login_at.unwrap_or_else(Utc::now),
    });

    Ok(ApiResponse::ok(
        "Login successful",
        LandlordAuthResponse {
            token,
            landlord: landlord.into(),
        },
    ))
}

/// GET /api/landlord/{id}/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<LandlordDashboardResponse>> {
    ensure_landlord_access(&user, id)?;
    let landlord = find_landlord(&state, id).await?;

    let listings = DashboardRepo::listing_counts(&state.pool, Some(id)).await?;
    let inquiries = DashboardRepo::inquiry_counts(&state.pool, Some(id)).await?;
    let recent_inquiries =
        InquiryRepo::list_recent(&state.pool, Some(id), DASHBOARD_RECENT_INQUIRIES).await?;

    Ok(ApiResponse::ok(
        "Dashboard fetched successfully",
        LandlordDashboardResponse {
            landlord: landlord.into(),
            stats: LandlordDashboard {
                listings,
                inquiries,
                recent_inquiries,
            },
        },
    ))
}

/// GET /api/landlord/{id}/pgs
pub async fn list_pgs(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    ApiQuery(params): ApiQuery<StatusPageParams>,
) -> AppResult<ApiResponse<Vec<PgListing>>> {
    ensure_landlord_access(&user, id)?;
    find_landlord(&state, id).await?;

    let status = params.status_filter();
    if let Some(s) = status {
        listing::validate_status(s)?;
    }
    let filter = PgListingFilter {
        status: status.map(String::from),
        landlord_id: Some(id),
        ..Default::default()
    };
    let page = params.page(&state.config);
    let listings = PgListingRepo::list(&state.pool, &filter, &page).await?;
    let total = PgListingRepo::count(&state.pool, &filter).await?;

    Ok(ApiResponse::paginated(
        "PGs fetched successfully",
        listings,
        page.info(total),
    ))
}

/// GET /api/landlord/{id}/inquiries
pub async fn list_inquiries(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    ApiQuery(params): ApiQuery<StatusPageParams>,
) -> AppResult<ApiResponse<Vec<InquiryWithListing>>> {
    ensure_landlord_access(&user, id)?;
    find_landlord(&state, id).await?;

    let status = params.status_filter();
    if let Some(s) = status {
        inquiry::validate_status(s)?;
    }
    let page = params.page(&state.config);
    let inquiries = InquiryRepo::list_for_landlord(&state.pool, id, status, &page).await?;
    let total = InquiryRepo::count_for_landlord(&state.pool, id, status).await?;

    Ok(ApiResponse::paginated(
        "Inquiries fetched successfully",
        inquiries,
        page.info(total),
    ))
}

/// PUT /api/landlord/{id}/profile
///
/// Email is the login identity and cannot be changed here.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<ApiResponse<LandlordResponse>> {
    ensure_landlord_access(&user, id)?;
    let existing = find_landlord(&state, id).await?;

    if let Some(email) = input.email.as_deref().filter(|e| !e.is_empty()) {
        if !email.eq_ignore_ascii_case(&existing.email) {
            return Err(CoreError::Validation("Email cannot be changed".into()).into());
        }
    }
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    validate_optional_phone(input.whatsapp.as_deref())?;

    let changes = UpdateLandlordProfile {
        name: input.name,
        phone: input.phone,
        whatsapp: input.whatsapp,
        address: input.address,
        business_name: input.business_name,
        document_type: input.document_type,
        document_number: input.document_number,
    };
    let landlord = LandlordRepo::update_profile(&state.pool, id, &changes)
        .await?
        .ok_or(CoreError::NotFound {
            entity: ENTITY_LANDLORD,
            id,
        })?;

    tracing::info!(landlord_id = id, "Landlord profile updated");
    Ok(ApiResponse::ok(
        "Profile updated successfully",
        landlord.into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_reports_missing_fields() {
        let req = LoginRequest {
            email: Some("owner@example.com".into()),
            password: None,
        };
        let err = req.credentials().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Missing required fields: password");
    }

    #[test]
    fn register_sanitize_leaves_password_alone() {
        let mut req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": " Ramesh ",
            "password": " keep spaces "
        }))
        .unwrap();
        req.sanitize();
        assert_eq!(req.name.as_deref(), Some("Ramesh"));
        assert_eq!(req.password.as_deref(), Some(" keep spaces "));
    }
}
