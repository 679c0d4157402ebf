//! Handlers for the `/pgs` resource.

use axum::extract::{Path, State};
use pgwale_core::catalog::{normalize_amenities, validate_gender_preference, validate_room_type};
use pgwale_core::error::{CoreError, ENTITY_LANDLORD, ENTITY_PG};
use pgwale_core::inquiry;
use pgwale_core::listing::{
    self, initial_status, status_after_landlord_edit, validate_featurable,
    validate_image_count, validate_landlord_transition, validate_rent, validate_room_counts,
    validate_transition, STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED,
};
use pgwale_core::text::slugify;
use pgwale_core::types::DbId;
use pgwale_core::validation::{
    missing_fields, require_fields, validate_email, validate_phone, Sanitize,
};
use pgwale_db::models::inquiry::Inquiry;
use pgwale_db::models::pg_listing::{CreatePgListing, PgListing, PgListingFilter, UpdatePgListing};
use pgwale_db::repositories::{InquiryRepo, LandlordRepo, PgListingRepo};
use pgwale_events::MarketplaceEvent;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiQuery, ValidatedJson};
use crate::middleware::auth::{AuthUser, OptionalAuth};
use crate::middleware::rbac::{ensure_listing_access, RequireAdmin, RequireListingManager};
use crate::notify::listing_summary;
use crate::query::{lenient, non_blank, resolve_page, StatusPageParams};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /pgs`.
///
/// Required fields are optional here so a missing field is reported together
/// with every other missing field.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePgRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub area: Option<String>,
    pub locality: Option<String>,
    pub full_address: Option<String>,
    pub monthly_rent: Option<i32>,
    pub room_type: Option<String>,
    pub gender_preference: Option<String>,
    pub total_rooms: Option<i32>,
    pub available_rooms: Option<i32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub other_amenities: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub contact_person: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub whatsapp_number: Option<String>,
    /// Admin only: the landlord the listing belongs to.
    pub landlord_id: Option<DbId>,
    /// Save without submitting for review.
    #[serde(default)]
    pub as_draft: bool,
}

impl Sanitize for CreatePgRequest {
    fn sanitize(&mut self) {
        self.title.sanitize();
        self.description.sanitize();
        self.area.sanitize();
        self.locality.sanitize();
        self.full_address.sanitize();
        self.room_type.sanitize();
        self.gender_preference.sanitize();
        self.amenities.sanitize();
        self.other_amenities.sanitize();
        self.images.sanitize();
        self.contact_person.sanitize();
        self.phone_number.sanitize();
        self.email.sanitize();
        self.whatsapp_number.sanitize();
    }
}

/// Request body for `PUT /pgs/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePgRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub area: Option<String>,
    pub locality: Option<String>,
    pub full_address: Option<String>,
    pub monthly_rent: Option<i32>,
    pub room_type: Option<String>,
    pub gender_preference: Option<String>,
    pub total_rooms: Option<i32>,
    pub available_rooms: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub other_amenities: Option<String>,
    pub images: Option<Vec<String>>,
    pub contact_person: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub whatsapp_number: Option<String>,
}

impl Sanitize for UpdatePgRequest {
    fn sanitize(&mut self) {
        self.title.sanitize();
        self.description.sanitize();
        self.area.sanitize();
        self.locality.sanitize();
        self.full_address.sanitize();
        self.room_type.sanitize();
        self.gender_preference.sanitize();
        self.amenities.sanitize();
        self.other_amenities.sanitize();
        self.images.sanitize();
        self.contact_person.sanitize();
        self.phone_number.sanitize();
        self.email.sanitize();
        self.whatsapp_number.sanitize();
    }
}

/// Request body for `PATCH /pgs/{id}/status`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub status: Option<String>,
    #[validate(length(max = 1000, message = "Rejection reason must be at most 1000 characters"))]
    pub rejection_reason: Option<String>,
}

impl Sanitize for StatusChangeRequest {
    fn sanitize(&mut self) {
        self.status.sanitize();
        self.rejection_reason.sanitize();
    }
}

/// Request body for `PATCH /pgs/{id}/featured`. Omitting `isFeatured` toggles.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedRequest {
    pub is_featured: Option<bool>,
}

impl Sanitize for FeaturedRequest {
    fn sanitize(&mut self) {}
}

/// Query parameters for `GET /pgs`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgListParams {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "non_blank")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub featured: Option<bool>,
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
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_listing(state: &AppState, id: DbId) -> AppResult<PgListing> {
    PgListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_PG,
            id,
        }))
}

/// Provided-but-blank required fields are as bad as missing ones on update.
fn reject_blank(fields: &[(&str, Option<&str>)]) -> Result<(), CoreError> {
    let provided: Vec<(&str, Option<&str>)> = fields
        .iter()
        .filter(|(_, value)| value.is_some())
        .copied()
        .collect();
    let blank = missing_fields(&provided);
    if blank.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Fields cannot be empty: {}",
            blank.join(", ")
        )))
    }
}

fn validate_optional_phone(phone: Option<&str>) -> Result<(), CoreError> {
    match phone {
        Some(p) if !p.is_empty() => validate_phone(p),
        _ => Ok(()),
    }
}

/// Resolve which landlord a new listing belongs to.
async fn resolve_owner(
    state: &AppState,
    user: &AuthUser,
    requested: Option<DbId>,
) -> AppResult<Option<DbId>> {
    let landlord_id = if user.is_admin() {
        requested
    } else {
        Some(user.landlord_id.ok_or_else(|| {
            CoreError::forbidden(
                "INVALID_LANDLORD",
                "No landlord account is linked to this login",
            )
        })?)
    };

    if let Some(id) = landlord_id {
        LandlordRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: ENTITY_LANDLORD,
                id,
            })?;
    }
    Ok(landlord_id)
}

async fn publish_listing_event(state: &AppState, listing: &PgListing, approved: bool) {
    match listing_summary(&state.pool, listing).await {
        Ok(summary) => state.event_bus.publish(if approved {
            MarketplaceEvent::ListingApproved { listing: summary }
        } else {
            MarketplaceEvent::ListingSubmitted { listing: summary }
        }),
        Err(e) => tracing::warn!(error = %e, pg_id = listing.id, "Failed to build listing event"),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/pgs
///
/// Approved listings by default. Any other `status` (including `all`) is
/// admin only.
pub async fn list(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiQuery(params): ApiQuery<PgListParams>,
) -> AppResult<ApiResponse<Vec<PgListing>>> {
    let requested = params.status.as_deref().unwrap_or(STATUS_APPROVED);
    if requested != STATUS_APPROVED && !user.as_ref().is_some_and(AuthUser::is_admin) {
        return Err(CoreError::forbidden(
            "INVALID_ADMIN",
            "Access denied. Admin privileges required.",
        )
        .into());
    }
    let status = match requested {
        listing::STATUS_FILTER_ALL => None,
        s => {
            listing::validate_status(s)?;
            Some(s.to_string())
        }
    };
    listing::validate_price_range(params.min_price, params.max_price)?;

    let filter = PgListingFilter {
        status,
        landlord_id: None,
        featured: params.featured,
        area: params.area,
        gender_preference: params.gender_preference,
        room_type: params.room_type,
        min_price: params.min_price,
        max_price: params.max_price,
    };
    let page = resolve_page(params.page, params.limit, &state.config);
    let listings = PgListingRepo::list(&state.pool, &filter, &page).await?;
    let total = PgListingRepo::count(&state.pool, &filter).await?;

    Ok(ApiResponse::paginated(
        "PGs fetched successfully",
        listings,
        page.info(total),
    ))
}

/// GET /api/pgs/{id}
///
/// Non-approved listings are only visible to their landlord and admins;
/// everyone else gets a 404.
pub async fn get_by_id(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<PgListing>> {
    let listing = find_listing(&state, id).await?;
    if listing.status != STATUS_APPROVED {
        let visible = user
            .as_ref()
            .is_some_and(|u| ensure_listing_access(u, listing.landlord_id).is_ok());
        if !visible {
            return Err(CoreError::NotFound {
                entity: ENTITY_PG,
                id,
            }
            .into());
        }
    }
    Ok(ApiResponse::ok("PG fetched successfully", listing))
}

/// POST /api/pgs
pub async fn create(
    State(state): State<AppState>,
    RequireListingManager(user): RequireListingManager,
    ValidatedJson(input): ValidatedJson<CreatePgRequest>,
) -> AppResult<ApiResponse<PgListing>> {
    let rent = input.monthly_rent.map(|r| r.to_string());
    require_fields(&[
        ("title", input.title.as_deref()),
        ("area", input.area.as_deref()),
        ("monthlyRent", rent.as_deref()),
        ("roomType", input.room_type.as_deref()),
        ("genderPreference", input.gender_preference.as_deref()),
        ("contactPerson", input.contact_person.as_deref()),
        ("phoneNumber", input.phone_number.as_deref()),
        ("email", input.email.as_deref()),
    ])?;

    let CreatePgRequest {
        title: Some(title),
        area: Some(area),
        monthly_rent: Some(monthly_rent),
        room_type: Some(room_type),
        gender_preference: Some(gender_preference),
        contact_person: Some(contact_person),
        phone_number: Some(phone_number),
        email: Some(email),
        description,
        locality,
        full_address,
        total_rooms,
        available_rooms,
        amenities,
        other_amenities,
        images,
        whatsapp_number,
        landlord_id,
        as_draft,
    } = input
    else {
        return Err(AppError::InternalError(
            "required fields vanished after validation".into(),
        ));
    };

    validate_rent(monthly_rent)?;
    validate_room_counts(total_rooms, available_rooms)?;
    validate_image_count(images.len(), state.config.max_images_per_pg)?;
    validate_room_type(&room_type)?;
    validate_gender_preference(&gender_preference)?;
    validate_email(&email)?;
    validate_phone(&phone_number)?;
    validate_optional_phone(whatsapp_number.as_deref())?;

    let landlord_id = resolve_owner(&state, &user, landlord_id).await?;

    let new_listing = CreatePgListing {
        landlord_id,
        slug: slugify(&title),
        title,
        description,
        area,
        locality,
        full_address,
        monthly_rent,
        room_type,
        gender_preference,
        total_rooms,
        available_rooms,
        amenities: normalize_amenities(&amenities),
        other_amenities,
        images,
        contact_person,
        phone_number,
        email,
        whatsapp_number,
        status: initial_status(as_draft).to_string(),
    };
    let listing = PgListingRepo::create(&state.pool, &new_listing).await?;

    tracing::info!(
        pg_id = listing.id,
        landlord_id = ?listing.landlord_id,
        status = %listing.status,
        "PG listing created"
    );

    if listing.status == STATUS_PENDING {
        publish_listing_event(&state, &listing, false).await;
        Ok(ApiResponse::created(
            "PG listing submitted successfully. It will be reviewed by our team.",
            listing,
        ))
    } else {
        Ok(ApiResponse::created("PG listing saved as draft", listing))
    }
}

/// PUT /api/pgs/{id}
///
/// Landlord edits to a rejected listing resubmit it for review.
pub async fn update(
    State(state): State<AppState>,
    RequireListingManager(user): RequireListingManager,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdatePgRequest>,
) -> AppResult<ApiResponse<PgListing>> {
    let existing = find_listing(&state, id).await?;
    ensure_listing_access(&user, existing.landlord_id)?;

    reject_blank(&[
        ("title", input.title.as_deref()),
        ("area", input.area.as_deref()),
        ("roomType", input.room_type.as_deref()),
        ("genderPreference", input.gender_preference.as_deref()),
        ("contactPerson", input.contact_person.as_deref()),
        ("phoneNumber", input.phone_number.as_deref()),
        ("email", input.email.as_deref()),
    ])?;

    if let Some(rent) = input.monthly_rent {
        validate_rent(rent)?;
    }
    validate_room_counts(
        input.total_rooms.or(existing.total_rooms),
        input.available_rooms.or(existing.available_rooms),
    )?;
    if let Some(images) = &input.images {
        validate_image_count(images.len(), state.config.max_images_per_pg)?;
    }
    if let Some(room_type) = &input.room_type {
        validate_room_type(room_type)?;
    }
    if let Some(preference) = &input.gender_preference {
        validate_gender_preference(preference)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    if let Some(phone) = &input.phone_number {
        validate_phone(phone)?;
    }
    validate_optional_phone(input.whatsapp_number.as_deref())?;

    let next_status = if user.is_admin() {
        existing.status.as_str()
    } else {
        status_after_landlord_edit(&existing.status)
    };
    let resubmitted = next_status != existing.status;

    let changes = UpdatePgListing {
        slug: input.title.as_deref().map(slugify),
        title: input.title,
        description: input.description,
        area: input.area,
        locality: input.locality,
        full_address: input.full_address,
        monthly_rent: input.monthly_rent,
        room_type: input.room_type,
        gender_preference: input.gender_preference,
        total_rooms: input.total_rooms,
        available_rooms: input.available_rooms,
        amenities: input.amenities.as_deref().map(normalize_amenities),
        other_amenities: input.other_amenities,
        images: input.images,
        contact_person: input.contact_person,
        phone_number: input.phone_number,
        email: input.email,
        whatsapp_number: input.whatsapp_number,
        status: resubmitted.then(|| next_status.to_string()),
    };

    let listing = PgListingRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(CoreError::NotFound {
            entity: ENTITY_PG,
            id,
        })?;

    tracing::info!(pg_id = id, resubmitted, "PG listing updated");
    if resubmitted {
        publish_listing_event(&state, &listing, false).await;
    }

    Ok(ApiResponse::ok("PG listing updated successfully", listing))
}

/// DELETE /api/pgs/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireListingManager(user): RequireListingManager,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<()>> {
    let existing = find_listing(&state, id).await?;
    ensure_listing_access(&user, existing.landlord_id)?;

    if !PgListingRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: ENTITY_PG,
            id,
        }
        .into());
    }
    tracing::info!(pg_id = id, by = %user.subject, "PG listing deleted");
    Ok(ApiResponse::message("PG listing deleted successfully"))
}

/// PATCH /api/pgs/{id}/status
///
/// Admins may make any valid transition. Landlords may submit drafts,
/// resubmit rejected listings, and mark listings sold or relist them.
pub async fn update_status(
    State(state): State<AppState>,
    RequireListingManager(user): RequireListingManager,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<StatusChangeRequest>,
) -> AppResult<ApiResponse<PgListing>> {
    require_fields(&[("status", input.status.as_deref())])?;
    let status = input.status.unwrap_or_default();
    listing::validate_status(&status)?;

    let existing = find_listing(&state, id).await?;
    ensure_listing_access(&user, existing.landlord_id)?;

    if user.is_admin() {
        validate_transition(&existing.status, &status)?;
    } else {
        validate_landlord_transition(&existing.status, &status)?;
    }

    let reason = input
        .rejection_reason
        .as_deref()
        .filter(|r| !r.is_empty() && status == STATUS_REJECTED);
    let listing = PgListingRepo::update_status(&state.pool, id, &status, reason)
        .await?
        .ok_or(CoreError::NotFound {
            entity: ENTITY_PG,
            id,
        })?;

    tracing::info!(
        pg_id = id,
        from = %existing.status,
        to = %listing.status,
        by = %user.subject,
        "PG status changed"
    );

    match listing.status.as_str() {
        STATUS_APPROVED => publish_listing_event(&state, &listing, true).await,
        STATUS_PENDING => publish_listing_event(&state, &listing, false).await,
        _ => {}
    }

    Ok(ApiResponse::ok(
        format!("PG status updated to {}", listing.status),
        listing,
    ))
}

/// PATCH /api/pgs/{id}/featured
pub async fn toggle_featured(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<FeaturedRequest>,
) -> AppResult<ApiResponse<PgListing>> {
    let existing = find_listing(&state, id).await?;
    let featured = input.is_featured.unwrap_or(!existing.is_featured);
    if featured {
        validate_featurable(&existing.status)?;
    }

    let listing = PgListingRepo::set_featured(&state.pool, id, featured)
        .await?
        .ok_or(CoreError::NotFound {
            entity: ENTITY_PG,
            id,
        })?;

    let message = if listing.is_featured {
        "PG marked as featured"
    } else {
        "PG removed from featured"
    };
    Ok(ApiResponse::ok(message, listing))
}

/// GET /api/pgs/{id}/inquiries
pub async fn list_inquiries(
    State(state): State<AppState>,
    RequireListingManager(user): RequireListingManager,
    Path(id): Path<DbId>,
    ApiQuery(params): ApiQuery<StatusPageParams>,
) -> AppResult<ApiResponse<Vec<Inquiry>>> {
    let listing = find_listing(&state, id).await?;
    ensure_listing_access(&user, listing.landlord_id)?;

    let status = params.status_filter();
    if let Some(s) = status {
        inquiry::validate_status(s)?;
    }
    let inquiries = InquiryRepo::list_for_pg(&state.pool, id, status).await?;
    Ok(ApiResponse::ok("Inquiries fetched successfully", inquiries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_provided_fields_are_rejected() {
        let err = reject_blank(&[("title", Some("  ")), ("area", None)]).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Fields cannot be empty: title");
        assert!(reject_blank(&[("title", Some("Sunrise PG")), ("area", None)]).is_ok());
    }

    #[test]
    fn empty_whatsapp_is_allowed() {
        assert!(validate_optional_phone(None).is_ok());
        assert!(validate_optional_phone(Some("")).is_ok());
        assert!(validate_optional_phone(Some("12")).is_err());
    }

    #[test]
    fn create_request_sanitizes_text() {
        let mut req: CreatePgRequest = serde_json::from_value(serde_json::json!({
            "title": " Sunrise PG<script>alert(1)</script> ",
            "amenities": [" WiFi "],
        }))
        .unwrap();
        req.sanitize();
        assert_eq!(req.title.as_deref(), Some("Sunrise PG"));
        assert_eq!(req.amenities, vec!["WiFi".to_string()]);
        assert!(!req.as_draft);
    }
}
