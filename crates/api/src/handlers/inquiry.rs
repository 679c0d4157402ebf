//! Handlers for inquiries: the public inquiry form and status updates.

use axum::extract::{Path, State};
use pgwale_core::error::{CoreError, ENTITY_INQUIRY};
use pgwale_core::inquiry::{self, DEFAULT_INQUIRY_TYPE};
use pgwale_core::listing::STATUS_APPROVED;
use pgwale_core::text::whatsapp_inquiry_message;
use pgwale_core::types::DbId;
use pgwale_core::validation::{require_fields, validate_email, validate_phone, Sanitize};
use pgwale_db::models::inquiry::{CreateInquiry, Inquiry};
use pgwale_db::repositories::InquiryRepo;
use pgwale_events::MarketplaceEvent;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::pg::find_listing;
use crate::middleware::rbac::{ensure_listing_access, RequireListingManager};
use crate::notify::{inquiry_details, listing_summary};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /pgs/{id}/inquire`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,
    #[validate(length(max = 50, message = "Inquiry type must be at most 50 characters"))]
    pub inquiry_type: Option<String>,
}

impl Sanitize for CreateInquiryRequest {
    fn sanitize(&mut self) {
        self.name.sanitize();
        self.phone.sanitize();
        self.email.sanitize();
        self.message.sanitize();
        self.inquiry_type.sanitize();
    }
}

/// Request body for `PATCH /inquiries/{id}/status`.
#[derive(Debug, Deserialize, Validate)]
pub struct InquiryStatusRequest {
    pub status: Option<String>,
}

impl Sanitize for InquiryStatusRequest {
    fn sanitize(&mut self) {
        self.status.sanitize();
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryCreated {
    pub inquiry: Inquiry,
    /// Prefilled chat with the platform about this listing.
    pub whatsapp_url: String,
}

/// `https://wa.me/<digits>?text=<message>`.
pub fn whatsapp_link(number: &str, text: &str) -> Result<String, AppError> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    let url = reqwest::Url::parse_with_params(&format!("https://wa.me/{digits}"), [("text", text)])
        .map_err(|e| AppError::InternalError(format!("Invalid WhatsApp URL: {e}")))?;
    Ok(url.to_string())
}

/// POST /api/pgs/{id}/inquire
pub async fn create(
    State(state): State<AppState>,
    Path(pg_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateInquiryRequest>,
) -> AppResult<ApiResponse<InquiryCreated>> {
    require_fields(&[
        ("name", input.name.as_deref()),
        ("phone", input.phone.as_deref()),
    ])?;
    let name = input.name.unwrap_or_default();
    let phone = input.phone.unwrap_or_default();
    validate_phone(&phone)?;
    let email = input.email.filter(|e| !e.is_empty());
    if let Some(email) = &email {
        validate_email(email)?;
    }
    let message = input.message.filter(|m| !m.is_empty());
    if let Some(message) = &message {
        inquiry::validate_message(message)?;
    }

    let listing = find_listing(&state, pg_id).await?;
    if listing.status != STATUS_APPROVED {
        return Err(CoreError::Validation(
            "This PG is not accepting inquiries right now".into(),
        )
        .into());
    }

    let new_inquiry = CreateInquiry {
        pg_id,
        name,
        phone,
        email,
        message,
        inquiry_type: input
            .inquiry_type
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_INQUIRY_TYPE.to_string()),
    };
    let inquiry = InquiryRepo::create(&state.pool, &new_inquiry).await?;
    tracing::info!(inquiry_id = inquiry.id, pg_id, "Inquiry created");

    let text = whatsapp_inquiry_message(
        &listing.title,
        &listing.area,
        listing.monthly_rent,
        &inquiry.name,
        inquiry.message.as_deref(),
    );
    let whatsapp_url = whatsapp_link(&state.config.whatsapp_number, &text)?;

    match listing_summary(&state.pool, &listing).await {
        Ok(summary) => state.event_bus.publish(MarketplaceEvent::InquiryCreated {
            listing: summary,
            inquiry: inquiry_details(&inquiry),
        }),
        Err(e) => tracing::warn!(error = %e, pg_id, "Failed to build inquiry event"),
    }

    Ok(ApiResponse::created(
        "Inquiry submitted successfully",
        InquiryCreated {
            inquiry,
            whatsapp_url,
        },
    ))
}

/// PATCH /api/inquiries/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireListingManager(user): RequireListingManager,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<InquiryStatusRequest>,
) -> AppResult<ApiResponse<Inquiry>> {
    require_fields(&[("status", input.status.as_deref())])?;
    let status = input.status.unwrap_or_default();
    inquiry::validate_status(&status)?;

    let not_found = || CoreError::NotFound {
        entity: ENTITY_INQUIRY,
        id,
    };
    let existing = InquiryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let listing = find_listing(&state, existing.pg_id).await?;
    ensure_listing_access(&user, listing.landlord_id)?;
    inquiry::validate_transition(&existing.status, &status)?;

    let updated = InquiryRepo::update_status(&state.pool, id, &status)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(inquiry_id = id, from = %existing.status, to = %updated.status, "Inquiry status changed");

    Ok(ApiResponse::ok("Inquiry status updated successfully", updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whatsapp_link_encodes_text() {
        let url = whatsapp_link("+91 98765-43210", "Hi, I'm Riya. \"Sunrise PG\" (₹8,500/month).").unwrap();
        assert!(url.starts_with("https://wa.me/919876543210?text="));
        assert!(!url.contains(' '));
        assert!(!url.contains('"'));
    }
}
