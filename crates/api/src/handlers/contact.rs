//! Handler for the public contact form.

use axum::extract::State;
use pgwale_core::validation::{require_fields, validate_email, validate_phone, Sanitize};
use pgwale_events::bus::ContactDetails;
use pgwale_events::MarketplaceEvent;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(max = 200, message = "Subject must be at most 200 characters"))]
    pub subject: Option<String>,
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,
}

impl Sanitize for ContactRequest {
    fn sanitize(&mut self) {
        self.name.sanitize();
        self.email.sanitize();
        self.phone.sanitize();
        self.subject.sanitize();
        self.message.sanitize();
    }
}

/// POST /api/contact
///
/// Nothing is stored; the message is forwarded to the admin by email.
pub async fn submit(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ContactRequest>,
) -> AppResult<ApiResponse<()>> {
    require_fields(&[
        ("name", input.name.as_deref()),
        ("email", input.email.as_deref()),
        ("message", input.message.as_deref()),
    ])?;
    let email = input.email.unwrap_or_default();
    validate_email(&email)?;
    let phone = input.phone.filter(|p| !p.is_empty());
    if let Some(phone) = &phone {
        validate_phone(phone)?;
    }

    state.event_bus.publish(MarketplaceEvent::ContactMessage {
        contact: ContactDetails {
            name: input.name.unwrap_or_default(),
            email,
            phone,
            subject: input.subject.filter(|s| !s.is_empty()),
            message: input.message.unwrap_or_default(),
        },
    });
    tracing::info!("Contact form submitted");

    Ok(ApiResponse::message(
        "Thank you for contacting us. We will get back to you soon.",
    ))
}
