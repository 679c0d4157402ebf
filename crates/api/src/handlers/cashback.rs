//! Handlers for `/cashback-requests`.

use axum::extract::{Path, State};
use chrono::NaiveDate;
use pgwale_core::cashback;
use pgwale_core::error::{CoreError, ENTITY_CASHBACK, ENTITY_PG};
use pgwale_core::types::DbId;
use pgwale_core::validation::{require_fields, Sanitize};
use pgwale_db::models::cashback::{CashbackRequest, CreateCashbackRequest};
use pgwale_db::repositories::{CashbackRepo, PgListingRepo};
use pgwale_events::MarketplaceEvent;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{ApiQuery, ValidatedJson};
use crate::middleware::rbac::RequireAdmin;
use crate::notify::cashback_details;
use crate::query::StatusPageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /cashback-requests`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCashbackBody {
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,
    #[validate(length(max = 200, message = "Contact info must be at most 200 characters"))]
    pub contact_info: Option<String>,
    #[validate(length(max = 200, message = "PG name must be at most 200 characters"))]
    pub pg_name: Option<String>,
    /// `YYYY-MM-DD`.
    pub booking_date: Option<String>,
    pub amount_paid: Option<i32>,
    #[validate(length(max = 50, message = "Booking code must be at most 50 characters"))]
    pub booking_code: Option<String>,
    pub pg_id: Option<DbId>,
}

impl Sanitize for CreateCashbackBody {
    fn sanitize(&mut self) {
        self.full_name.sanitize();
        self.contact_info.sanitize();
        self.pg_name.sanitize();
        self.booking_date.sanitize();
        self.booking_code.sanitize();
    }
}

/// Request body for `PATCH /cashback-requests/{id}/status`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CashbackStatusRequest {
    pub status: Option<String>,
    #[validate(length(max = 1000, message = "Admin notes must be at most 1000 characters"))]
    pub admin_notes: Option<String>,
}

impl Sanitize for CashbackStatusRequest {
    fn sanitize(&mut self) {
        self.status.sanitize();
        self.admin_notes.sanitize();
    }
}

pub fn parse_booking_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!("Invalid booking date '{raw}'. Expected YYYY-MM-DD"))
    })
}

/// POST /api/cashback-requests
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCashbackBody>,
) -> AppResult<ApiResponse<CashbackRequest>> {
    let amount = input.amount_paid.map(|a| a.to_string());
    require_fields(&[
        ("fullName", input.full_name.as_deref()),
        ("contactInfo", input.contact_info.as_deref()),
        ("pgName", input.pg_name.as_deref()),
        ("bookingDate", input.booking_date.as_deref()),
        ("amountPaid", amount.as_deref()),
        ("bookingCode", input.booking_code.as_deref()),
    ])?;

    let booking_date = parse_booking_date(input.booking_date.as_deref().unwrap_or_default())?;
    let amount_paid = input.amount_paid.unwrap_or_default();
    cashback::validate_amount(amount_paid)?;

    if let Some(pg_id) = input.pg_id {
        if PgListingRepo::find_by_id(&state.pool, pg_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: ENTITY_PG,
                id: pg_id,
            }
            .into());
        }
    }

    let new_request = CreateCashbackRequest {
        pg_id: input.pg_id,
        full_name: input.full_name.unwrap_or_default(),
        contact_info: input.contact_info.unwrap_or_default(),
        pg_name: input.pg_name.unwrap_or_default(),
        booking_date,
        amount_paid,
        booking_code: input.booking_code.unwrap_or_default(),
    };
    let request = CashbackRepo::create(&state.pool, &new_request).await?;

    tracing::info!(cashback_id = request.id, "Cashback request created");
    state.event_bus.publish(MarketplaceEvent::CashbackRequested {
        request: cashback_details(&request),
    });

    Ok(ApiResponse::created(
        "Cashback request submitted successfully",
        request,
    ))
}

/// GET /api/cashback-requests
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiQuery(params): ApiQuery<StatusPageParams>,
) -> AppResult<ApiResponse<Vec<CashbackRequest>>> {
    let status = params.status_filter();
    if let Some(s) = status {
        cashback::validate_status(s)?;
    }
    let page = params.page(&state.config);
    let requests = CashbackRepo::list(&state.pool, status, &page).await?;
    let total = CashbackRepo::count(&state.pool, status).await?;

    Ok(ApiResponse::paginated(
        "Cashback requests fetched successfully",
        requests,
        page.info(total),
    ))
}

/// PATCH /api/cashback-requests/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CashbackStatusRequest>,
) -> AppResult<ApiResponse<CashbackRequest>> {
    require_fields(&[("status", input.status.as_deref())])?;
    let status = input.status.unwrap_or_default();
    cashback::validate_status(&status)?;

    let not_found = || CoreError::NotFound {
        entity: ENTITY_CASHBACK,
        id,
    };
    let existing = CashbackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    cashback::validate_transition(&existing.status, &status)?;

    let notes = input.admin_notes.as_deref().filter(|n| !n.is_empty());
    let updated = CashbackRepo::update_status(&state.pool, id, &status, notes)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(cashback_id = id, from = %existing.status, to = %updated.status, "Cashback status changed");
    Ok(ApiResponse::ok(
        "Cashback request updated successfully",
        updated,
    ))
}
