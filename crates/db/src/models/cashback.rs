//! Cashback request entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use pgwale_core::types::{DbId, Timestamp};

/// A row from the `cashback_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashbackRequest {
    pub id: DbId,
    pub pg_id: Option<DbId>,
    pub full_name: String,
    pub contact_info: String,
    pub pg_name: String,
    pub booking_date: NaiveDate,
    pub amount_paid: i32,
    pub booking_code: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateCashbackRequest {
    pub pg_id: Option<DbId>,
    pub full_name: String,
    pub contact_info: String,
    pub pg_name: String,
    pub booking_date: NaiveDate,
    pub amount_paid: i32,
    pub booking_code: String,
}
