//! Inquiry entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use pgwale_core::types::{DbId, Timestamp};

/// A row from the `inquiries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: DbId,
    pub pg_id: DbId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    pub inquiry_type: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Inquiry joined with the title of the listing it targets.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryWithListing {
    pub id: DbId,
    pub pg_id: DbId,
    pub pg_title: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    pub inquiry_type: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateInquiry {
    pub pg_id: DbId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    pub inquiry_type: String,
}
