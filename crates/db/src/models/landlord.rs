//! Landlord entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use pgwale_core::types::{DbId, Timestamp};

/// Full row from the `landlords` table.
///
/// Contains the password hash -- never serialize this to API responses.
/// Use [`LandlordResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Landlord {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub business_name: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub password_hash: String,
    pub status: String,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe landlord representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub business_name: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub status: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Landlord> for LandlordResponse {
    fn from(l: Landlord) -> Self {
        Self {
            id: l.id,
            name: l.name,
            email: l.email,
            phone: l.phone,
            whatsapp: l.whatsapp,
            address: l.address,
            business_name: l.business_name,
            document_type: l.document_type,
            document_number: l.document_number,
            status: l.status,
            last_login_at: l.last_login_at,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Admin listing row: landlord plus listing count.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: Option<String>,
    pub status: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub pg_count: i64,
}

/// Insert payload. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateLandlord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub business_name: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub password_hash: String,
}

/// Profile edit. Email is immutable and therefore absent.
#[derive(Debug, Clone, Default)]
pub struct UpdateLandlordProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub business_name: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
}
