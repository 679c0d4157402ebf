//! The response envelope shared by every endpoint.
//!
//! ```json
//! { "success": true, "message": "...", "data": ..., "pagination": {...},
//!   "statusCode": 200, "timestamp": "2025-03-01T10:00:00.000Z" }
//! ```
//!
//! Errors use the same shape with `success: false` and a `code`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use pgwale_core::pagination::PageInfo;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub status_code: u16,
    pub timestamp: String,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Error envelope with no payload.
pub fn error_envelope(status: StatusCode, code: &'static str, message: String) -> Envelope<()> {
    Envelope {
        success: false,
        message,
        data: None,
        pagination: None,
        code: Some(code),
        status_code: status.as_u16(),
        timestamp: now_rfc3339(),
    }
}

/// Render an error envelope as a response.
pub fn error_response(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (status, Json(error_envelope(status, code, message.into()))).into_response()
}

/// Successful response carrying an optional payload.
///
/// ```ignore
/// Ok(ApiResponse::ok("PG fetched successfully", listing))
/// ```
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    envelope: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    fn build(
        status: StatusCode,
        message: impl Into<String>,
        data: Option<T>,
        pagination: Option<PageInfo>,
    ) -> Self {
        Self {
            status,
            envelope: Envelope {
                success: true,
                message: message.into(),
                data,
                pagination,
                code: None,
                status_code: status.as_u16(),
                timestamp: now_rfc3339(),
            },
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::build(StatusCode::OK, message, Some(data), None)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::build(StatusCode::CREATED, message, Some(data), None)
    }

    pub fn paginated(message: impl Into<String>, data: T, pagination: PageInfo) -> Self {
        Self::build(StatusCode::OK, message, Some(data), Some(pagination))
    }
}

impl ApiResponse<()> {
    /// 200 with a message and no `data` field.
    pub fn message(message: impl Into<String>) -> Self {
        Self::build(StatusCode::OK, message, None, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
