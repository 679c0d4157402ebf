//! Mapping of `AppError` variants onto the JSON error envelope.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use pgwale_api::error::AppError;
use pgwale_core::error::{CoreError, ENTITY_LANDLORD, ENTITY_PG};
use serde_json::Value;

async fn error_to_response(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn not_found_uses_entity_code() {
    let (status, json) = error_to_response(AppError::Core(CoreError::NotFound {
        entity: ENTITY_PG,
        id: 42,
    }))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "PG_NOT_FOUND");
    assert_eq!(json["statusCode"], 404);
    assert!(json["message"].as_str().unwrap().contains("42"));
    assert!(json.get("data").is_none());
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn landlord_not_found_code() {
    let (_, json) = error_to_response(AppError::Core(CoreError::NotFound {
        entity: ENTITY_LANDLORD,
        id: 7,
    }))
    .await;
    assert_eq!(json["code"], "LANDLORD_NOT_FOUND");
}

#[tokio::test]
async fn validation_message_is_passed_through() {
    let (status, json) = error_to_response(AppError::Core(CoreError::Validation(
        "Missing required fields: name, phone".into(),
    )))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Missing required fields: name, phone");
}

#[tokio::test]
async fn conflict_unauthorized_and_forbidden_keep_their_codes() {
    let (status, json) = error_to_response(AppError::Core(CoreError::conflict(
        "LANDLORD_EXISTS",
        "A landlord with this email already exists",
    )))
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "LANDLORD_EXISTS");

    let (status, json) = error_to_response(AppError::Core(CoreError::unauthorized(
        "INVALID_TOKEN",
        "Invalid token.",
    )))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid token.");

    let (status, json) = error_to_response(AppError::Core(CoreError::forbidden(
        "UNAUTHORIZED_PG_ACCESS",
        "You do not have access to this PG",
    )))
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "UNAUTHORIZED_PG_ACCESS");
}

#[tokio::test]
async fn route_not_found_names_method_and_path() {
    let (status, json) = error_to_response(AppError::RouteNotFound {
        method: "GET".into(),
        path: "/api/nowhere".into(),
    })
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "ROUTE_NOT_FOUND");
    assert_eq!(json["message"], "Route GET /api/nowhere not found");
}

#[tokio::test]
async fn internal_errors_hide_details() {
    let (status, json) =
        error_to_response(AppError::InternalError("connection string leaked".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["message"].as_str().unwrap().contains("leaked"));
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let error = AppError::Database(sqlx::Error::RowNotFound);
    assert_matches!(error, AppError::Database(sqlx::Error::RowNotFound));
    let (status, json) = error_to_response(error).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}
