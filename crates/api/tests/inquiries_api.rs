//! Student inquiries, cashback claims and the admin dashboard.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{
    admin_token, body_json, build_test_app, create_landlord, create_listing, get, get_auth,
    landlord_token, patch_json_auth, post_json,
};

fn inquiry_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Priya",
        "phone": "9811122233",
        "email": "priya@example.com",
        "message": "Is a single room available from July?"
    })
}

fn cashback_body() -> serde_json::Value {
    serde_json::json!({
        "fullName": "Arjun Mehta",
        "contactInfo": "9899988877",
        "pgName": "Sunrise PG",
        "bookingDate": "2025-06-15",
        "amountPaid": 8500,
        "bookingCode": "PGW-1234"
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_is_ok_with_database(pool: PgPool) {
    let app = build_test_app(pool);
    let json = body_json(get(app, "/api/health").await).await;

    assert_eq!(json["message"], "PG Wale Bhaiya API is running");
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["dbHealthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inquiry_on_approved_listing_returns_whatsapp_link(pool: PgPool) {
    let pg = create_listing(&pool, None, "Sunrise PG", "approved").await;
    let app = build_test_app(pool);

    let response = post_json(app, &format!("/api/pgs/{}/inquire", pg.id), inquiry_body()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Inquiry submitted successfully");
    assert_eq!(json["data"]["inquiry"]["status"], "new");
    assert_eq!(json["data"]["inquiry"]["inquiryType"], "general");
    assert_eq!(json["data"]["inquiry"]["pgId"], pg.id);
    let url = json["data"]["whatsappUrl"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/919876543210?text="));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inquiry_on_pending_listing_is_refused(pool: PgPool) {
    let pg = create_listing(&pool, None, "Queued PG", "pending").await;
    let app = build_test_app(pool);

    let response = post_json(app, &format!("/api/pgs/{}/inquire", pg.id), inquiry_body()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "This PG is not accepting inquiries right now"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inquiry_on_missing_listing_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/pgs/424242/inquire", inquiry_body()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "PG_NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inquiry_requires_name_and_phone(pool: PgPool) {
    let pg = create_listing(&pool, None, "Sunrise PG", "approved").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/pgs/{}/inquire", pg.id),
        serde_json::json!({ "message": "hello" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Missing required fields: name, phone"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_works_through_inquiries(pool: PgPool) {
    let owner = create_landlord(&pool, "owner@example.com").await;
    let stranger = create_landlord(&pool, "stranger@example.com").await;
    let pg = create_listing(&pool, Some(owner.id), "Sunrise PG", "approved").await;
    let app = build_test_app(pool);

    let json = body_json(
        post_json(app.clone(), &format!("/api/pgs/{}/inquire", pg.id), inquiry_body()).await,
    )
    .await;
    let inquiry_id = json["data"]["inquiry"]["id"].as_i64().unwrap();

    let json = body_json(
        get_auth(
            app.clone(),
            &format!("/api/pgs/{}/inquiries", pg.id),
            &landlord_token(&owner),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(
        get_auth(
            app.clone(),
            &format!("/api/landlord/{}/inquiries", owner.id),
            &landlord_token(&owner),
        )
        .await,
    )
    .await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["pgTitle"], "Sunrise PG");

    let uri = format!("/api/inquiries/{inquiry_id}/status");
    let response = patch_json_auth(
        app.clone(),
        &uri,
        &landlord_token(&stranger),
        serde_json::json!({ "status": "contacted" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = patch_json_auth(
        app.clone(),
        &uri,
        &landlord_token(&owner),
        serde_json::json!({ "status": "contacted" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Inquiry status updated successfully");
    assert_eq!(json["data"]["status"], "contacted");

    // `contacted` cannot go back to `new`.
    let response = patch_json_auth(
        app,
        &uri,
        &landlord_token(&owner),
        serde_json::json!({ "status": "new" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cashback_claim_flow(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(app.clone(), "/api/cashback-requests", cashback_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Cashback request submitted successfully");
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["bookingDate"], "2025-06-15");
    let id = json["data"]["id"].as_i64().unwrap();

    // Listing claims is admin only.
    let response = get(app.clone(), "/api/cashback-requests").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(get_auth(app.clone(), "/api/cashback-requests", &admin_token()).await).await;
    assert_eq!(json["pagination"]["total"], 1);

    let uri = format!("/api/cashback-requests/{id}/status");
    let response = patch_json_auth(
        app.clone(),
        &uri,
        &admin_token(),
        serde_json::json!({ "status": "paid" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_auth(
        app.clone(),
        &uri,
        &admin_token(),
        serde_json::json!({ "status": "approved", "adminNotes": "Booking verified" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["adminNotes"], "Booking verified");

    let json = body_json(
        get_auth(app, "/api/cashback-requests?status=pending", &admin_token()).await,
    )
    .await;
    assert_eq!(json["pagination"]["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cashback_with_bad_date_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let mut body = cashback_body();
    body["bookingDate"] = serde_json::json!("15/06/2025");

    let response = post_json(app, "/api/cashback-requests", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_dashboard_summarises_platform(pool: PgPool) {
    let owner = create_landlord(&pool, "owner@example.com").await;
    let pg = create_listing(&pool, Some(owner.id), "Sunrise PG", "approved").await;
    create_listing(&pool, None, "Queued PG", "pending").await;
    let app = build_test_app(pool);

    post_json(app.clone(), &format!("/api/pgs/{}/inquire", pg.id), inquiry_body()).await;
    post_json(app.clone(), "/api/cashback-requests", cashback_body()).await;

    let response = get_auth(app, "/api/admin/dashboard", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["listings"]["total"], 2);
    assert_eq!(data["listings"]["pending"], 1);
    assert_eq!(data["inquiries"]["total"], 1);
    assert_eq!(data["platform"]["totalLandlords"], 1);
    assert_eq!(data["platform"]["pendingLandlords"], 1);
    assert_eq!(data["platform"]["pendingCashbackRequests"], 1);
    assert_eq!(data["recentListings"].as_array().unwrap().len(), 2);
    assert_eq!(data["recentInquiries"][0]["name"], "Priya");
}
