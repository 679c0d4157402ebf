//! PG listing lifecycle against a real database.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{
    admin_token, body_json, build_test_app, create_landlord, create_listing, delete_auth, get,
    get_auth, insert_listing, landlord_token, listing_body, listing_input, patch_json_auth,
    post_json_auth, put_json_auth,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn landlord_submission_goes_through_moderation(pool: PgPool) {
    let landlord = create_landlord(&pool, "owner@example.com").await;
    let token = landlord_token(&landlord);
    let app = build_test_app(pool);

    let response = post_json_auth(app.clone(), "/api/pgs", &token, listing_body("Sunrise PG")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "PG listing submitted successfully. It will be reviewed by our team."
    );
    let pg = &json["data"];
    assert_eq!(pg["status"], "pending");
    assert_eq!(pg["slug"], "sunrise-pg");
    assert_eq!(pg["landlordId"], landlord.id);
    assert_eq!(pg["amenities"], serde_json::json!(["WiFi", "AC"]));
    let id = pg["id"].as_i64().unwrap();

    // Hidden from the public until approved.
    let json = body_json(get(app.clone(), "/api/pgs").await).await;
    assert_eq!(json["pagination"]["total"], 0);
    let response = get(app.clone(), &format!("/api/pgs/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "PG_NOT_FOUND");

    // The owner still sees it.
    let response = get_auth(app.clone(), &format!("/api/pgs/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Landlords cannot approve their own listing.
    let response = patch_json_auth(
        app.clone(),
        &format!("/api/pgs/{id}/status"),
        &token,
        serde_json::json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "INVALID_ADMIN");

    let response = patch_json_auth(
        app.clone(),
        &format!("/api/pgs/{id}/status"),
        &admin_token(),
        serde_json::json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "PG status updated to approved");
    assert!(json["data"]["approvedAt"].is_string());

    let json = body_json(get(app.clone(), "/api/pgs").await).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["title"], "Sunrise PG");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn draft_is_saved_without_review(pool: PgPool) {
    let landlord = create_landlord(&pool, "owner@example.com").await;
    let app = build_test_app(pool);

    let mut body = listing_body("Draft PG");
    body["asDraft"] = serde_json::json!(true);
    let response = post_json_auth(app, "/api/pgs", &landlord_token(&landlord), body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "PG listing saved as draft");
    assert_eq!(json["data"]["status"], "draft");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_range_rent_is_rejected(pool: PgPool) {
    let landlord = create_landlord(&pool, "owner@example.com").await;
    let app = build_test_app(pool);

    let mut body = listing_body("Cheap PG");
    body["monthlyRent"] = serde_json::json!(500);
    let response = post_json_auth(app, "/api/pgs", &landlord_token(&landlord), body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn other_landlords_cannot_touch_a_listing(pool: PgPool) {
    let owner = create_landlord(&pool, "owner@example.com").await;
    let intruder = create_landlord(&pool, "intruder@example.com").await;
    let pg = create_listing(&pool, Some(owner.id), "Owner PG", "approved").await;
    let app = build_test_app(pool);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/pgs/{}", pg.id),
        &landlord_token(&intruder),
        serde_json::json!({ "monthlyRent": 9000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED_PG_ACCESS");

    let response = delete_auth(app, &format!("/api/pgs/{}", pg.id), &landlord_token(&intruder)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editing_a_rejected_listing_resubmits_it(pool: PgPool) {
    let owner = create_landlord(&pool, "owner@example.com").await;
    let pg = create_listing(&pool, Some(owner.id), "Fixer Upper", "rejected").await;
    let app = build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/pgs/{}", pg.id),
        &landlord_token(&owner),
        serde_json::json!({ "monthlyRent": 9000, "title": "Fixed Up PG" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["monthlyRent"], 9000);
    assert_eq!(json["data"]["slug"], "fixed-up-pg");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn featured_flag_follows_approval(pool: PgPool) {
    let pending = create_listing(&pool, None, "Waiting PG", "pending").await;
    let approved = create_listing(&pool, None, "Star PG", "approved").await;
    let app = build_test_app(pool);
    let admin = admin_token();

    let response = patch_json_auth(
        app.clone(),
        &format!("/api/pgs/{}/featured", pending.id),
        &admin,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_auth(
        app.clone(),
        &format!("/api/pgs/{}/featured", approved.id),
        &admin,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "PG marked as featured");
    assert_eq!(json["data"]["isFeatured"], true);

    let json = body_json(get(app.clone(), "/api/pgs?featured=true").await).await;
    assert_eq!(json["pagination"]["total"], 1);

    // Leaving `approved` drops the flag.
    let response = patch_json_auth(
        app.clone(),
        &format!("/api/pgs/{}/status", approved.id),
        &admin,
        serde_json::json!({ "status": "sold" }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["isFeatured"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rejection_reason_is_recorded(pool: PgPool) {
    let pg = create_listing(&pool, None, "Dodgy PG", "pending").await;
    let app = build_test_app(pool);

    let response = patch_json_auth(
        app,
        &format!("/api/pgs/{}/status", pg.id),
        &admin_token(),
        serde_json::json!({ "status": "rejected", "rejectionReason": "Photos missing" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["rejectionReason"], "Photos missing");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_transition_is_refused(pool: PgPool) {
    let pg = create_listing(&pool, None, "Draft PG", "draft").await;
    let app = build_test_app(pool);

    let response = patch_json_auth(
        app,
        &format!("/api/pgs/{}/status", pg.id),
        &admin_token(),
        serde_json::json!({ "status": "sold" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_list_every_status(pool: PgPool) {
    create_listing(&pool, None, "One", "pending").await;
    create_listing(&pool, None, "Two", "approved").await;
    create_listing(&pool, None, "Three", "rejected").await;
    let app = build_test_app(pool);

    let json = body_json(get_auth(app.clone(), "/api/pgs?status=all", &admin_token()).await).await;
    assert_eq!(json["pagination"]["total"], 3);

    let json =
        body_json(get_auth(app, "/api/pgs?status=pending", &admin_token()).await).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["title"], "One");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_pagination(pool: PgPool) {
    for n in 0..5 {
        create_listing(&pool, None, &format!("PG {n}"), "approved").await;
    }
    let app = build_test_app(pool);

    let json = body_json(get(app, "/api/pgs?page=2&limit=2").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["page"], 2);
    assert_eq!(json["pagination"]["limit"], 2);
    assert_eq!(json["pagination"]["total"], 5);
    assert_eq!(json["pagination"]["totalPages"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_can_delete(pool: PgPool) {
    let owner = create_landlord(&pool, "owner@example.com").await;
    let pg = create_listing(&pool, Some(owner.id), "Closing PG", "approved").await;
    let app = build_test_app(pool);

    let response =
        delete_auth(app.clone(), &format!("/api/pgs/{}", pg.id), &landlord_token(&owner)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "PG listing deleted successfully"
    );

    let response = get(app, &format!("/api/pgs/{}", pg.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_matches_text_and_amenities(pool: PgPool) {
    let mut green = listing_input(None, "Green Valley PG", "approved");
    green.amenities = vec!["WiFi".into(), "AC".into(), "Mess".into()];
    insert_listing(&pool, green).await;

    let mut blue = listing_input(None, "Blue Nest", "approved");
    blue.area = "Deep Nagar".into();
    blue.monthly_rent = 12_000;
    blue.gender_preference = "Girls Only".into();
    insert_listing(&pool, blue).await;

    create_listing(&pool, None, "Green Pending", "pending").await;
    let app = build_test_app(pool);

    let json = body_json(get(app.clone(), "/api/search?q=green").await).await;
    assert_eq!(json["message"], "Found 1 PGs");
    assert_eq!(json["data"][0]["title"], "Green Valley PG");

    let json = body_json(get(app.clone(), "/api/search?amenities=wifi,ac").await).await;
    assert_eq!(json["pagination"]["total"], 1);

    let json = body_json(get(app.clone(), "/api/search?minPrice=10000").await).await;
    assert_eq!(json["data"][0]["title"], "Blue Nest");

    let json = body_json(get(app.clone(), "/api/search?area=deep%20nagar").await).await;
    assert_eq!(json["pagination"]["total"], 1);

    let json = body_json(get(app, "/api/search").await).await;
    assert_eq!(json["pagination"]["total"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_without_required_fields_is_rejected_before_storage(pool: PgPool) {
    let landlord = create_landlord(&pool, "owner@example.com").await;
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/pgs",
        &landlord_token(&landlord),
        serde_json::json!({ "title": "Sunrise PG" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Missing required fields: area, monthlyRent, roomType, genderPreference, contactPerson, phoneNumber, email"
    );
    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pg_listings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn featured_toggle_needs_admin(pool: PgPool) {
    let landlord = create_landlord(&pool, "owner@example.com").await;
    let pg = create_listing(&pool, Some(landlord.id), "Live PG", "approved").await;
    let app = build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/api/pgs/{}/featured", pg.id),
        &landlord_token(&landlord),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "INVALID_ADMIN");
}
