//! End-to-end handler tests over the full router.

use crate::auth::USER_ID_HEADER;
use crate::db::handlers::{Reels, Repository};
use crate::test_utils::{generate_reel, seed_reel, seed_user, seed_video, test_server};
use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
#[test_log::test]
async fn test_register_user(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .post("/v1/users")
        .json(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "opaque-hash",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["email_verified"], false);
    // Sensitive columns never serialize into responses.
    assert!(body.get("password").is_none());
    assert!(body.get("email_verification_token").is_none());

    // Same email again conflicts, and the first account survives.
    let conflict = server
        .post("/v1/users")
        .json(&json!({
            "first_name": "Ada",
            "last_name": "Again",
            "email": "ada@example.com",
            "password": "other",
        }))
        .await;
    conflict.assert_status(StatusCode::CONFLICT);

    let me = server.get("/v1/me").add_header(USER_ID_HEADER, body["id"].as_str().unwrap()).await;
    me.assert_status_ok();
}

#[sqlx::test]
#[test_log::test]
async fn test_register_claims_unowned_reels(pool: PgPool) {
    let video = seed_video(&pool).await;

    let mut request = generate_reel(&video.id, None);
    request.email = "claimant@example.com".to_string();
    seed_reel(&pool, &request).await;

    let server = test_server(pool);

    let response = server
        .post("/v1/users")
        .json(&json!({
            "first_name": "Claire",
            "last_name": "Mant",
            "email": "claimant@example.com",
            "password": "opaque-hash",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let user: Value = response.json();

    let listing = server.get("/v1/reels").add_header(USER_ID_HEADER, user["id"].as_str().unwrap()).await;
    listing.assert_status_ok();

    let body: Value = listing.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["email"], "claimant@example.com");
    assert_eq!(body["pagination"]["has_more_pages"], false);
}

#[sqlx::test]
#[test_log::test]
async fn test_identity_header_is_required_and_checked(pool: PgPool) {
    let user = seed_user(&pool).await;
    let server = test_server(pool);

    server.get("/v1/me").await.assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/v1/me")
        .add_header(USER_ID_HEADER, "01AN4Z07BY79KA1307SR9X4MV3")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let me = server.get("/v1/me").add_header(USER_ID_HEADER, &user.id).await;
    me.assert_status_ok();
    let body: Value = me.json();
    assert_eq!(body["email"], user.email);
}

#[sqlx::test]
#[test_log::test]
async fn test_update_me(pool: PgPool) {
    let user = seed_user(&pool).await;
    let server = test_server(pool);

    let response = server
        .patch("/v1/me")
        .add_header(USER_ID_HEADER, &user.id)
        .json(&json!({"first_name": "Renamed"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["first_name"], "Renamed");
    // Fields absent from the patch keep their value.
    assert_eq!(body["last_name"], user.last_name);
}

#[sqlx::test]
#[test_log::test]
async fn test_video_registration_and_lookup(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .post("/v1/videos")
        .json(&json!({"key": "uploads/abc", "file_format": "mp4", "size_mb": 20.0}))
        .await;
    response.assert_status(StatusCode::CREATED);

    let video: Value = response.json();
    // The storage key stays internal.
    assert!(video.get("key").is_none());

    let fetched = server.get(&format!("/v1/videos/{}", video["id"].as_str().unwrap())).await;
    fetched.assert_status_ok();

    server
        .get("/v1/videos/01AN4Z07BY79KA1307SR9X4MV3")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[test_log::test]
async fn test_create_and_confirm_reel(pool: PgPool) {
    let video = seed_video(&pool).await;
    let server = test_server(pool.clone());

    let rejected = server
        .post("/v1/reels")
        .json(&json!({
            "video_id": "01AN4Z07BY79KA1307SR9X4MV3",
            "email": "sender@example.com",
            "delivery_date": "2030-01-01T00:00:00Z",
        }))
        .await;
    rejected.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/v1/reels")
        .json(&json!({
            "video_id": video.id,
            "email": "sender@example.com",
            "title": "Birthday",
            "recipients": ["friend@example.com"],
            "delivery_date": "2030-01-01T00:00:00Z",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let reel: Value = response.json();
    assert_eq!(reel["delivery_status"], "unconfirmed");
    assert_eq!(reel["recipients"].as_array().unwrap().len(), 1);
    assert!(reel["user_id"].is_null());
    // The confirmation token only ever travels in the confirmation email.
    assert!(reel.get("email_confirmation_token").is_none());

    // The token comes out of storage, the way the email sender would get it.
    let mut conn = pool.acquire().await.unwrap();
    let stored = Reels::new(&mut conn).get_by_id(reel["id"].as_str().unwrap()).await.unwrap();
    drop(conn);

    let confirmed = server
        .post("/v1/reels/confirm")
        .json(&json!({"token": stored.email_confirmation_token}))
        .await;
    confirmed.assert_status_ok();
    let confirmed: Value = confirmed.json();
    assert_eq!(confirmed["delivery_status"], "scheduled");

    // Confirming twice is a no-op.
    let again = server
        .post("/v1/reels/confirm")
        .json(&json!({"token": stored.email_confirmation_token}))
        .await;
    again.assert_status_ok();
    let again: Value = again.json();
    assert_eq!(again["delivery_status"], "scheduled");

    server
        .post("/v1/reels/confirm")
        .json(&json!({"token": "bogus"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[test_log::test]
async fn test_list_reels_pagination_shape(pool: PgPool) {
    let user = seed_user(&pool).await;

    for _ in 0..5 {
        let video = seed_video(&pool).await;
        seed_reel(&pool, &generate_reel(&video.id, Some(&user.id))).await;
    }

    let server = test_server(pool);

    let response = server
        .get("/v1/reels")
        .add_query_param("per_page", 2)
        .add_header(USER_ID_HEADER, &user.id)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["per_page"], 2);
    assert_eq!(body["pagination"]["has_more_pages"], true);
    let cursor = body["pagination"]["cursor"].as_str().unwrap();
    assert_eq!(cursor, body["data"][1]["id"].as_str().unwrap());

    // An unknown delivery status filter is ignored, not an error.
    let unfiltered = server
        .get("/v1/reels")
        .add_query_param("per_page", 10)
        .add_query_param("delivery_status", "nonsense")
        .add_header(USER_ID_HEADER, &user.id)
        .await;
    unfiltered.assert_status_ok();
    let body: Value = unfiltered.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["has_more_pages"], false);
}

#[sqlx::test]
#[test_log::test]
async fn test_reel_mutations_are_owner_scoped(pool: PgPool) {
    let owner = seed_user(&pool).await;
    let other = seed_user(&pool).await;
    let video = seed_video(&pool).await;

    let reel = seed_reel(&pool, &generate_reel(&video.id, Some(&owner.id))).await;

    let server = test_server(pool);

    let update = json!({
        "video_id": video.id,
        "email": "updated@example.com",
        "title": "Updated",
        "delivery_date": "2030-01-01T00:00:00Z",
    });

    // Another user's reels read as not-found.
    server
        .put(&format!("/v1/reels/{}", reel.id))
        .add_header(USER_ID_HEADER, &other.id)
        .json(&update)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let updated = server
        .put(&format!("/v1/reels/{}", reel.id))
        .add_header(USER_ID_HEADER, &owner.id)
        .json(&update)
        .await;
    updated.assert_status_ok();
    let updated: Value = updated.json();
    assert_eq!(updated["title"], "Updated");

    server
        .delete(&format!("/v1/reels/{}", reel.id))
        .add_header(USER_ID_HEADER, &owner.id)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/v1/reels/{}", reel.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[test_log::test]
async fn test_recipient_management(pool: PgPool) {
    let owner = seed_user(&pool).await;
    let video = seed_video(&pool).await;

    let reel = seed_reel(&pool, &generate_reel(&video.id, Some(&owner.id))).await;

    let server = test_server(pool);

    let response = server
        .post(&format!("/v1/reels/{}/recipients", reel.id))
        .add_header(USER_ID_HEADER, &owner.id)
        .json(&json!({"emails": ["new@example.com"]}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recipients = body["recipients"].as_array().unwrap();
    assert_eq!(recipients.len(), reel.recipients.len() + 1);

    let added = recipients
        .iter()
        .find(|r| r["email"] == "new@example.com")
        .expect("appended recipient missing");

    server
        .delete(&format!("/v1/reels/{}/recipients/{}", reel.id, added["id"].as_str().unwrap()))
        .add_header(USER_ID_HEADER, &owner.id)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // Deleting a recipient that was never added fails before touching storage.
    server
        .delete(&format!("/v1/reels/{}/recipients/01AN4Z07BY79KA1307SR9X4MV3", reel.id))
        .add_header(USER_ID_HEADER, &owner.id)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
