//! Test utilities shared by repository and handler tests.

use crate::api::models::reels::DeliveryStatus;
use crate::db::handlers::{Reels, Repository, Users, Videos};
use crate::db::models::reels::{Recipient, Recipients, Reel, ReelCreateDBRequest};
use crate::db::models::users::{User, UserCreateDBRequest};
use crate::db::models::videos::{Video, VideoCreateDBRequest};
use crate::types::new_id;
use crate::{AppState, Config};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use sqlx::PgPool;

/// Build a test server over the full router, backed by the given pool.
pub fn test_server(pool: PgPool) -> TestServer {
    let state = AppState {
        db: pool,
        config: Config::default(),
    };
    let router = crate::build_router(state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

pub fn generate_user() -> UserCreateDBRequest {
    UserCreateDBRequest {
        first_name: "test".to_string(),
        last_name: "user".to_string(),
        email: format!("{}@gmail.com", new_id()),
        password: "demopassword".to_string(),
        email_verified: false,
        reset_password_token: new_id(),
        email_verification_token: new_id(),
        reset_password_expires_at: None,
        email_verification_expires_at: Some(Utc::now()),
    }
}

pub async fn seed_user(pool: &PgPool) -> User {
    let mut conn = pool.acquire().await.unwrap();
    Users::new(&mut conn).create(&generate_user()).await.unwrap()
}

pub async fn seed_video(pool: &PgPool) -> Video {
    let mut conn = pool.acquire().await.unwrap();
    Videos::new(&mut conn)
        .create(&VideoCreateDBRequest {
            key: new_id(),
            file_format: "mp4".to_string(),
            size_mb: 20.0,
        })
        .await
        .unwrap()
}

pub async fn seed_reel(pool: &PgPool, request: &ReelCreateDBRequest) -> Reel {
    let mut conn = pool.acquire().await.unwrap();
    Reels::new(&mut conn).create(request).await.unwrap()
}

pub fn generate_recipients(n: usize) -> Recipients {
    (0..n).map(|_| Recipient::new(format!("recipient_{}@gmail.com", new_id()))).collect()
}

pub fn generate_reel(video_id: &str, user_id: Option<&str>) -> ReelCreateDBRequest {
    ReelCreateDBRequest {
        user_id: user_id.map(str::to_string),
        video_id: video_id.to_string(),
        email: format!("{}@reeldrop.io", new_id()),
        title: "Test Reel".to_string(),
        description: String::new(),
        private: true,
        recipients: generate_recipients(2),
        email_confirmation_token: new_id(),
        delivery_status: DeliveryStatus::Unconfirmed,
        delivery_date: Utc::now() + Duration::days(4),
    }
}
