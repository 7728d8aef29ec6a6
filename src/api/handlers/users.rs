use crate::{
    AppState,
    api::models::users::{UserCreate, UserResponse, UserUpdate},
    auth::CurrentUser,
    db::{
        handlers::{Reels, Repository, Users},
        models::users::{UserCreateDBRequest, UserUpdateDBRequest},
    },
    errors::Error,
    types::new_id,
};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{Duration, Utc};

/// How long a fresh email-verification token stays valid.
const EMAIL_VERIFICATION_TTL_HOURS: i64 = 24;

// POST /v1/users - Register an account
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "users",
    summary = "Register a user",
    description = "Create an account. Reels previously sent to this email address become owned by the new user.",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn register(State(state): State<AppState>, Json(request): Json<UserCreate>) -> Result<(StatusCode, Json<UserResponse>), Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let user = Users::new(&mut tx)
        .create(&UserCreateDBRequest {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
            email_verified: false,
            reset_password_token: String::new(),
            email_verification_token: new_id(),
            reset_password_expires_at: None,
            email_verification_expires_at: Some(Utc::now() + Duration::hours(EMAIL_VERIFICATION_TTL_HOURS)),
        })
        .await?;

    // Claim reels that were sent to this address before the account existed.
    let claimed = Reels::new(&mut tx).assign_to_user_by_email(&user.email, &user.id).await?;
    if claimed > 0 {
        tracing::info!(user_id = %user.id, claimed, "assigned pre-existing reels to new user");
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

// GET /v1/me - Current user profile
#[utoipa::path(
    get,
    path = "/v1/me",
    tag = "users",
    summary = "Get current user",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn get_me(current_user: CurrentUser) -> Result<Json<UserResponse>, Error> {
    Ok(Json(current_user.user.into()))
}

// PATCH /v1/me - Update current user profile
#[utoipa::path(
    patch,
    path = "/v1/me",
    tag = "users",
    summary = "Update current user",
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn update_me(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<UserUpdate>,
) -> Result<Json<UserResponse>, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let mut update = UserUpdateDBRequest::from_user(&current_user.user);
    if let Some(first_name) = request.first_name {
        update.first_name = first_name;
    }
    if let Some(last_name) = request.last_name {
        update.last_name = last_name;
    }

    let user = Users::new(&mut tx).update(&current_user.user.id, &update).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(user.into()))
}
