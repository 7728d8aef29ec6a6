//! Database models for users.

use crate::types::UserId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A row of the `users` table.
///
/// `password` is opaque to this service: it is stored and returned verbatim,
/// hashing happens upstream. The token fields drive the email-verification
/// and reset-password flows and are never serialized into API responses.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub email_verified: bool,
    pub reset_password_token: String,
    pub email_verification_token: String,
    pub reset_password_expires_at: Option<DateTime<Utc>>,
    pub email_verification_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub email_verified: bool,
    pub reset_password_token: String,
    pub email_verification_token: String,
    pub reset_password_expires_at: Option<DateTime<Utc>>,
    pub email_verification_expires_at: Option<DateTime<Utc>>,
}

/// Database request for updating a user.
///
/// Updates rewrite the full mutable row; callers start from the current row
/// and change what they need.
#[derive(Debug, Clone)]
pub struct UserUpdateDBRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub email_verified: bool,
    pub reset_password_token: String,
    pub email_verification_token: String,
    pub reset_password_expires_at: Option<DateTime<Utc>>,
    pub email_verification_expires_at: Option<DateTime<Utc>>,
}

impl UserUpdateDBRequest {
    /// Start an update from the current state of a row.
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            email_verified: user.email_verified,
            reset_password_token: user.reset_password_token.clone(),
            email_verification_token: user.email_verification_token.clone(),
            reset_password_expires_at: user.reset_password_expires_at,
            email_verification_expires_at: user.email_verification_expires_at,
        }
    }
}
