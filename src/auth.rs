//! Caller identity extraction.
//!
//! Authentication proper lives upstream: a trusted proxy terminates the
//! session and forwards the authenticated user's id in the
//! [`USER_ID_HEADER`] header. The [`CurrentUser`] extractor resolves that
//! header against the users table, so handlers receive a live user row and
//! requests with a missing or unknown id are rejected with 401 before any
//! handler logic runs.

use crate::{
    AppState,
    db::handlers::{Repository, Users},
    db::models::users::User,
    errors::Error,
};
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header set by the fronting proxy with the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-reeldrop-user";

/// The authenticated caller, resolved from the trusted proxy header.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(Error::Unauthenticated { message: None })?
            .to_string();

        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

        let user = Users::new(&mut conn).get_by_id(&user_id).await.map_err(|_| Error::Unauthenticated {
            message: Some("Unknown user".to_string()),
        })?;

        Ok(CurrentUser { user })
    }
}
