//! Database repository for users.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::users::{User, UserCreateDBRequest, UserUpdateDBRequest},
};
use crate::types::new_id;
use sqlx::PgConnection;
use tracing::instrument;

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Fetch a single live user by an exact-match column.
    async fn get_by_column(&mut self, column: &str, value: &str) -> Result<User> {
        // Column names come from the private constants below, never from
        // caller input.
        let query = format!("SELECT * FROM users WHERE {column} = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, User>(&query)
            .bind(value)
            .fetch_optional(&mut *self.db)
            .await?
            .ok_or(DbError::NotFound)
    }

    #[instrument(skip_all, err)]
    pub async fn get_by_email(&mut self, email: &str) -> Result<User> {
        self.get_by_column("email", email).await
    }

    #[instrument(skip_all, err)]
    pub async fn get_by_reset_password_token(&mut self, token: &str) -> Result<User> {
        self.get_by_column("reset_password_token", token).await
    }

    #[instrument(skip_all, err)]
    pub async fn get_by_email_verification_token(&mut self, token: &str) -> Result<User> {
        self.get_by_column("email_verification_token", token).await
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Users<'c> {
    type CreateRequest = UserCreateDBRequest;
    type UpdateRequest = UserUpdateDBRequest;
    type Response = User;
    type Id = str;

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, first_name, last_name, email, password, email_verified,
                reset_password_token, email_verification_token,
                reset_password_expires_at, email_verification_expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.password)
        .bind(request.email_verified)
        .bind(&request.reset_password_token)
        .bind(&request.email_verification_token)
        .bind(request.reset_password_expires_at)
        .bind(request.email_verification_expires_at)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn get_by_id(&mut self, id: &Self::Id) -> Result<Self::Response> {
        self.get_by_column("id", id).await
    }

    #[instrument(skip(self, request), fields(user_id = %id), err)]
    async fn update(&mut self, id: &Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                first_name = $2,
                last_name = $3,
                email = $4,
                password = $5,
                email_verified = $6,
                reset_password_token = $7,
                email_verification_token = $8,
                reset_password_expires_at = $9,
                email_verification_expires_at = $10,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.password)
        .bind(request.email_verified)
        .bind(&request.reset_password_token)
        .bind(&request.email_verification_token)
        .bind(request.reset_password_expires_at)
        .bind(request.email_verification_expires_at)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotUpdated)
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn delete(&mut self, id: &Self::Id) -> Result<()> {
        let result = sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        if result.rows_affected() < 1 {
            return Err(DbError::NotDeleted);
        }

        Ok(())
    }
}
