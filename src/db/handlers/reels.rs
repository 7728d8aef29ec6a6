//! Database repository for reels.
//!
//! Besides the usual CRUD, this repository owns the cursor-paginated listing
//! (the one listing contract for a user's reels), the recipient sub-entry
//! operations that manipulate the JSONB collection in place, and the bulk
//! ownership claim that runs when an email address registers an account.

use crate::api::models::pagination::{Pageable, PaginationData};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::reels::{Recipients, Reel, ReelCreateDBRequest, ReelFilter, ReelUpdateDBRequest},
};
use crate::types::new_id;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;

pub struct Reels<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Reels<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip_all, err)]
    pub async fn get_by_email_confirmation_token(&mut self, token: &str) -> Result<Reel> {
        sqlx::query_as::<_, Reel>("SELECT * FROM reels WHERE email_confirmation_token = $1 AND deleted_at IS NULL")
            .bind(token)
            .fetch_optional(&mut *self.db)
            .await?
            .ok_or(DbError::NotFound)
    }

    /// Flat listing by contact email, newest first. Used by delivery
    /// plumbing that needs every reel addressed to one mailbox.
    #[instrument(skip(self), err)]
    pub async fn list_by_email(&mut self, email: &str) -> Result<Vec<Reel>> {
        let reels = sqlx::query_as::<_, Reel>("SELECT * FROM reels WHERE email = $1 AND deleted_at IS NULL ORDER BY id DESC")
            .bind(email)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(reels)
    }

    /// Cursor-paginated listing of a user's reels, newest first, optionally
    /// narrowed to one delivery status.
    ///
    /// Fetches [`Pageable::fetch_limit`] rows older than the cursor and
    /// delegates the lookahead bookkeeping to [`PaginationData::build`].
    #[instrument(skip(self, filter, pageable), fields(user_id = %user_id, status = ?filter.delivery_status), err)]
    pub async fn list(&mut self, user_id: &str, filter: &ReelFilter, pageable: &Pageable) -> Result<(Vec<Reel>, PaginationData)> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM reels WHERE deleted_at IS NULL AND user_id = ");
        query.push_bind(user_id.to_string());

        if let Some(status) = filter.delivery_status {
            query.push(" AND delivery_status = ");
            query.push_bind(status);
        }

        query.push(" AND id < ");
        query.push_bind(pageable.cursor().to_string());
        query.push(" ORDER BY id DESC LIMIT ");
        query.push_bind(pageable.fetch_limit());

        let rows: Vec<Reel> = query.build_query_as().fetch_all(&mut *self.db).await?;

        Ok(PaginationData::build(pageable, rows, |reel| reel.id.as_str()))
    }

    /// Append recipients to the stored collection via JSONB array
    /// concatenation (no read-modify-write of the whole document), then
    /// mirror the append onto the caller's in-memory reel so the two stay
    /// consistent.
    #[instrument(skip(self, reel, new_recipients), fields(reel_id = %reel.id, count = new_recipients.len()), err)]
    pub async fn add_recipients(&mut self, reel: &mut Reel, new_recipients: Recipients) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE reels SET
                recipients = recipients || $2,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(&reel.id)
        .bind(new_recipients.clone())
        .execute(&mut *self.db)
        .await?;

        if result.rows_affected() < 1 {
            return Err(DbError::RecipientsNotAdded);
        }

        reel.recipients.0.extend(new_recipients.0);

        Ok(())
    }

    /// Soft-delete a single recipient inside the stored JSONB array.
    ///
    /// Fails fast with [`DbError::RecipientNotFound`] when the recipient is
    /// absent from the in-memory collection, before any storage command is
    /// issued. The element's bytes stay in the array; setting `deleted_at`
    /// hides it from every future decode.
    #[instrument(skip(self, reel), fields(reel_id = %reel.id, recipient_id = %recipient_id), err)]
    pub async fn delete_recipient(&mut self, reel: &Reel, recipient_id: &str) -> Result<()> {
        if reel.find_recipient(recipient_id).is_none() {
            return Err(DbError::RecipientNotFound);
        }

        let result = sqlx::query(
            r#"
            UPDATE reels SET
                recipients = (
                    SELECT jsonb_agg(
                        CASE
                            WHEN r->>'id' = $2 AND r->>'deleted_at' IS NULL THEN jsonb_set(r, '{deleted_at}', to_jsonb(NOW()))
                            ELSE r
                        END
                    )
                    FROM jsonb_array_elements(recipients) r
                ),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(&reel.id)
        .bind(recipient_id)
        .execute(&mut *self.db)
        .await?;

        if result.rows_affected() < 1 {
            return Err(DbError::RecipientNotDeleted);
        }

        Ok(())
    }

    /// Bulk ownership claim: every not-yet-owned reel addressed to `email`
    /// becomes owned by `user_id`. Runs when that email registers an
    /// account; returns the number of claimed reels.
    #[instrument(skip(self, email), fields(user_id = %user_id), err)]
    pub async fn assign_to_user_by_email(&mut self, email: &str, user_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE reels SET
                user_id = $2,
                updated_at = NOW()
            WHERE email = $1 AND user_id IS NULL AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .bind(user_id)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Reels<'c> {
    type CreateRequest = ReelCreateDBRequest;
    type UpdateRequest = ReelUpdateDBRequest;
    type Response = Reel;
    type Id = str;

    #[instrument(skip(self, request), fields(video_id = %request.video_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let reel = sqlx::query_as::<_, Reel>(
            r#"
            INSERT INTO reels (
                id, user_id, video_id, email,
                title, description, private, recipients,
                email_confirmation_token, delivery_status, delivery_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(&request.user_id)
        .bind(&request.video_id)
        .bind(&request.email)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.private)
        .bind(request.recipients.clone())
        .bind(&request.email_confirmation_token)
        .bind(request.delivery_status)
        .bind(request.delivery_date)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(reel)
    }

    #[instrument(skip(self), fields(reel_id = %id), err)]
    async fn get_by_id(&mut self, id: &Self::Id) -> Result<Self::Response> {
        sqlx::query_as::<_, Reel>("SELECT * FROM reels WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?
            .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self, request), fields(reel_id = %id), err)]
    async fn update(&mut self, id: &Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        sqlx::query_as::<_, Reel>(
            r#"
            UPDATE reels SET
                user_id = $2,
                video_id = $3,
                email = $4,
                title = $5,
                description = $6,
                private = $7,
                delivery_status = $8,
                delivery_date = $9,
                email_confirmation_token = $10,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.user_id)
        .bind(&request.video_id)
        .bind(&request.email)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.private)
        .bind(request.delivery_status)
        .bind(request.delivery_date)
        .bind(&request.email_confirmation_token)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotUpdated)
    }

    #[instrument(skip(self), fields(reel_id = %id), err)]
    async fn delete(&mut self, id: &Self::Id) -> Result<()> {
        let result = sqlx::query("UPDATE reels SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        if result.rows_affected() < 1 {
            return Err(DbError::NotDeleted);
        }

        Ok(())
    }
}
