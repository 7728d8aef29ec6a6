//! Database repository for videos.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::videos::{Video, VideoCreateDBRequest, VideoUpdateDBRequest},
};
use crate::types::new_id;
use sqlx::PgConnection;
use tracing::instrument;

pub struct Videos<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Videos<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Videos<'c> {
    type CreateRequest = VideoCreateDBRequest;
    type UpdateRequest = VideoUpdateDBRequest;
    type Response = Video;
    type Id = str;

    #[instrument(skip(self, request), fields(key = %request.key), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (id, key, file_format, size_mb)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(&request.key)
        .bind(&request.file_format)
        .bind(request.size_mb)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(video)
    }

    #[instrument(skip(self), fields(video_id = %id), err)]
    async fn get_by_id(&mut self, id: &Self::Id) -> Result<Self::Response> {
        sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?
            .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self, request), fields(video_id = %id), err)]
    async fn update(&mut self, id: &Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos SET
                key = $2,
                file_format = $3,
                size_mb = $4,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.key)
        .bind(&request.file_format)
        .bind(request.size_mb)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotUpdated)
    }

    #[instrument(skip(self), fields(video_id = %id), err)]
    async fn delete(&mut self, id: &Self::Id) -> Result<()> {
        let result = sqlx::query("UPDATE videos SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        if result.rows_affected() < 1 {
            return Err(DbError::NotDeleted);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn generate_video() -> VideoCreateDBRequest {
        VideoCreateDBRequest {
            key: new_id(),
            file_format: "mp4".to_string(),
            size_mb: 20.0,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_video(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Videos::new(&mut conn);

        let video = repo.create(&generate_video()).await.unwrap();
        assert_eq!(video.file_format, "mp4");
        assert_eq!(video.size_mb, 20.0);

        let fetched = repo.get_by_id(&video.id).await.unwrap();
        assert_eq!(fetched, video);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_missing_video_is_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Videos::new(&mut conn);

        let err = repo.get_by_id(&new_id()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_video(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Videos::new(&mut conn);

        let video = repo.create(&generate_video()).await.unwrap();

        let update = VideoUpdateDBRequest {
            key: new_id(),
            file_format: "mkv".to_string(),
            size_mb: 45.0,
        };

        let updated = repo.update(&video.id, &update).await.unwrap();
        assert_eq!(updated.file_format, "mkv");
        assert_eq!(updated.size_mb, 45.0);
        assert_eq!(updated.key, update.key);

        let err = repo.update(&new_id(), &update).await.unwrap_err();
        assert!(matches!(err, DbError::NotUpdated));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_video(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Videos::new(&mut conn);

        let video = repo.create(&generate_video()).await.unwrap();

        repo.delete(&video.id).await.unwrap();
        assert!(matches!(repo.get_by_id(&video.id).await.unwrap_err(), DbError::NotFound));

        let err = repo.delete(&video.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotDeleted));
    }
}
