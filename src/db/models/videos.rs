//! Database models for videos.

use crate::types::VideoId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A row of the `videos` table. `key` is the object-storage key of the
/// uploaded file.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Video {
    pub id: VideoId,
    pub key: String,
    pub file_format: String,
    pub size_mb: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database request for creating a new video
#[derive(Debug, Clone)]
pub struct VideoCreateDBRequest {
    pub key: String,
    pub file_format: String,
    pub size_mb: f32,
}

/// Database request for updating a video (full mutable row)
#[derive(Debug, Clone)]
pub struct VideoUpdateDBRequest {
    pub key: String,
    pub file_format: String,
    pub size_mb: f32,
}
