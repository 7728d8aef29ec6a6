//! API request/response models for videos.

use crate::db::models::videos::Video;
use crate::types::VideoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata registered after a video lands in object storage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoCreate {
    pub key: String,
    pub file_format: String,
    pub size_mb: f32,
}

/// A video as exposed by the API. The storage key stays internal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub id: VideoId,
    pub file_format: String,
    pub size_mb: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            file_format: video.file_format,
            size_mb: video.size_mb,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}
