use crate::{
    AppState,
    api::models::videos::{VideoCreate, VideoResponse},
    db::{handlers::Repository, handlers::Videos, models::videos::VideoCreateDBRequest},
    errors::Error,
    types::VideoId,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

// POST /v1/videos - Register an uploaded video
#[utoipa::path(
    post,
    path = "/v1/videos",
    tag = "videos",
    summary = "Register a video",
    description = "Record metadata for a video that has been uploaded to object storage.",
    request_body = VideoCreate,
    responses(
        (status = 201, description = "Video registered", body = VideoResponse),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn create_video(
    State(state): State<AppState>,
    Json(request): Json<VideoCreate>,
) -> Result<(StatusCode, Json<VideoResponse>), Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let video = Videos::new(&mut tx)
        .create(&VideoCreateDBRequest {
            key: request.key,
            file_format: request.file_format,
            size_mb: request.size_mb,
        })
        .await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(video.into())))
}

// GET /v1/videos/{id} - Fetch video metadata
#[utoipa::path(
    get,
    path = "/v1/videos/{id}",
    tag = "videos",
    summary = "Get a video",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video metadata", body = VideoResponse),
        (status = 404, description = "Video not found"),
    )
)]
pub async fn get_video(State(state): State<AppState>, Path(id): Path<VideoId>) -> Result<Json<VideoResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let video = Videos::new(&mut conn).get_by_id(&id).await?;

    Ok(Json(video.into()))
}
