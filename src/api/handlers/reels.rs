use crate::{
    AppState,
    api::models::reels::{
        DeliveryStatus, ListReelsQuery, RecipientsAdd, ReelConfirm, ReelCreate, ReelListResponse, ReelResponse, ReelUpdate,
    },
    auth::CurrentUser,
    db::{
        handlers::{Reels, Repository, Videos},
        models::reels::{Recipient, Recipients, Reel, ReelCreateDBRequest, ReelUpdateDBRequest},
        models::users::User,
    },
    errors::Error,
    types::{RecipientId, ReelId, new_id},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

/// Resolve a reel the caller owns, hiding other users' reels as not-found.
fn owned_by(reel: Reel, user: &User) -> Result<Reel, Error> {
    if reel.user_id.as_deref() == Some(user.id.as_str()) {
        Ok(reel)
    } else {
        Err(Error::NotFound {
            resource: "Reel".to_string(),
            id: reel.id,
        })
    }
}

// GET /v1/reels - List the current user's reels
#[utoipa::path(
    get,
    path = "/v1/reels",
    tag = "reels",
    summary = "List reels",
    description = "Cursor-paginated listing of the current user's reels, newest first, optionally filtered by delivery status.",
    params(ListReelsQuery),
    responses(
        (status = 200, description = "One page of reels", body = ReelListResponse),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn list_reels(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListReelsQuery>,
) -> Result<Json<ReelListResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let (reels, pagination) = Reels::new(&mut conn)
        .list(&current_user.user.id, &query.filter(), &query.pageable)
        .await?;

    Ok(Json(ReelListResponse {
        data: reels.into_iter().map(ReelResponse::from).collect(),
        pagination,
    }))
}

// POST /v1/reels - Create a reel
#[utoipa::path(
    post,
    path = "/v1/reels",
    tag = "reels",
    summary = "Create a reel",
    description = "Create a reel for an uploaded video. The reel stays unconfirmed until the contact email confirms it; \
                   ownership is assigned once the contact email registers an account.",
    request_body = ReelCreate,
    responses(
        (status = 201, description = "Reel created", body = ReelResponse),
        (status = 400, description = "Unknown video"),
    )
)]
pub async fn create_reel(
    State(state): State<AppState>,
    Json(request): Json<ReelCreate>,
) -> Result<(StatusCode, Json<ReelResponse>), Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    // Creating a reel for a video that was never registered is a caller
    // mistake, not a missing resource.
    Videos::new(&mut tx).get_by_id(&request.video_id).await.map_err(|_| Error::BadRequest {
        message: format!("video {} does not exist", request.video_id),
    })?;

    let recipients: Recipients = request.recipients.iter().map(|email| Recipient::new(email.as_str())).collect();

    let reel = Reels::new(&mut tx)
        .create(&ReelCreateDBRequest {
            user_id: None,
            video_id: request.video_id,
            email: request.email,
            title: request.title,
            description: request.description,
            private: request.private,
            recipients,
            email_confirmation_token: new_id(),
            delivery_status: DeliveryStatus::Unconfirmed,
            delivery_date: request.delivery_date,
        })
        .await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(reel.into())))
}

// POST /v1/reels/confirm - Confirm a reel via the emailed token
#[utoipa::path(
    post,
    path = "/v1/reels/confirm",
    tag = "reels",
    summary = "Confirm a reel",
    description = "Redeem the emailed confirmation token, moving the reel from unconfirmed to scheduled. \
                   Confirming an already-confirmed reel is a no-op.",
    request_body = ReelConfirm,
    responses(
        (status = 200, description = "Confirmed reel", body = ReelResponse),
        (status = 404, description = "Unknown token"),
    )
)]
pub async fn confirm_reel(State(state): State<AppState>, Json(request): Json<ReelConfirm>) -> Result<Json<ReelResponse>, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let mut repo = Reels::new(&mut tx);
    let reel = repo.get_by_email_confirmation_token(&request.token).await?;

    let reel = if reel.delivery_status == DeliveryStatus::Unconfirmed {
        let mut update = ReelUpdateDBRequest::from_reel(&reel);
        update.delivery_status = DeliveryStatus::Scheduled;
        repo.update(&reel.id, &update).await?
    } else {
        reel
    };

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(reel.into()))
}

// GET /v1/reels/{id} - Fetch a reel
#[utoipa::path(
    get,
    path = "/v1/reels/{id}",
    tag = "reels",
    summary = "Get a reel",
    params(("id" = String, Path, description = "Reel ID")),
    responses(
        (status = 200, description = "The reel", body = ReelResponse),
        (status = 404, description = "Reel not found"),
    )
)]
pub async fn get_reel(State(state): State<AppState>, Path(id): Path<ReelId>) -> Result<Json<ReelResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let reel = Reels::new(&mut conn).get_by_id(&id).await?;

    Ok(Json(reel.into()))
}

// PUT /v1/reels/{id} - Replace a reel's mutable fields
#[utoipa::path(
    put,
    path = "/v1/reels/{id}",
    tag = "reels",
    summary = "Update a reel",
    params(("id" = String, Path, description = "Reel ID")),
    request_body = ReelUpdate,
    responses(
        (status = 200, description = "Updated reel", body = ReelResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reel not found"),
    )
)]
pub async fn update_reel(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ReelId>,
    Json(request): Json<ReelUpdate>,
) -> Result<Json<ReelResponse>, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let mut repo = Reels::new(&mut tx);
    let reel = owned_by(repo.get_by_id(&id).await?, &current_user.user)?;

    let mut update = ReelUpdateDBRequest::from_reel(&reel);
    update.video_id = request.video_id;
    update.email = request.email;
    update.title = request.title;
    update.description = request.description;
    update.private = request.private;
    update.delivery_date = request.delivery_date;

    let updated = repo.update(&reel.id, &update).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(updated.into()))
}

// DELETE /v1/reels/{id} - Soft-delete a reel
#[utoipa::path(
    delete,
    path = "/v1/reels/{id}",
    tag = "reels",
    summary = "Delete a reel",
    params(("id" = String, Path, description = "Reel ID")),
    responses(
        (status = 204, description = "Reel deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reel not found"),
    )
)]
pub async fn delete_reel(State(state): State<AppState>, current_user: CurrentUser, Path(id): Path<ReelId>) -> Result<StatusCode, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let mut repo = Reels::new(&mut tx);
    let reel = owned_by(repo.get_by_id(&id).await?, &current_user.user)?;

    repo.delete(&reel.id).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /v1/reels/{id}/recipients - Append recipients
#[utoipa::path(
    post,
    path = "/v1/reels/{id}/recipients",
    tag = "reels",
    summary = "Add recipients to a reel",
    params(("id" = String, Path, description = "Reel ID")),
    request_body = RecipientsAdd,
    responses(
        (status = 200, description = "Reel with the appended recipients", body = ReelResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reel not found"),
    )
)]
pub async fn add_recipients(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ReelId>,
    Json(request): Json<RecipientsAdd>,
) -> Result<Json<ReelResponse>, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let mut repo = Reels::new(&mut tx);
    let mut reel = owned_by(repo.get_by_id(&id).await?, &current_user.user)?;

    let new_recipients: Recipients = request.emails.iter().map(|email| Recipient::new(email.as_str())).collect();
    repo.add_recipients(&mut reel, new_recipients).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(reel.into()))
}

// DELETE /v1/reels/{id}/recipients/{recipient_id} - Remove a recipient
#[utoipa::path(
    delete,
    path = "/v1/reels/{id}/recipients/{recipient_id}",
    tag = "reels",
    summary = "Remove a recipient from a reel",
    params(
        ("id" = String, Path, description = "Reel ID"),
        ("recipient_id" = String, Path, description = "Recipient ID"),
    ),
    responses(
        (status = 204, description = "Recipient removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reel or recipient not found"),
    )
)]
pub async fn delete_recipient(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((id, recipient_id)): Path<(ReelId, RecipientId)>,
) -> Result<StatusCode, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let mut repo = Reels::new(&mut tx);
    let reel = owned_by(repo.get_by_id(&id).await?, &current_user.user)?;

    repo.delete_recipient(&reel, &recipient_id).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
