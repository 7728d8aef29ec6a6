//! OpenAPI documentation configuration.

use crate::api::{handlers, models};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "reeldrop API",
        description = "Backend for a video-reel sharing product: reels wrap uploaded videos with delivery metadata and a recipient list."
    ),
    paths(
        handlers::users::register,
        handlers::users::get_me,
        handlers::users::update_me,
        handlers::videos::create_video,
        handlers::videos::get_video,
        handlers::reels::list_reels,
        handlers::reels::create_reel,
        handlers::reels::confirm_reel,
        handlers::reels::get_reel,
        handlers::reels::update_reel,
        handlers::reels::delete_reel,
        handlers::reels::add_recipients,
        handlers::reels::delete_recipient,
    ),
    components(schemas(
        models::users::UserCreate,
        models::users::UserUpdate,
        models::users::UserResponse,
        models::videos::VideoCreate,
        models::videos::VideoResponse,
        models::reels::DeliveryStatus,
        models::reels::ReelCreate,
        models::reels::ReelUpdate,
        models::reels::ReelConfirm,
        models::reels::RecipientsAdd,
        models::reels::RecipientResponse,
        models::reels::ReelResponse,
        models::reels::ReelListResponse,
        models::pagination::Pageable,
        models::pagination::PaginationData,
    )),
    tags(
        (name = "users", description = "Registration and profile management"),
        (name = "videos", description = "Uploaded video metadata"),
        (name = "reels", description = "Reel lifecycle and recipient management"),
    )
)]
pub struct ApiDoc;
