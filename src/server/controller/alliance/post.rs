use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        post::{AllianceCommentDto, AlliancePostDto, CreateAlliancePostDto, LikeDto},
    },
    server::{
        controller::{alliance::ALLIANCE_TAG, util::get_user::get_user_from_session},
        error::Error,
        model::app::AppState,
        service::alliance::post::AlliancePostService,
    },
};

/// List an alliance's posts, newest first
#[utoipa::path(
    get,
    path = "/api/alliances/{alliance_id}/posts",
    tag = ALLIANCE_TAG,
    params(("alliance_id" = i32, Path, description = "ID of the alliance")),
    responses(
        (status = 200, description = "Posts of the alliance", body = Vec<AlliancePostDto>),
        (status = 404, description = "Alliance not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Path(alliance_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let posts = AlliancePostService::new(&state.db)
        .list_posts(alliance_id)
        .await?;

    Ok((StatusCode::OK, Json(posts)))
}

/// Create a post on behalf of a member community
#[utoipa::path(
    post,
    path = "/api/alliances/{alliance_id}/posts",
    tag = ALLIANCE_TAG,
    params(("alliance_id" = i32, Path, description = "ID of the alliance")),
    request_body = CreateAlliancePostDto,
    responses(
        (status = 201, description = "Post created", body = AlliancePostDto),
        (status = 400, description = "Invalid content", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Community or author is not an approved member", body = ErrorDto),
        (status = 404, description = "Alliance or community not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    session: Session,
    Path(alliance_id): Path<i32>,
    Json(create): Json<CreateAlliancePostDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let post = AlliancePostService::new(&state.db)
        .create_post(&user, alliance_id, create.community_id, &create.content)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// List a post's comments, oldest first
#[utoipa::path(
    get,
    path = "/api/alliances/{alliance_id}/posts/{post_id}/comments",
    tag = ALLIANCE_TAG,
    params(
        ("alliance_id" = i32, Path, description = "ID of the alliance"),
        ("post_id" = i32, Path, description = "ID of the post")
    ),
    responses(
        (status = 200, description = "Comments of the post", body = Vec<AllianceCommentDto>),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path((alliance_id, post_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let comments = AlliancePostService::new(&state.db)
        .list_comments(alliance_id, post_id)
        .await?;

    Ok((StatusCode::OK, Json(comments)))
}

/// Comment on a post on behalf of a member community
#[utoipa::path(
    post,
    path = "/api/alliances/{alliance_id}/posts/{post_id}/comments",
    tag = ALLIANCE_TAG,
    params(
        ("alliance_id" = i32, Path, description = "ID of the alliance"),
        ("post_id" = i32, Path, description = "ID of the post")
    ),
    request_body = CreateAlliancePostDto,
    responses(
        (status = 201, description = "Comment created", body = AllianceCommentDto),
        (status = 400, description = "Invalid content", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Community or author is not an approved member", body = ErrorDto),
        (status = 404, description = "Post or community not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_comment(
    State(state): State<AppState>,
    session: Session,
    Path((alliance_id, post_id)): Path<(i32, i32)>,
    Json(create): Json<CreateAlliancePostDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let comment = AlliancePostService::new(&state.db)
        .create_comment(
            &user,
            alliance_id,
            post_id,
            create.community_id,
            &create.content,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Like a post; members of a member community only
#[utoipa::path(
    post,
    path = "/api/alliances/{alliance_id}/posts/{post_id}/like",
    tag = ALLIANCE_TAG,
    params(
        ("alliance_id" = i32, Path, description = "ID of the alliance"),
        ("post_id" = i32, Path, description = "ID of the post")
    ),
    responses(
        (status = 200, description = "Like state of the post", body = LikeDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the alliance", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn like_post(
    State(state): State<AppState>,
    session: Session,
    Path((alliance_id, post_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let like = AlliancePostService::new(&state.db)
        .like(&user, alliance_id, post_id)
        .await?;

    Ok((StatusCode::OK, Json(like)))
}

/// Remove a like from a post
#[utoipa::path(
    delete,
    path = "/api/alliances/{alliance_id}/posts/{post_id}/like",
    tag = ALLIANCE_TAG,
    params(
        ("alliance_id" = i32, Path, description = "ID of the alliance"),
        ("post_id" = i32, Path, description = "ID of the post")
    ),
    responses(
        (status = 200, description = "Like state of the post", body = LikeDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the alliance", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unlike_post(
    State(state): State<AppState>,
    session: Session,
    Path((alliance_id, post_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let like = AlliancePostService::new(&state.db)
        .unlike(&user, alliance_id, post_id)
        .await?;

    Ok((StatusCode::OK, Json(like)))
}
