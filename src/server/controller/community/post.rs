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
        post::{CommentDto, CreatePostDto, LikeDto, PostDto},
    },
    server::{
        controller::{community::COMMUNITY_TAG, util::get_user::get_user_from_session},
        error::Error,
        model::app::AppState,
        service::community::post::CommunityPostService,
    },
};

/// List a community's posts, newest first
#[utoipa::path(
    get,
    path = "/api/communities/{community_id}/posts",
    tag = COMMUNITY_TAG,
    params(("community_id" = i32, Path, description = "ID of the community")),
    responses(
        (status = 200, description = "Posts of the community", body = Vec<PostDto>),
        (status = 404, description = "Community not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let posts = CommunityPostService::new(&state.db)
        .list_posts(community_id)
        .await?;

    Ok((StatusCode::OK, Json(posts)))
}

/// Create a post; approved members only
#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/posts",
    tag = COMMUNITY_TAG,
    params(("community_id" = i32, Path, description = "ID of the community")),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Invalid content", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an approved member", body = ErrorDto),
        (status = 404, description = "Community not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
    Json(create): Json<CreatePostDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let post = CommunityPostService::new(&state.db)
        .create_post(&user, community_id, &create.content)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// List a post's comments, oldest first
#[utoipa::path(
    get,
    path = "/api/communities/{community_id}/posts/{post_id}/comments",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "ID of the community"),
        ("post_id" = i32, Path, description = "ID of the post")
    ),
    responses(
        (status = 200, description = "Comments of the post", body = Vec<CommentDto>),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path((community_id, post_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let comments = CommunityPostService::new(&state.db)
        .list_comments(community_id, post_id)
        .await?;

    Ok((StatusCode::OK, Json(comments)))
}

/// Comment on a post; approved members only
#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/posts/{post_id}/comments",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "ID of the community"),
        ("post_id" = i32, Path, description = "ID of the post")
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Invalid content", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an approved member", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_comment(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, post_id)): Path<(i32, i32)>,
    Json(create): Json<CreatePostDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let comment = CommunityPostService::new(&state.db)
        .create_comment(&user, community_id, post_id, &create.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Like a post; approved members only
#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/posts/{post_id}/like",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "ID of the community"),
        ("post_id" = i32, Path, description = "ID of the post")
    ),
    responses(
        (status = 200, description = "Like state of the post", body = LikeDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an approved member", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn like_post(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, post_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let like = CommunityPostService::new(&state.db)
        .like(&user, community_id, post_id)
        .await?;

    Ok((StatusCode::OK, Json(like)))
}

/// Remove a like from a post
#[utoipa::path(
    delete,
    path = "/api/communities/{community_id}/posts/{post_id}/like",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "ID of the community"),
        ("post_id" = i32, Path, description = "ID of the post")
    ),
    responses(
        (status = 200, description = "Like state of the post", body = LikeDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an approved member", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unlike_post(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, post_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let like = CommunityPostService::new(&state.db)
        .unlike(&user, community_id, post_id)
        .await?;

    Ok((StatusCode::OK, Json(like)))
}
