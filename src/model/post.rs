use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: i32,
    pub community_id: i32,
    pub author_id: i32,
    pub author_display_name: String,
    pub content: String,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: i32,
    pub post_id: i32,
    pub community_id: i32,
    pub author_id: i32,
    pub author_display_name: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AlliancePostDto {
    pub id: i32,
    pub alliance_id: i32,
    pub author_id: i32,
    pub author_display_name: String,
    pub author_community_id: i32,
    pub author_community_name: String,
    pub content: String,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AllianceCommentDto {
    pub id: i32,
    pub post_id: i32,
    pub alliance_id: i32,
    pub author_id: i32,
    pub author_display_name: String,
    pub author_community_id: i32,
    pub author_community_name: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Body of a new post or comment in a community.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePostDto {
    pub content: String,
}

/// Body of a new post or comment in an alliance, written on behalf of `community_id`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAlliancePostDto {
    pub community_id: i32,
    pub content: String,
}

/// Like state of a post for the requesting user.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LikeDto {
    pub post_id: i32,
    pub liked: bool,
    pub likes_count: i32,
}
