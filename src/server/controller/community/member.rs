use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        community::{CommunityMemberDto, JoinResultDto, MemberListParams},
    },
    server::{
        controller::{community::COMMUNITY_TAG, util::get_user::get_user_from_session},
        error::Error,
        model::{app::AppState, session::user::SessionUserId},
        service::community::membership::CommunityMembershipService,
    },
};

/// Request to join a community
///
/// Communities that do not require approval admit the user immediately.
#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/join",
    tag = COMMUNITY_TAG,
    params(("community_id" = i32, Path, description = "ID of the community")),
    responses(
        (status = 200, description = "Membership status after the request", body = JoinResultDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "User is banned", body = ErrorDto),
        (status = 404, description = "Community not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_community(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let status = CommunityMembershipService::new(&state.db)
        .join(&user, community_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(JoinResultDto {
            status: status.into(),
        }),
    ))
}

/// Withdraw a join request or leave a community
#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/leave",
    tag = COMMUNITY_TAG,
    params(("community_id" = i32, Path, description = "ID of the community")),
    responses(
        (status = 204, description = "Membership removed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "The leader cannot leave", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_community(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    CommunityMembershipService::new(&state.db)
        .leave(&user, community_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List a community's members
///
/// Approved members are public; other statuses are visible to the leader only.
#[utoipa::path(
    get,
    path = "/api/communities/{community_id}/members",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "ID of the community"),
        MemberListParams
    ),
    responses(
        (status = 200, description = "Memberships with the requested status", body = Vec<CommunityMemberDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader", body = ErrorDto),
        (status = 404, description = "Community not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_members(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
    Query(params): Query<MemberListParams>,
) -> Result<impl IntoResponse, Error> {
    let viewer_id = SessionUserId::get(&session).await?;

    let members = CommunityMembershipService::new(&state.db)
        .list_members(viewer_id, community_id, params.status.map(Into::into))
        .await?;

    Ok((StatusCode::OK, Json(members)))
}

/// Approve a pending join request; leader only
#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/members/{user_id}/approve",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "ID of the community"),
        ("user_id" = i32, Path, description = "ID of the requesting user")
    ),
    responses(
        (status = 200, description = "Approved membership", body = CommunityMemberDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 409, description = "Membership is not pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_member(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let leader = get_user_from_session(&state, &session).await?;

    let member = CommunityMembershipService::new(&state.db)
        .approve(&leader, community_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(member)))
}

/// Reject a pending join request; leader only
#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/members/{user_id}/reject",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "ID of the community"),
        ("user_id" = i32, Path, description = "ID of the requesting user")
    ),
    responses(
        (status = 200, description = "Rejected membership", body = CommunityMemberDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 409, description = "Membership is not pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_member(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let leader = get_user_from_session(&state, &session).await?;

    let member = CommunityMembershipService::new(&state.db)
        .reject(&leader, community_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(member)))
}

/// Ban a member or applicant; leader only
#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/members/{user_id}/ban",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "ID of the community"),
        ("user_id" = i32, Path, description = "ID of the user to ban")
    ),
    responses(
        (status = 200, description = "Banned membership", body = CommunityMemberDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader, or the target is the leader", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 409, description = "Membership is already banned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn ban_member(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let leader = get_user_from_session(&state, &session).await?;

    let member = CommunityMembershipService::new(&state.db)
        .ban(&leader, community_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(member)))
}

/// Remove an approved member; leader only
#[utoipa::path(
    delete,
    path = "/api/communities/{community_id}/members/{user_id}",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "ID of the community"),
        ("user_id" = i32, Path, description = "ID of the member to remove")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader, or the target is the leader", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 409, description = "Membership is not approved", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_member(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let leader = get_user_from_session(&state, &session).await?;

    CommunityMembershipService::new(&state.db)
        .remove(&leader, community_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
