use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        alliance::{AllianceCommunityDto, AllianceMemberDto},
        api::ErrorDto,
        community::{JoinResultDto, MemberListParams},
    },
    server::{
        controller::{alliance::ALLIANCE_TAG, util::get_user::get_user_from_session},
        error::Error,
        model::{app::AppState, session::user::SessionUserId},
        service::alliance::membership::AllianceMembershipService,
    },
};

/// List an alliance's member communities
///
/// Approved members are public; other statuses are visible to the creator only.
#[utoipa::path(
    get,
    path = "/api/alliances/{alliance_id}/members",
    tag = ALLIANCE_TAG,
    params(
        ("alliance_id" = i32, Path, description = "ID of the alliance"),
        MemberListParams
    ),
    responses(
        (status = 200, description = "Memberships with the requested status", body = Vec<AllianceMemberDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Alliance not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_members(
    State(state): State<AppState>,
    session: Session,
    Path(alliance_id): Path<i32>,
    Query(params): Query<MemberListParams>,
) -> Result<impl IntoResponse, Error> {
    let viewer_id = SessionUserId::get(&session).await?;

    let members = AllianceMembershipService::new(&state.db)
        .list_members(viewer_id, alliance_id, params.status.map(Into::into))
        .await?;

    Ok((StatusCode::OK, Json(members)))
}

/// Request membership for a community the logged in user leads
///
/// Public alliances admit the community immediately.
#[utoipa::path(
    post,
    path = "/api/alliances/{alliance_id}/join",
    tag = ALLIANCE_TAG,
    params(("alliance_id" = i32, Path, description = "ID of the alliance")),
    request_body = AllianceCommunityDto,
    responses(
        (status = 200, description = "Membership status after the request", body = JoinResultDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader of the community", body = ErrorDto),
        (status = 404, description = "Alliance or community not found", body = ErrorDto),
        (status = 409, description = "Community already in or waiting on an alliance", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_alliance(
    State(state): State<AppState>,
    session: Session,
    Path(alliance_id): Path<i32>,
    Json(body): Json<AllianceCommunityDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let status = AllianceMembershipService::new(&state.db)
        .join(user.id, alliance_id, body.community_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(JoinResultDto {
            status: status.into(),
        }),
    ))
}

/// Withdraw a request or leave an alliance on behalf of a led community
#[utoipa::path(
    post,
    path = "/api/alliances/{alliance_id}/leave",
    tag = ALLIANCE_TAG,
    params(("alliance_id" = i32, Path, description = "ID of the alliance")),
    request_body = AllianceCommunityDto,
    responses(
        (status = 204, description = "Membership removed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader of the community", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 409, description = "The founding community cannot leave", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_alliance(
    State(state): State<AppState>,
    session: Session,
    Path(alliance_id): Path<i32>,
    Json(body): Json<AllianceCommunityDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    AllianceMembershipService::new(&state.db)
        .leave(user.id, alliance_id, body.community_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Approve a pending community; creator only
#[utoipa::path(
    post,
    path = "/api/alliances/{alliance_id}/members/{community_id}/approve",
    tag = ALLIANCE_TAG,
    params(
        ("alliance_id" = i32, Path, description = "ID of the alliance"),
        ("community_id" = i32, Path, description = "ID of the requesting community")
    ),
    responses(
        (status = 200, description = "Approved membership", body = AllianceMemberDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 409, description = "Membership is not pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_member(
    State(state): State<AppState>,
    session: Session,
    Path((alliance_id, community_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let member = AllianceMembershipService::new(&state.db)
        .approve(user.id, alliance_id, community_id)
        .await?;

    Ok((StatusCode::OK, Json(member)))
}

/// Reject a pending community; creator only
#[utoipa::path(
    post,
    path = "/api/alliances/{alliance_id}/members/{community_id}/reject",
    tag = ALLIANCE_TAG,
    params(
        ("alliance_id" = i32, Path, description = "ID of the alliance"),
        ("community_id" = i32, Path, description = "ID of the requesting community")
    ),
    responses(
        (status = 200, description = "Rejected membership", body = AllianceMemberDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 409, description = "Membership is not pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_member(
    State(state): State<AppState>,
    session: Session,
    Path((alliance_id, community_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let member = AllianceMembershipService::new(&state.db)
        .reject(user.id, alliance_id, community_id)
        .await?;

    Ok((StatusCode::OK, Json(member)))
}

/// Remove an approved community; creator only
#[utoipa::path(
    delete,
    path = "/api/alliances/{alliance_id}/members/{community_id}",
    tag = ALLIANCE_TAG,
    params(
        ("alliance_id" = i32, Path, description = "ID of the alliance"),
        ("community_id" = i32, Path, description = "ID of the member community")
    ),
    responses(
        (status = 204, description = "Community removed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 409, description = "Membership is not approved, or is the founding community", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_member(
    State(state): State<AppState>,
    session: Session,
    Path((alliance_id, community_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    AllianceMembershipService::new(&state.db)
        .remove(user.id, alliance_id, community_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
