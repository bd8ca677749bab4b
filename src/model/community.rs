use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommunityKindDto {
    Location,
    Expertise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MemberRoleDto {
    Leader,
    Member,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatusDto {
    Pending,
    Approved,
    Rejected,
    Banned,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CommunityDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub kind: CommunityKindDto,
    /// Place name for location communities, field of expertise otherwise
    pub basis_detail: String,
    pub leader_id: i32,
    pub leader_name: String,
    pub member_count: i32,
    pub posts_count: i32,
    pub requires_approval: bool,
    pub alliance_id: Option<i32>,
    pub alliance_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCommunityDto {
    pub name: String,
    pub description: String,
    pub kind: CommunityKindDto,
    pub basis_detail: String,
    #[serde(default)]
    pub requires_approval: bool,
}

/// Community fields the leader may change; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCommunityDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<CommunityKindDto>,
    pub basis_detail: Option<String>,
    pub requires_approval: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommunityListParams {
    /// Only list communities of this kind
    pub kind: Option<CommunityKindDto>,
    /// Only list communities led by this user
    pub leader_id: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CommunityMemberDto {
    pub community_id: i32,
    pub user_id: i32,
    pub user_display_name: String,
    pub role: MemberRoleDto,
    pub status: MembershipStatusDto,
    pub requested_at: NaiveDateTime,
    pub joined_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MemberListParams {
    /// Membership status to list, defaults to approved
    pub status: Option<MembershipStatusDto>,
}

/// Membership status after a join request.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct JoinResultDto {
    pub status: MembershipStatusDto,
}
