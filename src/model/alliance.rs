use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::community::MembershipStatusDto;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AllianceVisibilityDto {
    /// Communities join immediately
    Public,
    /// Join requests wait for the creator's approval
    Private,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AllianceDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub creator_id: i32,
    pub creator_name: String,
    pub founding_community_id: i32,
    pub member_community_count: i32,
    pub rules: Option<String>,
    pub visibility: AllianceVisibilityDto,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAllianceDto {
    pub name: String,
    pub description: String,
    pub rules: Option<String>,
    pub visibility: AllianceVisibilityDto,
    /// Community led by the creator that founds the alliance
    pub community_id: i32,
}

/// Alliance fields the creator may change; absent fields are left untouched.
///
/// An empty `rules` string clears the rules.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAllianceDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rules: Option<String>,
    pub visibility: Option<AllianceVisibilityDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AllianceMemberDto {
    pub alliance_id: i32,
    pub community_id: i32,
    pub community_name: String,
    pub community_leader_id: i32,
    pub status: MembershipStatusDto,
    pub requested_at: NaiveDateTime,
    pub joined_at: Option<NaiveDateTime>,
}

/// Names the community acting in an alliance join or leave.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AllianceCommunityDto {
    pub community_id: i32,
}
