//! Database model type aliases and their conversions into API bodies.
//!
//! The aliases keep service and repository signatures short. The `From` impls are the only
//! place where stored enums and denormalized rows are mapped onto the public DTOs in
//! [`crate::model`].

use entity::sea_orm_active_enums::{
    AllianceVisibility, CommunityKind, MemberRole, MembershipStatus,
};

use crate::model::{
    alliance::{AllianceDto, AllianceMemberDto, AllianceVisibilityDto},
    community::{
        CommunityDto, CommunityKindDto, CommunityMemberDto, MemberRoleDto, MembershipStatusDto,
    },
    post::{AllianceCommentDto, AlliancePostDto, CommentDto, PostDto},
};

/// Mirrored identity provider account.
pub type UserModel = entity::civitas_user::Model;

pub type CommunityModel = entity::community::Model;

/// Membership of a user in a community, keyed by `(community_id, user_id)`.
pub type CommunityMemberModel = entity::community_member::Model;

pub type CommunityPostModel = entity::community_post::Model;

pub type CommunityCommentModel = entity::community_post_comment::Model;

pub type AllianceModel = entity::alliance::Model;

/// Membership of a community in an alliance, keyed by `(alliance_id, community_id)`.
pub type AllianceMemberModel = entity::alliance_member::Model;

pub type AlliancePostModel = entity::alliance_post::Model;

pub type AllianceCommentModel = entity::alliance_post_comment::Model;

impl From<CommunityKind> for CommunityKindDto {
    fn from(kind: CommunityKind) -> Self {
        match kind {
            CommunityKind::Location => Self::Location,
            CommunityKind::Expertise => Self::Expertise,
        }
    }
}

impl From<CommunityKindDto> for CommunityKind {
    fn from(kind: CommunityKindDto) -> Self {
        match kind {
            CommunityKindDto::Location => Self::Location,
            CommunityKindDto::Expertise => Self::Expertise,
        }
    }
}

impl From<MemberRole> for MemberRoleDto {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Leader => Self::Leader,
            MemberRole::Member => Self::Member,
        }
    }
}

impl From<MembershipStatus> for MembershipStatusDto {
    fn from(status: MembershipStatus) -> Self {
        match status {
            MembershipStatus::Pending => Self::Pending,
            MembershipStatus::Approved => Self::Approved,
            MembershipStatus::Rejected => Self::Rejected,
            MembershipStatus::Banned => Self::Banned,
        }
    }
}

impl From<MembershipStatusDto> for MembershipStatus {
    fn from(status: MembershipStatusDto) -> Self {
        match status {
            MembershipStatusDto::Pending => Self::Pending,
            MembershipStatusDto::Approved => Self::Approved,
            MembershipStatusDto::Rejected => Self::Rejected,
            MembershipStatusDto::Banned => Self::Banned,
        }
    }
}

impl From<AllianceVisibility> for AllianceVisibilityDto {
    fn from(visibility: AllianceVisibility) -> Self {
        match visibility {
            AllianceVisibility::Public => Self::Public,
            AllianceVisibility::Private => Self::Private,
        }
    }
}

impl From<AllianceVisibilityDto> for AllianceVisibility {
    fn from(visibility: AllianceVisibilityDto) -> Self {
        match visibility {
            AllianceVisibilityDto::Public => Self::Public,
            AllianceVisibilityDto::Private => Self::Private,
        }
    }
}

impl From<CommunityModel> for CommunityDto {
    fn from(model: CommunityModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            kind: model.kind.into(),
            basis_detail: model.basis_detail,
            leader_id: model.leader_id,
            leader_name: model.leader_name,
            member_count: model.member_count,
            posts_count: model.posts_count,
            requires_approval: model.requires_approval,
            alliance_id: model.alliance_id,
            alliance_name: model.alliance_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CommunityMemberModel> for CommunityMemberDto {
    fn from(model: CommunityMemberModel) -> Self {
        Self {
            community_id: model.community_id,
            user_id: model.user_id,
            user_display_name: model.user_display_name,
            role: model.role.into(),
            status: model.status.into(),
            requested_at: model.requested_at,
            joined_at: model.joined_at,
        }
    }
}

impl From<CommunityPostModel> for PostDto {
    fn from(model: CommunityPostModel) -> Self {
        Self {
            id: model.id,
            community_id: model.community_id,
            author_id: model.author_id,
            author_display_name: model.author_display_name,
            content: model.content,
            likes_count: model.likes_count,
            comments_count: model.comments_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CommunityCommentModel> for CommentDto {
    fn from(model: CommunityCommentModel) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            community_id: model.community_id,
            author_id: model.author_id,
            author_display_name: model.author_display_name,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

impl From<AllianceModel> for AllianceDto {
    fn from(model: AllianceModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            creator_id: model.creator_id,
            creator_name: model.creator_name,
            founding_community_id: model.founding_community_id,
            member_community_count: model.member_community_count,
            rules: model.rules,
            visibility: model.visibility.into(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AllianceMemberModel> for AllianceMemberDto {
    fn from(model: AllianceMemberModel) -> Self {
        Self {
            alliance_id: model.alliance_id,
            community_id: model.community_id,
            community_name: model.community_name,
            community_leader_id: model.community_leader_id,
            status: model.status.into(),
            requested_at: model.requested_at,
            joined_at: model.joined_at,
        }
    }
}

impl From<AlliancePostModel> for AlliancePostDto {
    fn from(model: AlliancePostModel) -> Self {
        Self {
            id: model.id,
            alliance_id: model.alliance_id,
            author_id: model.author_id,
            author_display_name: model.author_display_name,
            author_community_id: model.author_community_id,
            author_community_name: model.author_community_name,
            content: model.content,
            likes_count: model.likes_count,
            comments_count: model.comments_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AllianceCommentModel> for AllianceCommentDto {
    fn from(model: AllianceCommentModel) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            alliance_id: model.alliance_id,
            author_id: model.author_id,
            author_display_name: model.author_display_name,
            author_community_id: model.author_community_id,
            author_community_name: model.author_community_name,
            content: model.content,
            created_at: model.created_at,
        }
    }
}
