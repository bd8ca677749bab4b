use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_civitas_user::CivitasUser, m20251101_000003_community::Community,
};

static IDX_COMMUNITY_MEMBER_USER_ID: &str = "idx-community_member-user_id";
static FK_COMMUNITY_MEMBER_COMMUNITY_ID: &str = "fk-community_member-community_id";
static FK_COMMUNITY_MEMBER_USER_ID: &str = "fk-community_member-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityMember::Table)
                    .if_not_exists()
                    .col(integer(CommunityMember::CommunityId))
                    .col(integer(CommunityMember::UserId))
                    .col(string(CommunityMember::UserDisplayName))
                    .col(string_len(CommunityMember::Role, 16))
                    .col(string_len(CommunityMember::Status, 16))
                    .col(timestamp(CommunityMember::RequestedAt))
                    .col(timestamp_null(CommunityMember::JoinedAt))
                    .primary_key(
                        Index::create()
                            .col(CommunityMember::CommunityId)
                            .col(CommunityMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMUNITY_MEMBER_COMMUNITY_ID)
                            .from(CommunityMember::Table, CommunityMember::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMUNITY_MEMBER_USER_ID)
                            .from(CommunityMember::Table, CommunityMember::UserId)
                            .to(CivitasUser::Table, CivitasUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMMUNITY_MEMBER_USER_ID)
                    .table(CommunityMember::Table)
                    .col(CommunityMember::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMMUNITY_MEMBER_USER_ID)
                    .table(CommunityMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CommunityMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CommunityMember {
    Table,
    CommunityId,
    UserId,
    UserDisplayName,
    Role,
    Status,
    RequestedAt,
    JoinedAt,
}
