use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000002_alliance::Alliance, m20251101_000003_community::Community};

static IDX_ALLIANCE_MEMBER_COMMUNITY_ID: &str = "idx-alliance_member-community_id";
static FK_ALLIANCE_MEMBER_ALLIANCE_ID: &str = "fk-alliance_member-alliance_id";
static FK_ALLIANCE_MEMBER_COMMUNITY_ID: &str = "fk-alliance_member-community_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AllianceMember::Table)
                    .if_not_exists()
                    .col(integer(AllianceMember::AllianceId))
                    .col(integer(AllianceMember::CommunityId))
                    .col(string(AllianceMember::CommunityName))
                    .col(integer(AllianceMember::CommunityLeaderId))
                    .col(string_len(AllianceMember::Status, 16))
                    .col(timestamp(AllianceMember::RequestedAt))
                    .col(timestamp_null(AllianceMember::JoinedAt))
                    .primary_key(
                        Index::create()
                            .col(AllianceMember::AllianceId)
                            .col(AllianceMember::CommunityId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_MEMBER_ALLIANCE_ID)
                            .from(AllianceMember::Table, AllianceMember::AllianceId)
                            .to(Alliance::Table, Alliance::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_MEMBER_COMMUNITY_ID)
                            .from(AllianceMember::Table, AllianceMember::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ALLIANCE_MEMBER_COMMUNITY_ID)
                    .table(AllianceMember::Table)
                    .col(AllianceMember::CommunityId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ALLIANCE_MEMBER_COMMUNITY_ID)
                    .table(AllianceMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AllianceMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AllianceMember {
    Table,
    AllianceId,
    CommunityId,
    CommunityName,
    CommunityLeaderId,
    Status,
    RequestedAt,
    JoinedAt,
}
