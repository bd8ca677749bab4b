use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_civitas_user::CivitasUser, m20251101_000002_alliance::Alliance,
};

static IDX_COMMUNITY_LEADER_ID: &str = "idx-community-leader_id";
static IDX_COMMUNITY_ALLIANCE_ID: &str = "idx-community-alliance_id";
static FK_COMMUNITY_LEADER_ID: &str = "fk-community-leader_id";
static FK_COMMUNITY_ALLIANCE_ID: &str = "fk-community-alliance_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Community::Table)
                    .if_not_exists()
                    .col(pk_auto(Community::Id))
                    .col(string(Community::Name))
                    .col(text(Community::Description))
                    .col(string_len(Community::Kind, 16))
                    .col(string(Community::BasisDetail))
                    .col(integer(Community::LeaderId))
                    .col(string(Community::LeaderName))
                    .col(integer(Community::MemberCount))
                    .col(integer(Community::PostsCount))
                    .col(boolean(Community::RequiresApproval))
                    .col(integer_null(Community::AllianceId))
                    .col(string_null(Community::AllianceName))
                    .col(timestamp(Community::CreatedAt))
                    .col(timestamp(Community::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMMUNITY_LEADER_ID)
                    .table(Community::Table)
                    .col(Community::LeaderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMMUNITY_ALLIANCE_ID)
                    .table(Community::Table)
                    .col(Community::AllianceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMMUNITY_LEADER_ID)
                    .from_tbl(Community::Table)
                    .from_col(Community::LeaderId)
                    .to_tbl(CivitasUser::Table)
                    .to_col(CivitasUser::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMMUNITY_ALLIANCE_ID)
                    .from_tbl(Community::Table)
                    .from_col(Community::AllianceId)
                    .to_tbl(Alliance::Table)
                    .to_col(Alliance::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_COMMUNITY_ALLIANCE_ID)
                    .table(Community::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_COMMUNITY_LEADER_ID)
                    .table(Community::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMMUNITY_ALLIANCE_ID)
                    .table(Community::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMMUNITY_LEADER_ID)
                    .table(Community::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Community::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Community {
    Table,
    Id,
    Name,
    Description,
    Kind,
    BasisDetail,
    LeaderId,
    LeaderName,
    MemberCount,
    PostsCount,
    RequiresApproval,
    AllianceId,
    AllianceName,
    CreatedAt,
    UpdatedAt,
}
