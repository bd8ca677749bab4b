use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_civitas_user::CivitasUser;

static IDX_ALLIANCE_CREATOR_ID: &str = "idx-alliance-creator_id";
static FK_ALLIANCE_CREATOR_ID: &str = "fk-alliance-creator_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alliance::Table)
                    .if_not_exists()
                    .col(pk_auto(Alliance::Id))
                    .col(string(Alliance::Name))
                    .col(text(Alliance::Description))
                    .col(integer(Alliance::CreatorId))
                    .col(string(Alliance::CreatorName))
                    .col(integer(Alliance::FoundingCommunityId))
                    .col(integer(Alliance::MemberCommunityCount))
                    .col(text_null(Alliance::Rules))
                    .col(string_len(Alliance::Visibility, 16))
                    .col(timestamp(Alliance::CreatedAt))
                    .col(timestamp(Alliance::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ALLIANCE_CREATOR_ID)
                    .table(Alliance::Table)
                    .col(Alliance::CreatorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ALLIANCE_CREATOR_ID)
                    .from_tbl(Alliance::Table)
                    .from_col(Alliance::CreatorId)
                    .to_tbl(CivitasUser::Table)
                    .to_col(CivitasUser::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ALLIANCE_CREATOR_ID)
                    .table(Alliance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ALLIANCE_CREATOR_ID)
                    .table(Alliance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Alliance::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Alliance {
    Table,
    Id,
    Name,
    Description,
    CreatorId,
    CreatorName,
    FoundingCommunityId,
    MemberCommunityCount,
    Rules,
    Visibility,
    CreatedAt,
    UpdatedAt,
}
