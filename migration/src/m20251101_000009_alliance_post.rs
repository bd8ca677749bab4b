use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_civitas_user::CivitasUser, m20251101_000002_alliance::Alliance,
};

static IDX_ALLIANCE_POST_ALLIANCE_ID: &str = "idx-alliance_post-alliance_id";
static FK_ALLIANCE_POST_ALLIANCE_ID: &str = "fk-alliance_post-alliance_id";
static FK_ALLIANCE_POST_AUTHOR_ID: &str = "fk-alliance_post-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlliancePost::Table)
                    .if_not_exists()
                    .col(pk_auto(AlliancePost::Id))
                    .col(integer(AlliancePost::AllianceId))
                    .col(integer(AlliancePost::AuthorId))
                    .col(string(AlliancePost::AuthorDisplayName))
                    .col(integer(AlliancePost::AuthorCommunityId))
                    .col(string(AlliancePost::AuthorCommunityName))
                    .col(text(AlliancePost::Content))
                    .col(integer(AlliancePost::LikesCount))
                    .col(integer(AlliancePost::CommentsCount))
                    .col(timestamp(AlliancePost::CreatedAt))
                    .col(timestamp(AlliancePost::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_POST_ALLIANCE_ID)
                            .from(AlliancePost::Table, AlliancePost::AllianceId)
                            .to(Alliance::Table, Alliance::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_POST_AUTHOR_ID)
                            .from(AlliancePost::Table, AlliancePost::AuthorId)
                            .to(CivitasUser::Table, CivitasUser::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ALLIANCE_POST_ALLIANCE_ID)
                    .table(AlliancePost::Table)
                    .col(AlliancePost::AllianceId)
                    .col(AlliancePost::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ALLIANCE_POST_ALLIANCE_ID)
                    .table(AlliancePost::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AlliancePost::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AlliancePost {
    Table,
    Id,
    AllianceId,
    AuthorId,
    AuthorDisplayName,
    AuthorCommunityId,
    AuthorCommunityName,
    Content,
    LikesCount,
    CommentsCount,
    CreatedAt,
    UpdatedAt,
}
