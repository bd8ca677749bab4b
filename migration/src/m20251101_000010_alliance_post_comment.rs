use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_civitas_user::CivitasUser, m20251101_000009_alliance_post::AlliancePost,
};

static IDX_ALLIANCE_POST_COMMENT_POST_ID: &str = "idx-alliance_post_comment-post_id";
static FK_ALLIANCE_POST_COMMENT_POST_ID: &str = "fk-alliance_post_comment-post_id";
static FK_ALLIANCE_POST_COMMENT_AUTHOR_ID: &str = "fk-alliance_post_comment-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlliancePostComment::Table)
                    .if_not_exists()
                    .col(pk_auto(AlliancePostComment::Id))
                    .col(integer(AlliancePostComment::PostId))
                    .col(integer(AlliancePostComment::AllianceId))
                    .col(integer(AlliancePostComment::AuthorId))
                    .col(string(AlliancePostComment::AuthorDisplayName))
                    .col(integer(AlliancePostComment::AuthorCommunityId))
                    .col(string(AlliancePostComment::AuthorCommunityName))
                    .col(text(AlliancePostComment::Content))
                    .col(timestamp(AlliancePostComment::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_POST_COMMENT_POST_ID)
                            .from(AlliancePostComment::Table, AlliancePostComment::PostId)
                            .to(AlliancePost::Table, AlliancePost::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_POST_COMMENT_AUTHOR_ID)
                            .from(AlliancePostComment::Table, AlliancePostComment::AuthorId)
                            .to(CivitasUser::Table, CivitasUser::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ALLIANCE_POST_COMMENT_POST_ID)
                    .table(AlliancePostComment::Table)
                    .col(AlliancePostComment::PostId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ALLIANCE_POST_COMMENT_POST_ID)
                    .table(AlliancePostComment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AlliancePostComment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AlliancePostComment {
    Table,
    Id,
    PostId,
    AllianceId,
    AuthorId,
    AuthorDisplayName,
    AuthorCommunityId,
    AuthorCommunityName,
    Content,
    CreatedAt,
}
