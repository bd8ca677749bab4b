use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_civitas_user::CivitasUser, m20251101_000005_community_post::CommunityPost,
};

static IDX_COMMUNITY_POST_COMMENT_POST_ID: &str = "idx-community_post_comment-post_id";
static FK_COMMUNITY_POST_COMMENT_POST_ID: &str = "fk-community_post_comment-post_id";
static FK_COMMUNITY_POST_COMMENT_AUTHOR_ID: &str = "fk-community_post_comment-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityPostComment::Table)
                    .if_not_exists()
                    .col(pk_auto(CommunityPostComment::Id))
                    .col(integer(CommunityPostComment::PostId))
                    .col(integer(CommunityPostComment::CommunityId))
                    .col(integer(CommunityPostComment::AuthorId))
                    .col(string(CommunityPostComment::AuthorDisplayName))
                    .col(text(CommunityPostComment::Content))
                    .col(timestamp(CommunityPostComment::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMUNITY_POST_COMMENT_POST_ID)
                            .from(CommunityPostComment::Table, CommunityPostComment::PostId)
                            .to(CommunityPost::Table, CommunityPost::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMUNITY_POST_COMMENT_AUTHOR_ID)
                            .from(CommunityPostComment::Table, CommunityPostComment::AuthorId)
                            .to(CivitasUser::Table, CivitasUser::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMMUNITY_POST_COMMENT_POST_ID)
                    .table(CommunityPostComment::Table)
                    .col(CommunityPostComment::PostId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMMUNITY_POST_COMMENT_POST_ID)
                    .table(CommunityPostComment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CommunityPostComment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CommunityPostComment {
    Table,
    Id,
    PostId,
    CommunityId,
    AuthorId,
    AuthorDisplayName,
    Content,
    CreatedAt,
}
