use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_civitas_user::CivitasUser, m20251101_000003_community::Community,
};

static IDX_COMMUNITY_POST_COMMUNITY_ID: &str = "idx-community_post-community_id";
static FK_COMMUNITY_POST_COMMUNITY_ID: &str = "fk-community_post-community_id";
static FK_COMMUNITY_POST_AUTHOR_ID: &str = "fk-community_post-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityPost::Table)
                    .if_not_exists()
                    .col(pk_auto(CommunityPost::Id))
                    .col(integer(CommunityPost::CommunityId))
                    .col(integer(CommunityPost::AuthorId))
                    .col(string(CommunityPost::AuthorDisplayName))
                    .col(text(CommunityPost::Content))
                    .col(integer(CommunityPost::LikesCount))
                    .col(integer(CommunityPost::CommentsCount))
                    .col(timestamp(CommunityPost::CreatedAt))
                    .col(timestamp(CommunityPost::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMUNITY_POST_COMMUNITY_ID)
                            .from(CommunityPost::Table, CommunityPost::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMUNITY_POST_AUTHOR_ID)
                            .from(CommunityPost::Table, CommunityPost::AuthorId)
                            .to(CivitasUser::Table, CivitasUser::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMMUNITY_POST_COMMUNITY_ID)
                    .table(CommunityPost::Table)
                    .col(CommunityPost::CommunityId)
                    .col(CommunityPost::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMMUNITY_POST_COMMUNITY_ID)
                    .table(CommunityPost::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CommunityPost::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CommunityPost {
    Table,
    Id,
    CommunityId,
    AuthorId,
    AuthorDisplayName,
    Content,
    LikesCount,
    CommentsCount,
    CreatedAt,
    UpdatedAt,
}
