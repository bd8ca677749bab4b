use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_civitas_user::CivitasUser, m20251101_000005_community_post::CommunityPost,
};

static FK_COMMUNITY_POST_LIKE_POST_ID: &str = "fk-community_post_like-post_id";
static FK_COMMUNITY_POST_LIKE_USER_ID: &str = "fk-community_post_like-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityPostLike::Table)
                    .if_not_exists()
                    .col(integer(CommunityPostLike::PostId))
                    .col(integer(CommunityPostLike::UserId))
                    .col(timestamp(CommunityPostLike::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(CommunityPostLike::PostId)
                            .col(CommunityPostLike::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMUNITY_POST_LIKE_POST_ID)
                            .from(CommunityPostLike::Table, CommunityPostLike::PostId)
                            .to(CommunityPost::Table, CommunityPost::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMUNITY_POST_LIKE_USER_ID)
                            .from(CommunityPostLike::Table, CommunityPostLike::UserId)
                            .to(CivitasUser::Table, CivitasUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommunityPostLike::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CommunityPostLike {
    Table,
    PostId,
    UserId,
    CreatedAt,
}
