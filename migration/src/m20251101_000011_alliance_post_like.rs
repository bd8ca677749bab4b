use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_civitas_user::CivitasUser, m20251101_000009_alliance_post::AlliancePost,
};

static FK_ALLIANCE_POST_LIKE_POST_ID: &str = "fk-alliance_post_like-post_id";
static FK_ALLIANCE_POST_LIKE_USER_ID: &str = "fk-alliance_post_like-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlliancePostLike::Table)
                    .if_not_exists()
                    .col(integer(AlliancePostLike::PostId))
                    .col(integer(AlliancePostLike::UserId))
                    .col(timestamp(AlliancePostLike::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(AlliancePostLike::PostId)
                            .col(AlliancePostLike::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_POST_LIKE_POST_ID)
                            .from(AlliancePostLike::Table, AlliancePostLike::PostId)
                            .to(AlliancePost::Table, AlliancePost::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_POST_LIKE_USER_ID)
                            .from(AlliancePostLike::Table, AlliancePostLike::UserId)
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
            .drop_table(Table::drop().table(AlliancePostLike::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AlliancePostLike {
    Table,
    PostId,
    UserId,
    CreatedAt,
}
