use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CivitasUser::Table)
                    .if_not_exists()
                    .col(pk_auto(CivitasUser::Id))
                    .col(string_uniq(CivitasUser::Subject))
                    .col(string(CivitasUser::Email))
                    .col(string(CivitasUser::DisplayName))
                    .col(string_null(CivitasUser::PhotoUrl))
                    .col(text_null(CivitasUser::Bio))
                    .col(string_null(CivitasUser::Location))
                    .col(text_null(CivitasUser::Expertise))
                    .col(timestamp(CivitasUser::CreatedAt))
                    .col(timestamp(CivitasUser::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CivitasUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CivitasUser {
    Table,
    Id,
    Subject,
    Email,
    DisplayName,
    PhotoUrl,
    Bio,
    Location,
    Expertise,
    CreatedAt,
    UpdatedAt,
}
