pub use sea_orm_migration::prelude::*;

mod m20251101_000001_civitas_user;
mod m20251101_000002_alliance;
mod m20251101_000003_community;
mod m20251101_000004_community_member;
mod m20251101_000005_community_post;
mod m20251101_000006_community_post_comment;
mod m20251101_000007_community_post_like;
mod m20251101_000008_alliance_member;
mod m20251101_000009_alliance_post;
mod m20251101_000010_alliance_post_comment;
mod m20251101_000011_alliance_post_like;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_civitas_user::Migration),
            Box::new(m20251101_000002_alliance::Migration),
            Box::new(m20251101_000003_community::Migration),
            Box::new(m20251101_000004_community_member::Migration),
            Box::new(m20251101_000005_community_post::Migration),
            Box::new(m20251101_000006_community_post_comment::Migration),
            Box::new(m20251101_000007_community_post_like::Migration),
            Box::new(m20251101_000008_alliance_member::Migration),
            Box::new(m20251101_000009_alliance_post::Migration),
            Box::new(m20251101_000010_alliance_post_comment::Migration),
            Box::new(m20251101_000011_alliance_post_like::Migration),
        ]
    }
}
