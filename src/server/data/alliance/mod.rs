//! Alliance records and the repositories scoped to an alliance.

pub mod comment;
pub mod like;
pub mod member;
pub mod post;

use chrono::Utc;
use entity::sea_orm_active_enums::AllianceVisibility;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

const APPROVED_MEMBERS: &str = "(SELECT COUNT(*) FROM alliance_member \
     WHERE alliance_member.alliance_id = alliance.id \
     AND alliance_member.status = 'approved')";

/// Fields of a new alliance.
#[derive(Clone, Debug)]
pub struct NewAlliance {
    pub name: String,
    pub description: String,
    pub rules: Option<String>,
    pub visibility: AllianceVisibility,
}

/// Detail changes to apply; `None` leaves a field untouched, `rules: Some(None)` clears them.
#[derive(Clone, Debug, Default)]
pub struct AllianceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rules: Option<Option<String>>,
    pub visibility: Option<AllianceVisibility>,
}

pub struct AllianceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AllianceRepository<'a, C> {
    /// Creates a new instance of [`AllianceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an alliance counting the founding community as its only member
    pub async fn create(
        &self,
        alliance: NewAlliance,
        creator: &entity::civitas_user::Model,
        founding_community_id: i32,
    ) -> Result<entity::alliance::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let alliance = entity::alliance::ActiveModel {
            name: ActiveValue::Set(alliance.name),
            description: ActiveValue::Set(alliance.description),
            creator_id: ActiveValue::Set(creator.id),
            creator_name: ActiveValue::Set(creator.display_name.clone()),
            founding_community_id: ActiveValue::Set(founding_community_id),
            member_community_count: ActiveValue::Set(1),
            rules: ActiveValue::Set(alliance.rules),
            visibility: ActiveValue::Set(alliance.visibility),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        alliance.insert(self.db).await
    }

    pub async fn get(&self, alliance_id: i32) -> Result<Option<entity::alliance::Model>, DbErr> {
        entity::prelude::Alliance::find_by_id(alliance_id)
            .one(self.db)
            .await
    }

    /// Lists alliances newest first
    pub async fn list(&self) -> Result<Vec<entity::alliance::Model>, DbErr> {
        entity::prelude::Alliance::find()
            .order_by_desc(entity::alliance::Column::CreatedAt)
            .order_by_desc(entity::alliance::Column::Id)
            .all(self.db)
            .await
    }

    /// Ids of the alliances created by `user_id`
    pub async fn ids_created_by(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Alliance::find()
            .select_only()
            .column(entity::alliance::Column::Id)
            .filter(entity::alliance::Column::CreatorId.eq(user_id))
            .order_by_asc(entity::alliance::Column::Id)
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        alliance: entity::alliance::Model,
        changes: AllianceChanges,
    ) -> Result<entity::alliance::Model, DbErr> {
        let mut alliance_am = alliance.into_active_model();
        if let Some(name) = changes.name {
            alliance_am.name = ActiveValue::Set(name);
        }
        if let Some(description) = changes.description {
            alliance_am.description = ActiveValue::Set(description);
        }
        if let Some(rules) = changes.rules {
            alliance_am.rules = ActiveValue::Set(rules);
        }
        if let Some(visibility) = changes.visibility {
            alliance_am.visibility = ActiveValue::Set(visibility);
        }
        alliance_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        alliance_am.update(self.db).await
    }

    /// Adds `delta` to `member_community_count`, never taking it below zero
    pub async fn adjust_member_count(&self, alliance_id: i32, delta: i32) -> Result<u64, DbErr> {
        let column = entity::alliance::Column::MemberCommunityCount;
        let mut update = entity::prelude::Alliance::update_many()
            .col_expr(column, Expr::col(column).add(delta))
            .filter(entity::alliance::Column::Id.eq(alliance_id));
        if delta < 0 {
            update = update.filter(column.gte(-delta));
        }

        Ok(update.exec(self.db).await?.rows_affected)
    }

    pub async fn recount(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::Alliance::update_many()
            .col_expr(
                entity::alliance::Column::MemberCommunityCount,
                Expr::cust(APPROVED_MEMBERS),
            )
            .filter(Expr::cust(format!(
                "member_community_count <> {}",
                APPROVED_MEMBERS
            )))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes an alliance
    ///
    /// Returns OK regardless of the alliance existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, alliance_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Alliance::delete_by_id(alliance_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use civitas_test_utils::prelude::*;
        use entity::sea_orm_active_enums::AllianceVisibility;

        use crate::server::data::alliance::{AllianceRepository, NewAlliance};

        /// Expect the alliance to start with one member community
        #[tokio::test]
        async fn creates_alliance() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let community = test.community().insert_community(&ada, false).await?;

            let alliance_repo = AllianceRepository::new(&test.state.db);
            let result = alliance_repo
                .create(
                    NewAlliance {
                        name: "Delta".to_string(),
                        description: "River towns".to_string(),
                        rules: None,
                        visibility: AllianceVisibility::Private,
                    },
                    &ada,
                    community.id,
                )
                .await;

            assert!(result.is_ok());
            let alliance = result.unwrap();
            assert_eq!(alliance.member_community_count, 1);
            assert_eq!(alliance.founding_community_id, community.id);
            assert_eq!(alliance.creator_name, "Ada");

            let created = alliance_repo.ids_created_by(ada.id).await.unwrap();
            assert_eq!(created, vec![alliance.id]);

            Ok(())
        }
    }

    mod update {
        use civitas_test_utils::prelude::*;
        use entity::sea_orm_active_enums::AllianceVisibility;

        use crate::server::data::alliance::{AllianceChanges, AllianceRepository};

        /// Expect rules to be cleared while untouched fields keep their value
        #[tokio::test]
        async fn clears_rules() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let community = test.community().insert_community(&ada, false).await?;
            let alliance = test
                .alliance()
                .insert_alliance(&community, AllianceVisibility::Public)
                .await?;

            let alliance_repo = AllianceRepository::new(&test.state.db);
            let with_rules = alliance_repo
                .update(
                    alliance,
                    AllianceChanges {
                        rules: Some(Some("Be kind".to_string())),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            let cleared = alliance_repo
                .update(
                    with_rules.clone(),
                    AllianceChanges {
                        rules: Some(None),
                        visibility: Some(AllianceVisibility::Private),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(with_rules.rules.as_deref(), Some("Be kind"));
            assert!(cleared.rules.is_none());
            assert_eq!(cleared.visibility, AllianceVisibility::Private);
            assert_eq!(cleared.name, with_rules.name);

            Ok(())
        }
    }

    mod adjust_member_count {
        use civitas_test_utils::prelude::*;
        use entity::sea_orm_active_enums::AllianceVisibility;

        use crate::server::data::alliance::AllianceRepository;

        /// Expect the count to stop at zero
        #[tokio::test]
        async fn floors_at_zero() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let community = test.community().insert_community(&ada, false).await?;
            let alliance = test
                .alliance()
                .insert_alliance(&community, AllianceVisibility::Public)
                .await?;

            let alliance_repo = AllianceRepository::new(&test.state.db);
            let first = alliance_repo.adjust_member_count(alliance.id, -1).await;
            let second = alliance_repo.adjust_member_count(alliance.id, -1).await;

            assert_eq!(first.unwrap(), 1);
            assert_eq!(second.unwrap(), 0);
            let updated = alliance_repo.get(alliance.id).await.unwrap().unwrap();
            assert_eq!(updated.member_community_count, 0);

            Ok(())
        }
    }
}
