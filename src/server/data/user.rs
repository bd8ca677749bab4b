use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

/// Profile changes to apply; `None` leaves a field untouched, `Some(None)` clears it.
#[derive(Clone, Debug, Default)]
pub struct ProfileChanges {
    pub display_name: Option<String>,
    pub bio: Option<Option<String>>,
    pub photo_url: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub expertise: Option<Option<String>>,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a user mirrored from the identity provider
    pub async fn create(
        &self,
        subject: &str,
        email: &str,
        display_name: &str,
        photo_url: Option<String>,
    ) -> Result<entity::civitas_user::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let user = entity::civitas_user::ActiveModel {
            subject: ActiveValue::Set(subject.to_string()),
            email: ActiveValue::Set(email.to_string()),
            display_name: ActiveValue::Set(display_name.to_string()),
            photo_url: ActiveValue::Set(photo_url),
            bio: ActiveValue::Set(None),
            location: ActiveValue::Set(None),
            expertise: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::civitas_user::Model>, DbErr> {
        entity::prelude::CivitasUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<entity::civitas_user::Model>, DbErr> {
        entity::prelude::CivitasUser::find()
            .filter(entity::civitas_user::Column::Subject.eq(subject))
            .one(self.db)
            .await
    }

    /// Refreshes the email reported by the provider on login
    pub async fn update_email(
        &self,
        user: entity::civitas_user::Model,
        email: &str,
    ) -> Result<entity::civitas_user::Model, DbErr> {
        if user.email == email {
            return Ok(user);
        }

        let mut user_am = user.into_active_model();
        user_am.email = ActiveValue::Set(email.to_string());
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        user_am.update(self.db).await
    }

    /// Applies profile changes, returning `None` if the user does not exist
    pub async fn update_profile(
        &self,
        user_id: i32,
        changes: ProfileChanges,
    ) -> Result<Option<entity::civitas_user::Model>, DbErr> {
        let user = match entity::prelude::CivitasUser::find_by_id(user_id)
            .one(self.db)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        if let Some(display_name) = changes.display_name {
            user_am.display_name = ActiveValue::Set(display_name);
        }
        if let Some(bio) = changes.bio {
            user_am.bio = ActiveValue::Set(bio);
        }
        if let Some(photo_url) = changes.photo_url {
            user_am.photo_url = ActiveValue::Set(photo_url);
        }
        if let Some(location) = changes.location {
            user_am.location = ActiveValue::Set(location);
        }
        if let Some(expertise) = changes.expertise {
            user_am.expertise = ActiveValue::Set(expertise);
        }
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }
}
