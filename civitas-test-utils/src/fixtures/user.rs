use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn user<'a>(&'a self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> UserFixtures<'a> {
    /// Inserts a user whose provider subject and email are derived from `display_name`.
    pub async fn insert_user(
        &self,
        display_name: &str,
    ) -> Result<entity::civitas_user::Model, TestError> {
        let now = Utc::now().naive_utc();
        let slug = display_name.to_lowercase().replace(' ', ".");

        Ok(
            entity::prelude::CivitasUser::insert(entity::civitas_user::ActiveModel {
                subject: ActiveValue::Set(format!("provider|{}", slug)),
                email: ActiveValue::Set(format!("{}@example.com", slug)),
                display_name: ActiveValue::Set(display_name.to_string()),
                photo_url: ActiveValue::Set(None),
                bio: ActiveValue::Set(None),
                location: ActiveValue::Set(None),
                expertise: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
