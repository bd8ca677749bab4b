//! User profile service.
//!
//! Users are mirrored from the identity provider on login. The ids of the communities a
//! user leads and the alliances they created are not stored on the user; they are read
//! from indexed lookups in the same transaction as the profile itself.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        community::CommunityDto,
        user::{UpdateProfileDto, UserDto},
    },
    server::{
        data::{
            alliance::AllianceRepository,
            community::CommunityRepository,
            user::{ProfileChanges, UserRepository},
        },
        error::Error,
        identity::ProviderUserInfo,
        model::db::UserModel,
        service::retry::RetryContext,
        util::validate::{
            expertise_list, optional_text, required_text, split_expertise, MAX_BIO_LEN,
            MAX_NAME_LEN, MAX_URL_LEN,
        },
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves the user record without derived fields
    pub async fn get_user_model(&self, user_id: i32) -> Result<Option<UserModel>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("get user ID {}", user_id), || {
                let db = db.clone();

                Box::pin(async move { Ok(UserRepository::new(&db).get(user_id).await?) })
            })
            .await
    }

    /// Retrieves a user's profile with the communities they lead and alliances they created
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))` - User found
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("get profile of user ID {}", user_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let txn = db.begin().await?;

                    let Some(user) = UserRepository::new(&txn).get(user_id).await? else {
                        return Ok(None);
                    };
                    let profile = build_user_dto(&txn, user).await?;

                    txn.commit().await?;

                    Ok(Some(profile))
                })
            })
            .await
    }

    /// Finds the user mirrored for the provider subject, creating them on first login
    ///
    /// The email is refreshed from the provider on every login. Display name and photo are
    /// only taken from the provider when the user is created; afterwards the profile owns them.
    pub async fn get_or_create_user(&self, info: ProviderUserInfo) -> Result<UserModel, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("login of subject {}", info.sub), || {
                let db = db.clone();
                let info = info.clone();

                Box::pin(async move {
                    let user_repo = UserRepository::new(&db);

                    if let Some(user) = user_repo.find_by_subject(&info.sub).await? {
                        return Ok(user_repo.update_email(user, &info.email).await?);
                    }

                    let display_name = if info.name.trim().is_empty() {
                        info.email.clone()
                    } else {
                        info.name.trim().to_string()
                    };
                    let user = user_repo
                        .create(&info.sub, &info.email, &display_name, info.picture)
                        .await?;

                    tracing::info!(user_id = user.id, "Created user for new provider subject");

                    Ok(user)
                })
            })
            .await
    }

    /// Applies profile changes and returns the updated profile
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))` - Profile updated
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::ValidationError)` - A field was empty or too long
    pub async fn update_profile(
        &self,
        user_id: i32,
        update: UpdateProfileDto,
    ) -> Result<Option<UserDto>, Error> {
        let changes = ProfileChanges {
            display_name: update
                .display_name
                .map(|name| required_text("display_name", &name, MAX_NAME_LEN))
                .transpose()?,
            bio: update
                .bio
                .map(|bio| optional_text("bio", &bio, MAX_BIO_LEN))
                .transpose()?,
            photo_url: update
                .photo_url
                .map(|url| optional_text("photo_url", &url, MAX_URL_LEN))
                .transpose()?,
            location: update
                .location
                .map(|location| optional_text("location", &location, MAX_NAME_LEN))
                .transpose()?,
            expertise: update
                .expertise
                .map(|tags| expertise_list(&tags))
                .transpose()?,
        };

        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("update profile of user ID {}", user_id), || {
                let db = db.clone();
                let changes = changes.clone();

                Box::pin(async move {
                    let txn = db.begin().await?;

                    let Some(user) = UserRepository::new(&txn)
                        .update_profile(user_id, changes)
                        .await?
                    else {
                        return Ok(None);
                    };
                    let profile = build_user_dto(&txn, user).await?;

                    txn.commit().await?;

                    Ok(Some(profile))
                })
            })
            .await
    }

    /// Communities in which the user's membership is approved
    pub async fn joined_communities(&self, user_id: i32) -> Result<Vec<CommunityDto>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("joined communities of user ID {}", user_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let communities = CommunityRepository::new(&db).joined_by(user_id).await?;

                    Ok(communities.into_iter().map(CommunityDto::from).collect())
                })
            })
            .await
    }
}

async fn build_user_dto<C: ConnectionTrait>(db: &C, user: UserModel) -> Result<UserDto, Error> {
    let led_community_ids = CommunityRepository::new(db).ids_led_by(user.id).await?;
    let created_alliance_ids = AllianceRepository::new(db).ids_created_by(user.id).await?;

    Ok(UserDto {
        id: user.id,
        expertise: split_expertise(user.expertise.as_deref()),
        email: user.email,
        display_name: user.display_name,
        photo_url: user.photo_url,
        bio: user.bio,
        location: user.location,
        led_community_ids,
        created_alliance_ids,
        created_at: user.created_at,
    })
}
