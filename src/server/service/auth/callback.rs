use sea_orm::DatabaseConnection;

use crate::server::{
    error::Error, identity::IdentityProvider, model::db::UserModel, service::user::UserService,
};

pub struct CallbackService<'a> {
    db: &'a DatabaseConnection,
    provider: &'a IdentityProvider,
}

impl<'a> CallbackService<'a> {
    /// Creates a new instance of [`CallbackService`]
    pub fn new(db: &'a DatabaseConnection, provider: &'a IdentityProvider) -> Self {
        Self { db, provider }
    }

    /// Exchanges the authorization code and returns the mirrored user
    ///
    /// The code exchange is not retried: authorization codes are single use.
    ///
    /// # Returns
    /// - `Ok(UserModel)` - Existing or newly created user for the provider subject
    /// - `Err(Error::TokenError)` - Provider rejected the authorization code
    /// - `Err(Error::ReqwestError)` - Userinfo request failed
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn handle_callback(&self, code: &str) -> Result<UserModel, Error> {
        let info = self.provider.exchange_code(code).await?;

        UserService::new(self.db).get_or_create_user(info).await
    }
}
