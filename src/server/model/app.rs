use sea_orm::DatabaseConnection;

use crate::server::identity::IdentityProvider;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub provider: IdentityProvider,
}
