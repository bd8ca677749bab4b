//! Builds the application state handlers expect from a [`TestSetup`].

use civitas::server::{config::ProviderConfig, identity::IdentityProvider, model::app::AppState};
use civitas_test_utils::{constant, TestSetup};

/// Extension trait for TestSetup to create the handler AppState
pub trait TestSetupExt {
    fn app_state(&self) -> AppState;
}

impl TestSetupExt for TestSetup {
    /// AppState sharing the test database, with the identity provider pointed at the mock server
    fn app_state(&self) -> AppState {
        let provider = IdentityProvider::new(&ProviderConfig {
            client_id: constant::TEST_CLIENT_ID.to_string(),
            client_secret: constant::TEST_CLIENT_SECRET.to_string(),
            auth_url: self.provider_url(constant::TEST_AUTH_PATH),
            token_url: self.provider_url(constant::TEST_TOKEN_PATH),
            userinfo_url: self.provider_url(constant::TEST_USERINFO_PATH),
            callback_url: constant::TEST_CALLBACK_URL.to_string(),
        })
        .expect("Failed to build identity provider for mock server");

        AppState {
            db: self.state.db.clone(),
            provider,
        }
    }
}
