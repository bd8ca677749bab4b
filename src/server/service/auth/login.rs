use crate::server::identity::{AuthenticationData, IdentityProvider};

/// Builds the provider login URL and the CSRF state to keep in the session
pub fn login_service(provider: &IdentityProvider) -> AuthenticationData {
    provider.login_url()
}
