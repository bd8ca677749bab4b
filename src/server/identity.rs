//! Client for the external OAuth2 / OpenID Connect identity provider.
//!
//! The provider owns sign-up, passwords and credential storage. Civitas only runs the
//! authorization-code flow against it and reads the resulting userinfo claims.

use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    EndpointNotSet, EndpointSet, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::server::{
    config::ProviderConfig,
    error::{config::ConfigError, Error},
};

type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Login URL and the CSRF state that must come back on the callback.
pub struct AuthenticationData {
    pub login_url: String,
    pub state: String,
}

/// Claims returned by the provider's userinfo endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ProviderUserInfo {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

#[derive(Clone)]
pub struct IdentityProvider {
    client: ConfiguredClient,
    /// Shared by the token exchange and userinfo requests; never follows redirects.
    http: reqwest::Client,
    userinfo_url: String,
}

impl IdentityProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, Error> {
        let client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(
                AuthUrl::new(config.auth_url.clone())
                    .map_err(|e| ConfigError::invalid("OAUTH_AUTH_URL", e))?,
            )
            .set_token_uri(
                TokenUrl::new(config.token_url.clone())
                    .map_err(|e| ConfigError::invalid("OAUTH_TOKEN_URL", e))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(config.callback_url.clone())
                    .map_err(|e| ConfigError::invalid("OAUTH_CALLBACK_URL", e))?,
            );
        oauth2::url::Url::parse(&config.userinfo_url)
            .map_err(|e| ConfigError::invalid("OAUTH_USERINFO_URL", e))?;

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            http,
            userinfo_url: config.userinfo_url.clone(),
        })
    }

    /// Builds the provider authorize URL with a fresh CSRF state.
    pub fn login_url(&self) -> AuthenticationData {
        let (url, csrf) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url();

        AuthenticationData {
            login_url: url.to_string(),
            state: csrf.secret().to_string(),
        }
    }

    /// Exchanges an authorization code for a token and fetches the userinfo claims with it.
    pub async fn exchange_code(&self, code: &str) -> Result<ProviderUserInfo, Error> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await?;

        let user_info = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<ProviderUserInfo>()
            .await?;

        Ok(user_info)
    }
}

#[cfg(test)]
mod tests {
    use crate::server::{
        config::ProviderConfig,
        error::{config::ConfigError, Error},
        identity::IdentityProvider,
    };

    fn provider_config() -> ProviderConfig {
        ProviderConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            auth_url: "https://id.example.com/authorize".to_string(),
            token_url: "https://id.example.com/token".to_string(),
            userinfo_url: "https://id.example.com/userinfo".to_string(),
            callback_url: "http://localhost:8080/api/auth/callback".to_string(),
        }
    }

    /// Expect the login URL to target the authorize endpoint and carry the returned state
    #[test]
    fn builds_login_url_with_state() {
        let provider = IdentityProvider::new(&provider_config()).unwrap();

        let login = provider.login_url();

        assert!(login
            .login_url
            .starts_with("https://id.example.com/authorize?"));
        assert!(login.login_url.contains(&format!("state={}", login.state)));
        assert!(login.login_url.contains("client_id=client"));
    }

    /// Expect InvalidEnvValue naming the variable of a malformed provider URL
    #[test]
    fn fails_for_invalid_url() {
        let mut config = provider_config();
        config.userinfo_url = "not a url".to_string();

        let result = IdentityProvider::new(&config);

        assert!(matches!(
            result,
            Err(Error::ConfigError(ConfigError::InvalidEnvValue { var, .. }))
                if var == "OAUTH_USERINFO_URL"
        ));
    }
}
