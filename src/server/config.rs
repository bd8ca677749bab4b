use std::net::SocketAddr;

use crate::server::error::config::ConfigError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// OAuth2 / OpenID Connect settings of the external identity provider.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub callback_url: String,
}

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_addr: SocketAddr,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require =
            |key: &str| lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", e))?;

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            valkey_url: require("VALKEY_URL")?,
            bind_addr,
            provider: ProviderConfig {
                client_id: require("OAUTH_CLIENT_ID")?,
                client_secret: require("OAUTH_CLIENT_SECRET")?,
                auth_url: require("OAUTH_AUTH_URL")?,
                token_url: require("OAUTH_TOKEN_URL")?,
                userinfo_url: require("OAUTH_USERINFO_URL")?,
                callback_url: require("OAUTH_CALLBACK_URL")?,
            },
        })
    }
}
