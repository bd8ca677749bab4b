//! Test configuration constants for the mocked identity provider.
//!
//! None of these are real credentials.

/// Mock OAuth2 client ID.
pub static TEST_CLIENT_ID: &str = "civitas_client_id";

/// Mock OAuth2 client secret.
pub static TEST_CLIENT_SECRET: &str = "civitas_client_secret";

/// Mock OAuth2 callback URL.
pub static TEST_CALLBACK_URL: &str = "http://localhost:8080/api/auth/callback";

/// Path of the mocked authorize endpoint on the mockito server.
pub static TEST_AUTH_PATH: &str = "/oauth/authorize";

/// Path of the mocked token endpoint on the mockito server.
pub static TEST_TOKEN_PATH: &str = "/oauth/token";

/// Path of the mocked userinfo endpoint on the mockito server.
pub static TEST_USERINFO_PATH: &str = "/oauth/userinfo";
