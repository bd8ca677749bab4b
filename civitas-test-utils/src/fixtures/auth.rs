//! Mock endpoints for the identity provider's authorization-code flow.

use mockito::Mock;
use serde_json::json;

use crate::{
    constant::{TEST_TOKEN_PATH, TEST_USERINFO_PATH},
    TestSetup,
};

impl TestSetup {
    pub fn auth<'a>(&'a mut self) -> AuthFixtures<'a> {
        AuthFixtures { setup: self }
    }
}

pub struct AuthFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> AuthFixtures<'a> {
    /// Create mock token and userinfo endpoints for a successful login.
    ///
    /// # Arguments
    /// - `subject` - Provider subject returned by the userinfo endpoint
    /// - `email` - Email returned by the userinfo endpoint
    /// - `name` - Display name returned by the userinfo endpoint
    ///
    /// # Returns
    /// - `Vec<Mock>` - The token and userinfo mocks, each expected to be hit once
    pub fn create_provider_endpoints(&mut self, subject: &str, email: &str, name: &str) -> Vec<Mock> {
        let token_body = json!({
            "access_token": "mock_access_token",
            "token_type": "bearer",
            "expires_in": 3600
        });

        let userinfo_body = json!({
            "sub": subject,
            "email": email,
            "name": name,
            "picture": null
        });

        let token_endpoint = self
            .setup
            .server
            .mock("POST", TEST_TOKEN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_body.to_string())
            .expect(1)
            .create();

        let userinfo_endpoint = self
            .setup
            .server
            .mock("GET", TEST_USERINFO_PATH)
            .match_header("authorization", "Bearer mock_access_token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(userinfo_body.to_string())
            .expect(1)
            .create();

        vec![token_endpoint, userinfo_endpoint]
    }

    /// Create token and userinfo endpoints where userinfo answers with a redirect.
    ///
    /// # Returns
    /// - `Vec<Mock>` - The token and redirecting userinfo mocks, each expected once, and the
    ///   redirect target, expected never
    pub fn create_redirecting_userinfo_endpoint(&mut self) -> Vec<Mock> {
        let redirect_path = format!("{}/moved", TEST_USERINFO_PATH);
        let redirect_url = format!("{}{}", self.setup.server.url(), redirect_path);

        let token_endpoint = self
            .setup
            .server
            .mock("POST", TEST_TOKEN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "access_token": "mock_access_token",
                    "token_type": "bearer",
                    "expires_in": 3600
                })
                .to_string(),
            )
            .expect(1)
            .create();

        let userinfo_endpoint = self
            .setup
            .server
            .mock("GET", TEST_USERINFO_PATH)
            .with_status(302)
            .with_header("location", &redirect_url)
            .expect(1)
            .create();

        let redirect_target = self
            .setup
            .server
            .mock("GET", redirect_path.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "sub": "provider|mallory",
                    "email": "mallory@example.com",
                    "name": "Mallory",
                    "picture": null
                })
                .to_string(),
            )
            .expect(0)
            .create();

        vec![token_endpoint, userinfo_endpoint, redirect_target]
    }

    /// Create a token endpoint that rejects the authorization code.
    pub fn create_rejecting_token_endpoint(&mut self) -> Mock {
        self.setup
            .server
            .mock("POST", TEST_TOKEN_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(json!({ "error": "invalid_grant" }).to_string())
            .create()
    }
}
