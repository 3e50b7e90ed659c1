use async_trait::async_trait;
use serde_json::json;

#[cfg(test)]
use mockall::automock;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::api::types::{LoginRequest, LoginResponse, ProfileFields, ResetPasswordRequest, UserRecord};
use crate::session::Session;

/// Password login and account recovery
#[async_trait]
pub trait AuthOperations: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError>;

    /// Ask the backend to email a reset link; returns its acknowledgement
    async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError>;

    async fn reset_password(&self, token: &str, password: &str) -> Result<Option<String>, ApiError>;

    async fn current_user(&self) -> Result<UserRecord, ApiError>;

    /// Browser URL that starts the Google sign-in round trip
    fn google_oauth_start_url(&self) -> String;
}

/// Writes identity-provider profile data into the local user store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileSync: Send + Sync {
    /// Full sync carrying the profile fields collected at signup
    async fn sync_profile(&self, token: &str, profile: &ProfileFields) -> Result<UserRecord, ApiError>;

    /// Narrower sync: the backend derives what it can from the token alone
    async fn sync_token(&self, token: &str) -> Result<UserRecord, ApiError>;
}

#[async_trait]
impl AuthOperations for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let response: LoginResponse = self
            .post("/auth/login", &LoginRequest { email, password }, false)
            .await?;
        tracing::info!(user_id = %response.user.id, "Logged in");
        Ok(Session::new(response.token).with_user(response.user))
    }

    async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError> {
        self.post_ack("/auth/forgot-password", &json!({ "email": email }), false)
            .await
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<Option<String>, ApiError> {
        self.post_ack(
            "/auth/reset-password",
            &ResetPasswordRequest { token, password },
            false,
        )
        .await
    }

    async fn current_user(&self) -> Result<UserRecord, ApiError> {
        self.get("/auth/me", true).await
    }

    fn google_oauth_start_url(&self) -> String {
        self.url("/auth/oauth/google/start")
    }
}

#[async_trait]
impl ProfileSync for ApiClient {
    async fn sync_profile(&self, token: &str, profile: &ProfileFields) -> Result<UserRecord, ApiError> {
        self.clone()
            .with_session(Session::new(token))
            .post("/users/sync-profile", profile, true)
            .await
    }

    async fn sync_token(&self, token: &str) -> Result<UserRecord, ApiError> {
        self.clone()
            .with_session(Session::new(token))
            .post("/users/sync", &json!({}), true)
            .await
    }
}
