use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::errors::IdentityError;
use super::types::{PendingSignup, SignupRequest, VerificationAttempt, VerificationStatus};
use super::IdentityProvider;

const EMAIL_CODE_STRATEGY: &str = "email_code";

/// Paths addressing one existing sign-up; a missing resource there means it expired
const SIGNUP_SCOPED_PREFIX: &str = "/v1/client/sign_ups/";

#[derive(Debug, Deserialize)]
struct ProviderResponse<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct SignupResource {
    status: String,
    #[serde(default)]
    created_session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResource {
    jwt: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrors {
    #[serde(default)]
    errors: Vec<ProviderErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorItem {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    long_message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Identity provider reached over its frontend HTTP API
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, IdentityError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .user_agent(concat!("edu-portal/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<String, IdentityError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%path, status = status.as_u16(), "Identity provider request finished");

        if status.is_success() {
            Ok(text)
        } else {
            Err(Self::classify_error(status, &text, path.starts_with(SIGNUP_SCOPED_PREFIX)))
        }
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> Result<T, IdentityError> {
        let text = self.post(path, body).await?;
        serde_json::from_str(&text).map_err(|e| IdentityError::InvalidResponse(e.to_string()))
    }

    fn classify_error(status: StatusCode, body: &str, signup_scoped: bool) -> IdentityError {
        let first = serde_json::from_str::<ProviderErrors>(body)
            .ok()
            .and_then(|errors| errors.errors.into_iter().next());

        let code = first.as_ref().and_then(|e| e.code.clone());
        let missing = status == StatusCode::NOT_FOUND || code.as_deref() == Some("resource_not_found");
        if signup_scoped && missing {
            return IdentityError::SignupExpired;
        }

        let message = first
            .and_then(|e| e.long_message.or(e.message))
            .unwrap_or_else(|| format!("Identity provider returned HTTP {}", status.as_u16()));
        IdentityError::Rejected { code, message }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_pending_signup(&self, request: &SignupRequest) -> Result<PendingSignup, IdentityError> {
        let body = serde_json::to_value(request).map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;
        let created: ProviderResponse<PendingSignup> = self.post_json("/v1/client/sign_ups", body).await?;
        info!(signup_id = %created.response.id, "Pending sign-up created");
        Ok(created.response)
    }

    async fn send_verification_code(&self, signup_id: &str) -> Result<(), IdentityError> {
        self.post(
            &format!("/v1/client/sign_ups/{signup_id}/prepare_verification"),
            json!({ "strategy": EMAIL_CODE_STRATEGY }),
        )
        .await?;
        info!(%signup_id, "Verification code sent");
        Ok(())
    }

    async fn attempt_verification(&self, signup_id: &str, code: &str) -> Result<VerificationAttempt, IdentityError> {
        let attempt: ProviderResponse<SignupResource> = self
            .post_json(
                &format!("/v1/client/sign_ups/{signup_id}/attempt_verification"),
                json!({ "strategy": EMAIL_CODE_STRATEGY, "code": code }),
            )
            .await?;
        Ok(VerificationAttempt {
            status: VerificationStatus::from(attempt.response.status.as_str()),
            created_session_id: attempt.response.created_session_id,
        })
    }

    async fn activate_session(&self, session_id: &str) -> Result<(), IdentityError> {
        self.post(&format!("/v1/client/sessions/{session_id}/touch"), json!({}))
            .await?;
        Ok(())
    }

    async fn mint_token(&self, session_id: &str) -> Result<String, IdentityError> {
        let token: TokenResource = self
            .post_json(&format!("/v1/client/sessions/{session_id}/tokens"), json!({}))
            .await?;
        Ok(token.jwt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_message_wins() {
        let err = HttpIdentityProvider::classify_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors":[{"message":"taken","long_message":"That email address is taken. Please try another.","code":"form_identifier_exists"}]}"#,
            false,
        );
        match err {
            IdentityError::Rejected { code, message } => {
                assert_eq!(code.as_deref(), Some("form_identifier_exists"));
                assert_eq!(message, "That email address is taken. Please try another.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_signup_is_expired() {
        let err = HttpIdentityProvider::classify_error(StatusCode::NOT_FOUND, "", true);
        assert!(matches!(err, IdentityError::SignupExpired));

        let err = HttpIdentityProvider::classify_error(
            StatusCode::BAD_REQUEST,
            r#"{"errors":[{"message":"not found","code":"resource_not_found"}]}"#,
            true,
        );
        assert!(matches!(err, IdentityError::SignupExpired));
    }

    #[test]
    fn not_found_outside_signup_is_a_plain_rejection() {
        let err = HttpIdentityProvider::classify_error(StatusCode::NOT_FOUND, "", false);
        assert_eq!(err.to_string(), "Identity provider returned HTTP 404");
    }

    #[test]
    fn unparseable_body_uses_status() {
        let err = HttpIdentityProvider::classify_error(StatusCode::BAD_GATEWAY, "gateway down", false);
        assert_eq!(err.to_string(), "Identity provider returned HTTP 502");
    }
}
