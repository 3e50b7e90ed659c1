//! External identity provider abstractions
//!
//! Account creation and email verification happen at a third-party identity
//! provider. The [`IdentityProvider`] trait is the seam the signup workflow
//! talks to; [`HttpIdentityProvider`] speaks the provider's frontend API.

pub mod errors;
pub mod http;
pub mod types;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

pub use errors::IdentityError;
pub use http::HttpIdentityProvider;
pub use types::{PendingSignup, SignupRequest, VerificationAttempt, VerificationStatus};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register the profile as a sign-up awaiting verification
    async fn create_pending_signup(&self, request: &SignupRequest) -> Result<PendingSignup, IdentityError>;

    /// Email a one-time code for the pending sign-up
    async fn send_verification_code(&self, signup_id: &str) -> Result<(), IdentityError>;

    async fn attempt_verification(&self, signup_id: &str, code: &str) -> Result<VerificationAttempt, IdentityError>;

    /// Make the newly created session the active one
    async fn activate_session(&self, session_id: &str) -> Result<(), IdentityError>;

    /// Fresh access token for calls to the platform backend
    async fn mint_token(&self, session_id: &str) -> Result<String, IdentityError>;
}
