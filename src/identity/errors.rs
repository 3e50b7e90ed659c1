use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// Provider refused the request; message is the provider's own wording
    #[error("{message}")]
    Rejected { code: Option<String>, message: String },
    /// The pending sign-up no longer exists on the provider side
    #[error("Your sign-up session has expired. Please start again.")]
    SignupExpired,
    #[error("Could not reach the identity provider: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),
}
