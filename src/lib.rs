// edu-portal library: headless client for the education portal
// This exposes the workflows and API clients for the CLI and for testing

pub mod api;
pub mod cli;
pub mod config;
pub mod identity;
pub mod navigation;
pub mod session;
pub mod telemetry;
pub mod workflows;

// Re-export key types for easy access
pub use api::{ApiClient, ApiError, ArticleOperations, AuthOperations, ContentOperations, ProfileSync};
pub use config::PortalConfig;
pub use identity::{HttpIdentityProvider, IdentityError, IdentityProvider};
pub use navigation::{Navigator, Route};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
pub use workflows::{
    AccountType, ArticleWorkspace, Confirmation, SignupFlow, SubmissionError, SyncOutcome,
};
