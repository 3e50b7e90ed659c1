use anyhow::{Context, Result};
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::PortalConfig;
use crate::session::{FileSessionStore, Session, SessionStore};

pub mod articles;
pub mod auth;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod signup;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Everything a command needs from the environment
pub struct CommandContext {
    pub config: PortalConfig,
    pub sessions: Arc<dyn SessionStore>,
}

impl CommandContext {
    pub fn new(config: PortalConfig) -> Self {
        let sessions = Arc::new(FileSessionStore::new(config.session.path.clone()));
        Self { config, sessions }
    }

    pub fn with_sessions(config: PortalConfig, sessions: Arc<dyn SessionStore>) -> Self {
        Self { config, sessions }
    }

    /// Client carrying the stored session when there is one
    pub async fn api_client(&self) -> Result<ApiClient> {
        let client = ApiClient::new(&self.config.api.base_url)
            .with_context(|| format!("Invalid API base URL '{}'", self.config.api.base_url))?;
        Ok(match self.sessions.load().await? {
            Some(session) => client.with_session(session),
            None => client,
        })
    }

    /// Client for commands that only make sense when logged in; `None` without a session
    pub async fn authenticated_client(&self) -> Result<Option<ApiClient>> {
        let client = self.api_client().await?;
        Ok(client.session().is_some().then_some(client))
    }

    pub async fn remember(&self, session: &Session) -> Result<()> {
        self.sessions.save(session).await
    }
}

pub fn show_login_required() {
    println!("🔒 Not logged in.");
    println!("  🔑 edu-portal login                      # Log in");
    println!("  🆕 edu-portal signup --type individual   # Create an account");
}

pub async fn show_how_to_get_started() -> Result<()> {
    println!("🎓 edu-portal");
    println!();
    println!("To get started:");
    println!("  🆕 edu-portal signup --type individual   # Create an account");
    println!("  🔑 edu-portal login                      # Log in");
    println!("  📊 edu-portal dashboard                  # See your account");
    println!("  📝 edu-portal articles list              # Your articles");
    println!();
    println!("💡 Run 'edu-portal --help' for every command.");
    Ok(())
}
