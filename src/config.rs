use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base API URL baked in at build time, overridable at runtime
const BUILD_API_BASE_URL: Option<&str> = option_env!("EDU_PORTAL_API_URL");

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Main configuration structure for the portal client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortalConfig {
    /// Backend REST API settings
    pub api: ApiConfig,
    /// External identity provider settings
    pub identity: IdentityConfig,
    /// Where the login session is kept between invocations
    pub session: SessionConfig,
    /// Article submission workflow settings
    pub submission: SubmissionConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every REST path is joined onto
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Frontend API of the identity provider
    pub frontend_api_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Session file path
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmissionConfig {
    /// Pause between a successful submission and the return to the article list
    pub redirect_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
}

impl SubmissionConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: BUILD_API_BASE_URL
                    .unwrap_or(DEFAULT_API_BASE_URL)
                    .to_string(),
            },
            identity: IdentityConfig {
                frontend_api_url: "http://localhost:5001".to_string(),
            },
            session: SessionConfig {
                path: PathBuf::from(".edu-portal/session.json"),
            },
            submission: SubmissionConfig {
                redirect_delay_ms: 1500,
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
            },
        }
    }
}

impl PortalConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (edu-portal.toml, .edu-portal-rc)
    /// 3. Environment variables (prefixed with EDU_PORTAL__)
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&PortalConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        if Path::new("edu-portal.toml").exists() {
            builder = builder.add_source(File::with_name("edu-portal"));
        }

        if Path::new(".edu-portal-rc").exists() {
            builder = builder.add_source(
                File::with_name(".edu-portal-rc").format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("EDU_PORTAL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}
