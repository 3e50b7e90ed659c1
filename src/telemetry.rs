use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize structured JSON logging on stderr.
///
/// `RUST_LOG` wins over the configured level so a single run can be made chatty
/// without editing the config file. Stdout stays reserved for command output.
pub fn init_telemetry(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()?;

    tracing::debug!("edu-portal telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the requests of one invocation
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping one user-facing workflow
pub fn create_workflow_span(workflow: &str, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "portal_workflow",
        workflow = workflow,
        correlation.id = correlation_id,
    )
}
