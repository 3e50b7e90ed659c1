use anyhow::Result;
use clap::Parser;
use tracing::Instrument;

use edu_portal::cli::commands::articles::ArticlesCommand;
use edu_portal::cli::commands::auth::{
    ForgotPasswordCommand, GoogleLoginCommand, LoginCommand, LogoutCommand, ResetPasswordCommand,
};
use edu_portal::cli::commands::config::ConfigCommand;
use edu_portal::cli::commands::content::{DocsCommand, LocalizedCommand, OrientationCommand};
use edu_portal::cli::commands::dashboard::DashboardCommand;
use edu_portal::cli::commands::signup::SignupCommand;
use edu_portal::cli::commands::{show_how_to_get_started, Command, CommandContext};
use edu_portal::cli::{Cli, Commands};
use edu_portal::{create_workflow_span, generate_correlation_id, init_telemetry, PortalConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    PortalConfig::load_env_file()?;
    let config = PortalConfig::load()?;
    init_telemetry(&config.observability.log_level)?;

    let Some(command) = cli.command else {
        return tokio::runtime::Runtime::new()?.block_on(show_how_to_get_started());
    };

    let ctx = CommandContext::new(config);
    let span = create_workflow_span(workflow_name(&command), &generate_correlation_id());

    tokio::runtime::Runtime::new()?.block_on(dispatch(command, &ctx).instrument(span))
}

async fn dispatch(command: Commands, ctx: &CommandContext) -> Result<()> {
    match command {
        Commands::Login { email } => LoginCommand { email }.execute(ctx).await,
        Commands::Logout => LogoutCommand.execute(ctx).await,
        Commands::ForgotPassword { email } => ForgotPasswordCommand { email }.execute(ctx).await,
        Commands::ResetPassword { token } => ResetPasswordCommand { token }.execute(ctx).await,
        Commands::GoogleLogin => GoogleLoginCommand.execute(ctx).await,
        Commands::Signup { account_type } => SignupCommand { account_type }.execute(ctx).await,
        Commands::Dashboard => DashboardCommand.execute(ctx).await,
        Commands::Articles { command } => ArticlesCommand { command }.execute(ctx).await,
        Commands::Orientation { command } => OrientationCommand { command }.execute(ctx).await,
        Commands::Docs => DocsCommand.execute(ctx).await,
        Commands::Localized { lang } => LocalizedCommand { lang }.execute(ctx).await,
        Commands::Config { command } => ConfigCommand { command }.execute(ctx).await,
    }
}

fn workflow_name(command: &Commands) -> &'static str {
    match command {
        Commands::Login { .. } => "login",
        Commands::Logout => "logout",
        Commands::ForgotPassword { .. } => "forgot_password",
        Commands::ResetPassword { .. } => "reset_password",
        Commands::GoogleLogin => "google_login",
        Commands::Signup { .. } => "signup",
        Commands::Dashboard => "dashboard",
        Commands::Articles { .. } => "articles",
        Commands::Orientation { .. } => "orientation",
        Commands::Docs => "docs",
        Commands::Localized { .. } => "localized",
        Commands::Config { .. } => "config",
    }
}
