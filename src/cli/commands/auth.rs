use anyhow::Result;

use super::{Command, CommandContext};
use crate::api::AuthOperations;
use crate::cli::prompt::{prompt, prompt_required};
use crate::navigation::Route;

pub struct LoginCommand {
    pub email: Option<String>,
}

impl Command for LoginCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let email = match &self.email {
            Some(email) => email.clone(),
            None => prompt_required("Email")?,
        };
        let password = prompt_required("Password")?;

        let client = ctx.api_client().await?;
        match client.login(&email, &password).await {
            Ok(session) => {
                ctx.remember(&session).await?;
                let name = session
                    .user
                    .as_ref()
                    .map(|u| u.display_name())
                    .unwrap_or(email);
                println!("✅ Welcome back, {name}");
                println!("➡️  Continue at {}", Route::Dashboard);
            }
            Err(e) => println!("❌ {e}"),
        }
        Ok(())
    }
}

pub struct LogoutCommand;

impl Command for LogoutCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        ctx.sessions.clear().await?;
        println!("👋 Logged out");
        Ok(())
    }
}

pub struct ForgotPasswordCommand {
    pub email: Option<String>,
}

impl Command for ForgotPasswordCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let email = match &self.email {
            Some(email) => email.clone(),
            None => prompt_required("Email")?,
        };

        let client = ctx.api_client().await?;
        match client.forgot_password(&email).await {
            Ok(message) => println!(
                "📧 {}",
                message.unwrap_or_else(|| "If that address has an account, a reset link is on its way.".to_string())
            ),
            Err(e) => println!("❌ {e}"),
        }
        Ok(())
    }
}

pub struct ResetPasswordCommand {
    pub token: String,
}

impl Command for ResetPasswordCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let password = prompt_required("New password")?;
        let confirmation = prompt("Repeat new password")?;
        if password != confirmation {
            println!("❌ Passwords do not match");
            return Ok(());
        }

        let client = ctx.api_client().await?;
        match client.reset_password(&self.token, &password).await {
            Ok(message) => {
                println!("✅ {}", message.unwrap_or_else(|| "Password updated.".to_string()));
                println!("➡️  Continue at {}", Route::Login);
            }
            Err(e) => println!("❌ {e}"),
        }
        Ok(())
    }
}

pub struct GoogleLoginCommand;

impl Command for GoogleLoginCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let client = ctx.api_client().await?;
        println!("🌐 Open this URL in a browser to sign in with Google:");
        println!("   {}", client.google_oauth_start_url());
        Ok(())
    }
}
