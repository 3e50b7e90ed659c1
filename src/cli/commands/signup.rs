use anyhow::{Context, Result};
use std::sync::Arc;

use super::{Command, CommandContext};
use crate::cli::prompt::{prompt, prompt_required, DeferredNavigator, TerminalNavigator};
use crate::identity::HttpIdentityProvider;
use crate::navigation::Navigator;
use crate::workflows::profile_sync::SyncOutcome;
use crate::workflows::signup::State;
use crate::workflows::{AccountType, SignupCompletion, SignupEntry, SignupError, SignupFlow, SignupProfile};

pub struct SignupCommand {
    pub account_type: Option<String>,
}

impl Command for SignupCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let account_type = match SignupEntry::resolve(self.account_type.as_deref()) {
            SignupEntry::Engage(account_type) => account_type,
            SignupEntry::Redirect(route) => {
                println!("⚠️  Choose an account type first: --type individual or --type institution");
                TerminalNavigator.navigate(route);
                return Ok(());
            }
        };
        let navigator = Arc::new(DeferredNavigator::default());

        let identity = HttpIdentityProvider::new(&ctx.config.identity.frontend_api_url)
            .context("Invalid identity provider URL")?;
        let profiles = ctx.api_client().await?;

        let mut flow = SignupFlow::new(Arc::new(identity), Arc::new(profiles), navigator.clone(), account_type);

        println!("🆕 Creating {} account", describe(account_type));
        println!();

        loop {
            match flow.state().clone() {
                State::Form { .. } => {
                    let profile = SignupProfile {
                        first_name: prompt("First name")?,
                        last_name: prompt("Last name")?,
                        email: prompt("Email")?,
                        password: prompt("Password")?,
                    };
                    if let Err(e) = flow.submit_profile(profile).await {
                        println!("❌ {e}");
                    }
                }
                State::Verify { email, .. } => {
                    println!("📧 We sent a 6-digit code to {email}. Type 'restart' to change your details.");
                    let code = prompt_required("Verification code")?;
                    if code.eq_ignore_ascii_case("restart") {
                        flow.restart();
                        continue;
                    }
                    let result = flow.verify_code(&code).await;
                    if let Ok(completion) = &result {
                        if let Some(session) = &completion.session {
                            ctx.remember(session).await?;
                        }
                        if completion.sync == SyncOutcome::Failed {
                            tracing::warn!("Account created without a synchronized local profile");
                        }
                    }
                    if let Some(line) = verification_report(&result, flow.state()) {
                        println!("{line}");
                    }
                    navigator.flush();
                }
                State::Failed { message } => {
                    println!("❌ {message}");
                    flow.restart();
                }
                State::Complete { .. } => return Ok(()),
            }
        }
    }
}

/// Line to print after a verification attempt; `None` when the failed state reports it
fn verification_report(result: &Result<SignupCompletion, SignupError>, state: &State) -> Option<String> {
    match (result, state) {
        (Ok(_), _) => Some("✅ Email verified, your account is ready".to_string()),
        (Err(_), State::Failed { .. }) => None,
        (Err(e), _) => Some(format!("❌ {e}")),
    }
}

fn describe(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Individual => "an individual",
        AccountType::Institution => "an institution",
    }
}
