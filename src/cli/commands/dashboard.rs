use anyhow::Result;

use super::{show_login_required, Command, CommandContext};
use crate::api::{ArticleOperations, AuthOperations, ContentOperations};

pub struct DashboardCommand;

impl Command for DashboardCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let Some(client) = ctx.authenticated_client().await? else {
            show_login_required();
            return Ok(());
        };

        let user = match client.current_user().await {
            Ok(user) => user,
            Err(e) => {
                println!("❌ {e}");
                return Ok(());
            }
        };

        println!("📊 DASHBOARD");
        println!("============");
        println!("👤 {} <{}>", user.display_name(), user.email);
        if let Some(role) = user.role {
            println!("   Role: {role:?}");
        }
        if let Some(account_type) = &user.account_type {
            println!("   Account type: {account_type}");
        }
        println!();

        match (client.my_articles().await, client.submission_quota().await) {
            (Ok(articles), Ok(quota)) => {
                println!("📝 Articles: {}", articles.len());
                println!(
                    "   Pending review: {}/{} ({} remaining)",
                    quota.pending_count, quota.max_pending, quota.remaining
                );
            }
            (Err(e), _) | (_, Err(e)) => println!("⚠️  Could not load articles: {e}"),
        }

        if user.is_admin() {
            println!();
            println!("🛡️  USERS:");
            match client.admin_users().await {
                Ok(users) => {
                    for u in users {
                        println!("   {} <{}>", u.display_name(), u.email);
                    }
                }
                Err(e) => println!("⚠️  Could not load users: {e}"),
            }
        }
        Ok(())
    }
}
