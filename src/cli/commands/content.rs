use anyhow::Result;

use super::{Command, CommandContext};
use crate::api::types::ContentView;
use crate::api::ContentOperations;
use crate::cli::OrientationCommands;

pub struct OrientationCommand {
    pub command: OrientationCommands,
}

impl Command for OrientationCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let client = ctx.api_client().await?;

        match &self.command {
            OrientationCommands::List { category } => match client.orientation_resources(category.as_deref()).await {
                Ok(resources) if resources.is_empty() => println!("📭 No orientation resources found"),
                Ok(resources) => {
                    println!("🧭 ORIENTATION RESOURCES:");
                    for resource in resources {
                        let badge = if resource.premium { " 💎" } else { "" };
                        println!("   {}{}  [{}]", resource.title, badge, resource.slug);
                        if let Some(summary) = &resource.summary {
                            println!("      {summary}");
                        }
                    }
                }
                Err(e) => println!("❌ {e}"),
            },
            OrientationCommands::Show { slug } => match client.orientation_resource(slug).await {
                Ok(ContentView::Ready(resource)) => {
                    println!("🧭 {}", resource.title);
                    println!();
                    println!("{}", resource.content.or(resource.summary).unwrap_or_default());
                }
                Ok(ContentView::NotFound) => println!("❓ Resource '{slug}' was not found"),
                Ok(ContentView::PremiumRequired) => {
                    println!("💎 '{slug}' is premium content. Upgrade your plan to read it.")
                }
                Err(e) => println!("❌ {e}"),
            },
        }
        Ok(())
    }
}

pub struct DocsCommand;

impl Command for DocsCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let client = ctx.api_client().await?;
        match client.docs().await {
            Ok(entries) => {
                println!("📚 DOCUMENTATION:");
                for entry in entries {
                    match &entry.url {
                        Some(url) => println!("   {} - {url}", entry.title),
                        None => println!("   {}", entry.title),
                    }
                }
            }
            Err(e) => println!("❌ {e}"),
        }
        Ok(())
    }
}

pub struct LocalizedCommand {
    pub lang: String,
}

impl Command for LocalizedCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let client = ctx.api_client().await?;
        match client.localized_content(&self.lang).await {
            Ok(items) if items.is_empty() => println!("📭 Nothing translated into '{}' yet", self.lang),
            Ok(items) => {
                for item in items {
                    println!("🌍 [{}] {}", item.lang, item.title);
                    if !item.body.is_empty() {
                        println!("{}", item.body);
                    }
                    println!();
                }
            }
            Err(e) => println!("❌ {e}"),
        }
        Ok(())
    }
}
