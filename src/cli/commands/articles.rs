use anyhow::{Context, Result};
use std::sync::Arc;

use super::{show_login_required, Command, CommandContext};
use crate::api::types::{Article, SubmissionQuota};
use crate::cli::prompt::{TerminalConfirmation, TerminalNavigator};
use crate::cli::{ArticleCommands, ArticleFields};
use crate::workflows::{available_actions, parse_tags, ArticleForm, ArticleWorkspace, DeleteOutcome};

pub struct ArticlesCommand {
    pub command: ArticleCommands,
}

impl ArticlesCommand {
    async fn workspace(&self, ctx: &CommandContext, assume_yes: bool) -> Result<Option<ArticleWorkspace>> {
        let Some(client) = ctx.authenticated_client().await? else {
            return Ok(None);
        };
        Ok(Some(ArticleWorkspace::new(
            Arc::new(client),
            Arc::new(TerminalNavigator),
            Arc::new(TerminalConfirmation::new(assume_yes)),
            ctx.config.submission.redirect_delay(),
        )))
    }
}

impl Command for ArticlesCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let assume_yes = matches!(self.command, ArticleCommands::Delete { yes: true, .. });
        let Some(mut workspace) = self.workspace(ctx, assume_yes).await? else {
            show_login_required();
            return Ok(());
        };

        let editing = match &self.command {
            ArticleCommands::Draft { id, .. } | ArticleCommands::Submit { id, .. } => id.as_deref(),
            _ => None,
        };
        if let Err(e) = workspace.load(editing).await {
            println!("❌ {e}");
            return Ok(());
        }

        match &self.command {
            ArticleCommands::List => print_articles(workspace.articles()),
            ArticleCommands::Quota => {
                if let Some(quota) = workspace.quota() {
                    print_quota(quota);
                }
            }
            ArticleCommands::Draft { fields, .. } => {
                apply_fields(workspace.form_mut(), fields).await?;
                match workspace.save_draft().await {
                    Ok(article) => println!("💾 Draft saved ({})", article.id),
                    Err(e) => println!("❌ {e}"),
                }
            }
            ArticleCommands::Submit { fields, .. } => {
                apply_fields(workspace.form_mut(), fields).await?;
                match workspace.submit_for_review().await {
                    Ok(outcome) => println!("✅ {}", outcome.message),
                    Err(e) => println!("❌ {e}"),
                }
            }
            ArticleCommands::Delete { id, .. } => match workspace.delete(id).await {
                Ok(DeleteOutcome::Deleted) => {
                    println!("🗑️  Article deleted");
                    if let Some(quota) = workspace.quota() {
                        print_quota(quota);
                    }
                }
                Ok(DeleteOutcome::Cancelled) => println!("❌ Deletion cancelled"),
                Err(e) => println!("❌ {e}"),
            },
        }
        Ok(())
    }
}

async fn apply_fields(form: &mut ArticleForm, fields: &ArticleFields) -> Result<()> {
    if let Some(title) = &fields.title {
        form.title = title.clone();
    }
    if let Some(slug) = &fields.slug {
        form.slug = slug.clone();
    }
    if let Some(content) = &fields.content {
        form.content = content.clone();
    }
    if let Some(path) = &fields.content_file {
        form.content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading article body from {}", path.display()))?;
    }
    if let Some(excerpt) = &fields.excerpt {
        form.excerpt = excerpt.clone();
    }
    if let Some(category_id) = &fields.category_id {
        form.category_id = category_id.clone();
    }
    if let Some(tags) = &fields.tags {
        form.tags = parse_tags(tags);
    }
    Ok(())
}

fn print_articles(articles: &[Article]) {
    if articles.is_empty() {
        println!("📭 You have not written any articles yet");
        return;
    }

    println!("📝 YOUR ARTICLES:");
    println!("────────────────");
    for article in articles {
        let actions: Vec<String> = available_actions(article)
            .into_iter()
            .map(|a| format!("{a:?}").to_lowercase())
            .collect();
        println!(
            "{} {:<16} {}  [{}]  ({})",
            article.status.marker(),
            article.status.label(),
            article.title,
            article.id,
            actions.join(", ")
        );
        if let Some(reason) = &article.rejection_reason {
            println!("   ↳ Rejected: {reason}");
        }
    }
}

fn print_quota(quota: &SubmissionQuota) {
    println!(
        "⏳ Pending review: {}/{} ({} remaining)",
        quota.pending_count, quota.max_pending, quota.remaining
    );
    if !quota.can_submit {
        println!("   Submission limit reached; wait for a review before sending a new article");
    }
}
