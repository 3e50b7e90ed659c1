use clap::{Parser, Subcommand};

pub mod commands;
pub mod prompt;

#[derive(Parser)]
#[command(name = "edu-portal")]
#[command(about = "Terminal client for the education portal")]
#[command(long_about = "Sign up, log in, and manage the articles you submit to the education portal. \
                       Start with 'edu-portal signup --type individual' or 'edu-portal login'.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long, help = "Account email; prompted for when omitted")]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Email a password reset link
    ForgotPassword {
        #[arg(long, help = "Account email; prompted for when omitted")]
        email: Option<String>,
    },
    /// Set a new password using the token from the reset email
    ResetPassword {
        #[arg(long, help = "Reset token from the email link")]
        token: String,
    },
    /// Print the URL that starts Google sign-in in a browser
    GoogleLogin,
    /// Create an account and verify its email address
    Signup {
        /// Account type: individual or institution
        #[arg(long = "type", value_name = "TYPE")]
        account_type: Option<String>,
    },
    /// Show who is logged in and a summary of their account
    Dashboard,
    /// Manage your submitted articles
    Articles {
        #[command(subcommand)]
        command: ArticleCommands,
    },
    /// Browse orientation resources
    Orientation {
        #[command(subcommand)]
        command: OrientationCommands,
    },
    /// List documentation entries
    Docs,
    /// Show content translated into a language
    Localized {
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Field overrides shared by `draft` and `submit`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ArticleFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, help = "Explicit slug; derived from the title when empty")]
    pub slug: Option<String>,
    #[arg(long, help = "Article body as HTML", conflicts_with = "content_file")]
    pub content: Option<String>,
    #[arg(long, help = "Read the HTML body from a file")]
    pub content_file: Option<std::path::PathBuf>,
    #[arg(long)]
    pub excerpt: Option<String>,
    #[arg(long = "category", value_name = "CATEGORY_ID")]
    pub category_id: Option<String>,
    #[arg(long, help = "Comma-separated tags")]
    pub tags: Option<String>,
}

#[derive(Subcommand)]
pub enum ArticleCommands {
    /// List your articles with their review status
    List,
    /// Show how many articles you may still send for review
    Quota,
    /// Save an article as a draft
    Draft {
        #[arg(long, help = "Existing article to update")]
        id: Option<String>,
        #[command(flatten)]
        fields: ArticleFields,
    },
    /// Send an article for editorial review
    Submit {
        #[arg(long, help = "Existing article to resubmit")]
        id: Option<String>,
        #[command(flatten)]
        fields: ArticleFields,
    },
    /// Delete a draft or rejected article
    Delete {
        id: String,
        #[arg(short = 'y', long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum OrientationCommands {
    /// List resources, optionally within one category
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a single resource
    Show { slug: String },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_signup_type() {
        let cli = Cli::parse_from(["edu-portal", "signup", "--type", "institution"]);
        match cli.command {
            Some(Commands::Signup { account_type }) => assert_eq!(account_type.as_deref(), Some("institution")),
            _ => panic!("expected signup"),
        }
    }

    #[test]
    fn parses_article_submit_fields() {
        let cli = Cli::parse_from([
            "edu-portal", "articles", "submit", "--title", "Hello", "--category", "c1", "--tags", "a,b",
        ]);
        match cli.command {
            Some(Commands::Articles {
                command: ArticleCommands::Submit { id, fields },
            }) => {
                assert!(id.is_none());
                assert_eq!(fields.title.as_deref(), Some("Hello"));
                assert_eq!(fields.category_id.as_deref(), Some("c1"));
            }
            _ => panic!("expected articles submit"),
        }
    }
}
