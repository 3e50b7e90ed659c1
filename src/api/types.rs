// Wire types shared with the backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard response wrapper used by every backend endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Institution,
    Counselor,
    Admin,
    #[serde(other)]
    Other,
}

/// Local user record mirrored from the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
}

impl UserRecord {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.email.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserRecord,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub password: &'a str,
}

/// Profile fields written into the local user record after signup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub account_type: String,
}

/// Lifecycle of a user-submitted article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Published,
}

impl ArticleStatus {
    /// Only drafts and rejected articles can be removed by their author
    pub fn is_deletable(self) -> bool {
        matches!(self, ArticleStatus::Draft | ArticleStatus::Rejected)
    }

    /// Only drafts and rejected articles can be saved or (re)submitted
    pub fn is_editable(self) -> bool {
        matches!(self, ArticleStatus::Draft | ArticleStatus::Rejected)
    }

    pub fn label(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "Draft",
            ArticleStatus::Pending => "Pending review",
            ArticleStatus::Approved => "Approved",
            ArticleStatus::Rejected => "Rejected",
            ArticleStatus::Published => "Published",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "✏️",
            ArticleStatus::Pending => "⏳",
            ArticleStatus::Approved => "✅",
            ArticleStatus::Rejected => "❌",
            ArticleStatus::Published => "🌐",
        }
    }

    pub fn colour(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "gray",
            ArticleStatus::Pending => "yellow",
            ArticleStatus::Approved => "blue",
            ArticleStatus::Rejected => "red",
            ArticleStatus::Published => "green",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Pending => "pending",
            ArticleStatus::Approved => "approved",
            ArticleStatus::Rejected => "rejected",
            ArticleStatus::Published => "published",
        }
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
}

/// Body of `POST /user-articles/submit`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category_id: String,
    pub tags: Vec<String>,
    pub status: ArticleStatus,
}

/// Pending-submission allowance reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionQuota {
    pub pending_count: u32,
    pub max_pending: u32,
    pub remaining: u32,
    pub can_submit: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationResource {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub has_access: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedContent {
    pub id: String,
    pub lang: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Outcome of fetching a single piece of gated content
#[derive(Debug, Clone, PartialEq)]
pub enum ContentView<T> {
    Ready(T),
    NotFound,
    PremiumRequired,
}
