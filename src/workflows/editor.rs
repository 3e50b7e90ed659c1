// Editor-side article form and rich-text helpers

use regex::Regex;
use std::sync::LazyLock;

use crate::api::types::{Article, ArticlePayload, ArticleStatus};

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// True when the markup renders no visible text, e.g. `<p></p>` or `<p><br></p>`
pub fn html_is_blank(html: &str) -> bool {
    let text = HTML_TAG.replace_all(html, "");
    text.replace("&nbsp;", " ").trim().is_empty()
}

/// URL slug: lowercase ASCII alphanumerics joined by single hyphens
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_SLUG.replace_all(&lowered, "-").trim_matches('-').to_string()
}

/// Comma-separated tag input into a clean list
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Field values of the article being edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleForm {
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    /// Rich-text body as HTML
    pub content: String,
    pub excerpt: String,
    pub category_id: String,
    pub tags: Vec<String>,
    /// Server status of the loaded article; `None` for a new one
    pub status: Option<ArticleStatus>,
}

impl ArticleForm {
    pub fn from_article(article: &Article) -> Self {
        Self {
            id: Some(article.id.clone()),
            title: article.title.clone(),
            slug: article.slug.clone(),
            content: article.content.clone(),
            excerpt: article.excerpt.clone().unwrap_or_default(),
            category_id: article.category_id.clone().unwrap_or_default(),
            tags: article.tags.clone(),
            status: Some(article.status),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Names of required fields that are still empty
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if html_is_blank(&self.content) {
            missing.push("content");
        }
        if self.category_id.trim().is_empty() {
            missing.push("category");
        }
        missing
    }

    pub fn to_payload(&self, status: ArticleStatus) -> ArticlePayload {
        let slug = if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            self.slug.trim().to_string()
        };
        ArticlePayload {
            id: self.id.clone(),
            title: self.title.trim().to_string(),
            slug,
            content: self.content.clone(),
            excerpt: self.excerpt.trim().to_string(),
            category_id: self.category_id.trim().to_string(),
            tags: self.tags.clone(),
            status,
        }
    }
}
