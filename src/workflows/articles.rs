//! Author-side article workflow: load, save as draft, submit for review, delete.
//!
//! The backend owns article state and enforces the pending-submission quota.
//! This workflow mirrors the same gates locally so that a request which is bound
//! to fail is never sent:
//!
//! - submitting requires a title, non-blank content and a category;
//! - a *new* article cannot be submitted while the quota reports `canSubmit = false`;
//! - only `draft` and `rejected` articles can be saved, resubmitted or deleted.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[cfg(test)]
use mockall::automock;

use crate::api::types::{Article, ArticleStatus, SubmissionQuota};
use crate::api::{ApiError, ArticleOperations};
use crate::navigation::{Navigator, Route};
use crate::workflows::editor::ArticleForm;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Please fill in the required fields before submitting: {}", .missing.join(", "))]
    MissingFields { missing: Vec<&'static str> },
    #[error("Submission limit reached: you already have {pending_count} of {max_pending} articles pending review")]
    QuotaExceeded { pending_count: u32, max_pending: u32 },
    #[error("Articles with status '{status}' cannot be deleted")]
    NotDeletable { status: ArticleStatus },
    #[error("Articles with status '{status}' can no longer be edited")]
    NotEditable { status: ArticleStatus },
    #[error("Article not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Asks the author to confirm a destructive action
#[cfg_attr(test, automock)]
pub trait Confirmation: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

/// Actions a listing may offer for an article
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleAction {
    View,
    Edit,
    Delete,
}

pub fn available_actions(article: &Article) -> Vec<ArticleAction> {
    match article.status {
        ArticleStatus::Draft | ArticleStatus::Rejected => {
            vec![ArticleAction::View, ArticleAction::Edit, ArticleAction::Delete]
        }
        ArticleStatus::Pending | ArticleStatus::Approved | ArticleStatus::Published => {
            vec![ArticleAction::View]
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub article: Article,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

pub struct ArticleWorkspace {
    api: Arc<dyn ArticleOperations>,
    navigator: Arc<dyn Navigator>,
    confirmation: Arc<dyn Confirmation>,
    redirect_delay: Duration,
    articles: Vec<Article>,
    quota: Option<SubmissionQuota>,
    form: ArticleForm,
}

impl ArticleWorkspace {
    pub fn new(
        api: Arc<dyn ArticleOperations>,
        navigator: Arc<dyn Navigator>,
        confirmation: Arc<dyn Confirmation>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            api,
            navigator,
            confirmation,
            redirect_delay,
            articles: Vec::new(),
            quota: None,
            form: ArticleForm::default(),
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn quota(&self) -> Option<&SubmissionQuota> {
        self.quota.as_ref()
    }

    pub fn form(&self) -> &ArticleForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ArticleForm {
        &mut self.form
    }

    /// Fetch the author's articles and quota, then open `editing` in the form
    pub async fn load(&mut self, editing: Option<&str>) -> Result<(), SubmissionError> {
        self.articles = self.api.my_articles().await?;
        self.quota = Some(self.api.submission_quota().await?);

        self.form = match editing {
            Some(id) => {
                let article = self
                    .articles
                    .iter()
                    .find(|a| a.id == id)
                    .ok_or_else(|| SubmissionError::NotFound(id.to_string()))?;
                ArticleForm::from_article(article)
            }
            None => ArticleForm::default(),
        };

        info!(
            articles = self.articles.len(),
            editing = ?editing,
            can_submit = self.quota.map(|q| q.can_submit),
            "Article workspace loaded"
        );
        Ok(())
    }

    pub async fn refresh_quota(&mut self) -> Result<SubmissionQuota, SubmissionError> {
        let quota = self.api.submission_quota().await?;
        self.quota = Some(quota);
        Ok(quota)
    }

    /// Save current fields as a draft; no quota or required-field checks
    pub async fn save_draft(&mut self) -> Result<Article, SubmissionError> {
        self.ensure_editable()?;

        let payload = self.form.to_payload(ArticleStatus::Draft);
        let article = self.api.submit_article(&payload).await?;
        self.remember(&article);
        Ok(article)
    }

    /// Send the article for editorial review.
    ///
    /// On success waits the redirect delay, then navigates to the article list.
    pub async fn submit_for_review(&mut self) -> Result<SubmitOutcome, SubmissionError> {
        self.ensure_editable()?;

        let missing = self.form.missing_required();
        if !missing.is_empty() {
            return Err(SubmissionError::MissingFields { missing });
        }

        if self.form.is_new() {
            if let Some(quota) = self.quota.filter(|q| !q.can_submit) {
                warn!(
                    pending = quota.pending_count,
                    max = quota.max_pending,
                    "Submission blocked by pending quota"
                );
                return Err(SubmissionError::QuotaExceeded {
                    pending_count: quota.pending_count,
                    max_pending: quota.max_pending,
                });
            }
        }

        let payload = self.form.to_payload(ArticleStatus::Pending);
        let article = self.api.submit_article(&payload).await?;
        self.remember(&article);
        info!(article_id = %article.id, "Article submitted for review");

        tokio::time::sleep(self.redirect_delay).await;
        self.navigator.navigate(Route::ArticleList);

        Ok(SubmitOutcome {
            article,
            message: "Your article has been submitted for review.".to_string(),
        })
    }

    /// Delete a draft or rejected article after confirmation
    pub async fn delete(&mut self, id: &str) -> Result<DeleteOutcome, SubmissionError> {
        let article = self
            .articles
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| SubmissionError::NotFound(id.to_string()))?;

        if !article.status.is_deletable() {
            return Err(SubmissionError::NotDeletable { status: article.status });
        }

        let question = format!("Delete \"{}\"? This cannot be undone.", article.title);
        if !self.confirmation.confirm(&question) {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.api.delete_article(id).await?;
        self.articles.retain(|a| a.id != id);
        if self.form.id.as_deref() == Some(id) {
            self.form = ArticleForm::default();
        }

        if let Err(e) = self.refresh_quota().await {
            warn!(article_id = %id, error = %e, "Article deleted but quota refresh failed");
        }
        Ok(DeleteOutcome::Deleted)
    }

    fn ensure_editable(&self) -> Result<(), SubmissionError> {
        match self.form.status {
            Some(status) if !status.is_editable() => Err(SubmissionError::NotEditable { status }),
            _ => Ok(()),
        }
    }

    fn remember(&mut self, article: &Article) {
        match self.articles.iter_mut().find(|a| a.id == article.id) {
            Some(existing) => *existing = article.clone(),
            None => self.articles.insert(0, article.clone()),
        }
        self.form.id = Some(article.id.clone());
        self.form.status = Some(article.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::articles::MockArticleOperations;
    use crate::navigation::MockNavigator;
    use reqwest::StatusCode;

    fn article(id: &str, status: ArticleStatus) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Article {id}"),
            slug: format!("article-{id}"),
            content: "<p>Body</p>".to_string(),
            excerpt: None,
            category_id: Some("orientation".to_string()),
            tags: vec![],
            status,
            created_at: None,
            updated_at: None,
            submitted_at: None,
            published_at: None,
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
            views: 0,
            likes: 0,
            comments: 0,
            shares: 0,
        }
    }

    fn quota(pending: u32, max: u32) -> SubmissionQuota {
        SubmissionQuota {
            pending_count: pending,
            max_pending: max,
            remaining: max.saturating_sub(pending),
            can_submit: pending < max,
        }
    }

    fn workspace(api: MockArticleOperations, navigator: MockNavigator, confirm: MockConfirmation) -> ArticleWorkspace {
        ArticleWorkspace::new(
            Arc::new(api),
            Arc::new(navigator),
            Arc::new(confirm),
            Duration::from_millis(1500),
        )
    }

    fn fill(form: &mut ArticleForm) {
        form.title = "Studying abroad".into();
        form.content = "<p>Start early.</p>".into();
        form.category_id = "orientation".into();
    }

    #[tokio::test]
    async fn quota_exhausted_blocks_new_submission_without_request() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles().times(1).returning(|| Ok(vec![]));
        api.expect_submission_quota().times(1).returning(|| Ok(quota(3, 3)));
        api.expect_submit_article().times(0);

        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(0);

        let mut ws = workspace(api, navigator, MockConfirmation::new());
        ws.load(None).await.unwrap();
        fill(ws.form_mut());

        let err = ws.submit_for_review().await.unwrap_err();
        assert!(matches!(err, SubmissionError::QuotaExceeded { pending_count: 3, max_pending: 3 }));
        assert!(err.to_string().contains("limit reached"));
    }

    #[tokio::test]
    async fn missing_fields_block_submission_without_request() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles().returning(|| Ok(vec![]));
        api.expect_submission_quota().returning(|| Ok(quota(0, 3)));
        api.expect_submit_article().times(0);

        let mut ws = workspace(api, MockNavigator::new(), MockConfirmation::new());
        ws.load(None).await.unwrap();
        ws.form_mut().title = "Only a title".into();
        ws.form_mut().content = "<p><br></p>".into();

        match ws.submit_for_review().await.unwrap_err() {
            SubmissionError::MissingFields { missing } => assert_eq!(missing, vec!["content", "category"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_article_can_be_resubmitted_at_full_quota() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles()
            .returning(|| Ok(vec![article("a1", ArticleStatus::Rejected)]));
        api.expect_submission_quota().returning(|| Ok(quota(3, 3)));
        api.expect_submit_article()
            .withf(|payload| payload.id.as_deref() == Some("a1") && payload.status == ArticleStatus::Pending)
            .times(1)
            .returning(|_| Ok(article("a1", ArticleStatus::Pending)));

        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|route| *route == Route::ArticleList)
            .times(1)
            .return_const(());

        let mut ws = workspace(api, navigator, MockConfirmation::new());
        ws.load(Some("a1")).await.unwrap();
        let outcome = ws.submit_for_review().await.unwrap();

        assert_eq!(outcome.article.status, ArticleStatus::Pending);
        assert_eq!(ws.articles()[0].status, ArticleStatus::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_waits_for_redirect_delay() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles().returning(|| Ok(vec![]));
        api.expect_submission_quota().returning(|| Ok(quota(0, 3)));
        api.expect_submit_article()
            .times(1)
            .returning(|_| Ok(article("new", ArticleStatus::Pending)));

        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(1).return_const(());

        let mut ws = workspace(api, navigator, MockConfirmation::new());
        ws.load(None).await.unwrap();
        fill(ws.form_mut());

        let started = tokio::time::Instant::now();
        ws.submit_for_review().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(ws.form().id.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn backend_rejection_surfaces_message() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles().returning(|| Ok(vec![]));
        api.expect_submission_quota().returning(|| Ok(quota(0, 3)));
        api.expect_submit_article().times(1).returning(|_| {
            Err(ApiError::Rejected {
                status: StatusCode::CONFLICT,
                message: "An article with this slug already exists".into(),
            })
        });

        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(0);

        let mut ws = workspace(api, navigator, MockConfirmation::new());
        ws.load(None).await.unwrap();
        fill(ws.form_mut());

        let err = ws.submit_for_review().await.unwrap_err();
        assert_eq!(err.to_string(), "An article with this slug already exists");
    }

    #[tokio::test]
    async fn draft_save_skips_gates() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles().returning(|| Ok(vec![]));
        api.expect_submission_quota().returning(|| Ok(quota(3, 3)));
        api.expect_submit_article()
            .withf(|payload| payload.status == ArticleStatus::Draft && payload.title.is_empty())
            .times(1)
            .returning(|_| Ok(article("d1", ArticleStatus::Draft)));

        let mut ws = workspace(api, MockNavigator::new(), MockConfirmation::new());
        ws.load(None).await.unwrap();

        let saved = ws.save_draft().await.unwrap();
        assert_eq!(saved.id, "d1");
        assert_eq!(ws.articles().len(), 1);
        assert_eq!(ws.form().id.as_deref(), Some("d1"));
    }

    #[tokio::test]
    async fn pending_article_is_not_editable() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles()
            .returning(|| Ok(vec![article("p1", ArticleStatus::Pending)]));
        api.expect_submission_quota().returning(|| Ok(quota(1, 3)));
        api.expect_submit_article().times(0);

        let mut ws = workspace(api, MockNavigator::new(), MockConfirmation::new());
        ws.load(Some("p1")).await.unwrap();

        assert!(matches!(ws.save_draft().await, Err(SubmissionError::NotEditable { .. })));
        assert!(matches!(ws.submit_for_review().await, Err(SubmissionError::NotEditable { .. })));
    }

    #[tokio::test]
    async fn delete_removes_article_and_refetches_quota() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles().times(1).returning(|| {
            Ok(vec![article("d1", ArticleStatus::Draft), article("p1", ArticleStatus::Pending)])
        });
        api.expect_submission_quota().times(2).returning(|| Ok(quota(1, 3)));
        api.expect_delete_article()
            .withf(|id| id == "d1")
            .times(1)
            .returning(|_| Ok(()));

        let mut confirm = MockConfirmation::new();
        confirm.expect_confirm().times(1).return_const(true);

        let mut ws = workspace(api, MockNavigator::new(), confirm);
        ws.load(None).await.unwrap();

        assert_eq!(ws.delete("d1").await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(ws.articles().len(), 1);
        assert_eq!(ws.articles()[0].id, "p1");
    }

    #[tokio::test]
    async fn failed_quota_refresh_keeps_delete_successful() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles()
            .times(1)
            .returning(|| Ok(vec![article("d1", ArticleStatus::Draft)]));
        let mut calls = 0;
        api.expect_submission_quota().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(quota(1, 3))
            } else {
                Err(ApiError::Rejected {
                    status: StatusCode::BAD_GATEWAY,
                    message: "quota down".into(),
                })
            }
        });
        api.expect_delete_article().times(1).returning(|_| Ok(()));

        let mut confirm = MockConfirmation::new();
        confirm.expect_confirm().return_const(true);

        let mut ws = workspace(api, MockNavigator::new(), confirm);
        ws.load(None).await.unwrap();

        assert_eq!(ws.delete("d1").await.unwrap(), DeleteOutcome::Deleted);
        assert!(ws.articles().is_empty());
        assert_eq!(ws.quota().map(|q| q.pending_count), Some(1));
    }

    #[tokio::test]
    async fn declined_confirmation_deletes_nothing() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles()
            .returning(|| Ok(vec![article("r1", ArticleStatus::Rejected)]));
        api.expect_submission_quota().times(1).returning(|| Ok(quota(0, 3)));
        api.expect_delete_article().times(0);

        let mut confirm = MockConfirmation::new();
        confirm.expect_confirm().times(1).return_const(false);

        let mut ws = workspace(api, MockNavigator::new(), confirm);
        ws.load(None).await.unwrap();

        assert_eq!(ws.delete("r1").await.unwrap(), DeleteOutcome::Cancelled);
        assert_eq!(ws.articles().len(), 1);
    }

    #[tokio::test]
    async fn published_article_cannot_be_deleted() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles()
            .returning(|| Ok(vec![article("x1", ArticleStatus::Published)]));
        api.expect_submission_quota().returning(|| Ok(quota(0, 3)));
        api.expect_delete_article().times(0);

        let mut confirm = MockConfirmation::new();
        confirm.expect_confirm().times(0);

        let mut ws = workspace(api, MockNavigator::new(), confirm);
        ws.load(None).await.unwrap();

        assert!(matches!(
            ws.delete("x1").await,
            Err(SubmissionError::NotDeletable { status: ArticleStatus::Published })
        ));
    }

    #[test]
    fn delete_is_only_offered_for_draft_and_rejected() {
        for status in [ArticleStatus::Pending, ArticleStatus::Approved, ArticleStatus::Published] {
            assert!(!available_actions(&article("a", status)).contains(&ArticleAction::Delete));
        }
        for status in [ArticleStatus::Draft, ArticleStatus::Rejected] {
            assert!(available_actions(&article("a", status)).contains(&ArticleAction::Delete));
        }
    }

    #[tokio::test]
    async fn unknown_article_is_not_found() {
        let mut api = MockArticleOperations::new();
        api.expect_my_articles().returning(|| Ok(vec![]));
        api.expect_submission_quota().returning(|| Ok(quota(0, 3)));

        let mut ws = workspace(api, MockNavigator::new(), MockConfirmation::new());
        assert!(matches!(ws.load(Some("nope")).await, Err(SubmissionError::NotFound(_))));
    }
}
