use async_trait::async_trait;
use tracing::info;

#[cfg(test)]
use mockall::automock;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::api::types::{Article, ArticlePayload, SubmissionQuota};

/// Author-side article endpoints
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArticleOperations: Send + Sync {
    /// Every article written by the session's user
    async fn my_articles(&self) -> Result<Vec<Article>, ApiError>;

    /// Current pending-submission allowance
    async fn submission_quota(&self) -> Result<SubmissionQuota, ApiError>;

    /// Create or update an article; `payload.status` decides draft vs review
    async fn submit_article(&self, payload: &ArticlePayload) -> Result<Article, ApiError>;

    async fn delete_article(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl ArticleOperations for ApiClient {
    async fn my_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.get("/user-articles/my-articles", true).await
    }

    async fn submission_quota(&self) -> Result<SubmissionQuota, ApiError> {
        self.get("/user-articles/can-submit", true).await
    }

    async fn submit_article(&self, payload: &ArticlePayload) -> Result<Article, ApiError> {
        let article: Article = self.post("/user-articles/submit", payload, true).await?;
        info!(article_id = %article.id, status = %article.status, "Article saved");
        Ok(article)
    }

    async fn delete_article(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&Self::encode_path(&["user-articles", id])?).await?;
        info!(article_id = %id, "Article deleted");
        Ok(())
    }
}
