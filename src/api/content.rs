// Read-only content browsing: orientation resources, docs, localized pages

use async_trait::async_trait;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::api::types::{ContentView, DocEntry, LocalizedContent, OrientationResource, UserRecord};

#[async_trait]
pub trait ContentOperations: Send + Sync {
    async fn orientation_resources(&self, category: Option<&str>) -> Result<Vec<OrientationResource>, ApiError>;

    async fn orientation_resource(&self, slug: &str) -> Result<ContentView<OrientationResource>, ApiError>;

    async fn docs(&self) -> Result<Vec<DocEntry>, ApiError>;

    async fn localized_content(&self, lang: &str) -> Result<Vec<LocalizedContent>, ApiError>;

    /// Admin dashboard user listing
    async fn admin_users(&self) -> Result<Vec<UserRecord>, ApiError>;
}

/// Map a detail fetch onto the fallback views
pub fn into_view<T>(result: Result<T, ApiError>) -> Result<ContentView<T>, ApiError> {
    match result {
        Ok(value) => Ok(ContentView::Ready(value)),
        Err(e) if e.is_not_found() => Ok(ContentView::NotFound),
        Err(e) if e.is_forbidden() => Ok(ContentView::PremiumRequired),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl ContentOperations for ApiClient {
    async fn orientation_resources(&self, category: Option<&str>) -> Result<Vec<OrientationResource>, ApiError> {
        let authenticated = self.session().is_some();
        match category {
            Some(category) => {
                self.get_with_query("/orientation/resources", &[("category", category)], authenticated)
                    .await
            }
            None => self.get("/orientation/resources", authenticated).await,
        }
    }

    async fn orientation_resource(&self, slug: &str) -> Result<ContentView<OrientationResource>, ApiError> {
        let authenticated = self.session().is_some();
        let view = into_view(
            self.get::<OrientationResource>(&Self::encode_path(&["orientation", "resources", slug])?, authenticated)
                .await,
        )?;
        // The backend may send the teaser of a premium resource instead of refusing it
        Ok(match view {
            ContentView::Ready(resource) if resource.premium && resource.has_access == Some(false) => {
                ContentView::PremiumRequired
            }
            other => other,
        })
    }

    async fn docs(&self) -> Result<Vec<DocEntry>, ApiError> {
        self.get("/docs", false).await
    }

    async fn localized_content(&self, lang: &str) -> Result<Vec<LocalizedContent>, ApiError> {
        self.get_with_query("/localized-content", &[("lang", lang)], false)
            .await
    }

    async fn admin_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.get("/admin/users", true).await
    }
}
