use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::types::Envelope;
use crate::session::Session;

/// REST client for the platform backend.
///
/// The client carries at most one [`Session`]; calls that need a bearer token
/// fail with [`ApiError::Unauthenticated`] when none is attached.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("edu-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            http,
            base_url,
            session: None,
        })
    }

    /// Same client, authenticated with `session`
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Path built from raw segments, each percent-encoded so ids cannot escape their segment
    pub(crate) fn encode_path(segments: &[&str]) -> Result<String, ApiError> {
        let mut scratch = reqwest::Url::parse("http://localhost/").map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        scratch
            .path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl("path cannot take segments".to_string()))?
            .clear()
            .extend(segments);
        Ok(scratch.path().to_string())
    }

    fn request(&self, method: Method, path: &str, authenticated: bool) -> Result<RequestBuilder, ApiError> {
        let builder = self.http.request(method, self.url(path));
        if !authenticated {
            return Ok(builder);
        }
        let session = self.session.as_ref().ok_or(ApiError::Unauthenticated)?;
        Ok(builder.header(reqwest::header::AUTHORIZATION, session.bearer()))
    }

    /// Send and return the raw body of a 2xx response
    async fn execute(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%method, %path, status = status.as_u16(), "API request finished");

        if !status.is_success() {
            return Err(ApiError::from_body(status, &body));
        }
        Ok(body)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
        serde_json::from_str::<Envelope<T>>(body)
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Pull `message` out of a body that carries no data
    fn message(body: &str) -> Option<String> {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("message")?
            .as_str()
            .map(str::to_string)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, authenticated: bool) -> Result<T, ApiError> {
        let body = self.execute(self.request(Method::GET, path, authenticated)?).await?;
        Self::decode(&body)
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q, authenticated: bool) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path, authenticated)?.query(query);
        let body = self.execute(builder).await?;
        Self::decode(&body)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, payload: &B, authenticated: bool) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path, authenticated)?.json(payload);
        let body = self.execute(builder).await?;
        Self::decode(&body)
    }

    /// POST where only the acknowledgement message matters
    pub(crate) async fn post_ack<B>(&self, path: &str, payload: &B, authenticated: bool) -> Result<Option<String>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path, authenticated)?.json(payload);
        let body = self.execute(builder).await?;
        Ok(Self::message(&body))
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Option<String>, ApiError> {
        let body = self.execute(self.request(Method::DELETE, path, true)?).await?;
        Ok(Self::message(&body))
    }
}
