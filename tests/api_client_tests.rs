//! REST client tests against a wiremock backend
//!
//! Every response uses the backend envelope `{ success, data, message }`.

use edu_portal::api::types::{ArticleStatus, ContentView};
use edu_portal::{ApiClient, ApiError, ArticleOperations, AuthOperations, ContentOperations, Session};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Backend mock server for deterministic testing
pub struct BackendMock {
    pub server: MockServer,
}

impl BackendMock {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url()).unwrap()
    }

    pub fn authed_client(&self) -> ApiClient {
        self.client().with_session(Session::new("test-token"))
    }

    pub fn envelope(data: Value) -> Value {
        json!({ "success": true, "data": data })
    }
}

#[tokio::test]
async fn my_articles_sends_bearer_token() {
    let mock = BackendMock::new().await;
    Mock::given(method("GET"))
        .and(path("/api/user-articles/my-articles"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(BackendMock::envelope(json!([
            { "id": "a1", "title": "First", "status": "draft" },
            { "id": "a2", "title": "Second", "status": "published", "views": 40 }
        ]))))
        .expect(1)
        .mount(&mock.server)
        .await;

    let articles = mock.authed_client().my_articles().await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1].status, ArticleStatus::Published);
    assert_eq!(articles[1].views, 40);
}

#[tokio::test]
async fn authenticated_call_without_session_never_hits_network() {
    let mock = BackendMock::new().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock.server)
        .await;

    let err = mock.client().submission_quota().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthenticated));
}

#[tokio::test]
async fn quota_is_decoded_from_camel_case() {
    let mock = BackendMock::new().await;
    Mock::given(method("GET"))
        .and(path("/api/user-articles/can-submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(BackendMock::envelope(json!({
            "pendingCount": 3, "maxPending": 3, "remaining": 0, "canSubmit": false
        }))))
        .mount(&mock.server)
        .await;

    let quota = mock.authed_client().submission_quota().await.unwrap();
    assert_eq!(quota.pending_count, 3);
    assert!(!quota.can_submit);
}

#[tokio::test]
async fn backend_message_is_surfaced_on_rejection() {
    let mock = BackendMock::new().await;
    Mock::given(method("DELETE"))
        .and(path("/api/user-articles/a9"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Only draft or rejected articles can be deleted"
        })))
        .mount(&mock.server)
        .await;

    let err = mock.authed_client().delete_article("a9").await.unwrap_err();
    assert_eq!(err.to_string(), "Only draft or rejected articles can be deleted");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}

#[tokio::test]
async fn login_returns_session_with_user() {
    let mock = BackendMock::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "amina@example.org", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(BackendMock::envelope(json!({
            "token": "jwt-1",
            "user": { "id": "u1", "email": "amina@example.org", "role": "student", "firstName": "Amina" }
        }))))
        .expect(1)
        .mount(&mock.server)
        .await;

    let session = mock.client().login("amina@example.org", "hunter22").await.unwrap();
    assert_eq!(session.token, "jwt-1");
    assert_eq!(session.user.unwrap().display_name(), "Amina");
}

#[tokio::test]
async fn forgot_password_returns_acknowledgement() {
    let mock = BackendMock::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/forgot-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Reset email sent"
        })))
        .mount(&mock.server)
        .await;

    let ack = mock.client().forgot_password("a@b.c").await.unwrap();
    assert_eq!(ack.as_deref(), Some("Reset email sent"));
}

#[tokio::test]
async fn premium_and_missing_resources_map_to_views() {
    let mock = BackendMock::new().await;
    Mock::given(method("GET"))
        .and(path("/api/orientation/resources/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .mount(&mock.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orientation/resources/locked"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Premium only" })))
        .mount(&mock.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orientation/resources/teaser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(BackendMock::envelope(json!({
            "id": "r3", "title": "Teaser", "slug": "teaser", "premium": true, "hasAccess": false
        }))))
        .mount(&mock.server)
        .await;

    let client = mock.client();
    assert_eq!(client.orientation_resource("gone").await.unwrap(), ContentView::NotFound);
    assert_eq!(client.orientation_resource("locked").await.unwrap(), ContentView::PremiumRequired);
    assert_eq!(client.orientation_resource("teaser").await.unwrap(), ContentView::PremiumRequired);
}

#[tokio::test]
async fn orientation_list_passes_category() {
    let mock = BackendMock::new().await;
    Mock::given(method("GET"))
        .and(path("/api/orientation/resources"))
        .and(query_param("category", "careers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(BackendMock::envelope(json!([
            { "id": "r1", "title": "Careers 101", "slug": "careers-101" }
        ]))))
        .expect(1)
        .mount(&mock.server)
        .await;

    let resources = mock.client().orientation_resources(Some("careers")).await.unwrap();
    assert_eq!(resources[0].slug, "careers-101");
}

#[tokio::test]
async fn ids_with_reserved_characters_stay_in_one_segment() {
    let mock = BackendMock::new().await;
    Mock::given(method("DELETE"))
        .and(path("/api/user-articles/a%2F..%2Fadmin%3Fx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orientation/resources/a%2Fb"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .expect(1)
        .mount(&mock.server)
        .await;

    mock.authed_client().delete_article("a/../admin?x").await.unwrap();
    assert_eq!(mock.client().orientation_resource("a/b").await.unwrap(), ContentView::NotFound);
}
