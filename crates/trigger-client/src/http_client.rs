//! reqwest-based trigger API client
//!
//! Direct implementation of the `TriggerApi` trait against the button admin
//! REST resource.

use crate::client::{SubmitError, TriggerApi};
use crate::types::{PagePath, SubmissionPayload, SubmitRequest, SubmitResponse, TriggerButton};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;
use trigger_config::AppConfig;
use url::Url;
use uuid::Uuid;

/// Bitbucket rejects state-changing REST calls without this header
const XSRF_HEADER: &str = "X-Atlassian-Token";

/// Trigger API client speaking HTTP
#[derive(Debug, Clone)]
pub struct HttpTriggerClient {
    http: Client,
    admin_url: String,
}

impl HttpTriggerClient {
    /// Create a client for the given button admin URL
    ///
    /// e.g. `https://git.example.com/rest/prnfb-admin/1.0/settings/buttons`
    pub fn new(admin_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let admin_url = admin_url.into().trim_end_matches('/').to_string();
        Url::parse(&admin_url).with_context(|| format!("Invalid admin URL: {}", admin_url))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, admin_url })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(config.buttons_admin_url(), config.request_timeout())
    }

    pub fn buttons_url(&self, page: &PagePath) -> String {
        format!("{}/fromPR{}", self.admin_url, page)
    }

    pub fn submit_url(&self, page: &PagePath, uuid: &Uuid) -> String {
        format!("{}/fromUUID{}/uuid/{}", self.admin_url, page, uuid)
    }
}

#[async_trait]
impl TriggerApi for HttpTriggerClient {
    async fn fetch_buttons(&self, page: &PagePath) -> anyhow::Result<Vec<TriggerButton>> {
        let url = self.buttons_url(page);
        debug!("Fetching trigger buttons from {}", url);

        let buttons: Vec<TriggerButton> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode trigger buttons")?;

        debug!("Fetched {} trigger buttons for {}", buttons.len(), page);
        Ok(buttons)
    }

    async fn submit(
        &self,
        page: &PagePath,
        uuid: &Uuid,
        form: Option<&SubmissionPayload>,
    ) -> Result<SubmitResponse, SubmitError> {
        let url = self.submit_url(page, uuid);
        debug!(
            "Submitting trigger {} ({} form fields)",
            uuid,
            form.map_or(0, |f| f.len())
        );

        let response = self
            .http
            .post(&url)
            .header(XSRF_HEADER, "no-check")
            .json(&SubmitRequest { form })
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SubmitResponse>()
            .await
            .map_err(|e| SubmitError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldValue, TriggerOutcome};
    use axum::{
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Clone, Default)]
    struct ServerState {
        submissions: Arc<Mutex<Vec<(String, Value, Option<String>)>>>,
    }

    async fn list_buttons(Path(page): Path<String>) -> Json<Value> {
        Json(json!([
            { "uuid": "6b8d3c1e-6a44-4e3e-9b8a-0c1f2f6e3a10", "name": format!("for {}", page) }
        ]))
    }

    async fn press(
        State(state): State<ServerState>,
        Path(rest): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let token = headers
            .get(XSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        state
            .submissions
            .lock()
            .unwrap()
            .push((rest.clone(), body, token));

        if rest.ends_with("00000000-0000-0000-0000-000000000000") {
            return (StatusCode::FORBIDDEN, Json(json!({ "message": "nope" })));
        }
        (
            StatusCode::OK,
            Json(json!({
                "confirmation": "on",
                "notificationResponses": [
                    { "notificationName": "CI", "status": 200, "uri": "http://ci" }
                ]
            })),
        )
    }

    async fn spawn_server() -> (String, ServerState) {
        let state = ServerState::default();
        let app = Router::new()
            .route("/buttons/fromPR/*page", get(list_buttons))
            .route("/buttons/fromUUID/*rest", post(press))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/buttons", addr), state)
    }

    #[test]
    fn test_urls() {
        let client =
            HttpTriggerClient::new("http://host/rest/buttons/", Duration::from_secs(1)).unwrap();
        let page = PagePath::new("/projects/P/repos/r/pull-requests/7/overview");
        let uuid = Uuid::nil();

        assert_eq!(
            client.buttons_url(&page),
            "http://host/rest/buttons/fromPR/projects/P/repos/r/pull-requests/7/overview"
        );
        assert_eq!(
            client.submit_url(&page, &uuid),
            "http://host/rest/buttons/fromUUID/projects/P/repos/r/pull-requests/7/overview/uuid/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_rejects_invalid_admin_url() {
        assert!(HttpTriggerClient::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_fetch_buttons() {
        let (admin_url, _) = spawn_server().await;
        let client = HttpTriggerClient::new(admin_url, Duration::from_secs(5)).unwrap();

        let buttons = client
            .fetch_buttons(&PagePath::new("/projects/P/pull-requests/1"))
            .await
            .unwrap();

        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].name, "for projects/P/pull-requests/1");
    }

    #[tokio::test]
    async fn test_submit_posts_form() {
        let (admin_url, state) = spawn_server().await;
        let client = HttpTriggerClient::new(admin_url, Duration::from_secs(5)).unwrap();
        let uuid: Uuid = "6b8d3c1e-6a44-4e3e-9b8a-0c1f2f6e3a10".parse().unwrap();

        let mut form = SubmissionPayload::new();
        form.insert("reason", FieldValue::Single("flaky".to_string()));

        let response = client
            .submit(&PagePath::new("/pr/1"), &uuid, Some(&form))
            .await
            .unwrap();

        assert!(response.confirmation_enabled());
        assert_eq!(
            response.outcomes,
            vec![TriggerOutcome::new("CI", 200, "http://ci")]
        );

        let submissions = state.submissions.lock().unwrap();
        assert_eq!(submissions.len(), 1);
        let (rest, body, token) = &submissions[0];
        assert_eq!(rest, &format!("pr/1/uuid/{}", uuid));
        assert_eq!(body, &json!({ "form": { "reason": "flaky" } }));
        assert_eq!(token.as_deref(), Some("no-check"));
    }

    #[tokio::test]
    async fn test_submit_without_form_sends_null() {
        let (admin_url, state) = spawn_server().await;
        let client = HttpTriggerClient::new(admin_url, Duration::from_secs(5)).unwrap();

        client
            .submit(&PagePath::new("/pr/1"), &Uuid::new_v4(), None)
            .await
            .unwrap();

        let submissions = state.submissions.lock().unwrap();
        assert_eq!(submissions[0].1, json!({ "form": null }));
    }

    #[tokio::test]
    async fn test_submit_error_status() {
        let (admin_url, _) = spawn_server().await;
        let client = HttpTriggerClient::new(admin_url, Duration::from_secs(5)).unwrap();

        let err = client
            .submit(&PagePath::new("/pr/1"), &Uuid::nil(), None)
            .await
            .unwrap_err();

        assert_eq!(err.status(), 403);
    }

    #[tokio::test]
    async fn test_submit_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            HttpTriggerClient::new(format!("http://{}/buttons", addr), Duration::from_secs(5))
                .unwrap();
        let err = client
            .submit(&PagePath::new("/pr/1"), &Uuid::nil(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Transport(_)));
        assert_eq!(err.status(), 0);
    }
}
