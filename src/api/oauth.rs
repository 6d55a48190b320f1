//! OAuth web flow run through the identity service.
//!
//! The identity service opens an OAuth session and hands back a provider URL.
//! The user finishes the provider dance in a browser while we poll the session
//! until it completes or fails.

use super::client::ApiClient;
use super::models::{
    AnalyticsEvent, OAuthSessionRequest, OAuthSessionResponse, OAuthSessionState,
    OAuthSessionStatus,
};
use crate::core::services::traits::{AnalyticsApi, OAuthFlow};
use crate::core::services::types::{OAuthCompletion, OAuthProvider, OAuthState};
use crate::error::AuthError;
use crate::utils::error_helpers::convert_timeout_error;
use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;
use tokio::time::Instant;

pub struct WebFlow {
    client: ApiClient,
    poll_interval: Duration,
    timeout: Duration,
    open_browser: bool,
}

impl WebFlow {
    pub fn new(client: ApiClient, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            client,
            poll_interval,
            timeout,
            open_browser: true,
        }
    }

    /// Only print the authorization URL instead of launching a browser.
    pub fn without_browser(mut self) -> Self {
        self.open_browser = false;
        self
    }

    async fn start(
        &self,
        provider: OAuthProvider,
        state: OAuthState,
    ) -> crate::Result<OAuthSessionResponse> {
        let request = OAuthSessionRequest {
            source: provider,
            state_type: state,
        };
        Ok(self
            .client
            .send_json(Method::POST, "/oauth/sessions", Some(&request))
            .await?)
    }

    async fn wait_for_completion(&self, session_id: &str) -> crate::Result<OAuthCompletion> {
        let endpoint = format!("/oauth/sessions/{}", session_id);
        // A timeout too large to represent means waiting without a deadline
        let deadline = Instant::now().checked_add(self.timeout);

        loop {
            let status: OAuthSessionStatus = self
                .client
                .send_json::<(), _>(Method::GET, &endpoint, None)
                .await?;

            match status.status {
                OAuthSessionState::Complete => {
                    return Ok(OAuthCompletion {
                        token: status.token,
                    });
                }
                OAuthSessionState::Failed => {
                    return Err(AuthError::ProviderRejected {
                        reason: status
                            .error
                            .unwrap_or_else(|| "authorization was not granted".to_string()),
                    }
                    .into());
                }
                OAuthSessionState::Pending => {}
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(convert_timeout_error(&endpoint, self.timeout.as_secs()).into());
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl OAuthFlow for WebFlow {
    async fn authenticate(
        &self,
        provider: OAuthProvider,
        state: OAuthState,
        analytics: &dyn AnalyticsApi,
    ) -> crate::Result<OAuthCompletion> {
        let session = self.start(provider, state).await?;
        log::debug!("Started {} oauth session {}", state, session.id);

        println!(
            "Continue in your browser to authenticate with {}:",
            provider.display_name()
        );
        println!("  {}", session.url);
        if self.open_browser {
            if let Err(e) = webbrowser::open(&session.url) {
                log::warn!("Failed to open browser automatically: {}", e);
            }
        }

        let completion = self.wait_for_completion(&session.id).await?;

        let event = AnalyticsEvent::new("oauth_completed")
            .with("provider", provider.as_str())
            .with("state", state.to_string());
        if let Err(e) = analytics.track(&event).await {
            log::warn!("Failed to submit analytics event: {}", e);
        }

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;
    use crate::error::ApiError;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingAnalytics {
        events: Mutex<Vec<AnalyticsEvent>>,
        fail: bool,
    }

    #[async_trait]
    impl AnalyticsApi for RecordingAnalytics {
        async fn track(&self, event: &AnalyticsEvent) -> crate::Result<()> {
            self.events.lock().unwrap().push(event.clone());
            if self.fail {
                return Err(AppError::Api(ApiError::Http {
                    status: 500,
                    endpoint: "/events".to_string(),
                    message: "down".to_string(),
                }));
            }
            Ok(())
        }
    }

    fn flow_for(server: &MockServer, timeout_secs: u64) -> WebFlow {
        WebFlow::new(
            ApiClient::new(&server.uri()).unwrap(),
            Duration::from_millis(10),
            Duration::from_secs(timeout_secs),
        )
        .without_browser()
    }

    async fn mount_start(server: &MockServer, state: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/sessions"))
            .and(body_json(json!({ "source": "github", "state_type": state })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "sess1",
                "url": "https://github.example.test/authorize"
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_login_flow_returns_token() {
        let server = MockServer::start().await;
        mount_start(&server, "login").await;
        Mock::given(method("GET"))
            .and(path("/oauth/sessions/sess1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "complete", "token": "new-session" })),
            )
            .mount(&server)
            .await;

        let analytics = RecordingAnalytics::default();
        let completion = flow_for(&server, 5)
            .authenticate(OAuthProvider::Github, OAuthState::Login, &analytics)
            .await
            .unwrap();

        assert_eq!(completion.token.as_deref(), Some("new-session"));
        let events = analytics.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].properties["state"], "login");
    }

    #[tokio::test]
    async fn test_failed_session_is_rejected() {
        let server = MockServer::start().await;
        mount_start(&server, "link").await;
        Mock::given(method("GET"))
            .and(path("/oauth/sessions/sess1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "failed", "error": "access_denied" })),
            )
            .mount(&server)
            .await;

        let analytics = RecordingAnalytics::default();
        let result = flow_for(&server, 5)
            .authenticate(OAuthProvider::Github, OAuthState::Link, &analytics)
            .await;

        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::ProviderRejected { ref reason })) if reason == "access_denied"
        ));
        assert!(analytics.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pending_session_times_out() {
        let server = MockServer::start().await;
        mount_start(&server, "login").await;
        Mock::given(method("GET"))
            .and(path("/oauth/sessions/sess1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "pending" })))
            .mount(&server)
            .await;

        let analytics = RecordingAnalytics::default();
        let result = flow_for(&server, 0)
            .authenticate(OAuthProvider::Github, OAuthState::Login, &analytics)
            .await;

        assert!(matches!(result, Err(AppError::Api(ApiError::Timeout { .. }))));
    }

    #[tokio::test]
    async fn test_unrepresentable_timeout_waits_without_deadline() {
        let server = MockServer::start().await;
        mount_start(&server, "login").await;
        Mock::given(method("GET"))
            .and(path("/oauth/sessions/sess1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "complete", "token": "new-session" })),
            )
            .mount(&server)
            .await;

        let analytics = RecordingAnalytics::default();
        let completion = flow_for(&server, u64::MAX)
            .authenticate(OAuthProvider::Github, OAuthState::Login, &analytics)
            .await
            .unwrap();
        assert_eq!(completion.token.as_deref(), Some("new-session"));
    }

    #[tokio::test]
    async fn test_poll_failure_ends_flow_without_retry() {
        let server = MockServer::start().await;
        mount_start(&server, "login").await;
        Mock::given(method("GET"))
            .and(path("/oauth/sessions/sess1"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .expect(1)
            .mount(&server)
            .await;

        let analytics = RecordingAnalytics::default();
        let result = flow_for(&server, 5)
            .authenticate(OAuthProvider::Github, OAuthState::Login, &analytics)
            .await;

        assert!(matches!(
            result,
            Err(AppError::Api(ApiError::Http { status: 502, .. }))
        ));
        assert!(analytics.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analytics_failure_is_not_fatal() {
        let server = MockServer::start().await;
        mount_start(&server, "link").await;
        Mock::given(method("GET"))
            .and(path("/oauth/sessions/sess1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "complete" })))
            .mount(&server)
            .await;

        let analytics = RecordingAnalytics {
            fail: true,
            ..Default::default()
        };
        let completion = flow_for(&server, 5)
            .authenticate(OAuthProvider::Github, OAuthState::Link, &analytics)
            .await
            .unwrap();
        assert!(completion.token.is_none());
    }
}
