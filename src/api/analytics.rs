use super::client::ApiClient;
use super::models::AnalyticsEvent;
use crate::core::services::traits::AnalyticsApi;
use async_trait::async_trait;
use reqwest::Method;

/// Client for the analytics event endpoint
pub struct AnalyticsClient {
    client: ApiClient,
}

impl AnalyticsClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnalyticsApi for AnalyticsClient {
    async fn track(&self, event: &AnalyticsEvent) -> crate::Result<()> {
        self.client
            .send_expecting_no_body(Method::POST, "/events", Some(event))
            .await?;
        Ok(())
    }
}
