use super::analytics::AnalyticsClient;
use super::billing::BillingClient;
use super::client::{ApiClient, Service};
use super::oauth::WebFlow;
use crate::core::services::traits::{AnalyticsApi, BillingApi, ClientFactory, OAuthFlow};
use crate::core::session::Session;
use crate::storage::config::Config;
use std::time::Duration;

/// Builds reqwest-backed clients for the configured backend services
#[derive(Default)]
pub struct HttpClientFactory;

impl HttpClientFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ClientFactory for HttpClientFactory {
    fn billing(&self, config: &Config, session: &Session) -> crate::Result<Box<dyn BillingApi>> {
        let client = ApiClient::for_service(Service::Billing, config, session.token())?;
        Ok(Box::new(BillingClient::new(client)))
    }

    fn analytics(&self, config: &Config) -> crate::Result<Box<dyn AnalyticsApi>> {
        let client = ApiClient::for_service(Service::Analytics, config, None)?;
        Ok(Box::new(AnalyticsClient::new(client)))
    }

    fn oauth(&self, config: &Config, session: &Session) -> crate::Result<Box<dyn OAuthFlow>> {
        let client = ApiClient::for_service(Service::Identity, config, session.token())?;
        Ok(Box::new(WebFlow::new(
            client,
            Duration::from_secs(config.oauth_poll_interval_secs),
            Duration::from_secs(config.oauth_timeout_secs),
        )))
    }
}
