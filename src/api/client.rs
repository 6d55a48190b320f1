use crate::error::ApiError;
use crate::storage::config::Config;
use crate::utils::error_helpers::*;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("manifold-cli/", env!("CARGO_PKG_VERSION"));

/// Backend services a client can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Identity,
    Billing,
    Analytics,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::Identity => "identity",
            Service::Billing => "billing",
            Service::Analytics => "analytics",
        }
    }

    pub fn base_url<'c>(&self, config: &'c Config) -> &'c str {
        match self {
            Service::Identity => &config.identity_url,
            Service::Billing => &config.billing_url,
            Service::Analytics => &config.analytics_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiClient {
    // Create baseClient with default settings
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init"))?;

        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Client for `service` using the URL from `config`
    pub fn for_service(
        service: Service,
        config: &Config,
        token: Option<&str>,
    ) -> Result<Self, ApiError> {
        log::debug!("Creating {} client", service.name());
        let mut client = ApiClient::new(service.base_url(config))?;
        client.token = token.map(str::to_string);
        Ok(client)
    }

    pub fn with_token(base_url: &str, token: &str) -> Result<Self, ApiError> {
        let mut client = ApiClient::new(base_url)?;
        client.token = Some(token.to_string());
        Ok(client)
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Send a request with an optional JSON body and decode the JSON reply
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.build_request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, path))?;

        self.handle_response(response, path).await
    }

    /// Send a request with an optional JSON body, checking only the reply status
    pub async fn send_expecting_no_body<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.build_request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, path))?;

        self.check_status(response, path).await?;
        Ok(())
    }

    pub async fn handle_response<T>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.check_status(response, endpoint).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| convert_json_error(e, endpoint))
    }

    /// Map non-success statuses to errors, keeping the body as the message
    pub async fn check_status(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status.as_u16() {
            401 | 403 => Err(ApiError::Unauthorized {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                server_message: error_text,
            }),
            408 | 504 => Err(convert_timeout_error(endpoint, DEFAULT_TIMEOUT_SECS)),
            _ => Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: error_text,
            }),
        }
    }
}
