use super::client::ApiClient;
use super::models::{ProfileCreateRequest, ProfileUpdateRequest};
use crate::core::identity::Id;
use crate::core::services::traits::BillingApi;
use async_trait::async_trait;
use reqwest::Method;

/// Client for the billing service profile endpoints. Replies are checked by
/// status only; the saved profile body is not needed.
pub struct BillingClient {
    client: ApiClient,
}

impl BillingClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BillingApi for BillingClient {
    async fn create_profile(&self, request: &ProfileCreateRequest) -> crate::Result<()> {
        log::debug!("POST /profiles");
        self.client
            .send_expecting_no_body(Method::POST, "/profiles", Some(request))
            .await?;
        Ok(())
    }

    async fn update_profile(&self, id: &Id, request: &ProfileUpdateRequest) -> crate::Result<()> {
        let endpoint = format!("/profiles/{}", id);
        log::debug!("PATCH {}", endpoint);
        self.client
            .send_expecting_no_body(Method::PATCH, &endpoint, Some(request))
            .await?;
        Ok(())
    }
}
