use super::client::ApiClient;
use super::models::UserResponse;
use crate::core::session::User;
use crate::error::ApiError;
use reqwest::Method;

/// Client for the identity service
pub struct IdentityClient {
    client: ApiClient,
}

impl IdentityClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ApiError> {
        let mut client = ApiClient::new(base_url)?;
        client.token = token.map(str::to_string);
        Ok(Self { client })
    }

    /// The user owning the current session token
    pub async fn current_user(&self) -> crate::Result<User> {
        let response: UserResponse = self
            .client
            .send_json::<(), _>(Method::GET, "/self", None)
            .await?;
        Ok(response.into())
    }
}
