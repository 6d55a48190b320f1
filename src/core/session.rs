//! Per-invocation authentication state.

use crate::AppError;
use crate::api::identity::IdentityClient;
use crate::core::identity::Id;
use crate::core::services::traits::SessionProvider;
use crate::error::ApiError;
use crate::storage::config::Config;
use crate::storage::credentials::Credentials;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Session provider backed by the keyring token and the identity service.
#[derive(Default)]
pub struct ApiSessionProvider {
    credentials: Option<Credentials>,
}

impl ApiSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given credentials instead of reading the keyring.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }
}

#[async_trait]
impl SessionProvider for ApiSessionProvider {
    async fn retrieve(&self, config: &Config) -> crate::Result<Session> {
        let credentials = match &self.credentials {
            Some(creds) => creds.clone(),
            None => Credentials::load()?,
        };

        let Some(token) = credentials.session_token() else {
            log::debug!("No session token stored");
            return Ok(Session::anonymous());
        };

        let client = IdentityClient::new(&config.identity_url, Some(token))?;
        match client.current_user().await {
            Ok(user) => {
                log::debug!("Session belongs to user {}", user.id);
                Ok(Session::authenticated(user, token))
            }
            Err(AppError::Api(ApiError::Unauthorized { status, .. })) => {
                log::debug!("Stored session token rejected with status {}", status);
                Ok(Session::anonymous())
            }
            Err(e) => Err(e),
        }
    }

    fn store_token(&self, token: &str) -> crate::Result<()> {
        Credentials::save_session(token)?;
        Ok(())
    }
}
