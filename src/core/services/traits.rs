//! Seams between the command orchestrators and their collaborators.
//!
//! Every collaborator is passed explicitly so that orchestrators can be driven
//! by in-memory fakes in tests.

use crate::api::models::{AnalyticsEvent, ProfileCreateRequest, ProfileUpdateRequest};
use crate::core::identity::Id;
use crate::core::services::types::{CardToken, OAuthCompletion, OAuthProvider, OAuthState};
use crate::core::session::Session;
use crate::storage::config::Config;
use async_trait::async_trait;

/// Produces the configuration for one command invocation.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> crate::Result<Config>;
}

/// Retrieves and persists the current user's session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn retrieve(&self, config: &Config) -> crate::Result<Session>;

    /// Persist a freshly issued session token.
    fn store_token(&self, token: &str) -> crate::Result<()>;
}

/// Interactive input collection.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Ask for card details and exchange them for a single-use token.
    async fn tokenize_card(&self, config: &Config) -> crate::Result<CardToken>;

    /// Yes/no question; `Ok(false)` when the user declines.
    fn confirm(&self, message: &str) -> crate::Result<bool>;
}

#[async_trait]
pub trait BillingApi: Send + Sync {
    async fn create_profile(&self, request: &ProfileCreateRequest) -> crate::Result<()>;

    async fn update_profile(&self, id: &Id, request: &ProfileUpdateRequest) -> crate::Result<()>;
}

#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn track(&self, event: &AnalyticsEvent) -> crate::Result<()>;
}

/// Provider web flow for OAuth login, registration and account linking.
#[async_trait]
pub trait OAuthFlow: Send + Sync {
    async fn authenticate(
        &self,
        provider: OAuthProvider,
        state: OAuthState,
        analytics: &dyn AnalyticsApi,
    ) -> crate::Result<OAuthCompletion>;
}

/// Builds API clients bound to a backend service.
pub trait ClientFactory: Send + Sync {
    fn billing(&self, config: &Config, session: &Session) -> crate::Result<Box<dyn BillingApi>>;

    fn analytics(&self, config: &Config) -> crate::Result<Box<dyn AnalyticsApi>>;

    fn oauth(&self, config: &Config, session: &Session) -> crate::Result<Box<dyn OAuthFlow>>;
}

/// Collaborators shared by every orchestrator.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub config: &'a dyn ConfigSource,
    pub sessions: &'a dyn SessionProvider,
    pub prompter: &'a dyn Prompter,
    pub clients: &'a dyn ClientFactory,
}
