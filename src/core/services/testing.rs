//! In-memory collaborators for orchestrator tests.

use super::traits::{
    AnalyticsApi, BillingApi, ClientFactory, Collaborators, ConfigSource, OAuthFlow, Prompter,
    SessionProvider,
};
use super::types::{CardToken, OAuthCompletion, OAuthProvider, OAuthState};
use crate::AppError;
use crate::api::models::{AnalyticsEvent, ProfileCreateRequest, ProfileUpdateRequest};
use crate::core::identity::Id;
use crate::core::session::{Session, User};
use crate::error::{ApiError, PromptError, StorageError};
use crate::storage::config::Config;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const USER_ID: &str = "200e7aeg2kf2d6nud8jran3zxnz5j";
pub const TEAM_ID: &str = "1ea6vyxcz0n3dmarpg9pfhq3hbpmj";

fn http_error(message: &str) -> AppError {
    AppError::Api(ApiError::Http {
        status: 500,
        endpoint: "/fake".to_string(),
        message: message.to_string(),
    })
}

pub fn user() -> User {
    User {
        id: Id::parse(USER_ID).unwrap(),
        name: "Ada".to_string(),
        email: "ada@example.test".to_string(),
    }
}

pub struct FakeConfig {
    pub config: Option<Config>,
    pub loads: AtomicUsize,
}

impl FakeConfig {
    pub fn ok(config: Config) -> Self {
        Self {
            config: Some(config),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn broken() -> Self {
        Self {
            config: None,
            loads: AtomicUsize::new(0),
        }
    }
}

impl ConfigSource for FakeConfig {
    fn load(&self) -> crate::Result<Config> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.config.clone().ok_or_else(|| {
            StorageError::ConfigParseError {
                message: "bad toml".to_string(),
            }
            .into()
        })
    }
}

pub struct FakeSessions {
    pub session: Option<Session>,
    pub retrieves: AtomicUsize,
    pub stored: Mutex<Vec<String>>,
}

impl FakeSessions {
    pub fn logged_in() -> Self {
        Self::with(Some(Session::authenticated(user(), "session-token")))
    }

    pub fn anonymous() -> Self {
        Self::with(Some(Session::anonymous()))
    }

    pub fn broken() -> Self {
        Self::with(None)
    }

    fn with(session: Option<Session>) -> Self {
        Self {
            session,
            retrieves: AtomicUsize::new(0),
            stored: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SessionProvider for FakeSessions {
    async fn retrieve(&self, _config: &Config) -> crate::Result<Session> {
        self.retrieves.fetch_add(1, Ordering::SeqCst);
        self.session
            .clone()
            .ok_or_else(|| http_error("identity unavailable"))
    }

    fn store_token(&self, token: &str) -> crate::Result<()> {
        self.stored.lock().unwrap().push(token.to_string());
        Ok(())
    }
}

pub struct FakePrompter {
    pub card_token: Option<String>,
    /// `None` makes the confirmation prompt itself fail.
    pub confirm_answer: Option<bool>,
    pub card_prompts: AtomicUsize,
    pub confirmations: Mutex<Vec<String>>,
}

impl FakePrompter {
    pub fn new(card_token: Option<&str>, confirm_answer: Option<bool>) -> Self {
        Self {
            card_token: card_token.map(str::to_string),
            confirm_answer,
            card_prompts: AtomicUsize::new(0),
            confirmations: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Prompter for FakePrompter {
    async fn tokenize_card(&self, _config: &Config) -> crate::Result<CardToken> {
        self.card_prompts.fetch_add(1, Ordering::SeqCst);
        match &self.card_token {
            Some(id) => Ok(CardToken { id: id.clone() }),
            None => Err(PromptError::Input("stdin closed".to_string()).into()),
        }
    }

    fn confirm(&self, message: &str) -> crate::Result<bool> {
        self.confirmations.lock().unwrap().push(message.to_string());
        self.confirm_answer
            .ok_or_else(|| PromptError::Input("not a terminal".to_string()).into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BillingCall {
    Create(ProfileCreateRequest),
    Update(Id, ProfileUpdateRequest),
}

struct FakeBilling {
    calls: Arc<Mutex<Vec<BillingCall>>>,
    fail: bool,
}

#[async_trait]
impl BillingApi for FakeBilling {
    async fn create_profile(&self, request: &ProfileCreateRequest) -> crate::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(BillingCall::Create(request.clone()));
        if self.fail {
            return Err(http_error("billing unavailable"));
        }
        Ok(())
    }

    async fn update_profile(&self, id: &Id, request: &ProfileUpdateRequest) -> crate::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(BillingCall::Update(id.clone(), request.clone()));
        if self.fail {
            return Err(http_error("billing unavailable"));
        }
        Ok(())
    }
}

struct NoopAnalytics;

#[async_trait]
impl AnalyticsApi for NoopAnalytics {
    async fn track(&self, _event: &AnalyticsEvent) -> crate::Result<()> {
        Ok(())
    }
}

struct FakeFlow {
    calls: Arc<Mutex<Vec<(OAuthProvider, OAuthState)>>>,
    result: Result<Option<String>, String>,
}

#[async_trait]
impl OAuthFlow for FakeFlow {
    async fn authenticate(
        &self,
        provider: OAuthProvider,
        state: OAuthState,
        _analytics: &dyn AnalyticsApi,
    ) -> crate::Result<OAuthCompletion> {
        self.calls.lock().unwrap().push((provider, state));
        match &self.result {
            Ok(token) => Ok(OAuthCompletion {
                token: token.clone(),
            }),
            Err(message) => Err(http_error(message)),
        }
    }
}

pub struct FakeClients {
    pub billing_calls: Arc<Mutex<Vec<BillingCall>>>,
    pub billing_fails: bool,
    pub billing_client_fails: bool,
    pub analytics_client_fails: bool,
    pub oauth_calls: Arc<Mutex<Vec<(OAuthProvider, OAuthState)>>>,
    pub oauth_result: Result<Option<String>, String>,
}

impl Default for FakeClients {
    fn default() -> Self {
        Self {
            billing_calls: Arc::default(),
            billing_fails: false,
            billing_client_fails: false,
            analytics_client_fails: false,
            oauth_calls: Arc::default(),
            oauth_result: Ok(Some("fresh-token".to_string())),
        }
    }
}

impl FakeClients {
    pub fn billing_calls(&self) -> Vec<BillingCall> {
        self.billing_calls.lock().unwrap().clone()
    }

    pub fn oauth_calls(&self) -> Vec<(OAuthProvider, OAuthState)> {
        self.oauth_calls.lock().unwrap().clone()
    }
}

impl ClientFactory for FakeClients {
    fn billing(&self, _config: &Config, _session: &Session) -> crate::Result<Box<dyn BillingApi>> {
        if self.billing_client_fails {
            return Err(http_error("no billing endpoint"));
        }
        Ok(Box::new(FakeBilling {
            calls: Arc::clone(&self.billing_calls),
            fail: self.billing_fails,
        }))
    }

    fn analytics(&self, _config: &Config) -> crate::Result<Box<dyn AnalyticsApi>> {
        if self.analytics_client_fails {
            return Err(http_error("no analytics endpoint"));
        }
        Ok(Box::new(NoopAnalytics))
    }

    fn oauth(&self, _config: &Config, _session: &Session) -> crate::Result<Box<dyn OAuthFlow>> {
        Ok(Box::new(FakeFlow {
            calls: Arc::clone(&self.oauth_calls),
            result: self.oauth_result.clone(),
        }))
    }
}

pub fn collaborators<'a>(
    config: &'a FakeConfig,
    sessions: &'a FakeSessions,
    prompter: &'a FakePrompter,
    clients: &'a FakeClients,
) -> Collaborators<'a> {
    Collaborators {
        config,
        sessions,
        prompter,
        clients,
    }
}
