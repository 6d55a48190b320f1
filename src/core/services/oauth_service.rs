use super::traits::Collaborators;
use super::types::{OAuthProvider, OAuthState, Outcome};
use crate::error::{AuthError, CliError, PromptError, Stage, StageContext};

pub const LINKED_OK: &str = "Your Manifold account is now linked";
pub const LOGGED_IN: &str = "You are logged in, hooray!";
pub const MISSING_MECHANISM: &str = "You must provide an authentication mechanism";

/// Logs in, registers, or links an account through a third party identity provider
pub struct OAuthService<'a> {
    deps: Collaborators<'a>,
}

impl<'a> OAuthService<'a> {
    pub fn new(deps: Collaborators<'a>) -> Self {
        Self { deps }
    }

    /// `oauth`: link when a session is active, otherwise log in.
    ///
    /// A missing provider is a usage error raised before configuration or
    /// session access.
    pub async fn authenticate(&self, provider: Option<OAuthProvider>) -> crate::Result<Outcome> {
        let Some(provider) = provider else {
            return Err(CliError::Usage {
                command: "oauth".to_string(),
                message: MISSING_MECHANISM.to_string(),
            }
            .into());
        };

        let config = self.deps.config.load().stage(Stage::LoadConfig)?;
        let analytics = self
            .deps
            .clients
            .analytics(&config)
            .stage(Stage::AnalyticsClient)?;

        let session = self
            .deps
            .sessions
            .retrieve(&config)
            .await
            .stage(Stage::RetrieveSession)?;

        if session.is_authenticated() {
            let question = format!(
                "Do you wish to link your {} account to Manifold",
                provider.display_name()
            );
            let confirmed = self
                .deps
                .prompter
                .confirm(&question)
                .stage(Stage::ConfirmLink)?;
            if !confirmed {
                return Err(PromptError::Aborted).stage(Stage::ConfirmLink);
            }

            let flow = self
                .deps
                .clients
                .oauth(&config, &session)
                .stage(Stage::LinkAccounts)?;
            flow.authenticate(provider, OAuthState::Link, analytics.as_ref())
                .await
                .stage(Stage::LinkAccounts)?;

            return Ok(Outcome::Linked(LINKED_OK.to_string()));
        }

        let flow = self
            .deps
            .clients
            .oauth(&config, &session)
            .stage(Stage::OAuthLogin)?;
        let completion = flow
            .authenticate(provider, OAuthState::Login, analytics.as_ref())
            .await
            .stage(Stage::OAuthLogin)?;

        let Some(token) = completion.token else {
            return Err(AuthError::ProviderRejected {
                reason: "no session token was issued".to_string(),
            })
            .stage(Stage::OAuthLogin);
        };
        self.deps
            .sessions
            .store_token(&token)
            .stage(Stage::OAuthLogin)?;

        Ok(Outcome::Completed(LOGGED_IN.to_string()))
    }
}
