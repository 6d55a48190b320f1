use super::traits::Collaborators;
use super::types::{CardToken, Outcome};
use crate::api::models::{ProfileCreateRequest, ProfileUpdateRequest};
use crate::core::identity::{Actor, Id, TeamArgs};
use crate::core::session::Session;
use crate::error::{AuthError, Stage, StageContext};
use crate::storage::config::Config;

pub const BILLING_SAVED: &str = "Your billing info has been saved.";

/// Acting user, their session and the freshly tokenized card.
struct Tokenized {
    session: Session,
    user_id: Id,
    token: CardToken,
}

/// Adds or replaces the payment credential of the current user or a team
pub struct BillingService<'a> {
    deps: Collaborators<'a>,
}

impl<'a> BillingService<'a> {
    pub fn new(deps: Collaborators<'a>) -> Self {
        Self { deps }
    }

    /// `billing add`: create a billing profile for the user or the selected team
    pub async fn add(&self, team: &TeamArgs) -> crate::Result<Outcome> {
        let config = self.deps.config.load().stage(Stage::LoadConfig)?;
        let team_id = team.team_id(&config)?;

        let tokenized = self.input_and_tokenize(&config).await?;

        let client = self
            .deps
            .clients
            .billing(&config, &tokenized.session)
            .stage(Stage::BillingClient)?;

        let owner = Actor::resolve(&team_id, &tokenized.user_id);
        log::debug!("Creating billing profile for {:?}", owner);
        let request = ProfileCreateRequest::new(tokenized.token.id, owner);
        client
            .create_profile(&request)
            .await
            .stage(Stage::AddProfile)?;

        Ok(Outcome::Completed(BILLING_SAVED.to_string()))
    }

    /// `billing update`: replace the card on the profile of the user or the selected team
    pub async fn update(&self, team: &TeamArgs) -> crate::Result<Outcome> {
        let config = self.deps.config.load().stage(Stage::LoadConfig)?;
        let team_id = team.team_id(&config)?;

        let tokenized = self.input_and_tokenize(&config).await?;

        let client = self
            .deps
            .clients
            .billing(&config, &tokenized.session)
            .stage(Stage::BillingClient)?;

        let owner = Actor::resolve(&team_id, &tokenized.user_id);
        log::debug!("Updating billing profile {}", owner.id());
        let request = ProfileUpdateRequest {
            token: tokenized.token.id,
        };
        client
            .update_profile(owner.id(), &request)
            .await
            .stage(Stage::UpdateProfile)?;

        Ok(Outcome::Completed(BILLING_SAVED.to_string()))
    }

    async fn input_and_tokenize(&self, config: &Config) -> crate::Result<Tokenized> {
        let session = self
            .deps
            .sessions
            .retrieve(config)
            .await
            .stage(Stage::RetrieveSession)?;

        let Some(user) = session.user() else {
            return Err(AuthError::MustLogin.into());
        };
        let user_id = user.id.clone();

        let token = self
            .deps
            .prompter
            .tokenize_card(config)
            .await
            .stage(Stage::Tokenize)?;

        Ok(Tokenized {
            session,
            user_id,
            token,
        })
    }
}
