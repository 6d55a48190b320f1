use crate::cli::main_types::{BillingCommands, OAuthArgs};
use crate::core::identity::TeamArgs;
use crate::core::services::billing_service::BillingService;
use crate::core::services::oauth_service::OAuthService;
use crate::core::services::{Collaborators, Outcome};
use crate::error::AppError;
use crate::utils::logging::print_verbose;

#[derive(Default)]
pub struct BillingHandler;

impl BillingHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: BillingCommands,
        deps: Collaborators<'_>,
        verbose: bool,
    ) -> Result<Outcome, AppError> {
        let service = BillingService::new(deps);
        match command {
            BillingCommands::Add(flags) => {
                print_verbose(verbose, "Attempting billing add command");
                service.add(&TeamArgs::from(&flags)).await
            }
            BillingCommands::Update(flags) => {
                print_verbose(verbose, "Attempting billing update command");
                service.update(&TeamArgs::from(&flags)).await
            }
        }
    }
}

#[derive(Default)]
pub struct OAuthHandler;

impl OAuthHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        args: OAuthArgs,
        deps: Collaborators<'_>,
        verbose: bool,
    ) -> Result<Outcome, AppError> {
        let provider = args.provider();
        match provider {
            Some(p) => print_verbose(
                verbose,
                &format!("Attempting oauth command with {}", p.display_name()),
            ),
            None => print_verbose(verbose, "Attempting oauth command without a provider"),
        }
        OAuthService::new(deps).authenticate(provider).await
    }
}
